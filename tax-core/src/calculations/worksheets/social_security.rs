//! Social Security Benefits Worksheet (Form 1040 instructions, lines 6a/6b).
//!
//! Up to 50% of benefits become taxable once provisional income passes the
//! base amount, and up to 85% once it passes the adjusted base amount.
//! Married filing separately has both amounts at zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::{FilingStatus, SocialSecurityThresholds};

const HALF: Decimal = dec!(0.5);
const EIGHTY_FIVE_PERCENT: Decimal = dec!(0.85);

#[derive(Debug, Clone)]
pub struct SocialSecurityWorksheet<'a> {
    thresholds: &'a SocialSecurityThresholds,
}

impl<'a> SocialSecurityWorksheet<'a> {
    pub fn new(thresholds: &'a SocialSecurityThresholds) -> Self {
        Self { thresholds }
    }

    /// Taxable portion of `benefits`.
    ///
    /// * `other_income` - total income excluding Social Security (line 3)
    /// * `tax_exempt_interest` - line 4
    /// * `adjustments` - Schedule 1 adjustments other than student loan
    ///   interest (line 6)
    pub fn taxable_benefits(
        &self,
        status: FilingStatus,
        benefits: Decimal,
        other_income: Decimal,
        tax_exempt_interest: Decimal,
        adjustments: Decimal,
    ) -> Decimal {
        if benefits <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let half_benefits = benefits * HALF;
        let provisional = half_benefits + other_income + tax_exempt_interest - adjustments;
        let base = *self.thresholds.base_amount.get(status);
        let adjusted_base = *self.thresholds.adjusted_base_amount.get(status);

        let over_base = non_negative(provisional - base);
        if over_base.is_zero() {
            return Decimal::ZERO;
        }

        let band = non_negative(adjusted_base - base);
        let over_adjusted = non_negative(over_base - band);
        let within_band = over_base.min(band);
        let fifty_percent_tier = (within_band * HALF).min(half_benefits);
        let tentative = fifty_percent_tier + over_adjusted * EIGHTY_FIVE_PERCENT;
        let taxable = tentative.min(benefits * EIGHTY_FIVE_PERCENT);

        debug!(%provisional, %taxable, "taxable social security computed");
        taxable
    }
}

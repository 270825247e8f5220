//! Qualified Dividends and Capital Gain Tax Worksheet.
//!
//! Qualified dividends and net long-term gains are stacked on top of
//! ordinary income and taxed at 0%, 15% or 20% depending on which band of
//! taxable income they fall into. The result never exceeds the regular
//! schedule tax on the whole amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::non_negative;
use crate::{BracketSchedule, CapitalGainsThresholds, FilingStatus};

const FIFTEEN_PERCENT: Decimal = dec!(0.15);
const TWENTY_PERCENT: Decimal = dec!(0.20);

#[derive(Debug, Clone)]
pub struct CapitalGainsWorksheet<'a> {
    schedule: &'a BracketSchedule,
    thresholds: &'a CapitalGainsThresholds,
    status: FilingStatus,
}

impl<'a> CapitalGainsWorksheet<'a> {
    pub fn new(
        schedule: &'a BracketSchedule,
        thresholds: &'a CapitalGainsThresholds,
        status: FilingStatus,
    ) -> Self {
        Self {
            schedule,
            thresholds,
            status,
        }
    }

    /// Tax on `taxable_income` of which `preferential_income` (qualified
    /// dividends plus net capital gain) gets the reduced rates. Unrounded.
    pub fn tax(
        &self,
        taxable_income: Decimal,
        preferential_income: Decimal,
    ) -> Decimal {
        let taxable_income = non_negative(taxable_income);
        let preferential = non_negative(preferential_income).min(taxable_income);
        if preferential.is_zero() {
            return self.schedule.tax_on(taxable_income);
        }

        let ordinary = taxable_income - preferential;
        let zero_max = *self.thresholds.zero_rate_max.get(self.status);
        let fifteen_max = *self.thresholds.fifteen_rate_max.get(self.status);

        let zero_band_top = taxable_income.min(zero_max);
        let at_zero = non_negative(zero_band_top - ordinary).min(preferential);

        let fifteen_band_top = taxable_income.min(fifteen_max);
        let at_fifteen =
            non_negative(fifteen_band_top - ordinary.max(zero_band_top)).min(preferential - at_zero);

        let at_twenty = preferential - at_zero - at_fifteen;

        let tax = self.schedule.tax_on(ordinary)
            + at_fifteen * FIFTEEN_PERCENT
            + at_twenty * TWENTY_PERCENT;

        tax.min(self.schedule.tax_on(taxable_income))
    }
}

//! Schedule SE, short form.
//!
//! Net profit is scaled by the net-earnings factor (92.35%). Medicare tax
//! applies to all of it; social security tax applies only up to the wage
//! base left over after W-2 social security wages. Half of the total is
//! deductible as an adjustment to income. Net earnings at or below the
//! filing minimum ($400) owe nothing.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxYearConfig;
//! use tax_core::calculations::SeWorksheet;
//!
//! let config = TaxYearConfig::for_year(2025).unwrap();
//! let result = SeWorksheet::new(&config.self_employment)
//!     .calculate(dec!(100000.00), dec!(50000.00))
//!     .unwrap();
//!
//! assert_eq!(result.self_employment_tax, dec!(14129.55));
//! assert_eq!(result.se_tax_deduction, dec!(7064.78));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::SelfEmploymentLimits;
use crate::calculations::common::{non_negative, round_half_up};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("self-employment {field} must be {expected}, got {value}")]
pub struct SeWorksheetError {
    pub field: &'static str,
    pub expected: &'static str,
    pub value: Decimal,
}

#[derive(Clone, Copy)]
enum Range {
    /// (0, 1]
    Factor,
    /// [0, 1]
    Rate,
    /// > 0
    Positive,
    /// >= 0
    NonNegative,
}

impl Range {
    fn contains(
        self,
        value: Decimal,
    ) -> bool {
        match self {
            Self::Factor => value > Decimal::ZERO && value <= Decimal::ONE,
            Self::Rate => value >= Decimal::ZERO && value <= Decimal::ONE,
            Self::Positive => value > Decimal::ZERO,
            Self::NonNegative => value >= Decimal::ZERO,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Factor => "greater than 0 and at most 1",
            Self::Rate => "between 0 and 1",
            Self::Positive => "positive",
            Self::NonNegative => "non-negative",
        }
    }
}

impl SelfEmploymentLimits {
    /// Checks every rate and amount, reporting the first one out of range.
    pub fn validate(&self) -> Result<(), SeWorksheetError> {
        let checks = [
            ("net earnings factor", self.net_earnings_factor, Range::Factor),
            ("social security rate", self.ss_tax_rate, Range::Rate),
            ("medicare rate", self.medicare_tax_rate, Range::Rate),
            ("deduction factor", self.deduction_factor, Range::Rate),
            ("social security wage base", self.ss_wage_max, Range::Positive),
            ("minimum net earnings", self.min_se_threshold, Range::NonNegative),
        ];

        match checks
            .into_iter()
            .find(|(_, value, range)| !range.contains(*value))
        {
            Some((field, value, range)) => Err(SeWorksheetError {
                field,
                expected: range.describe(),
                value,
            }),
            None => Ok(()),
        }
    }
}

/// Worksheet output. Every amount is rounded to cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeWorksheetResult {
    /// Net profit times the net-earnings factor.
    pub net_earnings: Decimal,
    pub medicare_tax: Decimal,
    /// Part of `net_earnings` still under the social security wage base.
    pub social_security_base: Decimal,
    pub social_security_tax: Decimal,
    pub self_employment_tax: Decimal,
    /// Deductible half, carried to the adjustments.
    pub se_tax_deduction: Decimal,
    pub exempt: bool,
}

#[derive(Debug, Clone)]
pub struct SeWorksheet<'a> {
    limits: &'a SelfEmploymentLimits,
}

impl<'a> SeWorksheet<'a> {
    pub fn new(limits: &'a SelfEmploymentLimits) -> Self {
        Self { limits }
    }

    /// `net_profit` is Schedule C net profit; `ss_wages` are W-2 wages that
    /// already used part of the social security wage base.
    ///
    /// A loss, or net earnings at or below the minimum, gives an all-zero
    /// result marked `exempt`.
    ///
    /// # Errors
    ///
    /// Returns [`SeWorksheetError`] when the limits are out of range.
    pub fn calculate(
        &self,
        net_profit: Decimal,
        ss_wages: Decimal,
    ) -> Result<SeWorksheetResult, SeWorksheetError> {
        let limits = self.limits;
        limits.validate()?;

        let exempt = SeWorksheetResult {
            exempt: true,
            ..SeWorksheetResult::default()
        };
        if net_profit <= Decimal::ZERO {
            return Ok(exempt);
        }

        let net_earnings = round_half_up(net_profit * limits.net_earnings_factor);
        if net_earnings <= limits.min_se_threshold {
            warn!(
                %net_earnings,
                minimum = %limits.min_se_threshold,
                "net earnings too small for self-employment tax"
            );
            return Ok(exempt);
        }

        let social_security_base = net_earnings.min(non_negative(limits.ss_wage_max - ss_wages));
        let medicare_tax = round_half_up(net_earnings * limits.medicare_tax_rate);
        let social_security_tax = round_half_up(social_security_base * limits.ss_tax_rate);
        let self_employment_tax = round_half_up(medicare_tax + social_security_tax);
        let se_tax_deduction = round_half_up(self_employment_tax * limits.deduction_factor);

        debug!(%net_earnings, %social_security_base, %self_employment_tax, "schedule SE");

        Ok(SeWorksheetResult {
            net_earnings,
            medicare_tax,
            social_security_base,
            social_security_tax,
            self_employment_tax,
            se_tax_deduction,
            exempt: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn limits_2025() -> SelfEmploymentLimits {
        SelfEmploymentLimits {
            ss_wage_max: dec!(176100.00),
            ss_tax_rate: dec!(0.124),
            medicare_tax_rate: dec!(0.029),
            net_earnings_factor: dec!(0.9235),
            deduction_factor: dec!(0.50),
            min_se_threshold: dec!(400.00),
        }
    }

    fn run(
        net_profit: Decimal,
        ss_wages: Decimal,
    ) -> SeWorksheetResult {
        let limits = limits_2025();
        SeWorksheet::new(&limits).calculate(net_profit, ss_wages).unwrap()
    }

    // =========================================================================
    // Limits
    // =========================================================================

    #[test]
    fn published_limits_are_valid() {
        assert_eq!(limits_2025().validate(), Ok(()));
    }

    #[test]
    fn zero_net_earnings_factor_is_rejected() {
        let limits = SelfEmploymentLimits {
            net_earnings_factor: dec!(0),
            ..limits_2025()
        };

        let err = limits.validate().unwrap_err();

        assert_eq!(err.field, "net earnings factor");
        assert_eq!(err.value, dec!(0));
    }

    #[test]
    fn negative_wage_base_is_rejected_with_message() {
        let limits = SelfEmploymentLimits {
            ss_wage_max: dec!(-1000.00),
            ..limits_2025()
        };

        let err = limits.validate().unwrap_err();

        assert_eq!(
            err.to_string(),
            "self-employment social security wage base must be positive, got -1000.00"
        );
    }

    #[test]
    fn invalid_limits_stop_the_worksheet() {
        let limits = SelfEmploymentLimits {
            medicare_tax_rate: dec!(2.9),
            ..limits_2025()
        };

        let err = SeWorksheet::new(&limits)
            .calculate(dec!(100000), dec!(0))
            .unwrap_err();

        assert_eq!(err.field, "medicare rate");
    }

    // =========================================================================
    // Tax
    // =========================================================================

    #[test]
    fn full_wage_base_available() {
        let result = run(dec!(100000.00), dec!(0));

        // 92,350 at 2.9% and 12.4%
        assert_eq!(result.net_earnings, dec!(92350.00));
        assert_eq!(result.medicare_tax, dec!(2678.15));
        assert_eq!(result.social_security_tax, dec!(11451.40));
        assert_eq!(result.self_employment_tax, dec!(14129.55));
        assert_eq!(result.se_tax_deduction, dec!(7064.78));
        assert!(!result.exempt);
    }

    #[test]
    fn wages_shrink_the_social_security_base() {
        let result = run(dec!(100000.00), dec!(150000.00));

        assert_eq!(result.social_security_base, dec!(26100.00));
        assert_eq!(result.social_security_tax, dec!(3236.40));
        assert_eq!(result.medicare_tax, dec!(2678.15));
    }

    #[test]
    fn wages_over_the_base_leave_medicare_only() {
        let result = run(dec!(50000.00), dec!(200000.00));

        assert_eq!(result.social_security_base, dec!(0));
        assert_eq!(result.self_employment_tax, result.medicare_tax);
    }

    #[test]
    fn earnings_at_the_minimum_are_exempt() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        // 433 × 0.9235 = 399.88
        let result = run(dec!(433), dec!(0));

        assert!(result.exempt);
        assert_eq!(result.self_employment_tax, dec!(0));
        assert_eq!(result.se_tax_deduction, dec!(0));
    }

    #[test]
    fn loss_is_exempt() {
        assert!(run(dec!(-5000), dec!(0)).exempt);
    }
}

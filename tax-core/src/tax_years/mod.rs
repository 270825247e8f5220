//! Built-in federal tax-year tables.
//!
//! Each supported year is built once, on first use, and shared by
//! reference for the life of the process. Asking for a year that is not
//! listed here is a configuration error; there is no fallback to a nearby
//! year's numbers.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ConfigError;
use crate::models::{
    ByFilingStatus, DependentCareLimits, ElderlyDisabledLimits, SocialSecurityThresholds,
    TaxYearConfig,
};

mod y2024;
mod y2025;

static TAX_YEAR_2024: LazyLock<TaxYearConfig> = LazyLock::new(y2024::config);
static TAX_YEAR_2025: LazyLock<TaxYearConfig> = LazyLock::new(y2025::config);

/// Years with a built-in configuration, ascending.
pub const SUPPORTED_TAX_YEARS: [i32; 2] = [2024, 2025];

impl TaxYearConfig {
    /// The built-in configuration for `year`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedTaxYear`] when the year has no table.
    ///
    /// ```
    /// use tax_core::{ConfigError, TaxYearConfig};
    ///
    /// assert_eq!(TaxYearConfig::for_year(2025).unwrap().tax_year, 2025);
    /// assert_eq!(
    ///     TaxYearConfig::for_year(1999).unwrap_err(),
    ///     ConfigError::UnsupportedTaxYear(1999)
    /// );
    /// ```
    pub fn for_year(year: i32) -> Result<&'static TaxYearConfig, ConfigError> {
        match year {
            2024 => Ok(&*TAX_YEAR_2024),
            2025 => Ok(&*TAX_YEAR_2025),
            other => Err(ConfigError::UnsupportedTaxYear(other)),
        }
    }

    pub fn supported_years() -> &'static [i32] {
        &SUPPORTED_TAX_YEARS
    }
}

// Tables that are set by statute rather than indexed. Shared by every year.

fn social_security_thresholds() -> SocialSecurityThresholds {
    SocialSecurityThresholds {
        base_amount: ByFilingStatus {
            single: dec!(25000),
            married_filing_jointly: dec!(32000),
            married_filing_separately: Decimal::ZERO,
            head_of_household: dec!(25000),
            qualifying_surviving_spouse: dec!(25000),
        },
        adjusted_base_amount: ByFilingStatus {
            single: dec!(34000),
            married_filing_jointly: dec!(44000),
            married_filing_separately: Decimal::ZERO,
            head_of_household: dec!(34000),
            qualifying_surviving_spouse: dec!(34000),
        },
    }
}

fn dependent_care_limits() -> DependentCareLimits {
    DependentCareLimits {
        max_expenses_one: dec!(3000),
        max_expenses_two_or_more: dec!(6000),
        max_rate: dec!(0.35),
        min_rate: dec!(0.20),
        agi_threshold: dec!(15000),
        agi_step: dec!(2000),
        rate_step: dec!(0.01),
    }
}

fn elderly_disabled_limits() -> ElderlyDisabledLimits {
    ElderlyDisabledLimits {
        rate: dec!(0.15),
        initial_amount_single: dec!(5000),
        initial_amount_joint_one: dec!(5000),
        initial_amount_joint_both: dec!(7500),
        initial_amount_separate: dec!(3750),
        agi_threshold: ByFilingStatus {
            single: dec!(7500),
            married_filing_jointly: dec!(10000),
            married_filing_separately: dec!(5000),
            head_of_household: dec!(7500),
            qualifying_surviving_spouse: dec!(7500),
        },
    }
}

fn child_tax_credit_thresholds() -> ByFilingStatus<Decimal> {
    ByFilingStatus::new(dec!(200000), dec!(400000), dec!(200000), dec!(200000))
}

fn clean_vehicle_new_limits() -> ByFilingStatus<Decimal> {
    ByFilingStatus::new(dec!(150000), dec!(300000), dec!(150000), dec!(225000))
}

fn clean_vehicle_used_limits() -> ByFilingStatus<Decimal> {
    ByFilingStatus::new(dec!(75000), dec!(150000), dec!(75000), dec!(112500))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::FilingStatus;

    #[test]
    fn every_supported_year_resolves() {
        for year in TaxYearConfig::supported_years() {
            assert_eq!(TaxYearConfig::for_year(*year).map(|c| c.tax_year), Ok(*year));
        }
    }

    #[test]
    fn unsupported_year_is_configuration_error() {
        assert_eq!(
            TaxYearConfig::for_year(2023),
            Err(ConfigError::UnsupportedTaxYear(2023))
        );
    }

    #[test]
    fn built_in_tables_are_valid() {
        for year in TaxYearConfig::supported_years() {
            let config = TaxYearConfig::for_year(*year).unwrap();
            assert_eq!(config.validate(), Ok(()), "year {year}");
        }
    }

    #[test]
    fn same_year_returns_same_instance() {
        let a = TaxYearConfig::for_year(2025).unwrap();
        let b = TaxYearConfig::for_year(2025).unwrap();

        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn surviving_spouse_uses_joint_brackets() {
        let config = TaxYearConfig::for_year(2025).unwrap();

        assert_eq!(
            config.brackets.get(FilingStatus::QualifyingSurvivingSpouse),
            config.brackets.get(FilingStatus::MarriedFilingJointly)
        );
    }

    #[test]
    fn with_brackets_rejects_invalid_schedule() {
        let config = TaxYearConfig::for_year(2025).unwrap();
        let mut brackets = config.brackets.clone();
        *brackets.get_mut(FilingStatus::HeadOfHousehold) = crate::BracketSchedule::default();

        assert_eq!(
            config.with_brackets(brackets),
            Err(ConfigError::MissingBrackets {
                tax_year: 2025,
                filing_status: FilingStatus::HeadOfHousehold,
            })
        );
    }
}

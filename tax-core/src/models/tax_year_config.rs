use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BracketSchedule, ByFilingStatus, StandardDeduction};
use crate::error::ConfigError;

/// Every year-specific constant the federal engine reads.
///
/// Built-in years are constructed once and shared by reference (see
/// [`TaxYearConfig::for_year`]); nothing mutates a configuration after it
/// has been handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub brackets: ByFilingStatus<BracketSchedule>,
    pub standard_deduction: StandardDeduction,
    pub capital_gains: CapitalGainsThresholds,
    pub self_employment: SelfEmploymentLimits,
    pub social_security: SocialSecurityThresholds,
    pub deductions: DeductionLimits,
    pub adjustments: AdjustmentLimits,
    pub child_tax_credit: ChildTaxCreditLimits,
    pub earned_income_credit: EarnedIncomeCreditTable,
    pub dependent_care: DependentCareLimits,
    pub education: EducationCreditLimits,
    pub adoption: AdoptionCreditLimits,
    pub clean_vehicle: CleanVehicleLimits,
    pub elderly_disabled: ElderlyDisabledLimits,
}

/// Breakpoints of the 0% / 15% / 20% rates on qualified dividends and
/// long-term gains. Each value is the top of the taxable-income band taxed
/// at the lower rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsThresholds {
    pub zero_rate_max: ByFilingStatus<Decimal>,
    pub fifteen_rate_max: ByFilingStatus<Decimal>,
    /// Net capital loss deductible against ordinary income.
    pub loss_limit: Decimal,
    pub loss_limit_separate: Decimal,
}

/// Inputs to the self-employment tax worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentLimits {
    pub ss_wage_max: Decimal,
    pub ss_tax_rate: Decimal,
    pub medicare_tax_rate: Decimal,
    pub net_earnings_factor: Decimal,
    pub deduction_factor: Decimal,
    pub min_se_threshold: Decimal,
}

/// Base amounts of the Social Security benefits worksheet. These are not
/// inflation-indexed but live here so a year can override them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityThresholds {
    pub base_amount: ByFilingStatus<Decimal>,
    pub adjusted_base_amount: ByFilingStatus<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLimits {
    pub salt_cap: Decimal,
    pub salt_cap_separate: Decimal,
    /// Medical expenses are deductible above this share of AGI.
    pub medical_agi_floor: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentLimits {
    pub educator_expense_max: Decimal,
    pub hsa_self_only: Decimal,
    pub hsa_family: Decimal,
    pub hsa_catch_up: Decimal,
    pub hsa_catch_up_age: u32,
    pub ira_max: Decimal,
    pub ira_catch_up: Decimal,
    pub ira_catch_up_age: u32,
    pub student_loan_interest_max: Decimal,
    pub student_loan_phaseout_start: ByFilingStatus<Decimal>,
    pub student_loan_phaseout_range: ByFilingStatus<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaxCreditLimits {
    pub per_child: Decimal,
    pub per_other_dependent: Decimal,
    /// Children must be younger than this at year end.
    pub child_age_limit: u32,
    pub refundable_max_per_child: Decimal,
    pub refundable_earned_income_floor: Decimal,
    pub refundable_rate: Decimal,
    pub phaseout_threshold: ByFilingStatus<Decimal>,
    pub phaseout_step: Decimal,
    pub phaseout_reduction_per_step: Decimal,
}

/// One column of the EITC table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedIncomeCreditParams {
    pub credit_rate: Decimal,
    pub earned_income_amount: Decimal,
    pub max_credit: Decimal,
    pub phaseout_rate: Decimal,
    pub phaseout_start: Decimal,
    pub phaseout_start_joint: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedIncomeCreditTable {
    /// Indexed by qualifying children: 0, 1, 2, 3 or more.
    pub by_children: [EarnedIncomeCreditParams; 4],
    pub investment_income_limit: Decimal,
    pub childless_min_age: u32,
    pub childless_max_age: u32,
}

impl EarnedIncomeCreditTable {
    pub fn params(
        &self,
        qualifying_children: usize,
    ) -> &EarnedIncomeCreditParams {
        &self.by_children[qualifying_children.min(3)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentCareLimits {
    pub max_expenses_one: Decimal,
    pub max_expenses_two_or_more: Decimal,
    pub max_rate: Decimal,
    pub min_rate: Decimal,
    pub agi_threshold: Decimal,
    pub agi_step: Decimal,
    pub rate_step: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationCreditLimits {
    pub aotc_full_rate_expenses: Decimal,
    pub aotc_partial_rate_expenses: Decimal,
    pub aotc_partial_rate: Decimal,
    pub aotc_refundable_share: Decimal,
    pub llc_max_expenses: Decimal,
    pub llc_rate: Decimal,
    pub phaseout_start: ByFilingStatus<Decimal>,
    pub phaseout_range: ByFilingStatus<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionCreditLimits {
    pub max_per_child: Decimal,
    pub phaseout_start: Decimal,
    pub phaseout_range: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanVehicleLimits {
    pub new_vehicle_max: Decimal,
    pub new_vehicle_magi_limit: ByFilingStatus<Decimal>,
    pub used_vehicle_max: Decimal,
    pub used_vehicle_rate: Decimal,
    pub used_vehicle_price_cap: Decimal,
    pub used_vehicle_magi_limit: ByFilingStatus<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElderlyDisabledLimits {
    pub rate: Decimal,
    pub initial_amount_single: Decimal,
    pub initial_amount_joint_one: Decimal,
    pub initial_amount_joint_both: Decimal,
    pub initial_amount_separate: Decimal,
    pub agi_threshold: ByFilingStatus<Decimal>,
}

impl TaxYearConfig {
    /// Checks every bracket schedule and the self-employment limits.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingBrackets`] for an empty schedule,
    /// [`ConfigError::InvalidBrackets`] for a malformed one and
    /// [`ConfigError::InvalidLimits`] for out-of-range SE rates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (filing_status, schedule) in self.brackets.iter() {
            if schedule.is_empty() {
                return Err(ConfigError::MissingBrackets {
                    tax_year: self.tax_year,
                    filing_status,
                });
            }
            schedule
                .validate()
                .map_err(|reason| ConfigError::InvalidBrackets {
                    tax_year: self.tax_year,
                    filing_status,
                    reason,
                })?;
        }
        self.self_employment
            .validate()
            .map_err(|e| ConfigError::InvalidLimits {
                tax_year: self.tax_year,
                reason: e.to_string(),
            })
    }

    /// A copy of this configuration with the federal rate schedules
    /// replaced, e.g. by tables loaded from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns the first schedule problem found by [`Self::validate`].
    pub fn with_brackets(
        &self,
        brackets: ByFilingStatus<BracketSchedule>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            brackets,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }
}

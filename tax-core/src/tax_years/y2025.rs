//! Tax year 2025 (Rev. Proc. 2024-40).

use rust_decimal_macros::dec;

use super::{
    child_tax_credit_thresholds, clean_vehicle_new_limits, clean_vehicle_used_limits,
    dependent_care_limits, elderly_disabled_limits, social_security_thresholds,
};
use crate::models::{
    AdjustmentLimits, AdoptionCreditLimits, BracketSchedule, ByFilingStatus,
    CapitalGainsThresholds, ChildTaxCreditLimits, CleanVehicleLimits, DeductionLimits,
    EarnedIncomeCreditParams, EarnedIncomeCreditTable, EducationCreditLimits,
    SelfEmploymentLimits, StandardDeduction, TaxYearConfig,
};

pub(super) fn config() -> TaxYearConfig {
    let single = BracketSchedule::from_pairs(&[
        (dec!(0), dec!(0.10)),
        (dec!(11925), dec!(0.12)),
        (dec!(48475), dec!(0.22)),
        (dec!(103350), dec!(0.24)),
        (dec!(197300), dec!(0.32)),
        (dec!(250525), dec!(0.35)),
        (dec!(626350), dec!(0.37)),
    ]);
    let joint = BracketSchedule::from_pairs(&[
        (dec!(0), dec!(0.10)),
        (dec!(23850), dec!(0.12)),
        (dec!(96950), dec!(0.22)),
        (dec!(206700), dec!(0.24)),
        (dec!(394600), dec!(0.32)),
        (dec!(501050), dec!(0.35)),
        (dec!(751600), dec!(0.37)),
    ]);
    let separate = BracketSchedule::from_pairs(&[
        (dec!(0), dec!(0.10)),
        (dec!(11925), dec!(0.12)),
        (dec!(48475), dec!(0.22)),
        (dec!(103350), dec!(0.24)),
        (dec!(197300), dec!(0.32)),
        (dec!(250525), dec!(0.35)),
        (dec!(375800), dec!(0.37)),
    ]);
    let head_of_household = BracketSchedule::from_pairs(&[
        (dec!(0), dec!(0.10)),
        (dec!(17000), dec!(0.12)),
        (dec!(64850), dec!(0.22)),
        (dec!(103350), dec!(0.24)),
        (dec!(197300), dec!(0.32)),
        (dec!(250500), dec!(0.35)),
        (dec!(626350), dec!(0.37)),
    ]);

    TaxYearConfig {
        tax_year: 2025,
        brackets: ByFilingStatus::new(single, joint, separate, head_of_household),
        standard_deduction: StandardDeduction {
            base: ByFilingStatus::new(dec!(15000), dec!(30000), dec!(15000), dec!(22500)),
            additional_married: dec!(1600),
            additional_unmarried: dec!(2000),
        },
        capital_gains: CapitalGainsThresholds {
            zero_rate_max: ByFilingStatus::new(
                dec!(48350),
                dec!(96700),
                dec!(48350),
                dec!(64750),
            ),
            fifteen_rate_max: ByFilingStatus::new(
                dec!(533400),
                dec!(600050),
                dec!(300000),
                dec!(566700),
            ),
            loss_limit: dec!(3000),
            loss_limit_separate: dec!(1500),
        },
        self_employment: SelfEmploymentLimits {
            ss_wage_max: dec!(176100),
            ss_tax_rate: dec!(0.124),
            medicare_tax_rate: dec!(0.029),
            net_earnings_factor: dec!(0.9235),
            deduction_factor: dec!(0.50),
            min_se_threshold: dec!(400),
        },
        social_security: social_security_thresholds(),
        deductions: DeductionLimits {
            salt_cap: dec!(10000),
            salt_cap_separate: dec!(5000),
            medical_agi_floor: dec!(0.075),
        },
        adjustments: AdjustmentLimits {
            educator_expense_max: dec!(300),
            hsa_self_only: dec!(4300),
            hsa_family: dec!(8550),
            hsa_catch_up: dec!(1000),
            hsa_catch_up_age: 55,
            ira_max: dec!(7000),
            ira_catch_up: dec!(1000),
            ira_catch_up_age: 50,
            student_loan_interest_max: dec!(2500),
            student_loan_phaseout_start: ByFilingStatus::single_joint(dec!(85000), dec!(170000)),
            student_loan_phaseout_range: ByFilingStatus::single_joint(dec!(15000), dec!(30000)),
        },
        child_tax_credit: ChildTaxCreditLimits {
            per_child: dec!(2000),
            per_other_dependent: dec!(500),
            child_age_limit: 17,
            refundable_max_per_child: dec!(1700),
            refundable_earned_income_floor: dec!(2500),
            refundable_rate: dec!(0.15),
            phaseout_threshold: child_tax_credit_thresholds(),
            phaseout_step: dec!(1000),
            phaseout_reduction_per_step: dec!(50),
        },
        earned_income_credit: EarnedIncomeCreditTable {
            by_children: [
                EarnedIncomeCreditParams {
                    credit_rate: dec!(0.0765),
                    earned_income_amount: dec!(8490),
                    max_credit: dec!(649),
                    phaseout_rate: dec!(0.0765),
                    phaseout_start: dec!(10620),
                    phaseout_start_joint: dec!(17730),
                },
                EarnedIncomeCreditParams {
                    credit_rate: dec!(0.34),
                    earned_income_amount: dec!(12730),
                    max_credit: dec!(4328),
                    phaseout_rate: dec!(0.1598),
                    phaseout_start: dec!(23350),
                    phaseout_start_joint: dec!(30470),
                },
                EarnedIncomeCreditParams {
                    credit_rate: dec!(0.40),
                    earned_income_amount: dec!(17880),
                    max_credit: dec!(7152),
                    phaseout_rate: dec!(0.2106),
                    phaseout_start: dec!(23350),
                    phaseout_start_joint: dec!(30470),
                },
                EarnedIncomeCreditParams {
                    credit_rate: dec!(0.45),
                    earned_income_amount: dec!(17880),
                    max_credit: dec!(8046),
                    phaseout_rate: dec!(0.2106),
                    phaseout_start: dec!(23350),
                    phaseout_start_joint: dec!(30470),
                },
            ],
            investment_income_limit: dec!(11950),
            childless_min_age: 25,
            childless_max_age: 64,
        },
        dependent_care: dependent_care_limits(),
        education: EducationCreditLimits {
            aotc_full_rate_expenses: dec!(2000),
            aotc_partial_rate_expenses: dec!(2000),
            aotc_partial_rate: dec!(0.25),
            aotc_refundable_share: dec!(0.40),
            llc_max_expenses: dec!(10000),
            llc_rate: dec!(0.20),
            phaseout_start: ByFilingStatus::single_joint(dec!(80000), dec!(160000)),
            phaseout_range: ByFilingStatus::single_joint(dec!(10000), dec!(20000)),
        },
        adoption: AdoptionCreditLimits {
            max_per_child: dec!(17280),
            phaseout_start: dec!(259190),
            phaseout_range: dec!(40000),
        },
        clean_vehicle: CleanVehicleLimits {
            new_vehicle_max: dec!(7500),
            new_vehicle_magi_limit: clean_vehicle_new_limits(),
            used_vehicle_max: dec!(4000),
            used_vehicle_rate: dec!(0.30),
            used_vehicle_price_cap: dec!(25000),
            used_vehicle_magi_limit: clean_vehicle_used_limits(),
        },
        elderly_disabled: elderly_disabled_limits(),
    }
}

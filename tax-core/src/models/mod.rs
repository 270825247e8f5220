mod credits;
mod deductions;
mod federal_calculation;
mod filing_status;
mod income;
mod standard_deduction;
mod tax_bracket;
mod tax_return;
mod tax_year_config;
mod taxpayer;

pub use credits::{
    CleanVehiclePurchase, EducationCreditKind, EducationExpense, ElderlyDisabledClaim,
    TaxCredits, VehicleCondition,
};
pub use deductions::{Adjustments, DeductionMethod, Deductions, ItemizedDeductions};
pub use federal_calculation::{
    AdjustmentsBreakdown, Credit, CreditSummary, FederalCalculation, IncomeBreakdown,
};
pub use filing_status::{ByFilingStatus, FilingStatus};
pub use income::{Income, Owner, W2};
pub use standard_deduction::StandardDeduction;
pub use tax_bracket::{BracketSchedule, TaxBracket};
pub use tax_return::TaxReturn;
pub use tax_year_config::{
    AdjustmentLimits, AdoptionCreditLimits, CapitalGainsThresholds, ChildTaxCreditLimits,
    CleanVehicleLimits, DeductionLimits, DependentCareLimits, EarnedIncomeCreditParams,
    EarnedIncomeCreditTable, EducationCreditLimits, ElderlyDisabledLimits, SelfEmploymentLimits,
    SocialSecurityThresholds, TaxYearConfig,
};
pub use taxpayer::{Dependent, Relationship, SpouseInfo, TaxpayerInfo};

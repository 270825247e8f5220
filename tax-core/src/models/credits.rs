use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationCreditKind {
    AmericanOpportunity,
    LifetimeLearning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationExpense {
    #[serde(default)]
    pub student_name: String,
    pub qualified_expenses: Decimal,
    pub credit: EducationCreditKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCondition {
    New,
    Used,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanVehiclePurchase {
    pub condition: VehicleCondition,
    pub sale_price: Decimal,
    /// Credit the manufacturer certified for a new vehicle; ignored for used.
    #[serde(default)]
    pub certified_credit: Decimal,
}

/// Schedule R inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElderlyDisabledClaim {
    pub taxpayer_disabled: bool,
    pub spouse_disabled: bool,
    /// Nontaxable pensions, annuities or disability benefits (other than
    /// Social Security, which the engine derives).
    pub nontaxable_pensions: Decimal,
}

/// Credit claims. Each credit still runs its own eligibility test; a flag
/// here only asks for it to be evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxCredits {
    pub claim_earned_income_credit: bool,
    pub claim_child_tax_credit: bool,
    pub dependent_care_expenses: Decimal,
    pub dependent_care_qualifying_persons: u32,
    pub education: Vec<EducationExpense>,
    /// Qualified adoption expenses, one entry per eligible child.
    pub adoption_expenses: Vec<Decimal>,
    pub clean_vehicle: Option<CleanVehiclePurchase>,
    pub elderly_disabled: Option<ElderlyDisabledClaim>,
    pub other_nonrefundable: Decimal,
    /// Rent paid on the main home during the year. Only state credits and
    /// deductions read it.
    pub rent_paid: Decimal,
}

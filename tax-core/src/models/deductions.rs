use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Above-the-line adjustments (Schedule 1, Part II) entered by the filer.
/// The deductible half of self-employment tax is computed, not entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// Unreimbursed classroom expenses, one entry per eligible educator.
    pub educator_expenses: Vec<Decimal>,
    pub hsa_contributions: Decimal,
    pub hsa_family_coverage: bool,
    pub ira_contributions: Decimal,
    pub student_loan_interest: Decimal,
}

/// Schedule A detail before limits are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemizedDeductions {
    pub medical_expenses: Decimal,
    pub state_local_income_taxes: Decimal,
    pub real_estate_taxes: Decimal,
    pub personal_property_taxes: Decimal,
    pub mortgage_interest: Decimal,
    pub charitable_cash: Decimal,
    pub charitable_noncash: Decimal,
    pub casualty_losses: Decimal,
    pub other: Decimal,
}

impl ItemizedDeductions {
    /// State and local taxes before the cap.
    pub fn salt_total(&self) -> Decimal {
        self.state_local_income_taxes + self.real_estate_taxes + self.personal_property_taxes
    }

    pub fn charitable_total(&self) -> Decimal {
        self.charitable_cash + self.charitable_noncash
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    pub itemized: ItemizedDeductions,
    /// Take the standard deduction even when itemizing would be larger.
    pub force_standard: bool,
    pub adjustments: Adjustments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionMethod {
    Standard,
    Itemized,
}

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::FilingStatus;

use crate::UsState;

/// The line-item result of one state calculation.
///
/// Field names are the contract reporting and export code relies on; every
/// amount is rounded to the cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCalculationBreakdown {
    pub state_code: UsState,
    pub state_name: String,
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub federal_agi: Decimal,
    pub federal_taxable_income: Decimal,
    pub starting_income: Decimal,
    pub additions: Decimal,
    pub subtractions: Decimal,
    pub state_agi: Decimal,
    pub standard_deduction: Decimal,
    pub itemized_deduction: Decimal,
    /// The larger of the two, or the standard deduction when itemizing is
    /// not allowed or the filer forced it.
    pub deduction_used: Decimal,
    pub exemptions: Decimal,
    pub taxable_income: Decimal,
    pub tax_before_credits: Decimal,
    /// Applied credits by name; nonrefundable ones are already capped.
    pub credits: BTreeMap<String, Decimal>,
    pub nonrefundable_credits: Decimal,
    pub refundable_credits: Decimal,
    pub total_credits: Decimal,
    pub local_tax: Decimal,
    /// Negative when refundable credits exceed the tax.
    pub tax_liability: Decimal,
    pub withholding: Decimal,
    /// Positive for a refund, negative for an amount owed.
    pub refund_or_owed: Decimal,
}

impl StateCalculationBreakdown {
    pub fn is_refund(&self) -> bool {
        self.refund_or_owed > Decimal::ZERO
    }

    pub fn credit(
        &self,
        name: &str,
    ) -> Decimal {
        self.credits.get(name).copied().unwrap_or(Decimal::ZERO)
    }

    /// State plus local liability as a share of federal AGI, four places.
    pub fn effective_rate(&self) -> Decimal {
        if self.federal_agi <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.tax_liability.max(Decimal::ZERO) / self.federal_agi).round_dp(4)
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ByFilingStatus, FilingStatus};

/// Standard deduction table for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeduction {
    pub base: ByFilingStatus<Decimal>,
    /// Added per 65-or-older / blind condition for married filers and
    /// surviving spouses.
    pub additional_married: Decimal,
    /// Added per condition for single filers and heads of household.
    pub additional_unmarried: Decimal,
}

impl StandardDeduction {
    /// The deduction for `status` with `conditions` age/blindness boxes
    /// checked (0 to 4).
    pub fn amount(
        &self,
        status: FilingStatus,
        conditions: u32,
    ) -> Decimal {
        let per_condition = if status.is_married() {
            self.additional_married
        } else {
            self.additional_unmarried
        };
        *self.base.get(status) + per_condition * Decimal::from(conditions)
    }
}

//! Adoption credit (Form 8839), nonrefundable.

use rust_decimal::Decimal;

use super::CreditContext;
use crate::calculations::common::phaseout_fraction;

pub fn adoption_credit(ctx: &CreditContext<'_>) -> Decimal {
    let limits = &ctx.config.adoption;
    let eligible: Decimal = ctx
        .tax_return
        .credits
        .adoption_expenses
        .iter()
        .map(|&expense| expense.max(Decimal::ZERO).min(limits.max_per_child))
        .sum();

    let fraction = phaseout_fraction(ctx.modified_agi, limits.phaseout_start, limits.phaseout_range);
    eligible * (Decimal::ONE - fraction)
}

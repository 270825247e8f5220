//! Credit for child and dependent care expenses (Form 2441).

use rust_decimal::Decimal;

use super::CreditContext;
use crate::FilingStatus;
use crate::calculations::common::phaseout_steps;

pub fn dependent_care_credit(ctx: &CreditContext<'_>) -> Decimal {
    let credits = &ctx.tax_return.credits;
    let persons = credits.dependent_care_qualifying_persons;
    if persons == 0 || credits.dependent_care_expenses <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let status = ctx.filing_status();
    // Separate filers qualify only when living apart, which is not modelled.
    if status == FilingStatus::MarriedFilingSeparately {
        return Decimal::ZERO;
    }

    let limits = &ctx.config.dependent_care;
    let cap = if persons == 1 {
        limits.max_expenses_one
    } else {
        limits.max_expenses_two_or_more
    };

    let earned_limit = if status.is_joint() {
        ctx.taxpayer_earned_income.min(ctx.spouse_earned_income)
    } else {
        ctx.earned_income
    };

    let eligible = credits
        .dependent_care_expenses
        .min(cap)
        .min(earned_limit.max(Decimal::ZERO));

    let steps = phaseout_steps(ctx.adjusted_gross_income - limits.agi_threshold, limits.agi_step);
    let rate = (limits.max_rate - steps * limits.rate_step).max(limits.min_rate);

    eligible * rate
}

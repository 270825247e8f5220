//! Credit for the elderly or disabled (Schedule R).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::CreditContext;
use crate::FilingStatus;
use crate::calculations::common::non_negative;

pub fn elderly_disabled_credit(ctx: &CreditContext<'_>) -> Decimal {
    let Some(claim) = &ctx.tax_return.credits.elderly_disabled else {
        return Decimal::ZERO;
    };

    let taxpayer = &ctx.tax_return.taxpayer;
    let status = ctx.filing_status();
    let limits = &ctx.config.elderly_disabled;

    let taxpayer_qualifies = taxpayer.is_65_or_older() || claim.taxpayer_disabled;
    let spouse_qualifies = taxpayer
        .joint_spouse()
        .is_some_and(|s| s.is_65_or_older() || claim.spouse_disabled);

    let initial_amount = match (status, taxpayer_qualifies, spouse_qualifies) {
        (_, false, false) => return Decimal::ZERO,
        (FilingStatus::MarriedFilingJointly, true, true) => limits.initial_amount_joint_both,
        (FilingStatus::MarriedFilingJointly, _, _) => limits.initial_amount_joint_one,
        (FilingStatus::MarriedFilingSeparately, _, _) => limits.initial_amount_separate,
        _ => limits.initial_amount_single,
    };

    let threshold = *limits.agi_threshold.get(status);
    let excess_agi_reduction = non_negative(ctx.adjusted_gross_income - threshold) * dec!(0.5);
    let reductions = ctx.nontaxable_social_security
        + claim.nontaxable_pensions.max(Decimal::ZERO)
        + excess_agi_reduction;

    non_negative(initial_amount - reductions) * limits.rate
}

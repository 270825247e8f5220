//! Child tax credit, credit for other dependents, and the refundable
//! additional child tax credit (Schedule 8812).

use rust_decimal::Decimal;
use tracing::debug;

use super::CreditContext;
use crate::calculations::common::{non_negative, phaseout_steps};

/// Tentative credit after the income phaseout, before the tax limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildTaxCredit {
    pub qualifying_children: usize,
    pub other_dependents: usize,
    /// Credit before the phaseout.
    pub tentative: Decimal,
    pub phaseout_reduction: Decimal,
    pub total: Decimal,
}

pub fn child_tax_credit(ctx: &CreditContext<'_>) -> ChildTaxCredit {
    if !ctx.tax_return.credits.claim_child_tax_credit {
        return ChildTaxCredit::default();
    }

    let limits = &ctx.config.child_tax_credit;
    let dependents = &ctx.tax_return.taxpayer.dependents;
    let qualifying_children = dependents
        .iter()
        .filter(|d| d.is_ctc_qualifying_child(limits.child_age_limit))
        .count();
    let other_dependents = dependents.len() - qualifying_children;

    let tentative = limits.per_child * Decimal::from(qualifying_children)
        + limits.per_other_dependent * Decimal::from(other_dependents);

    let threshold = *limits.phaseout_threshold.get(ctx.filing_status());
    let steps = phaseout_steps(ctx.modified_agi - threshold, limits.phaseout_step);
    let phaseout_reduction = steps * limits.phaseout_reduction_per_step;
    let total = non_negative(tentative - phaseout_reduction);

    debug!(
        qualifying_children,
        other_dependents,
        %tentative,
        %phaseout_reduction,
        "child tax credit computed"
    );

    ChildTaxCredit {
        qualifying_children,
        other_dependents,
        tentative,
        phaseout_reduction,
        total,
    }
}

/// Refundable portion for the part of the child credit the tax could not
/// absorb. Only qualifying children count toward the cap; the other
/// dependent credit never refunds.
pub fn additional_child_tax_credit(
    ctx: &CreditContext<'_>,
    credit: &ChildTaxCredit,
    applied: Decimal,
) -> Decimal {
    if credit.qualifying_children == 0 {
        return Decimal::ZERO;
    }

    let limits = &ctx.config.child_tax_credit;
    let unused = non_negative(credit.total - applied);
    let child_cap = limits.refundable_max_per_child * Decimal::from(credit.qualifying_children);
    let earned_based = non_negative(ctx.earned_income - limits.refundable_earned_income_floor)
        * limits.refundable_rate;

    unused.min(child_cap).min(earned_based)
}

//! Education credits (Form 8863): the American opportunity credit, 40% of
//! which is refundable, and the lifetime learning credit. Both share one
//! MAGI phaseout; separate filers get neither.

use rust_decimal::Decimal;

use super::CreditContext;
use crate::calculations::common::phaseout_fraction;
use crate::{EducationCreditKind, FilingStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationCredits {
    pub american_opportunity_nonrefundable: Decimal,
    pub american_opportunity_refundable: Decimal,
    pub lifetime_learning: Decimal,
}

pub fn education_credits(ctx: &CreditContext<'_>) -> EducationCredits {
    let expenses = &ctx.tax_return.credits.education;
    let status = ctx.filing_status();
    if expenses.is_empty() || status == FilingStatus::MarriedFilingSeparately {
        return EducationCredits::default();
    }

    let limits = &ctx.config.education;

    let aotc: Decimal = expenses
        .iter()
        .filter(|e| e.credit == EducationCreditKind::AmericanOpportunity)
        .map(|e| {
            let paid = e.qualified_expenses.max(Decimal::ZERO);
            let full = paid.min(limits.aotc_full_rate_expenses);
            let partial = (paid - full).min(limits.aotc_partial_rate_expenses);
            full + partial * limits.aotc_partial_rate
        })
        .sum();

    let llc_expenses: Decimal = expenses
        .iter()
        .filter(|e| e.credit == EducationCreditKind::LifetimeLearning)
        .map(|e| e.qualified_expenses.max(Decimal::ZERO))
        .sum();
    let llc = llc_expenses.min(limits.llc_max_expenses) * limits.llc_rate;

    let fraction = phaseout_fraction(
        ctx.modified_agi,
        *limits.phaseout_start.get(status),
        *limits.phaseout_range.get(status),
    );
    let remaining = Decimal::ONE - fraction;

    let aotc_allowed = aotc * remaining;
    let refundable = aotc_allowed * limits.aotc_refundable_share;

    EducationCredits {
        american_opportunity_nonrefundable: aotc_allowed - refundable,
        american_opportunity_refundable: refundable,
        lifetime_learning: llc * remaining,
    }
}

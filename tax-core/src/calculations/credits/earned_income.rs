//! Earned income credit.

use rust_decimal::Decimal;
use tracing::debug;

use super::CreditContext;
use crate::EarnedIncomeCreditParams;
use crate::FilingStatus;
use crate::calculations::common::non_negative;

/// Credit from the phase-in/plateau/phase-out curve at `income`.
fn credit_at(
    params: &EarnedIncomeCreditParams,
    phaseout_start: Decimal,
    income: Decimal,
) -> Decimal {
    let phase_in = (non_negative(income) * params.credit_rate).min(params.max_credit);
    let reduction = non_negative(income - phaseout_start) * params.phaseout_rate;
    non_negative(phase_in - reduction)
}

pub fn earned_income_credit(ctx: &CreditContext<'_>) -> Decimal {
    let tax_return = ctx.tax_return;
    if !tax_return.credits.claim_earned_income_credit {
        return Decimal::ZERO;
    }

    let status = ctx.filing_status();
    if status == FilingStatus::MarriedFilingSeparately {
        debug!("earned income credit unavailable to separate filers");
        return Decimal::ZERO;
    }

    let table = &ctx.config.earned_income_credit;
    if ctx.investment_income > table.investment_income_limit {
        debug!(
            investment_income = %ctx.investment_income,
            limit = %table.investment_income_limit,
            "investment income disqualifies earned income credit"
        );
        return Decimal::ZERO;
    }

    let taxpayer = &tax_return.taxpayer;
    let children = taxpayer
        .dependents
        .iter()
        .filter(|d| d.is_eitc_qualifying_child())
        .count();

    if children == 0 {
        let in_range = |age: u32| (table.childless_min_age..=table.childless_max_age).contains(&age);
        let spouse_in_range = taxpayer.joint_spouse().is_some_and(|s| in_range(s.age));
        if !in_range(taxpayer.age) && !spouse_in_range {
            debug!(age = taxpayer.age, "childless filer outside earned income credit ages");
            return Decimal::ZERO;
        }
    }

    let params = table.params(children);
    let phaseout_start = if status.is_joint() {
        params.phaseout_start_joint
    } else {
        params.phaseout_start
    };

    let mut credit = credit_at(params, phaseout_start, ctx.earned_income);
    if ctx.adjusted_gross_income >= phaseout_start {
        credit = credit.min(credit_at(params, phaseout_start, ctx.adjusted_gross_income));
    }

    debug!(children, %credit, "earned income credit computed");
    credit
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::credits::test_support::context;
    use crate::{Dependent, Relationship, SpouseInfo, TaxReturn, TaxpayerInfo};

    fn filer(
        status: FilingStatus,
        children: usize,
    ) -> TaxReturn {
        let mut info = TaxpayerInfo::new(status);
        info.age = 35;
        if status.is_married() {
            info.spouse = Some(SpouseInfo {
                age: 35,
                ..SpouseInfo::default()
            });
        }
        info.dependents = (0..children)
            .map(|i| Dependent {
                name: format!("child-{i}"),
                age: 4,
                relationship: Relationship::Child,
                months_in_home: 12,
                full_time_student: false,
                permanently_disabled: false,
                resident: true,
            })
            .collect();
        let mut tax_return = TaxReturn::new(2025, info);
        tax_return.credits.claim_earned_income_credit = true;
        tax_return
    }

    #[test]
    fn plateau_pays_maximum_credit() {
        let tax_return = filer(FilingStatus::HeadOfHousehold, 1);

        assert_eq!(earned_income_credit(&context(&tax_return, dec!(15000))), dec!(4328));
    }

    #[test]
    fn phase_in_follows_credit_rate() {
        let tax_return = filer(FilingStatus::HeadOfHousehold, 2);

        // 10,000 × 40%
        assert_eq!(earned_income_credit(&context(&tax_return, dec!(10000))), dec!(4000.00));
    }

    #[test]
    fn phase_out_reduces_credit() {
        let tax_return = filer(FilingStatus::Single, 1);

        // 4,328 - (33,350 - 23,350) × 15.98% = 2,730
        assert_eq!(
            earned_income_credit(&context(&tax_return, dec!(33350))),
            dec!(2730.0000)
        );
    }

    #[test]
    fn joint_filers_phase_out_later() {
        let single = filer(FilingStatus::Single, 1);
        let joint = filer(FilingStatus::MarriedFilingJointly, 1);

        assert!(
            earned_income_credit(&context(&joint, dec!(30000)))
                > earned_income_credit(&context(&single, dec!(30000)))
        );
    }

    #[test]
    fn higher_agi_than_earned_income_limits_credit() {
        let tax_return = filer(FilingStatus::Single, 1);
        let mut ctx = context(&tax_return, dec!(40000));
        ctx.earned_income = dec!(15000);

        // Evaluated at AGI: 4,328 - 16,650 × 15.98% = 1,667.33
        assert_eq!(earned_income_credit(&ctx), dec!(1667.3300));
    }

    #[test]
    fn separate_filers_are_ineligible() {
        let tax_return = filer(FilingStatus::MarriedFilingSeparately, 2);

        assert_eq!(earned_income_credit(&context(&tax_return, dec!(15000))), dec!(0));
    }

    #[test]
    fn excess_investment_income_disqualifies() {
        let tax_return = filer(FilingStatus::Single, 1);
        let mut ctx = context(&tax_return, dec!(15000));
        ctx.investment_income = dec!(11950.01);

        assert_eq!(earned_income_credit(&ctx), dec!(0));
    }

    #[test]
    fn childless_filer_must_be_within_age_range() {
        let mut tax_return = filer(FilingStatus::Single, 0);
        tax_return.taxpayer.age = 22;

        assert_eq!(earned_income_credit(&context(&tax_return, dec!(9000))), dec!(0));

        tax_return.taxpayer.age = 30;
        assert_eq!(earned_income_credit(&context(&tax_return, dec!(9000))), dec!(649));
    }

    #[test]
    fn income_past_phaseout_gets_nothing() {
        let tax_return = filer(FilingStatus::MarriedFilingJointly, 2);

        assert_eq!(earned_income_credit(&context(&tax_return, dec!(160000))), dec!(0));
    }
}

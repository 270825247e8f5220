//! Pennsylvania (PA-40).
//!
//! PA taxes eight classes of income at one rate with no deductions or
//! exemptions. Retirement income, Social Security and unemployment
//! compensation are not taxable, and a loss in one class does not offset
//! another. Low-income filers get tax forgiveness on Schedule SP.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::common::{non_negative, phaseout_steps};

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule, per_filer};
use crate::registry::StateRegistry;

const FORGIVENESS_PER_DEPENDENT: Decimal = dec!(9500);
/// Each $250 of income over the limit removes 10% of the forgiveness.
const FORGIVENESS_STEP: Decimal = dec!(250);
const FORGIVENESS_STEP_SHARE: Decimal = dec!(0.10);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    StateTaxConfig::new(
        UsState::PA,
        2025,
        TaxSchedule::Flat(dec!(0.0307)),
        StartingIncome::GrossIncome,
    )
});

pub struct Pennsylvania {
    config: &'static StateTaxConfig,
}

impl Pennsylvania {
    /// Schedule SP eligibility income: taxable income plus the nontaxable
    /// pensions, unemployment compensation and interest that PA-40 leaves
    /// out. Social Security is not counted.
    fn eligibility_income(
        ctx: &StateContext<'_>,
        lines: &StateLines,
    ) -> Decimal {
        let income = &ctx.tax_return.income;
        lines.state_agi
            + income.retirement_distributions
            + income.unemployment_compensation
            + income.tax_exempt_interest
            + income.us_obligation_interest
    }

    /// Share of tax forgiven at `eligibility_income`, from 1 down to 0.
    fn forgiveness_share(
        ctx: &StateContext<'_>,
        eligibility_income: Decimal,
    ) -> Decimal {
        let limit = *per_filer(dec!(6500)).get(ctx.filing_status())
            + FORGIVENESS_PER_DEPENDENT * Decimal::from(ctx.dependents());
        let steps = phaseout_steps(eligibility_income - limit, FORGIVENESS_STEP);
        non_negative(Decimal::ONE - FORGIVENESS_STEP_SHARE * steps)
    }
}

impl StateTaxCalculator for Pennsylvania {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    /// Compensation, interest, dividends, net profits, gains and other
    /// income, each class floored at zero.
    fn starting_income(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let income = &ctx.tax_return.income;
        income.wages()
            + income.taxable_interest
            + income.ordinary_dividends
            + non_negative(income.net_business_income())
            + non_negative(income.net_capital_gain())
            + income.other_income
    }

    /// Only U.S. obligation interest; the excluded classes never enter
    /// the starting figure.
    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        ctx.tax_return.income.us_obligation_interest
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        lines: &StateLines,
    ) -> Vec<StateCredit> {
        let share = Self::forgiveness_share(ctx, Self::eligibility_income(ctx, lines));
        vec![StateCredit::nonrefundable(
            "Tax Forgiveness",
            lines.tax_before_credits * share,
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::PA, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Pennsylvania {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::{FilingStatus, TaxReturn, TaxpayerInfo};

    use super::*;
    use crate::calculator::test_support::{single, with_federal};

    fn calculator() -> Pennsylvania {
        Pennsylvania {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn flat_rate_on_compensation() {
        let breakdown = calculator().calculate(&single("PA", dec!(100000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(100000.00));
        assert_eq!(breakdown.tax_before_credits, dec!(3070.00));
        assert_eq!(breakdown.credits.len(), 0);
    }

    #[test]
    fn full_forgiveness_under_limit() {
        let breakdown = calculator().calculate(&single("PA", dec!(6000))).unwrap();

        assert_eq!(breakdown.tax_before_credits, dec!(184.20));
        assert_eq!(breakdown.tax_liability, dec!(0));
    }

    #[test]
    fn partial_forgiveness_just_over_limit() {
        let breakdown = calculator().calculate(&single("PA", dec!(6800))).unwrap();

        // 300 over the limit: two steps, 80% forgiven
        assert_eq!(breakdown.tax_before_credits, dec!(208.76));
        assert_eq!(breakdown.credit("Tax Forgiveness"), dec!(167.01));
        assert_eq!(breakdown.tax_liability, dec!(41.75));
    }

    #[test]
    fn retirement_income_not_taxed() {
        let mut info = TaxpayerInfo::new(FilingStatus::Single);
        info.age = 68;
        let mut tax_return = TaxReturn::new(2025, info);
        tax_return.income.retirement_distributions = dec!(45000);
        tax_return.income.social_security_benefits = dec!(22000);
        tax_return.income.taxable_interest = dec!(1200);

        let breakdown = calculator().calculate(&with_federal(tax_return)).unwrap();

        assert_eq!(breakdown.starting_income, dec!(1200.00));
        assert_eq!(breakdown.tax_before_credits, dec!(36.84));
        // The pension counts toward Schedule SP income
        assert_eq!(breakdown.credit("Tax Forgiveness"), dec!(0));
        assert_eq!(breakdown.tax_liability, dec!(36.84));
    }

    #[test]
    fn unemployment_counts_toward_forgiveness_limit() {
        let mut tax_return = single("PA", dec!(6000));
        tax_return.income.unemployment_compensation = dec!(4000);

        let breakdown = calculator().calculate(&with_federal(tax_return)).unwrap();

        // Taxable wages alone would be fully forgiven
        assert_eq!(breakdown.tax_before_credits, dec!(184.20));
        assert_eq!(breakdown.tax_liability, dec!(184.20));
    }
}

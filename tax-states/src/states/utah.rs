//! Utah: a flat rate with no deduction, offset by the taxpayer tax credit
//! (6% of the federal deduction plus a per-dependent amount, reduced by
//! 1.3% of income over a base).

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;
use tax_core::calculations::common::non_negative;

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const CREDIT_RATE: Decimal = dec!(0.06);
const CREDIT_PHASEOUT_RATE: Decimal = dec!(0.013);
const DEPENDENT_AMOUNT: Decimal = dec!(2111);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    StateTaxConfig::new(
        UsState::UT,
        2025,
        TaxSchedule::Flat(dec!(0.045)),
        StartingIncome::FederalAgi,
    )
});

fn credit_base_amount() -> ByFilingStatus<Decimal> {
    ByFilingStatus::new(dec!(18213), dec!(36426), dec!(18213), dec!(27320))
}

pub struct Utah {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Utah {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        lines: &StateLines,
    ) -> Vec<StateCredit> {
        let deductions = ctx.federal.deduction_amount
            + DEPENDENT_AMOUNT * Decimal::from(ctx.dependents());
        let excess = non_negative(lines.state_agi - *credit_base_amount().get(ctx.filing_status()));
        vec![StateCredit::nonrefundable(
            "Taxpayer Tax Credit",
            deductions * CREDIT_RATE - excess * CREDIT_PHASEOUT_RATE,
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::UT, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Utah {
            config: &CONFIG_2025,
        })
    });
}

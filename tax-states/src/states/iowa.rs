use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::UsState;
use crate::calculator::{
    StateContext, StateCredit, StateLines, StateTaxCalculator, standard_subtractions,
};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const RETIREMENT_EXCLUSION_AGE: u32 = 55;
const PERSONAL_CREDIT: Decimal = dec!(40);
const SENIOR_CREDIT: Decimal = dec!(20);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    StateTaxConfig::new(
        UsState::IA,
        2025,
        TaxSchedule::Flat(dec!(0.038)),
        StartingIncome::FederalTaxableIncome,
    )
});

pub struct Iowa {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Iowa {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    /// Retirement income is excluded in full once either filer is 55.
    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let taxpayer = &ctx.tax_return.taxpayer;
        let eligible = taxpayer.age >= RETIREMENT_EXCLUSION_AGE
            || taxpayer
                .joint_spouse()
                .is_some_and(|s| s.age >= RETIREMENT_EXCLUSION_AGE);
        let retirement = if eligible {
            ctx.tax_return.income.retirement_distributions
        } else {
            Decimal::ZERO
        };
        standard_subtractions(ctx) + retirement
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        let people = ctx.filer_count() + ctx.dependents();
        vec![StateCredit::nonrefundable(
            "Personal Exemption Credit",
            PERSONAL_CREDIT * Decimal::from(people) + SENIOR_CREDIT * Decimal::from(ctx.seniors()),
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::IA, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Iowa {
            config: &CONFIG_2025,
        })
    });
}

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{
    StateContext, StateCredit, StateLines, StateTaxCalculator, standard_subtractions,
};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const PERSONAL_CREDIT: Decimal = dec!(110);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::DE,
        2025,
        TaxSchedule::uniform(&[
            (dec!(0), dec!(0)),
            (dec!(2000), dec!(0.022)),
            (dec!(5000), dec!(0.039)),
            (dec!(10000), dec!(0.048)),
            (dec!(20000), dec!(0.052)),
            (dec!(25000), dec!(0.0555)),
            (dec!(60000), dec!(0.066)),
        ]),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::Fixed {
        base: ByFilingStatus::single_joint(dec!(3250), dec!(6500)),
        additional: dec!(2500),
    };
    config.allows_itemized = true;
    config
});

/// Pension exclusion: $12,500 from age 60, $2,000 below.
fn pension_exclusion(ctx: &StateContext<'_>) -> Decimal {
    let limit = if ctx.tax_return.taxpayer.age >= 60 {
        dec!(12500)
    } else {
        dec!(2000)
    };
    ctx.tax_return.income.retirement_distributions.min(limit)
}

pub struct Delaware {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Delaware {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        standard_subtractions(ctx) + pension_exclusion(ctx)
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        let count = ctx.filer_count() + ctx.dependents();
        vec![StateCredit::nonrefundable(
            "Personal Credits",
            PERSONAL_CREDIT * Decimal::from(count),
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::DE, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Delaware {
            config: &CONFIG_2025,
        })
    });
}

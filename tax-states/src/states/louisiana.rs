use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

/// Retirement income excluded per filer 65 or older.
const SENIOR_RETIREMENT_EXCLUSION: Decimal = dec!(12000);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::LA,
        2025,
        TaxSchedule::Flat(dec!(0.03)),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::single_joint(
        dec!(12500),
        dec!(25000),
    ));
    config
});

pub struct Louisiana {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Louisiana {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let limit = SENIOR_RETIREMENT_EXCLUSION * Decimal::from(ctx.seniors());
        standard_subtractions(ctx) + ctx.tax_return.income.retirement_distributions.min(limit)
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::LA, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Louisiana {
            config: &CONFIG_2025,
        })
    });
}

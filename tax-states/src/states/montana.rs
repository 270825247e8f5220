use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

/// Subtraction for each filer 65 or older.
const SENIOR_SUBTRACTION: Decimal = dec!(5660);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [(dec!(0), dec!(0.047)), (dec!(21100), dec!(0.059))];
    let joint = [(dec!(0), dec!(0.047)), (dec!(42200), dec!(0.059))];
    let head_of_household = [(dec!(0), dec!(0.047)), (dec!(31700), dec!(0.059))];

    let mut config = StateTaxConfig::new(
        UsState::MT,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &head_of_household),
        StartingIncome::FederalTaxableIncome,
    );
    config.social_security_taxable = true;
    config
});

pub struct Montana {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Montana {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        standard_subtractions(ctx) + SENIOR_SUBTRACTION * Decimal::from(ctx.seniors())
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::MT, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Montana {
            config: &CONFIG_2025,
        })
    });
}

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::OH,
        2025,
        TaxSchedule::uniform(&[
            (dec!(0), dec!(0)),
            (dec!(26050), dec!(0.0275)),
            (dec!(100000), dec!(0.03125)),
        ]),
        StartingIncome::FederalAgi,
    );
    config.military_pay_exempt = true;
    config
});

/// Personal and dependent exemption per person at Ohio AGI.
fn exemption_per_person(agi: Decimal) -> Decimal {
    if agi <= dec!(40000) {
        dec!(2400)
    } else if agi <= dec!(80000) {
        dec!(2150)
    } else {
        dec!(1900)
    }
}

pub struct Ohio {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Ohio {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn exemptions(
        &self,
        ctx: &StateContext<'_>,
        state_agi: Decimal,
    ) -> Decimal {
        exemption_per_person(state_agi) * Decimal::from(ctx.filer_count() + ctx.dependents())
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::OH, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Ohio {
            config: &CONFIG_2025,
        })
    });
}

use std::sync::LazyLock;

use rust_decimal_macros::dec;

use crate::UsState;
use crate::calculator::StateTaxCalculator;
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    StateTaxConfig::new(
        UsState::ND,
        2025,
        TaxSchedule::by_status(
            &[
                (dec!(0), dec!(0)),
                (dec!(48475), dec!(0.0195)),
                (dec!(244825), dec!(0.025)),
            ],
            &[
                (dec!(0), dec!(0)),
                (dec!(80975), dec!(0.0195)),
                (dec!(298075), dec!(0.025)),
            ],
            &[
                (dec!(0), dec!(0)),
                (dec!(40475), dec!(0.0195)),
                (dec!(149025), dec!(0.025)),
            ],
            &[
                (dec!(0), dec!(0)),
                (dec!(64950), dec!(0.0195)),
                (dec!(271450), dec!(0.025)),
            ],
        ),
        StartingIncome::FederalTaxableIncome,
    )
});

pub struct NorthDakota {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for NorthDakota {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::ND, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(NorthDakota {
            config: &CONFIG_2025,
        })
    });
}

use std::sync::LazyLock;

use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::StateTaxCalculator;
use crate::config::{
    StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule, per_filer,
};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::RI,
        2025,
        TaxSchedule::uniform(&[
            (dec!(0), dec!(0.0375)),
            (dec!(79900), dec!(0.0475)),
            (dec!(181650), dec!(0.0599)),
        ]),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::new(
        dec!(10900),
        dec!(21800),
        dec!(10900),
        dec!(16350),
    ));
    config.personal_exemption = per_filer(dec!(5100));
    config.dependent_exemption = dec!(5100);
    config
});

pub struct RhodeIsland {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for RhodeIsland {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::RI, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(RhodeIsland {
            config: &CONFIG_2025,
        })
    });
}

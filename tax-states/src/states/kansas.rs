use std::sync::LazyLock;

use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::StateTaxCalculator;
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::KS,
        2025,
        TaxSchedule::single_joint(
            &[(dec!(0), dec!(0.052)), (dec!(23000), dec!(0.0558))],
            &[(dec!(0), dec!(0.052)), (dec!(46000), dec!(0.0558))],
        ),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::Fixed {
        base: ByFilingStatus::new(dec!(3605), dec!(8240), dec!(4120), dec!(6180)),
        additional: dec!(850),
    };
    config.personal_exemption =
        ByFilingStatus::new(dec!(9160), dec!(18320), dec!(9160), dec!(11480));
    config.dependent_exemption = dec!(2320);
    config.allows_itemized = true;
    config
});

pub struct Kansas {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Kansas {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::KS, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Kansas {
            config: &CONFIG_2025,
        })
    });
}

use std::sync::LazyLock;

use rust_decimal_macros::dec;

use crate::UsState;
use crate::calculator::StateTaxCalculator;
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule, per_filer};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let brackets = [
        (dec!(0), dec!(0.0222)),
        (dec!(10000), dec!(0.0296)),
        (dec!(25000), dec!(0.0333)),
        (dec!(40000), dec!(0.0444)),
        (dec!(60000), dec!(0.0482)),
    ];
    let separate = brackets.map(|(threshold, rate)| (threshold / dec!(2), rate));

    let mut config = StateTaxConfig::new(
        UsState::WV,
        2025,
        TaxSchedule::by_status(&brackets, &brackets, &separate, &brackets),
        StartingIncome::FederalAgi,
    );
    config.personal_exemption = per_filer(dec!(2000));
    config.dependent_exemption = dec!(2000);
    config
});

pub struct WestVirginia {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for WestVirginia {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::WV, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(WestVirginia {
            config: &CONFIG_2025,
        })
    });
}

//! Indiana: flat state rate plus a county income tax on the same base.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule, per_filer};
use crate::registry::StateRegistry;

const RENTERS_DEDUCTION_CAP: Decimal = dec!(3000);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::IN,
        2025,
        TaxSchedule::Flat(dec!(0.03)),
        StartingIncome::FederalAgi,
    );
    config.personal_exemption = per_filer(dec!(1000));
    config.dependent_exemption = dec!(1500);
    config.additional_exemption = dec!(1000);
    config.military_pay_exempt = true;
    // Statewide average county rate, used when the return has none.
    config.default_local_rate = Some(dec!(0.0202));
    config
});

pub struct Indiana {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Indiana {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let renters = ctx.tax_return.credits.rent_paid.min(RENTERS_DEDUCTION_CAP);
        standard_subtractions(ctx) + renters
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::IN, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Indiana {
            config: &CONFIG_2025,
        })
    });
}

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{
    StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule, per_filer,
};
use crate::registry::StateRegistry;

/// Retirement income excluded per filer.
const RETIREMENT_EXCLUSION: Decimal = dec!(10000);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.0025)),
        (dec!(1000), dec!(0.0075)),
        (dec!(2500), dec!(0.0175)),
        (dec!(3750), dec!(0.0275)),
        (dec!(4900), dec!(0.0375)),
        (dec!(7200), dec!(0.0475)),
    ];
    let joint = single.map(|(threshold, rate)| (threshold * dec!(2), rate));

    let mut config = StateTaxConfig::new(
        UsState::OK,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &joint),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::new(
        dec!(6350),
        dec!(12700),
        dec!(6350),
        dec!(9350),
    ));
    config.personal_exemption = per_filer(dec!(1000));
    config.dependent_exemption = dec!(1000);
    config.additional_exemption = dec!(1000);
    config.allows_itemized = true;
    config
});

pub struct Oklahoma {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Oklahoma {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let limit = RETIREMENT_EXCLUSION * Decimal::from(ctx.filer_count());
        standard_subtractions(ctx) + ctx.tax_return.income.retirement_distributions.min(limit)
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::OK, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Oklahoma {
            config: &CONFIG_2025,
        })
    });
}

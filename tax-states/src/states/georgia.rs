use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::GA,
        2025,
        TaxSchedule::Flat(dec!(0.0519)),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::Fixed {
        base: ByFilingStatus::single_joint(dec!(12000), dec!(24000)),
        additional: dec!(1300),
    };
    config.dependent_exemption = dec!(4000);
    config.allows_itemized = true;
    config
});

/// Retirement income exclusion per filer: $35,000 from 62, $65,000 from 65.
fn retirement_limit(age: u32) -> Decimal {
    match age {
        65.. => dec!(65000),
        62..=64 => dec!(35000),
        _ => Decimal::ZERO,
    }
}

pub struct Georgia {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Georgia {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let taxpayer = &ctx.tax_return.taxpayer;
        let limit = retirement_limit(taxpayer.age)
            + taxpayer
                .joint_spouse()
                .map(|s| retirement_limit(s.age))
                .unwrap_or(Decimal::ZERO);
        standard_subtractions(ctx) + ctx.tax_return.income.retirement_distributions.min(limit)
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::GA, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Georgia {
            config: &CONFIG_2025,
        })
    });
}

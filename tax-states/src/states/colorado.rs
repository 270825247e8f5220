//! Colorado starts from federal taxable income, so the federal deduction is
//! already taken. State income taxes deducted federally are added back.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::DeductionMethod;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::CO,
        2025,
        TaxSchedule::Flat(dec!(0.044)),
        StartingIncome::FederalTaxableIncome,
    );
    // Handled by the pension and annuity subtraction.
    config.social_security_taxable = true;
    config
});

/// Per-filer limit on the pension and annuity subtraction by age.
fn pension_limit(age: u32) -> Decimal {
    match age {
        65.. => dec!(24000),
        55..=64 => dec!(20000),
        _ => Decimal::ZERO,
    }
}

pub struct Colorado {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Colorado {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_additions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        if ctx.federal.deduction_method != DeductionMethod::Itemized {
            return Decimal::ZERO;
        }
        ctx.tax_return
            .deductions
            .itemized
            .state_local_income_taxes
            .min(ctx.federal.salt_deduction)
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let taxpayer = &ctx.tax_return.taxpayer;
        let limit = pension_limit(taxpayer.age)
            + taxpayer
                .joint_spouse()
                .map(|s| pension_limit(s.age))
                .unwrap_or(Decimal::ZERO);
        let retirement_income = ctx.tax_return.income.retirement_distributions
            + ctx.federal.income.taxable_social_security;

        standard_subtractions(ctx) + retirement_income.min(limit)
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::CO, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Colorado {
            config: &CONFIG_2025,
        })
    });
}

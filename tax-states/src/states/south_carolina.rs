//! South Carolina starts from federal taxable income. State income taxes
//! deducted federally are added back; retirement income and dependents
//! come off as subtractions.

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
        UsState::SC,
        2025,
        TaxSchedule::uniform(&[
            (dec!(0), dec!(0)),
            (dec!(3560), dec!(0.03)),
            (dec!(17830), dec!(0.06)),
        ]),
        StartingIncome::FederalTaxableIncome,
    );
    config.dependent_exemption = dec!(4930);
    config
});

/// Retirement deduction per filer by age.
fn retirement_deduction(age: u32) -> Decimal {
    if age >= 65 {
        dec!(10000)
    } else {
        dec!(3000)
    }
}

pub struct SouthCarolina {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for SouthCarolina {
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
        let limit = retirement_deduction(taxpayer.age)
            + taxpayer
                .joint_spouse()
                .map(|s| retirement_deduction(s.age))
                .unwrap_or(Decimal::ZERO);
        standard_subtractions(ctx) + ctx.tax_return.income.retirement_distributions.min(limit)
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::SC, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(SouthCarolina {
            config: &CONFIG_2025,
        })
    });
}

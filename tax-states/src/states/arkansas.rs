use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{
    RetirementExclusion, StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule,
};
use crate::registry::StateRegistry;

const PERSONAL_TAX_CREDIT: Decimal = dec!(29);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::AR,
        2025,
        TaxSchedule::uniform(&[
            (dec!(0), dec!(0)),
            (dec!(5500), dec!(0.02)),
            (dec!(10900), dec!(0.03)),
            (dec!(15600), dec!(0.034)),
            (dec!(25700), dec!(0.039)),
        ]),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction =
        StateStandardDeduction::fixed(ByFilingStatus::single_joint(dec!(2410), dec!(4820)));
    config.allows_itemized = true;
    config.military_pay_exempt = true;
    config.retirement_exclusion = RetirementExclusion::UpTo(dec!(6000));
    config
});

pub struct Arkansas {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Arkansas {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    /// $29 per filer, dependent and 65-or-older or blind box.
    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        let count = ctx.filer_count() + ctx.dependents() + ctx.conditions();
        vec![StateCredit::nonrefundable(
            "Personal Tax Credit",
            PERSONAL_TAX_CREDIT * Decimal::from(count),
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::AR, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Arkansas {
            config: &CONFIG_2025,
        })
    });
}

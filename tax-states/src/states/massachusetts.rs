//! Massachusetts (Form 1).
//!
//! 5% on Part B income with the 4% surtax above the millionaire threshold.
//! Exemptions replace a standard deduction. FICA withheld and half of rent
//! paid come off as deductions, each capped.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{
    StateContext, StateCredit, StateLines, StateTaxCalculator, standard_subtractions,
};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const FICA_DEDUCTION_PER_FILER: Decimal = dec!(2000);
const RENT_DEDUCTION_SHARE: Decimal = dec!(0.5);
const RENT_DEDUCTION_CAP: Decimal = dec!(4000);
const CHILD_CREDIT: Decimal = dec!(440);
const CHILD_CREDIT_AGE: u32 = 13;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::MA,
        2025,
        TaxSchedule::uniform(&[(dec!(0), dec!(0.05)), (dec!(1083150), dec!(0.09))]),
        StartingIncome::FederalAgi,
    );
    config.personal_exemption =
        ByFilingStatus::new(dec!(4400), dec!(8800), dec!(4400), dec!(6800));
    config.dependent_exemption = dec!(1000);
    config.additional_exemption = dec!(700);
    config
});

pub struct Massachusetts {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Massachusetts {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let fica_cap = FICA_DEDUCTION_PER_FILER * Decimal::from(ctx.filer_count());
        let fica = ctx.tax_return.income.fica_withheld().min(fica_cap);
        let rent = (ctx.tax_return.credits.rent_paid * RENT_DEDUCTION_SHARE).min(RENT_DEDUCTION_CAP);
        standard_subtractions(ctx) + fica + rent
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        vec![StateCredit::refundable(
            "Child and Family Tax Credit",
            CHILD_CREDIT * Decimal::from(ctx.dependents_under(CHILD_CREDIT_AGE)),
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::MA, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Massachusetts {
            config: &CONFIG_2025,
        })
    });
}

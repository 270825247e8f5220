//! Missouri lets filers subtract a share of federal income tax, with the
//! share falling as income rises.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator};
use crate::config::{
    FederalTaxDeduction, StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule,
};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::MO,
        2025,
        TaxSchedule::uniform(&[
            (dec!(0), dec!(0)),
            (dec!(1313), dec!(0.02)),
            (dec!(2626), dec!(0.025)),
            (dec!(3939), dec!(0.03)),
            (dec!(5252), dec!(0.035)),
            (dec!(6565), dec!(0.04)),
            (dec!(7878), dec!(0.045)),
            (dec!(9191), dec!(0.047)),
        ]),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::FollowsFederal;
    config.allows_itemized = true;
    config.federal_tax_deduction =
        FederalTaxDeduction::Capped(ByFilingStatus::single_joint(dec!(5000), dec!(10000)));
    config
});

/// Share of federal tax deductible at `agi`.
fn deductible_share(agi: Decimal) -> Decimal {
    if agi <= dec!(25000) {
        dec!(0.35)
    } else if agi <= dec!(50000) {
        dec!(0.25)
    } else if agi <= dec!(100000) {
        dec!(0.15)
    } else if agi <= dec!(125000) {
        dec!(0.10)
    } else if agi <= dec!(150000) {
        dec!(0.05)
    } else {
        Decimal::ZERO
    }
}

pub struct Missouri {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Missouri {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn federal_tax_deduction(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let FederalTaxDeduction::Capped(caps) = &ctx.config.federal_tax_deduction else {
            return Decimal::ZERO;
        };
        let share = deductible_share(ctx.federal.adjusted_gross_income);
        (ctx.federal_income_tax() * share).min(*caps.get(ctx.filing_status()))
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::MO, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Missouri {
            config: &CONFIG_2025,
        })
    });
}

//! District of Columbia (Form D-40).
//!
//! Follows the federal standard deduction. The DC earned income credit is a
//! refundable percentage of the federal credit.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::Credit;

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const EITC_SHARE: Decimal = dec!(0.70);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::DC,
        2025,
        TaxSchedule::uniform(&[
            (dec!(0), dec!(0.04)),
            (dec!(10000), dec!(0.06)),
            (dec!(40000), dec!(0.065)),
            (dec!(60000), dec!(0.085)),
            (dec!(250000), dec!(0.0925)),
            (dec!(500000), dec!(0.0975)),
            (dec!(1000000), dec!(0.1075)),
        ]),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::FollowsFederal;
    config.allows_itemized = true;
    config
});

pub struct DistrictOfColumbia {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for DistrictOfColumbia {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        let federal_eitc = ctx.federal.credits.get(Credit::EarnedIncome);
        vec![StateCredit::refundable(
            "DC Earned Income Credit",
            federal_eitc * EITC_SHARE,
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::DC, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(DistrictOfColumbia {
            config: &CONFIG_2025,
        })
    });
}

//! Illinois (Form IL-1040).
//!
//! A flat rate on federal AGI. Retirement income and Social Security are
//! fully subtracted. Exemptions are lost entirely above the income limit.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{ByFilingStatus, Credit};

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{RetirementExclusion, StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const EXEMPTION: Decimal = dec!(2850);
const EITC_SHARE: Decimal = dec!(0.20);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::IL,
        2025,
        TaxSchedule::Flat(dec!(0.0495)),
        StartingIncome::FederalAgi,
    );
    config.additional_exemption = dec!(1000);
    config.retirement_exclusion = RetirementExclusion::Full;
    config
});

fn exemption_limit() -> ByFilingStatus<Decimal> {
    ByFilingStatus::single_joint(dec!(250000), dec!(500000))
}

pub struct Illinois {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Illinois {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn exemptions(
        &self,
        ctx: &StateContext<'_>,
        _state_agi: Decimal,
    ) -> Decimal {
        if ctx.federal.adjusted_gross_income > *exemption_limit().get(ctx.filing_status()) {
            return Decimal::ZERO;
        }
        EXEMPTION * Decimal::from(ctx.filer_count() + ctx.dependents())
            + ctx.config.additional_exemption * Decimal::from(ctx.conditions())
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        vec![StateCredit::refundable(
            "Illinois Earned Income Credit",
            ctx.federal.credits.get(Credit::EarnedIncome) * EITC_SHARE,
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::IL, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Illinois {
            config: &CONFIG_2025,
        })
    });
}

//! Minnesota (Form M1).
//!
//! Four brackets per filing status. Social Security is subtracted in full
//! below an income threshold and loses 10% of the subtraction per $4,000
//! above it. The refundable child tax credit phases out at 12% of income
//! over its threshold.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;
use tax_core::calculations::common::{non_negative, phaseout_steps};

use crate::UsState;
use crate::calculator::{
    StateContext, StateCredit, StateLines, StateTaxCalculator, standard_subtractions,
};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const SOCIAL_SECURITY_STEP: Decimal = dec!(4000);
const SOCIAL_SECURITY_STEP_REDUCTION: Decimal = dec!(0.10);
const CHILD_CREDIT: Decimal = dec!(1750);
const CHILD_CREDIT_AGE: u32 = 18;
const CHILD_CREDIT_PHASEOUT_RATE: Decimal = dec!(0.12);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::MN,
        2025,
        TaxSchedule::by_status(
            &[
                (dec!(0), dec!(0.0535)),
                (dec!(32570), dec!(0.068)),
                (dec!(106990), dec!(0.0785)),
                (dec!(198630), dec!(0.0985)),
            ],
            &[
                (dec!(0), dec!(0.0535)),
                (dec!(47620), dec!(0.068)),
                (dec!(189180), dec!(0.0785)),
                (dec!(330410), dec!(0.0985)),
            ],
            &[
                (dec!(0), dec!(0.0535)),
                (dec!(23810), dec!(0.068)),
                (dec!(94590), dec!(0.0785)),
                (dec!(165205), dec!(0.0985)),
            ],
            &[
                (dec!(0), dec!(0.0535)),
                (dec!(40100), dec!(0.068)),
                (dec!(161130), dec!(0.0785)),
                (dec!(264050), dec!(0.0985)),
            ],
        ),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::Fixed {
        base: ByFilingStatus::new(dec!(14950), dec!(29900), dec!(14950), dec!(22500)),
        additional: dec!(1550),
    };
    config.dependent_exemption = dec!(5200);
    config.allows_itemized = true;
    // Subtracted below, with its own phaseout.
    config.social_security_taxable = true;
    config
});

fn social_security_threshold() -> ByFilingStatus<Decimal> {
    ByFilingStatus::single_joint(dec!(105380), dec!(134750))
}

fn child_credit_threshold() -> ByFilingStatus<Decimal> {
    ByFilingStatus::single_joint(dec!(36880), dec!(42140))
}

pub struct Minnesota {
    config: &'static StateTaxConfig,
}

impl Minnesota {
    fn social_security_subtraction(ctx: &StateContext<'_>) -> Decimal {
        let taxable = ctx.federal.income.taxable_social_security;
        let excess =
            ctx.federal.adjusted_gross_income - *social_security_threshold().get(ctx.filing_status());
        let reduction = phaseout_steps(excess, SOCIAL_SECURITY_STEP) * SOCIAL_SECURITY_STEP_REDUCTION;
        non_negative(taxable * (Decimal::ONE - reduction))
    }
}

impl StateTaxCalculator for Minnesota {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        standard_subtractions(ctx) + Self::social_security_subtraction(ctx)
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        let children = ctx.dependents_under(CHILD_CREDIT_AGE);
        if children == 0 {
            return Vec::new();
        }
        let excess = non_negative(
            ctx.federal.adjusted_gross_income - *child_credit_threshold().get(ctx.filing_status()),
        );
        let credit = CHILD_CREDIT * Decimal::from(children) - excess * CHILD_CREDIT_PHASEOUT_RATE;
        vec![StateCredit::refundable("Child Tax Credit", credit)]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::MN, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Minnesota {
            config: &CONFIG_2025,
        })
    });
}

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;
use tax_core::calculations::common::phaseout_steps;

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{
    StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule, per_filer,
};
use crate::registry::StateRegistry;

const CHILD_CREDIT: Decimal = dec!(1000);
const CHILD_CREDIT_AGE: u32 = 6;
const CHILD_CREDIT_PHASEOUT_START: Decimal = dec!(125000);
/// Reduction per $1,000 of AGI over the start.
const CHILD_CREDIT_STEP_REDUCTION: Decimal = dec!(20);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::VT,
        2025,
        TaxSchedule::by_status(
            &[
                (dec!(0), dec!(0.0335)),
                (dec!(47900), dec!(0.066)),
                (dec!(116000), dec!(0.076)),
                (dec!(242000), dec!(0.0875)),
            ],
            &[
                (dec!(0), dec!(0.0335)),
                (dec!(79950), dec!(0.066)),
                (dec!(193400), dec!(0.076)),
                (dec!(294600), dec!(0.0875)),
            ],
            &[
                (dec!(0), dec!(0.0335)),
                (dec!(39975), dec!(0.066)),
                (dec!(96700), dec!(0.076)),
                (dec!(147300), dec!(0.0875)),
            ],
            &[
                (dec!(0), dec!(0.0335)),
                (dec!(64200), dec!(0.066)),
                (dec!(165700), dec!(0.076)),
                (dec!(268300), dec!(0.0875)),
            ],
        ),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::Fixed {
        base: ByFilingStatus::new(dec!(7400), dec!(14850), dec!(7400), dec!(11100)),
        additional: dec!(1200),
    };
    config.personal_exemption = per_filer(dec!(5300));
    config.dependent_exemption = dec!(5300);
    config
});

pub struct Vermont {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Vermont {
    fn config(&self) -> &StateTaxConfig {
        self.config
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
        let steps = phaseout_steps(
            ctx.federal.adjusted_gross_income - CHILD_CREDIT_PHASEOUT_START,
            dec!(1000),
        );
        let credit =
            CHILD_CREDIT * Decimal::from(children) - CHILD_CREDIT_STEP_REDUCTION * steps;
        vec![StateCredit::refundable("Child Tax Credit", credit)]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::VT, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Vermont {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::FilingStatus;

    use super::*;
    use crate::calculator::test_support::{child, single, wage_return, with_federal};

    fn calculator() -> Vermont {
        Vermont {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn two_brackets_for_single_filer() {
        let breakdown = calculator().calculate(&single("VT", dec!(75000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(62300.00));
        assert_eq!(breakdown.tax_before_credits, dec!(2555.05));
    }

    #[test]
    fn child_credit_reduced_above_threshold() {
        let mut tax_return = wage_return(
            FilingStatus::MarriedFilingJointly,
            "VT",
            dec!(130000),
            dec!(0),
        );
        tax_return.taxpayer.dependents.push(child("Wren", 2));

        let breakdown = calculator().calculate(&with_federal(tax_return)).unwrap();

        // 5,000 over: five $20 steps
        assert_eq!(breakdown.credit("Child Tax Credit"), dec!(900.00));
    }
}

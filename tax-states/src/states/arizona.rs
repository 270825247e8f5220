use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;
use tax_core::calculations::common::{non_negative, phaseout_steps};

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::AZ,
        2025,
        TaxSchedule::Flat(dec!(0.025)),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::FollowsFederal;
    config.allows_itemized = true;
    config
});

/// Dependent tax credit: $100 per dependent under 17, $25 for others, cut
/// 5% per $1,000 (or part) of AGI over the threshold.
fn dependent_credit(
    ctx: &StateContext<'_>,
    agi: Decimal,
) -> Decimal {
    let young = ctx.dependents_under(17);
    let other = ctx.dependents() - young;
    let tentative = dec!(100) * Decimal::from(young) + dec!(25) * Decimal::from(other);

    let threshold = ByFilingStatus::single_joint(dec!(200000), dec!(400000));
    let steps = phaseout_steps(agi - *threshold.get(ctx.filing_status()), dec!(1000));
    non_negative(tentative * (Decimal::ONE - steps * dec!(0.05)))
}

pub struct Arizona {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Arizona {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        lines: &StateLines,
    ) -> Vec<StateCredit> {
        vec![StateCredit::nonrefundable(
            "Dependent Tax Credit",
            dependent_credit(ctx, lines.state_agi),
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::AZ, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Arizona {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::{Dependent, FilingStatus, Relationship};

    use super::*;
    use crate::calculator::test_support::{single, wage_return, with_federal};

    fn calculator() -> Arizona {
        Arizona {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn flat_rate_after_federal_standard_deduction() {
        let breakdown = calculator().calculate(&single("AZ", dec!(75000))).unwrap();

        assert_eq!(breakdown.deduction_used, dec!(15000.00));
        assert_eq!(breakdown.tax_before_credits, dec!(1500.00));
    }

    #[test]
    fn dependent_credit_per_child() {
        let mut tax_return = wage_return(FilingStatus::HeadOfHousehold, "AZ", dec!(60000), dec!(0));
        for (name, age) in [("Ana", 4), ("Bo", 19)] {
            tax_return.taxpayer.dependents.push(Dependent {
                name: name.to_string(),
                age,
                relationship: Relationship::Child,
                months_in_home: 12,
                full_time_student: true,
                permanently_disabled: false,
                resident: true,
            });
        }

        let breakdown = calculator().calculate(&with_federal(tax_return)).unwrap();

        assert_eq!(breakdown.credit("Dependent Tax Credit"), dec!(125.00));
    }
}

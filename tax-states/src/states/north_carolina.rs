use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;
use tax_core::calculations::common::{non_negative, phaseout_steps};

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const CHILD_DEDUCTION_MAX: Decimal = dec!(3000);
const CHILD_DEDUCTION_STEP_REDUCTION: Decimal = dec!(500);
const CHILD_DEDUCTION_AGE: u32 = 17;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::NC,
        2025,
        TaxSchedule::Flat(dec!(0.0425)),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::new(
        dec!(12750),
        dec!(25500),
        dec!(12750),
        dec!(19125),
    ));
    config.allows_itemized = true;
    config
});

/// (first threshold, step width) of the child deduction table.
fn child_deduction_table() -> ByFilingStatus<(Decimal, Decimal)> {
    ByFilingStatus::new(
        (dec!(20000), dec!(10000)),
        (dec!(40000), dec!(20000)),
        (dec!(20000), dec!(10000)),
        (dec!(30000), dec!(15000)),
    )
}

pub struct NorthCarolina {
    config: &'static StateTaxConfig,
}

impl NorthCarolina {
    /// Deduction per qualifying child: $3,000, less $500 for each step of
    /// income above the first threshold.
    fn child_deduction_per_child(ctx: &StateContext<'_>) -> Decimal {
        let (threshold, step) = *child_deduction_table().get(ctx.filing_status());
        let steps = phaseout_steps(ctx.federal.adjusted_gross_income - threshold, step);
        non_negative(CHILD_DEDUCTION_MAX - CHILD_DEDUCTION_STEP_REDUCTION * steps)
    }
}

impl StateTaxCalculator for NorthCarolina {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let children = Decimal::from(ctx.dependents_under(CHILD_DEDUCTION_AGE));
        standard_subtractions(ctx) + Self::child_deduction_per_child(ctx) * children
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::NC, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(NorthCarolina {
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

    fn calculator() -> NorthCarolina {
        NorthCarolina {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn flat_rate_after_standard_deduction() {
        let breakdown = calculator().calculate(&single("NC", dec!(75000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(62250.00));
        assert_eq!(breakdown.tax_before_credits, dec!(2645.63));
    }

    #[test]
    fn child_deduction_steps_down_with_income() {
        let mut tax_return = wage_return(FilingStatus::HeadOfHousehold, "NC", dec!(45000), dec!(0));
        tax_return.taxpayer.dependents.push(child("Rey", 10));

        let breakdown = calculator().calculate(&with_federal(tax_return)).unwrap();

        assert_eq!(breakdown.subtractions, dec!(2500.00));
        assert_eq!(breakdown.taxable_income, dec!(23375.00));
        assert_eq!(breakdown.tax_before_credits, dec!(993.44));
    }
}

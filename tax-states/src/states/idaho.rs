//! Idaho: one rate above a zero bracket, plus the refundable grocery credit.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const GROCERY_CREDIT: Decimal = dec!(155);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [(dec!(0), dec!(0)), (dec!(4811), dec!(0.053))];
    let joint = [(dec!(0), dec!(0)), (dec!(9622), dec!(0.053))];

    let mut config = StateTaxConfig::new(
        UsState::ID,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &joint),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::FollowsFederal;
    config.allows_itemized = true;
    config
});

pub struct Idaho {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Idaho {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        let people = ctx.filer_count() + ctx.dependents();
        vec![StateCredit::refundable(
            "Grocery Credit",
            GROCERY_CREDIT * Decimal::from(people),
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::ID, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Idaho {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculator::test_support::single;

    #[test]
    fn grocery_credit_is_refundable() {
        let calculator = Idaho {
            config: &CONFIG_2025,
        };

        let breakdown = calculator.calculate(&single("ID", dec!(75000))).unwrap();

        // 55,189 × 5.3%
        assert_eq!(breakdown.tax_before_credits, dec!(2925.02));
        assert_eq!(breakdown.refundable_credits, dec!(155.00));
        assert_eq!(breakdown.tax_liability, dec!(2770.02));
    }
}

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const PERSONAL_CREDIT: Decimal = dec!(171);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.0246)),
        (dec!(4030), dec!(0.0351)),
        (dec!(24120), dec!(0.0501)),
        (dec!(38870), dec!(0.052)),
    ];
    let joint = [
        (dec!(0), dec!(0.0246)),
        (dec!(8040), dec!(0.0351)),
        (dec!(48250), dec!(0.0501)),
        (dec!(77730), dec!(0.052)),
    ];
    let head_of_household = [
        (dec!(0), dec!(0.0246)),
        (dec!(7510), dec!(0.0351)),
        (dec!(38590), dec!(0.0501)),
        (dec!(57630), dec!(0.052)),
    ];

    let mut config = StateTaxConfig::new(
        UsState::NE,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &head_of_household),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::Fixed {
        base: ByFilingStatus::new(dec!(8600), dec!(17200), dec!(8600), dec!(12650)),
        additional: dec!(1600),
    };
    config.allows_itemized = true;
    config
});

pub struct Nebraska {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Nebraska {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        let people = ctx.filer_count() + ctx.dependents();
        vec![StateCredit::nonrefundable(
            "Personal Exemption Credit",
            PERSONAL_CREDIT * Decimal::from(people),
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::NE, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Nebraska {
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
    fn four_brackets_less_exemption_credit() {
        let calculator = Nebraska {
            config: &CONFIG_2025,
        };

        let breakdown = calculator.calculate(&single("NE", dec!(75000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(66400.00));
        assert_eq!(breakdown.tax_before_credits, dec!(2974.83));
        assert_eq!(breakdown.tax_liability, dec!(2803.83));
    }
}

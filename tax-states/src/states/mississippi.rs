use std::sync::LazyLock;

use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::StateTaxCalculator;
use crate::config::{
    RetirementExclusion, StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule,
};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::MS,
        2025,
        TaxSchedule::uniform(&[(dec!(0), dec!(0)), (dec!(10000), dec!(0.044))]),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::new(
        dec!(2300),
        dec!(4600),
        dec!(2300),
        dec!(3400),
    ));
    config.personal_exemption =
        ByFilingStatus::new(dec!(6000), dec!(12000), dec!(6000), dec!(9500));
    config.dependent_exemption = dec!(1500);
    config.additional_exemption = dec!(1500);
    config.allows_itemized = true;
    config.retirement_exclusion = RetirementExclusion::Full;
    config
});

pub struct Mississippi {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Mississippi {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::MS, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Mississippi {
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
    fn first_ten_thousand_untaxed() {
        let calculator = Mississippi {
            config: &CONFIG_2025,
        };

        let breakdown = calculator.calculate(&single("MS", dec!(50000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(41700.00));
        assert_eq!(breakdown.tax_before_credits, dec!(1394.80));
    }
}

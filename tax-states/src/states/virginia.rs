use std::sync::LazyLock;

use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::StateTaxCalculator;
use crate::config::{
    StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule, per_filer,
};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::VA,
        2025,
        TaxSchedule::uniform(&[
            (dec!(0), dec!(0.02)),
            (dec!(3000), dec!(0.03)),
            (dec!(5000), dec!(0.05)),
            (dec!(17000), dec!(0.0575)),
        ]),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::single_joint(
        dec!(8500),
        dec!(17000),
    ));
    config.personal_exemption = per_filer(dec!(930));
    config.dependent_exemption = dec!(930);
    config.additional_exemption = dec!(800);
    config.allows_itemized = true;
    config
});

pub struct Virginia {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Virginia {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::VA, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Virginia {
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
    fn top_bracket_starts_at_17k() {
        let calculator = Virginia {
            config: &CONFIG_2025,
        };

        let breakdown = calculator.calculate(&single("VA", dec!(75000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(65570.00));
        assert_eq!(breakdown.tax_before_credits, dec!(3512.78));
    }
}

use std::sync::LazyLock;

use rust_decimal_macros::dec;

use crate::UsState;
use crate::calculator::StateTaxCalculator;
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule, per_filer};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::MI,
        2025,
        TaxSchedule::Flat(dec!(0.0425)),
        StartingIncome::FederalAgi,
    );
    config.personal_exemption = per_filer(dec!(5800));
    config.dependent_exemption = dec!(5800);
    config
});

pub struct Michigan {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Michigan {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::MI, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Michigan {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::FilingStatus;

    use super::*;
    use crate::calculator::test_support::{single, wage_return, with_federal};

    fn calculator() -> Michigan {
        Michigan {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn flat_rate_after_exemption() {
        let breakdown = calculator().calculate(&single("MI", dec!(75000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(69200.00));
        assert_eq!(breakdown.tax_before_credits, dec!(2941.00));
    }

    #[test]
    fn joint_return_gets_two_exemptions() {
        let tax_return = with_federal(wage_return(
            FilingStatus::MarriedFilingJointly,
            "MI",
            dec!(75000),
            dec!(3000),
        ));

        let breakdown = calculator().calculate(&tax_return).unwrap();

        assert_eq!(breakdown.exemptions, dec!(11600.00));
        assert_eq!(breakdown.tax_before_credits, dec!(2694.50));
        assert_eq!(breakdown.refund_or_owed, dec!(305.50));
    }
}

use std::sync::LazyLock;

use rust_decimal_macros::dec;

use crate::UsState;
use crate::calculator::StateTaxCalculator;
use crate::config::{
    RetirementExclusion, StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule,
    per_filer,
};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::KY,
        2025,
        TaxSchedule::Flat(dec!(0.04)),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(per_filer(dec!(3270)));
    config.allows_itemized = true;
    config.retirement_exclusion = RetirementExclusion::UpTo(dec!(31110));
    config
});

pub struct Kentucky {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Kentucky {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::KY, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Kentucky {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::{FilingStatus, TaxReturn, TaxpayerInfo};

    use super::*;
    use crate::calculator::test_support::{single, with_federal};

    fn calculator() -> Kentucky {
        Kentucky {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn flat_rate_after_standard_deduction() {
        let breakdown = calculator().calculate(&single("KY", dec!(75000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(71730.00));
        assert_eq!(breakdown.tax_before_credits, dec!(2869.20));
    }

    #[test]
    fn pension_exclusion_is_capped() {
        let mut info = TaxpayerInfo::new(FilingStatus::Single);
        info.age = 62;
        let mut tax_return = TaxReturn::new(2025, info);
        tax_return.income.retirement_distributions = dec!(50000);

        let breakdown = calculator().calculate(&with_federal(tax_return)).unwrap();

        assert_eq!(breakdown.subtractions, dec!(31110.00));
        assert_eq!(breakdown.state_agi, dec!(18890.00));
    }
}

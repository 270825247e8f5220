//! Alabama (Form 40).
//!
//! The standard deduction and the dependent exemption slide with AGI, and
//! the federal income tax is deductible.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::common::phaseout_steps;
use tax_core::{ByFilingStatus, FilingStatus};

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator};
use crate::config::{FederalTaxDeduction, StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::AL,
        2025,
        TaxSchedule::single_joint(
            &[(dec!(0), dec!(0.02)), (dec!(500), dec!(0.04)), (dec!(3000), dec!(0.05))],
            &[(dec!(0), dec!(0.02)), (dec!(1000), dec!(0.04)), (dec!(6000), dec!(0.05))],
        ),
        StartingIncome::FederalAgi,
    );
    config.personal_exemption =
        ByFilingStatus::new(dec!(1500), dec!(3000), dec!(1500), dec!(3000));
    config.allows_itemized = true;
    config.federal_tax_deduction = FederalTaxDeduction::Full;
    config
});

/// Sliding standard deduction: (maximum, reduction per $500 of AGI over
/// $23,000, minimum).
fn deduction_schedule(status: FilingStatus) -> (Decimal, Decimal, Decimal) {
    match status {
        FilingStatus::MarriedFilingJointly | FilingStatus::QualifyingSurvivingSpouse => {
            (dec!(8500), dec!(175), dec!(5000))
        }
        FilingStatus::HeadOfHousehold => (dec!(5200), dec!(135), dec!(2500)),
        FilingStatus::MarriedFilingSeparately => (dec!(4250), dec!(88), dec!(2500)),
        FilingStatus::Single => (dec!(3000), dec!(25), dec!(2500)),
    }
}

fn dependent_exemption(agi: Decimal) -> Decimal {
    if agi <= dec!(50000) {
        dec!(1000)
    } else if agi <= dec!(100000) {
        dec!(500)
    } else {
        dec!(300)
    }
}

pub struct Alabama {
    config: &'static StateTaxConfig,
}

impl Alabama {
    /// AGI before the federal tax deduction, which Alabama takes below the
    /// line.
    fn alabama_agi(
        &self,
        ctx: &StateContext<'_>,
        state_agi: Decimal,
    ) -> Decimal {
        state_agi + self.federal_tax_deduction(ctx)
    }
}

impl StateTaxCalculator for Alabama {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn standard_deduction(
        &self,
        ctx: &StateContext<'_>,
        state_agi: Decimal,
    ) -> Decimal {
        let (maximum, step_reduction, minimum) = deduction_schedule(ctx.filing_status());
        let steps = phaseout_steps(self.alabama_agi(ctx, state_agi) - dec!(23000), dec!(500));
        (maximum - steps * step_reduction).max(minimum)
    }

    fn exemptions(
        &self,
        ctx: &StateContext<'_>,
        state_agi: Decimal,
    ) -> Decimal {
        *ctx.config.personal_exemption.get(ctx.filing_status())
            + dependent_exemption(self.alabama_agi(ctx, state_agi))
                * Decimal::from(ctx.dependents())
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::AL, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Alabama {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculator::test_support::single;

    fn calculator() -> Alabama {
        Alabama {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn federal_tax_is_subtracted() {
        let breakdown = calculator().calculate(&single("AL", dec!(75000))).unwrap();

        // federal tax on 60,000 taxable
        assert_eq!(breakdown.subtractions, dec!(8114.00));
        assert_eq!(breakdown.state_agi, dec!(66886.00));
    }

    #[test]
    fn standard_deduction_slides_to_minimum() {
        let breakdown = calculator().calculate(&single("AL", dec!(75000))).unwrap();

        assert_eq!(breakdown.standard_deduction, dec!(2500.00));
        assert_eq!(breakdown.taxable_income, dec!(62886.00));
        // 10 + 100 + 59,886 × 5%
        assert_eq!(breakdown.tax_before_credits, dec!(3104.30));
    }

    #[test]
    fn full_standard_deduction_at_low_income() {
        let breakdown = calculator().calculate(&single("AL", dec!(20000))).unwrap();

        assert_eq!(breakdown.standard_deduction, dec!(3000.00));
    }

    #[test]
    fn dependent_exemption_by_income() {
        assert_eq!(dependent_exemption(dec!(50000)), dec!(1000));
        assert_eq!(dependent_exemption(dec!(50000.01)), dec!(500));
        assert_eq!(dependent_exemption(dec!(150000)), dec!(300));
    }
}

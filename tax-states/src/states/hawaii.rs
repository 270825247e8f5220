use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const EXEMPTION: Decimal = dec!(1144);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.014)),
        (dec!(9600), dec!(0.032)),
        (dec!(14400), dec!(0.055)),
        (dec!(19200), dec!(0.064)),
        (dec!(24000), dec!(0.068)),
        (dec!(36000), dec!(0.072)),
        (dec!(48000), dec!(0.076)),
        (dec!(125000), dec!(0.079)),
        (dec!(175000), dec!(0.0825)),
        (dec!(225000), dec!(0.09)),
        (dec!(275000), dec!(0.10)),
        (dec!(325000), dec!(0.11)),
    ];
    let joint = single.map(|(threshold, rate)| (threshold * dec!(2), rate));
    let head_of_household = single.map(|(threshold, rate)| (threshold * dec!(1.5), rate));

    let mut config = StateTaxConfig::new(
        UsState::HI,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &head_of_household),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::new(
        dec!(4400),
        dec!(8800),
        dec!(4400),
        dec!(6424),
    ));
    config.allows_itemized = true;
    config
});

pub struct Hawaii {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Hawaii {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    /// One exemption per filer and dependent, another for each filer 65 or
    /// older.
    fn exemptions(
        &self,
        ctx: &StateContext<'_>,
        _state_agi: Decimal,
    ) -> Decimal {
        EXEMPTION * Decimal::from(ctx.filer_count() + ctx.dependents() + ctx.seniors())
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::HI, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Hawaii {
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
    fn twelve_bracket_schedule() {
        let calculator = Hawaii {
            config: &CONFIG_2025,
        };

        let breakdown = calculator.calculate(&single("HI", dec!(50000))).unwrap();

        assert_eq!(breakdown.exemptions, dec!(1144.00));
        assert_eq!(breakdown.taxable_income, dec!(44456.00));
        assert_eq!(breakdown.tax_before_credits, dec!(2284.03));
    }
}

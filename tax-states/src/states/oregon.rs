//! Oregon (Form OR-40).
//!
//! Federal income tax is subtracted up to a cap that steps down to zero
//! over a band of AGI. A small personal credit is allowed below an income
//! limit.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::common::{non_negative, phaseout_steps};
use tax_core::{ByFilingStatus, FilingStatus};

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{
    FederalTaxDeduction, StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule,
};
use crate::registry::StateRegistry;

const FEDERAL_CAP_STEPS: Decimal = dec!(5);
const PERSONAL_CREDIT: Decimal = dec!(256);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.0475)),
        (dec!(4400), dec!(0.0675)),
        (dec!(11050), dec!(0.0875)),
        (dec!(125000), dec!(0.099)),
    ];
    let joint = [
        (dec!(0), dec!(0.0475)),
        (dec!(8800), dec!(0.0675)),
        (dec!(22100), dec!(0.0875)),
        (dec!(250000), dec!(0.099)),
    ];

    let mut config = StateTaxConfig::new(
        UsState::OR,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &joint),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::Fixed {
        base: ByFilingStatus::new(dec!(2835), dec!(5670), dec!(2835), dec!(4560)),
        additional: dec!(1200),
    };
    config.allows_itemized = true;
    config.federal_tax_deduction = FederalTaxDeduction::Capped(ByFilingStatus::new(
        dec!(8500),
        dec!(8500),
        dec!(4250),
        dec!(8500),
    ));
    config
});

/// (start, width of each step) of the federal subtraction phase-down.
fn federal_cap_phasedown(status: FilingStatus) -> (Decimal, Decimal) {
    if status.is_joint() {
        (dec!(250000), dec!(10000))
    } else {
        (dec!(125000), dec!(5000))
    }
}

fn personal_credit_limit() -> ByFilingStatus<Decimal> {
    ByFilingStatus::single_joint(dec!(100000), dec!(200000))
}

pub struct Oregon {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Oregon {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    /// The cap loses a fifth of its value for each step of AGI past the
    /// start of the phase-down.
    fn federal_tax_deduction(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let FederalTaxDeduction::Capped(caps) = &ctx.config.federal_tax_deduction else {
            return Decimal::ZERO;
        };
        let base = *caps.get(ctx.filing_status());
        let (start, width) = federal_cap_phasedown(ctx.filing_status());
        let steps = phaseout_steps(ctx.federal.adjusted_gross_income - start, width);
        let cap = non_negative(base - base / FEDERAL_CAP_STEPS * steps);
        ctx.federal_income_tax().min(cap)
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        if ctx.federal.adjusted_gross_income > *personal_credit_limit().get(ctx.filing_status()) {
            return Vec::new();
        }
        let people = ctx.filer_count() + ctx.dependents();
        vec![StateCredit::nonrefundable(
            "Personal Exemption Credit",
            PERSONAL_CREDIT * Decimal::from(people),
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::OR, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Oregon {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculator::test_support::single;

    fn calculator() -> Oregon {
        Oregon {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn federal_tax_subtracted_below_cap() {
        let breakdown = calculator().calculate(&single("OR", dec!(75000))).unwrap();

        assert_eq!(breakdown.subtractions, dec!(8114.00));
        assert_eq!(breakdown.taxable_income, dec!(64051.00));
        assert_eq!(breakdown.tax_before_credits, dec!(5295.46));
        assert_eq!(breakdown.tax_liability, dec!(5039.46));
    }

    #[test]
    fn federal_subtraction_phases_down() {
        let capped = calculator().calculate(&single("OR", dec!(124000))).unwrap();
        let reduced = calculator().calculate(&single("OR", dec!(132000))).unwrap();
        let gone = calculator().calculate(&single("OR", dec!(150000))).unwrap();

        assert_eq!(capped.subtractions, dec!(8500.00));
        assert_eq!(reduced.subtractions, dec!(5100.00));
        assert_eq!(gone.subtractions, dec!(0));
        assert_eq!(gone.credits.len(), 0);
    }
}

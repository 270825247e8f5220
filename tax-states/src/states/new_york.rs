//! New York (IT-201).
//!
//! Nine brackets per filing status, a pension exclusion from age 60, and
//! New York City resident tax on the same taxable income when the return's
//! locality is the city.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateLines, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const PENSION_EXCLUSION: Decimal = dec!(20000);
const PENSION_EXCLUSION_AGE: u32 = 60;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.04)),
        (dec!(8500), dec!(0.045)),
        (dec!(11700), dec!(0.0525)),
        (dec!(13900), dec!(0.055)),
        (dec!(80650), dec!(0.06)),
        (dec!(215400), dec!(0.0685)),
        (dec!(1077550), dec!(0.0965)),
        (dec!(5000000), dec!(0.103)),
        (dec!(25000000), dec!(0.109)),
    ];
    let joint = [
        (dec!(0), dec!(0.04)),
        (dec!(17150), dec!(0.045)),
        (dec!(23600), dec!(0.0525)),
        (dec!(27900), dec!(0.055)),
        (dec!(161550), dec!(0.06)),
        (dec!(323200), dec!(0.0685)),
        (dec!(2155350), dec!(0.0965)),
        (dec!(5000000), dec!(0.103)),
        (dec!(25000000), dec!(0.109)),
    ];
    let head_of_household = [
        (dec!(0), dec!(0.04)),
        (dec!(12800), dec!(0.045)),
        (dec!(17650), dec!(0.0525)),
        (dec!(20900), dec!(0.055)),
        (dec!(107650), dec!(0.06)),
        (dec!(269300), dec!(0.0685)),
        (dec!(1616450), dec!(0.0965)),
        (dec!(5000000), dec!(0.103)),
        (dec!(25000000), dec!(0.109)),
    ];

    let mut config = StateTaxConfig::new(
        UsState::NY,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &head_of_household),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::new(
        dec!(8000),
        dec!(16050),
        dec!(8000),
        dec!(11200),
    ));
    config.dependent_exemption = dec!(1000);
    config.allows_itemized = true;
    config
});

static NYC_SCHEDULE: LazyLock<TaxSchedule> = LazyLock::new(|| {
    TaxSchedule::by_status(
        &[
            (dec!(0), dec!(0.03078)),
            (dec!(12000), dec!(0.03762)),
            (dec!(25000), dec!(0.03819)),
            (dec!(50000), dec!(0.03876)),
        ],
        &[
            (dec!(0), dec!(0.03078)),
            (dec!(21600), dec!(0.03762)),
            (dec!(45000), dec!(0.03819)),
            (dec!(90000), dec!(0.03876)),
        ],
        &[
            (dec!(0), dec!(0.03078)),
            (dec!(12000), dec!(0.03762)),
            (dec!(25000), dec!(0.03819)),
            (dec!(50000), dec!(0.03876)),
        ],
        &[
            (dec!(0), dec!(0.03078)),
            (dec!(14400), dec!(0.03762)),
            (dec!(30000), dec!(0.03819)),
            (dec!(60000), dec!(0.03876)),
        ],
    )
});

fn is_new_york_city(locality: &str) -> bool {
    let locality = locality.trim();
    locality.eq_ignore_ascii_case("NYC") || locality.eq_ignore_ascii_case("New York City")
}

fn pension_exclusion(age: u32) -> Decimal {
    if age >= PENSION_EXCLUSION_AGE {
        PENSION_EXCLUSION
    } else {
        Decimal::ZERO
    }
}

pub struct NewYork {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for NewYork {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let taxpayer = &ctx.tax_return.taxpayer;
        let limit = pension_exclusion(taxpayer.age)
            + taxpayer
                .joint_spouse()
                .map(|s| pension_exclusion(s.age))
                .unwrap_or(Decimal::ZERO);
        standard_subtractions(ctx) + ctx.tax_return.income.retirement_distributions.min(limit)
    }

    /// City residents pay the graduated NYC tax; elsewhere the return's
    /// local rate applies, if any.
    fn local_tax(
        &self,
        ctx: &StateContext<'_>,
        lines: &StateLines,
    ) -> Decimal {
        if ctx.tax_return.locality.as_deref().is_some_and(is_new_york_city) {
            return NYC_SCHEDULE.tax_on(ctx.filing_status(), lines.taxable_income);
        }
        ctx.tax_return
            .local_tax_rate
            .map(|rate| lines.taxable_income * rate)
            .unwrap_or(Decimal::ZERO)
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::NY, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(NewYork {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculator::test_support::single;

    fn calculator() -> NewYork {
        NewYork {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn state_tax_outside_the_city() {
        let breakdown = calculator().calculate(&single("NY", dec!(75000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(67000.00));
        assert_eq!(breakdown.tax_before_credits, dec!(3520.00));
        assert_eq!(breakdown.local_tax, dec!(0));
    }

    #[test]
    fn city_residents_pay_nyc_tax() {
        let mut tax_return = single("NY", dec!(75000));
        tax_return.locality = Some("nyc".to_string());

        let breakdown = calculator().calculate(&tax_return).unwrap();

        assert_eq!(breakdown.local_tax, dec!(2472.09));
        assert_eq!(breakdown.tax_liability, dec!(5992.09));
    }

    #[test]
    fn yonkers_style_rate_from_the_return() {
        let mut tax_return = single("NY", dec!(75000));
        tax_return.locality = Some("Yonkers".to_string());
        tax_return.local_tax_rate = Some(dec!(0.01));

        let breakdown = calculator().calculate(&tax_return).unwrap();

        assert_eq!(breakdown.local_tax, dec!(670.00));
    }
}

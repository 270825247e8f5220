//! New Jersey (NJ-1040).
//!
//! NJ does not start from federal AGI: it taxes gross income by category,
//! with losses in one category not offsetting another and Social Security
//! left out. There is no standard deduction; the property tax deduction
//! for renters (18% of rent) takes its place.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule, per_filer};
use crate::registry::StateRegistry;

const RENT_AS_PROPERTY_TAX: Decimal = dec!(0.18);
const PROPERTY_TAX_DEDUCTION_CAP: Decimal = dec!(15000);
/// Gross income above which the pension exclusion is lost.
const PENSION_EXCLUSION_INCOME_LIMIT: Decimal = dec!(100000);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.014)),
        (dec!(20000), dec!(0.0175)),
        (dec!(35000), dec!(0.035)),
        (dec!(40000), dec!(0.05525)),
        (dec!(75000), dec!(0.0637)),
        (dec!(500000), dec!(0.0897)),
        (dec!(1000000), dec!(0.1075)),
    ];
    let joint = [
        (dec!(0), dec!(0.014)),
        (dec!(20000), dec!(0.0175)),
        (dec!(50000), dec!(0.0245)),
        (dec!(70000), dec!(0.035)),
        (dec!(80000), dec!(0.05525)),
        (dec!(150000), dec!(0.0637)),
        (dec!(500000), dec!(0.0897)),
        (dec!(1000000), dec!(0.1075)),
    ];

    let mut config = StateTaxConfig::new(
        UsState::NJ,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &joint),
        StartingIncome::GrossIncome,
    );
    config.personal_exemption = per_filer(dec!(1000));
    config.dependent_exemption = dec!(1500);
    config.additional_exemption = dec!(1000);
    config
});

fn pension_exclusion_limit() -> ByFilingStatus<Decimal> {
    ByFilingStatus::new(dec!(75000), dec!(100000), dec!(50000), dec!(75000))
}

pub struct NewJersey {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for NewJersey {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let pension = if ctx.gross_income() <= PENSION_EXCLUSION_INCOME_LIMIT {
            ctx.tax_return
                .income
                .retirement_distributions
                .min(*pension_exclusion_limit().get(ctx.filing_status()))
        } else {
            Decimal::ZERO
        };
        standard_subtractions(ctx) + pension
    }

    fn standard_deduction(
        &self,
        ctx: &StateContext<'_>,
        _state_agi: Decimal,
    ) -> Decimal {
        (ctx.tax_return.credits.rent_paid * RENT_AS_PROPERTY_TAX).min(PROPERTY_TAX_DEDUCTION_CAP)
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::NJ, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(NewJersey {
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

    fn calculator() -> NewJersey {
        NewJersey {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn gross_income_brackets() {
        let breakdown = calculator().calculate(&single("NJ", dec!(75000))).unwrap();

        assert_eq!(breakdown.starting_income, dec!(75000.00));
        assert_eq!(breakdown.taxable_income, dec!(74000.00));
        assert_eq!(breakdown.tax_before_credits, dec!(2596.00));
    }

    #[test]
    fn renters_property_tax_deduction() {
        let mut tax_return = single("NJ", dec!(75000));
        tax_return.credits.rent_paid = dec!(12000);

        let breakdown = calculator().calculate(&tax_return).unwrap();

        assert_eq!(breakdown.deduction_used, dec!(2160.00));
        assert_eq!(breakdown.tax_before_credits, dec!(2476.66));
    }

    #[test]
    fn social_security_is_not_income() {
        let mut info = TaxpayerInfo::new(FilingStatus::Single);
        info.age = 70;
        let mut tax_return = TaxReturn::new(2025, info);
        tax_return.income.retirement_distributions = dec!(50000);
        tax_return.income.social_security_benefits = dec!(30000);

        let breakdown = calculator().calculate(&with_federal(tax_return)).unwrap();

        assert_eq!(breakdown.starting_income, dec!(50000.00));
        assert_eq!(breakdown.subtractions, dec!(50000.00));
        assert_eq!(breakdown.tax_before_credits, dec!(0));
    }
}

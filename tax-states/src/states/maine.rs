use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::common::non_negative;

use crate::UsState;
use crate::calculator::{
    StateContext, StateCredit, StateLines, StateTaxCalculator, standard_subtractions,
};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const EXEMPTION: Decimal = dec!(5150);
/// Pension deduction ceiling, reduced by Social Security received.
const PENSION_DEDUCTION_LIMIT: Decimal = dec!(45864);
const DEPENDENT_CREDIT: Decimal = dec!(300);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::ME,
        2025,
        TaxSchedule::by_status(
            &[
                (dec!(0), dec!(0.058)),
                (dec!(26800), dec!(0.0675)),
                (dec!(63450), dec!(0.0715)),
            ],
            &[
                (dec!(0), dec!(0.058)),
                (dec!(53600), dec!(0.0675)),
                (dec!(126900), dec!(0.0715)),
            ],
            &[
                (dec!(0), dec!(0.058)),
                (dec!(26800), dec!(0.0675)),
                (dec!(63450), dec!(0.0715)),
            ],
            &[
                (dec!(0), dec!(0.058)),
                (dec!(40200), dec!(0.0675)),
                (dec!(95150), dec!(0.0715)),
            ],
        ),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::FollowsFederal;
    config.allows_itemized = true;
    config
});

pub struct Maine {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Maine {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let income = &ctx.tax_return.income;
        let limit = non_negative(PENSION_DEDUCTION_LIMIT - income.social_security_benefits);
        standard_subtractions(ctx) + income.retirement_distributions.min(limit)
    }

    fn exemptions(
        &self,
        ctx: &StateContext<'_>,
        _state_agi: Decimal,
    ) -> Decimal {
        EXEMPTION * Decimal::from(ctx.filer_count() + ctx.dependents())
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        vec![StateCredit::refundable(
            "Dependent Exemption Credit",
            DEPENDENT_CREDIT * Decimal::from(ctx.dependents()),
        )]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::ME, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Maine {
            config: &CONFIG_2025,
        })
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::{FilingStatus, TaxReturn, TaxpayerInfo};

    use super::*;
    use crate::calculator::test_support::{child, single, wage_return, with_federal};

    fn calculator() -> Maine {
        Maine {
            config: &CONFIG_2025,
        }
    }

    #[test]
    fn graduated_tax_after_federal_deduction_and_exemption() {
        let breakdown = calculator().calculate(&single("ME", dec!(75000))).unwrap();

        assert_eq!(breakdown.taxable_income, dec!(54850.00));
        assert_eq!(breakdown.tax_before_credits, dec!(3447.78));
    }

    #[test]
    fn pension_deduction_reduced_by_social_security() {
        let mut info = TaxpayerInfo::new(FilingStatus::Single);
        info.age = 70;
        let mut tax_return = TaxReturn::new(2025, info);
        tax_return.income.retirement_distributions = dec!(40000);
        tax_return.income.social_security_benefits = dec!(20000);

        let breakdown = calculator().calculate(&with_federal(tax_return)).unwrap();
        let taxable_social_security = breakdown.federal_agi - dec!(40000);

        assert_eq!(breakdown.subtractions, taxable_social_security + dec!(25864.00));
    }

    #[test]
    fn dependent_credit_is_refundable() {
        let mut tax_return = wage_return(FilingStatus::HeadOfHousehold, "ME", dec!(20000), dec!(0));
        tax_return.taxpayer.dependents.push(child("Ada", 7));

        let breakdown = calculator().calculate(&with_federal(tax_return)).unwrap();

        assert_eq!(breakdown.tax_before_credits, dec!(0));
        assert_eq!(breakdown.tax_liability, dec!(-300.00));
    }
}

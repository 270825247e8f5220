//! Connecticut (Form CT-1040).

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;
use tax_core::calculations::common::{non_negative, phaseout_steps};

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let mut config = StateTaxConfig::new(
        UsState::CT,
        2025,
        TaxSchedule::by_status(
            &[
                (dec!(0), dec!(0.02)),
                (dec!(10000), dec!(0.045)),
                (dec!(50000), dec!(0.055)),
                (dec!(100000), dec!(0.06)),
                (dec!(200000), dec!(0.065)),
                (dec!(250000), dec!(0.069)),
                (dec!(500000), dec!(0.0699)),
            ],
            &[
                (dec!(0), dec!(0.02)),
                (dec!(20000), dec!(0.045)),
                (dec!(100000), dec!(0.055)),
                (dec!(200000), dec!(0.06)),
                (dec!(400000), dec!(0.065)),
                (dec!(500000), dec!(0.069)),
                (dec!(1000000), dec!(0.0699)),
            ],
            &[
                (dec!(0), dec!(0.02)),
                (dec!(10000), dec!(0.045)),
                (dec!(50000), dec!(0.055)),
                (dec!(100000), dec!(0.06)),
                (dec!(200000), dec!(0.065)),
                (dec!(250000), dec!(0.069)),
                (dec!(500000), dec!(0.0699)),
            ],
            &[
                (dec!(0), dec!(0.02)),
                (dec!(16000), dec!(0.045)),
                (dec!(80000), dec!(0.055)),
                (dec!(160000), dec!(0.06)),
                (dec!(320000), dec!(0.065)),
                (dec!(400000), dec!(0.069)),
                (dec!(800000), dec!(0.0699)),
            ],
        ),
        StartingIncome::FederalAgi,
    );
    config.personal_exemption =
        ByFilingStatus::new(dec!(15000), dec!(24000), dec!(12000), dec!(19000));
    config.social_security_taxable = true;
    config
});

/// AGI at which the personal exemption starts losing $1,000 per $1,000.
fn exemption_phaseout_start() -> ByFilingStatus<Decimal> {
    ByFilingStatus::new(dec!(30000), dec!(48000), dec!(24000), dec!(38000))
}

/// Below this AGI, Social Security and pension income are fully exempt.
fn retirement_threshold() -> ByFilingStatus<Decimal> {
    ByFilingStatus::single_joint(dec!(75000), dec!(100000))
}

pub struct Connecticut {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Connecticut {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    /// Under the threshold all taxable benefits and pensions come off;
    /// above it no more than 25% of benefits stays taxable.
    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let federal = &ctx.federal.income;
        let agi = ctx.federal.adjusted_gross_income;

        let retirement = if agi < *retirement_threshold().get(ctx.filing_status()) {
            federal.taxable_social_security + ctx.tax_return.income.retirement_distributions
        } else {
            non_negative(
                federal.taxable_social_security - federal.social_security_benefits * dec!(0.25),
            )
        };
        standard_subtractions(ctx) + retirement
    }

    fn exemptions(
        &self,
        ctx: &StateContext<'_>,
        state_agi: Decimal,
    ) -> Decimal {
        let status = ctx.filing_status();
        let maximum = *ctx.config.personal_exemption.get(status);
        let steps = phaseout_steps(state_agi - *exemption_phaseout_start().get(status), dec!(1000));
        non_negative(maximum - steps * dec!(1000))
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::CT, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Connecticut {
            config: &CONFIG_2025,
        })
    });
}

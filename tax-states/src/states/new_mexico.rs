use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator, standard_subtractions};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.015)),
        (dec!(5500), dec!(0.032)),
        (dec!(16500), dec!(0.043)),
        (dec!(33500), dec!(0.047)),
        (dec!(66500), dec!(0.049)),
        (dec!(210000), dec!(0.059)),
    ];
    let joint = [
        (dec!(0), dec!(0.015)),
        (dec!(8000), dec!(0.032)),
        (dec!(25000), dec!(0.043)),
        (dec!(50000), dec!(0.047)),
        (dec!(100000), dec!(0.049)),
        (dec!(315000), dec!(0.059)),
    ];
    let separate = [
        (dec!(0), dec!(0.015)),
        (dec!(4000), dec!(0.032)),
        (dec!(12500), dec!(0.043)),
        (dec!(25000), dec!(0.047)),
        (dec!(50000), dec!(0.049)),
        (dec!(157500), dec!(0.059)),
    ];

    let mut config = StateTaxConfig::new(
        UsState::NM,
        2025,
        TaxSchedule::by_status(&single, &joint, &separate, &joint),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::FollowsFederal;
    config.allows_itemized = true;
    // Exempt only below the income limit, handled below.
    config.social_security_taxable = true;
    config
});

fn social_security_income_limit() -> ByFilingStatus<Decimal> {
    ByFilingStatus::new(dec!(100000), dec!(150000), dec!(75000), dec!(150000))
}

pub struct NewMexico {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for NewMexico {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        let limit = *social_security_income_limit().get(ctx.filing_status());
        let social_security = if ctx.federal.adjusted_gross_income <= limit {
            ctx.federal.income.taxable_social_security
        } else {
            Decimal::ZERO
        };
        standard_subtractions(ctx) + social_security
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::NM, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(NewMexico {
            config: &CONFIG_2025,
        })
    });
}

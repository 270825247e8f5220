//! Wisconsin: the standard deduction slides to zero as income rises, at a
//! rate set per filing status.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::ByFilingStatus;
use tax_core::calculations::common::non_negative;

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator};
use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule, per_filer};
use crate::registry::StateRegistry;

const SENIOR_EXEMPTION: Decimal = dec!(250);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.035)),
        (dec!(14680), dec!(0.044)),
        (dec!(29370), dec!(0.053)),
        (dec!(323290), dec!(0.0765)),
    ];
    let joint = [
        (dec!(0), dec!(0.035)),
        (dec!(19580), dec!(0.044)),
        (dec!(39150), dec!(0.053)),
        (dec!(431060), dec!(0.0765)),
    ];
    let separate = [
        (dec!(0), dec!(0.035)),
        (dec!(9790), dec!(0.044)),
        (dec!(19575), dec!(0.053)),
        (dec!(215530), dec!(0.0765)),
    ];

    let mut config = StateTaxConfig::new(
        UsState::WI,
        2025,
        TaxSchedule::by_status(&single, &joint, &separate, &single),
        StartingIncome::FederalAgi,
    );
    config.personal_exemption = per_filer(dec!(700));
    config.dependent_exemption = dec!(700);
    config
});

/// (maximum deduction, income where it starts to shrink, reduction rate).
fn sliding_deduction() -> ByFilingStatus<(Decimal, Decimal, Decimal)> {
    ByFilingStatus::new(
        (dec!(13560), dec!(19070), dec!(0.12)),
        (dec!(25110), dec!(26810), dec!(0.19778)),
        (dec!(11925), dec!(12730), dec!(0.19778)),
        (dec!(17530), dec!(19070), dec!(0.22515)),
    )
}

pub struct Wisconsin {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Wisconsin {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn standard_deduction(
        &self,
        ctx: &StateContext<'_>,
        state_agi: Decimal,
    ) -> Decimal {
        let (maximum, start, rate) = *sliding_deduction().get(ctx.filing_status());
        non_negative(maximum - non_negative(state_agi - start) * rate)
    }

    fn exemptions(
        &self,
        ctx: &StateContext<'_>,
        _state_agi: Decimal,
    ) -> Decimal {
        let per_person = *ctx.config.personal_exemption.get(ctx.filing_status())
            + ctx.config.dependent_exemption * Decimal::from(ctx.dependents());
        per_person + SENIOR_EXEMPTION * Decimal::from(ctx.seniors())
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::WI, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Wisconsin {
            config: &CONFIG_2025,
        })
    });
}

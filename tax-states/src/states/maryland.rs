//! Maryland: graduated state brackets, an exemption that shrinks with
//! income, and a county tax on state taxable income.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{ByFilingStatus, FilingStatus};

use crate::UsState;
use crate::calculator::{StateContext, StateTaxCalculator};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const EXEMPTION: Decimal = dec!(3200);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.02)),
        (dec!(1000), dec!(0.03)),
        (dec!(2000), dec!(0.04)),
        (dec!(3000), dec!(0.0475)),
        (dec!(100000), dec!(0.05)),
        (dec!(125000), dec!(0.0525)),
        (dec!(150000), dec!(0.055)),
        (dec!(250000), dec!(0.0575)),
        (dec!(500000), dec!(0.0625)),
        (dec!(1000000), dec!(0.065)),
    ];
    let joint = [
        (dec!(0), dec!(0.02)),
        (dec!(1000), dec!(0.03)),
        (dec!(2000), dec!(0.04)),
        (dec!(3000), dec!(0.0475)),
        (dec!(150000), dec!(0.05)),
        (dec!(175000), dec!(0.0525)),
        (dec!(225000), dec!(0.055)),
        (dec!(300000), dec!(0.0575)),
        (dec!(600000), dec!(0.0625)),
        (dec!(1200000), dec!(0.065)),
    ];

    let mut config = StateTaxConfig::new(
        UsState::MD,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &joint),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::single_joint(
        dec!(3350),
        dec!(6700),
    ));
    config.additional_exemption = dec!(1000);
    config.allows_itemized = true;
    config.default_local_rate = Some(dec!(0.032));
    config
});

/// Exemption per person at `agi`: full up to the first threshold, then
/// half, a quarter, and nothing.
fn exemption_amount(
    status: FilingStatus,
    agi: Decimal,
) -> Decimal {
    let thresholds = ByFilingStatus::new(
        [dec!(100000), dec!(125000), dec!(150000)],
        [dec!(150000), dec!(175000), dec!(200000)],
        [dec!(100000), dec!(125000), dec!(150000)],
        [dec!(150000), dec!(175000), dec!(200000)],
    );
    let [full, half, quarter] = *thresholds.get(status);
    if agi <= full {
        EXEMPTION
    } else if agi <= half {
        EXEMPTION / dec!(2)
    } else if agi <= quarter {
        EXEMPTION / dec!(4)
    } else {
        Decimal::ZERO
    }
}

pub struct Maryland {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for Maryland {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn exemptions(
        &self,
        ctx: &StateContext<'_>,
        _state_agi: Decimal,
    ) -> Decimal {
        let per_person = exemption_amount(ctx.filing_status(), ctx.federal.adjusted_gross_income);
        per_person * Decimal::from(ctx.filer_count() + ctx.dependents())
            + ctx.config.additional_exemption * Decimal::from(ctx.conditions())
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::MD, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(Maryland {
            config: &CONFIG_2025,
        })
    });
}

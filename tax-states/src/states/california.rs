//! California (Form 540).
//!
//! California starts from federal AGI but does not recognise health savings
//! accounts, so the federal HSA deduction is added back. Personal and
//! dependent exemptions are credits rather than deductions and phase out at
//! high incomes. Taxable income above $1 million pays the 1% Mental Health
//! Services surtax.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::common::{non_negative, phaseout_steps};
use tax_core::{ByFilingStatus, FilingStatus};

use crate::UsState;
use crate::calculator::{StateContext, StateCredit, StateLines, StateTaxCalculator};
use crate::config::{StartingIncome, StateStandardDeduction, StateTaxConfig, TaxSchedule};
use crate::registry::StateRegistry;

const PERSONAL_CREDIT: Decimal = dec!(149);
const DEPENDENT_CREDIT: Decimal = dec!(461);
const MENTAL_HEALTH_THRESHOLD: Decimal = dec!(1000000);
const MENTAL_HEALTH_RATE: Decimal = dec!(0.01);

static CONFIG_2025: LazyLock<StateTaxConfig> = LazyLock::new(|| {
    let single = [
        (dec!(0), dec!(0.01)),
        (dec!(10756), dec!(0.02)),
        (dec!(25499), dec!(0.04)),
        (dec!(40245), dec!(0.06)),
        (dec!(55866), dec!(0.08)),
        (dec!(70606), dec!(0.093)),
        (dec!(360659), dec!(0.103)),
        (dec!(432787), dec!(0.113)),
        (dec!(721314), dec!(0.123)),
    ];
    let joint = single.map(|(threshold, rate)| (threshold * dec!(2), rate));
    let head_of_household = [
        (dec!(0), dec!(0.01)),
        (dec!(21527), dec!(0.02)),
        (dec!(51000), dec!(0.04)),
        (dec!(65744), dec!(0.06)),
        (dec!(81364), dec!(0.08)),
        (dec!(96107), dec!(0.093)),
        (dec!(490493), dec!(0.103)),
        (dec!(588593), dec!(0.113)),
        (dec!(980987), dec!(0.123)),
    ];

    let mut config = StateTaxConfig::new(
        UsState::CA,
        2025,
        TaxSchedule::by_status(&single, &joint, &single, &head_of_household),
        StartingIncome::FederalAgi,
    );
    config.standard_deduction = StateStandardDeduction::fixed(ByFilingStatus::new(
        dec!(5706),
        dec!(11412),
        dec!(5706),
        dec!(11412),
    ));
    config.allows_itemized = true;
    config
});

pub fn mental_health_surtax(taxable_income: Decimal) -> Decimal {
    non_negative(taxable_income - MENTAL_HEALTH_THRESHOLD) * MENTAL_HEALTH_RATE
}

/// Exemption credits: one personal credit per filer and per 65-or-older or
/// blind box, one dependent credit per dependent, each reduced by $6 for
/// every $2,500 ($1,250 separate) of AGI over the threshold.
fn exemption_credits(
    ctx: &StateContext<'_>,
    agi: Decimal,
) -> Decimal {
    let status = ctx.filing_status();
    let filers = if status == FilingStatus::HeadOfHousehold {
        1
    } else {
        ctx.filer_count()
    };
    let personal_count = filers + ctx.conditions();
    let dependent_count = ctx.dependents();

    let threshold = ByFilingStatus::new(dec!(252203), dec!(504411), dec!(252203), dec!(378310));
    let step = if status == FilingStatus::MarriedFilingSeparately {
        dec!(1250)
    } else {
        dec!(2500)
    };
    let reduction = phaseout_steps(agi - *threshold.get(status), step) * dec!(6);

    let personal = non_negative(PERSONAL_CREDIT - reduction) * Decimal::from(personal_count);
    let dependent = non_negative(DEPENDENT_CREDIT - reduction) * Decimal::from(dependent_count);
    personal + dependent
}

/// Nonrefundable renter's credit: $60, or $120 for joint filers, surviving
/// spouses and heads of household, under the AGI limit.
fn renters_credit(
    ctx: &StateContext<'_>,
    agi: Decimal,
) -> Decimal {
    if ctx.tax_return.credits.rent_paid <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let (credit, limit) = match ctx.filing_status() {
        FilingStatus::Single | FilingStatus::MarriedFilingSeparately => (dec!(60), dec!(53994)),
        _ => (dec!(120), dec!(107987)),
    };
    if agi <= limit { credit } else { Decimal::ZERO }
}

pub struct California {
    config: &'static StateTaxConfig,
}

impl StateTaxCalculator for California {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }

    fn calculate_state_additions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        ctx.federal.adjustments.hsa_deduction
    }

    fn compute_tax(
        &self,
        ctx: &StateContext<'_>,
        taxable_income: Decimal,
    ) -> Decimal {
        ctx.config.schedule.tax_on(ctx.filing_status(), taxable_income)
            + mental_health_surtax(taxable_income)
    }

    fn calculate_custom_credits(
        &self,
        ctx: &StateContext<'_>,
        lines: &StateLines,
    ) -> Vec<StateCredit> {
        vec![
            StateCredit::nonrefundable("Exemption Credits", exemption_credits(ctx, lines.state_agi)),
            StateCredit::nonrefundable("Renter's Credit", renters_credit(ctx, lines.state_agi)),
        ]
    }
}

pub fn register(registry: &mut StateRegistry) {
    registry.register(UsState::CA, 2025, || -> Box<dyn StateTaxCalculator> {
        Box::new(California {
            config: &CONFIG_2025,
        })
    });
}

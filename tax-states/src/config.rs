//! Declarative per-state, per-year configuration.
//!
//! A [`StateTaxConfig`] holds the numbers a state publishes each year. The
//! shared calculator skeleton reads everything from it; state modules only
//! add code for rules a table cannot express.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{BracketSchedule, ByFilingStatus, FilingStatus};

use crate::UsState;
use crate::error::StateTaxError;

/// Rate structure applied to state taxable income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxSchedule {
    Flat(Decimal),
    Brackets(ByFilingStatus<BracketSchedule>),
}

impl TaxSchedule {
    /// The same brackets for every filing status.
    pub fn uniform(pairs: &[(Decimal, Decimal)]) -> Self {
        Self::Brackets(ByFilingStatus::uniform(BracketSchedule::from_pairs(pairs)))
    }

    /// Separate single and joint brackets; separate filers and heads of
    /// household use the single table, surviving spouses the joint one.
    pub fn single_joint(
        single: &[(Decimal, Decimal)],
        joint: &[(Decimal, Decimal)],
    ) -> Self {
        Self::Brackets(ByFilingStatus::single_joint(
            BracketSchedule::from_pairs(single),
            BracketSchedule::from_pairs(joint),
        ))
    }

    /// Single, joint, separate and head-of-household tables.
    pub fn by_status(
        single: &[(Decimal, Decimal)],
        joint: &[(Decimal, Decimal)],
        separate: &[(Decimal, Decimal)],
        head_of_household: &[(Decimal, Decimal)],
    ) -> Self {
        Self::Brackets(ByFilingStatus::new(
            BracketSchedule::from_pairs(single),
            BracketSchedule::from_pairs(joint),
            BracketSchedule::from_pairs(separate),
            BracketSchedule::from_pairs(head_of_household),
        ))
    }

    /// Unrounded tax on `taxable_income`, by the same marginal accumulation
    /// the federal schedule uses.
    pub fn tax_on(
        &self,
        status: FilingStatus,
        taxable_income: Decimal,
    ) -> Decimal {
        match self {
            Self::Flat(rate) => taxable_income.max(Decimal::ZERO) * rate,
            Self::Brackets(schedules) => schedules.get(status).tax_on(taxable_income),
        }
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Flat(_))
    }
}

/// The figure a state return starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingIncome {
    FederalAgi,
    FederalTaxableIncome,
    /// The state's own gross income, built from the income items.
    GrossIncome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateStandardDeduction {
    None,
    /// The federal standard deduction, including the age and blindness
    /// amounts.
    FollowsFederal,
    Fixed {
        base: ByFilingStatus<Decimal>,
        /// Per 65-or-older or blind box checked.
        additional: Decimal,
    },
}

impl StateStandardDeduction {
    pub fn fixed(base: ByFilingStatus<Decimal>) -> Self {
        Self::Fixed {
            base,
            additional: Decimal::ZERO,
        }
    }
}

/// Retirement distributions (pensions, IRA and annuity payouts) a state
/// excludes from income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetirementExclusion {
    None,
    Full,
    /// Per return.
    UpTo(Decimal),
}

impl RetirementExclusion {
    pub fn excluded(
        &self,
        distributions: Decimal,
    ) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::Full => distributions,
            Self::UpTo(limit) => distributions.min(*limit),
        }
    }
}

/// How much of the federal income tax a state lets filers deduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FederalTaxDeduction {
    None,
    Full,
    Capped(ByFilingStatus<Decimal>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxConfig {
    pub state: UsState,
    pub tax_year: i32,
    pub schedule: TaxSchedule,
    pub starting_income: StartingIncome,
    pub standard_deduction: StateStandardDeduction,
    /// Total personal exemption for the filing status.
    pub personal_exemption: ByFilingStatus<Decimal>,
    pub dependent_exemption: Decimal,
    /// Per 65-or-older or blind box checked.
    pub additional_exemption: Decimal,
    pub allows_itemized: bool,
    pub social_security_taxable: bool,
    pub military_pay_exempt: bool,
    pub federal_tax_deduction: FederalTaxDeduction,
    pub retirement_exclusion: RetirementExclusion,
    pub default_local_rate: Option<Decimal>,
}

impl StateTaxConfig {
    /// A configuration with no deductions, exemptions or special rules:
    /// Social Security exempt, itemizing not allowed.
    pub fn new(
        state: UsState,
        tax_year: i32,
        schedule: TaxSchedule,
        starting_income: StartingIncome,
    ) -> Self {
        Self {
            state,
            tax_year,
            schedule,
            starting_income,
            standard_deduction: StateStandardDeduction::None,
            personal_exemption: ByFilingStatus::uniform(Decimal::ZERO),
            dependent_exemption: Decimal::ZERO,
            additional_exemption: Decimal::ZERO,
            allows_itemized: false,
            social_security_taxable: false,
            military_pay_exempt: false,
            federal_tax_deduction: FederalTaxDeduction::None,
            retirement_exclusion: RetirementExclusion::None,
            default_local_rate: None,
        }
    }

    pub fn federal_tax_deductible(&self) -> bool {
        !matches!(self.federal_tax_deduction, FederalTaxDeduction::None)
    }

    /// # Errors
    ///
    /// [`StateTaxError::MissingBrackets`] when a filing status has an empty
    /// bracket table.
    pub fn validate(&self) -> Result<(), StateTaxError> {
        if let TaxSchedule::Brackets(schedules) = &self.schedule {
            if let Some((filing_status, _)) = schedules.iter().find(|(_, s)| s.is_empty()) {
                return Err(StateTaxError::MissingBrackets {
                    state: self.state,
                    filing_status,
                });
            }
        }
        Ok(())
    }
}

/// `amount` per filer: doubled for a joint return.
pub fn per_filer(amount: Decimal) -> ByFilingStatus<Decimal> {
    ByFilingStatus {
        single: amount,
        married_filing_jointly: amount + amount,
        married_filing_separately: amount,
        head_of_household: amount,
        qualifying_surviving_spouse: amount,
    }
}

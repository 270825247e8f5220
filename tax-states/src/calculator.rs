//! The state calculator capability and its shared skeleton.
//!
//! Every taxable jurisdiction follows the same outline: start from a federal
//! figure, add and subtract state items, take a deduction and exemptions,
//! apply the rate schedule, then credits and local tax. The default methods
//! of [`StateTaxCalculator`] implement that outline from a
//! [`StateTaxConfig`]; a state overrides only the steps its law changes.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tax_core::calculations::common::{money, non_negative};
use tax_core::{FederalCalculation, FilingStatus, TaxReturn};
use tracing::{debug, info};

use crate::breakdown::StateCalculationBreakdown;
use crate::config::{FederalTaxDeduction, StartingIncome, StateStandardDeduction, StateTaxConfig};
use crate::error::StateTaxError;

/// Everything a state step may read: the return, its federal result and the
/// state's configuration.
#[derive(Debug, Clone, Copy)]
pub struct StateContext<'a> {
    pub tax_return: &'a TaxReturn,
    pub federal: &'a FederalCalculation,
    pub config: &'a StateTaxConfig,
}

impl<'a> StateContext<'a> {
    pub fn new(
        tax_return: &'a TaxReturn,
        federal: &'a FederalCalculation,
        config: &'a StateTaxConfig,
    ) -> Self {
        Self {
            tax_return,
            federal,
            config,
        }
    }

    pub fn filing_status(&self) -> FilingStatus {
        self.tax_return.filing_status()
    }

    pub fn is_joint(&self) -> bool {
        self.filing_status().is_joint()
    }

    /// Filer plus joint spouse.
    pub fn filer_count(&self) -> u32 {
        self.tax_return.taxpayer.filer_count()
    }

    /// Dependents who lived in the state.
    pub fn dependents(&self) -> u32 {
        let count = self
            .tax_return
            .taxpayer
            .dependents
            .iter()
            .filter(|d| d.resident)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Resident dependents under `age`.
    pub fn dependents_under(
        &self,
        age: u32,
    ) -> u32 {
        let count = self
            .tax_return
            .taxpayer
            .dependents
            .iter()
            .filter(|d| d.resident && d.age < age)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// 65-or-older and blind boxes checked.
    pub fn conditions(&self) -> u32 {
        self.tax_return.taxpayer.additional_deduction_conditions()
    }

    /// Filers on the return who are 65 or older.
    pub fn seniors(&self) -> u32 {
        let taxpayer = &self.tax_return.taxpayer;
        u32::from(taxpayer.is_65_or_older())
            + u32::from(taxpayer.joint_spouse().is_some_and(|s| s.is_65_or_older()))
    }

    /// Income before any federal adjustment: wages, interest, dividends,
    /// business and capital gains (losses not netted), retirement,
    /// unemployment and other income. Social Security is left out.
    pub fn gross_income(&self) -> Decimal {
        let income = &self.tax_return.income;
        income.wages()
            + income.taxable_interest
            + income.ordinary_dividends
            + non_negative(income.net_business_income())
            + non_negative(income.net_capital_gain())
            + income.retirement_distributions
            + income.unemployment_compensation
            + income.other_income
    }

    /// Social Security benefits included in the starting figure.
    pub fn taxable_social_security(&self) -> Decimal {
        match self.config.starting_income {
            StartingIncome::GrossIncome => Decimal::ZERO,
            _ => self.federal.income.taxable_social_security,
        }
    }

    /// Federal income tax after nonrefundable credits.
    pub fn federal_income_tax(&self) -> Decimal {
        non_negative(self.federal.tax_after_nonrefundable_credits)
    }

    /// W-2 box 17 withholding for this state.
    pub fn withholding(&self) -> Decimal {
        self.tax_return
            .income
            .state_withholding(self.config.state.code())
    }
}

/// Every figure up to tax before credits, as reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateLines {
    pub starting_income: Decimal,
    pub additions: Decimal,
    pub subtractions: Decimal,
    pub state_agi: Decimal,
    pub standard_deduction: Decimal,
    pub itemized_deduction: Decimal,
    pub deduction_used: Decimal,
    pub exemptions: Decimal,
    pub taxable_income: Decimal,
    pub tax_before_credits: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCredit {
    pub name: String,
    pub amount: Decimal,
    pub refundable: bool,
}

impl StateCredit {
    pub fn nonrefundable(
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            refundable: false,
        }
    }

    pub fn refundable(
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            refundable: true,
        }
    }
}

/// Subtractions every state shares: U.S. obligation interest, Social
/// Security where the state exempts it, military pay and the configured
/// retirement exclusion.
pub fn standard_subtractions(ctx: &StateContext<'_>) -> Decimal {
    let config = ctx.config;
    let income = &ctx.tax_return.income;

    let mut total = income.us_obligation_interest;
    if !config.social_security_taxable {
        total += ctx.taxable_social_security();
    }
    if config.military_pay_exempt {
        total += income.military_pay();
    }
    total + config.retirement_exclusion.excluded(income.retirement_distributions)
}

/// Personal, dependent and age/blindness exemptions from the table.
pub fn standard_exemptions(ctx: &StateContext<'_>) -> Decimal {
    let config = ctx.config;
    *config.personal_exemption.get(ctx.filing_status())
        + config.dependent_exemption * Decimal::from(ctx.dependents())
        + config.additional_exemption * Decimal::from(ctx.conditions())
}

/// A state income tax calculator.
///
/// Only [`config`](Self::config) is required. The remaining methods are the
/// steps of the shared outline, each overridable; [`calculate`](Self::calculate)
/// runs them in order and should not normally be replaced.
pub trait StateTaxCalculator: Send + Sync {
    fn config(&self) -> &StateTaxConfig;

    fn starting_income(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        match ctx.config.starting_income {
            StartingIncome::FederalAgi => ctx.federal.adjusted_gross_income,
            StartingIncome::FederalTaxableIncome => ctx.federal.taxable_income,
            StartingIncome::GrossIncome => ctx.gross_income(),
        }
    }

    fn calculate_state_additions(
        &self,
        _ctx: &StateContext<'_>,
    ) -> Decimal {
        Decimal::ZERO
    }

    fn calculate_state_subtractions(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        standard_subtractions(ctx) + self.federal_tax_deduction(ctx)
    }

    /// Federal income tax the state lets the filer subtract.
    fn federal_tax_deduction(
        &self,
        ctx: &StateContext<'_>,
    ) -> Decimal {
        match &ctx.config.federal_tax_deduction {
            FederalTaxDeduction::None => Decimal::ZERO,
            FederalTaxDeduction::Full => ctx.federal_income_tax(),
            FederalTaxDeduction::Capped(caps) => {
                ctx.federal_income_tax().min(*caps.get(ctx.filing_status()))
            }
        }
    }

    fn standard_deduction(
        &self,
        ctx: &StateContext<'_>,
        _state_agi: Decimal,
    ) -> Decimal {
        match &ctx.config.standard_deduction {
            StateStandardDeduction::None => Decimal::ZERO,
            StateStandardDeduction::FollowsFederal => ctx.federal.standard_deduction,
            StateStandardDeduction::Fixed { base, additional } => {
                *base.get(ctx.filing_status()) + *additional * Decimal::from(ctx.conditions())
            }
        }
    }

    /// Federal itemized deductions less the state income taxes deducted in
    /// them, or zero where the state does not allow itemizing.
    fn itemized_deduction(
        &self,
        ctx: &StateContext<'_>,
        _state_agi: Decimal,
    ) -> Decimal {
        if !ctx.config.allows_itemized {
            return Decimal::ZERO;
        }
        let state_income_taxes = ctx
            .tax_return
            .deductions
            .itemized
            .state_local_income_taxes
            .min(ctx.federal.salt_deduction);
        non_negative(ctx.federal.itemized_deductions - state_income_taxes)
    }

    fn exemptions(
        &self,
        ctx: &StateContext<'_>,
        _state_agi: Decimal,
    ) -> Decimal {
        standard_exemptions(ctx)
    }

    /// Unrounded tax on state taxable income.
    fn compute_tax(
        &self,
        ctx: &StateContext<'_>,
        taxable_income: Decimal,
    ) -> Decimal {
        ctx.config.schedule.tax_on(ctx.filing_status(), taxable_income)
    }

    /// Credits in the order they apply. Nonrefundable amounts are capped
    /// against the remaining tax by the skeleton.
    fn calculate_custom_credits(
        &self,
        _ctx: &StateContext<'_>,
        _lines: &StateLines,
    ) -> Vec<StateCredit> {
        Vec::new()
    }

    /// County or city income tax: the return's rate, else the state's
    /// default rate, applied to state taxable income.
    fn local_tax(
        &self,
        ctx: &StateContext<'_>,
        lines: &StateLines,
    ) -> Decimal {
        ctx.tax_return
            .local_tax_rate
            .or(ctx.config.default_local_rate)
            .map(|rate| lines.taxable_income * rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Runs the full outline on a return whose federal result is attached.
    ///
    /// # Errors
    ///
    /// * [`StateTaxError::FederalNotCalculated`] when `tax_return.federal` is
    ///   empty.
    /// * [`StateTaxError::TaxYearMismatch`] when the return's year differs
    ///   from the configuration's year.
    /// * [`StateTaxError::MissingBrackets`] for a malformed configuration.
    /// * [`StateTaxError::Validation`] for invalid return data.
    fn calculate(
        &self,
        tax_return: &TaxReturn,
    ) -> Result<StateCalculationBreakdown, StateTaxError> {
        let federal = tax_return
            .federal
            .as_ref()
            .ok_or(StateTaxError::FederalNotCalculated)?;
        let config = self.config();
        if tax_return.tax_year != config.tax_year {
            return Err(StateTaxError::TaxYearMismatch {
                state: config.state,
                config_year: config.tax_year,
                return_year: tax_return.tax_year,
            });
        }
        config.validate()?;
        tax_return.validate()?;

        let ctx = StateContext::new(tax_return, federal, config);
        let state = config.state;

        let starting_income = money(self.starting_income(&ctx));
        let additions = money(self.calculate_state_additions(&ctx));
        let subtractions = money(self.calculate_state_subtractions(&ctx));
        let state_agi = starting_income + additions - subtractions;

        let standard_deduction = money(self.standard_deduction(&ctx, state_agi));
        let itemized_deduction = money(self.itemized_deduction(&ctx, state_agi));
        let deduction_used = if config.allows_itemized && !tax_return.deductions.force_standard {
            standard_deduction.max(itemized_deduction)
        } else {
            standard_deduction
        };
        let exemptions = money(self.exemptions(&ctx, state_agi));
        let taxable_income = money(non_negative(state_agi - deduction_used - exemptions));
        let tax_before_credits = money(self.compute_tax(&ctx, taxable_income));
        debug!(
            %state,
            %starting_income,
            %additions,
            %subtractions,
            %state_agi,
            %deduction_used,
            %exemptions,
            %taxable_income,
            %tax_before_credits,
            "state lines computed"
        );

        let lines = StateLines {
            starting_income,
            additions,
            subtractions,
            state_agi,
            standard_deduction,
            itemized_deduction,
            deduction_used,
            exemptions,
            taxable_income,
            tax_before_credits,
        };

        let mut credits = BTreeMap::new();
        let mut remaining = tax_before_credits;
        let mut nonrefundable_credits = Decimal::ZERO;
        let mut refundable_credits = Decimal::ZERO;
        for credit in self.calculate_custom_credits(&ctx, &lines) {
            let tentative = money(non_negative(credit.amount));
            let applied = if credit.refundable {
                refundable_credits += tentative;
                tentative
            } else {
                let applied = tentative.min(remaining);
                if applied < tentative {
                    debug!(%state, credit = %credit.name, %tentative, %applied, "credit limited by tax");
                }
                remaining -= applied;
                nonrefundable_credits += applied;
                applied
            };
            if applied > Decimal::ZERO {
                *credits.entry(credit.name).or_insert(Decimal::ZERO) += applied;
            }
        }

        let local_tax = money(self.local_tax(&ctx, &lines));
        let tax_liability = tax_before_credits - nonrefundable_credits + local_tax - refundable_credits;
        let withholding = money(ctx.withholding());
        let refund_or_owed = withholding - tax_liability;

        info!(
            %state,
            tax_year = config.tax_year,
            %taxable_income,
            %tax_liability,
            %refund_or_owed,
            "state return calculated"
        );

        Ok(StateCalculationBreakdown {
            state_code: state,
            state_name: state.name().to_string(),
            tax_year: config.tax_year,
            filing_status: ctx.filing_status(),
            federal_agi: federal.adjusted_gross_income,
            federal_taxable_income: federal.taxable_income,
            starting_income,
            additions,
            subtractions,
            state_agi,
            standard_deduction,
            itemized_deduction,
            deduction_used,
            exemptions,
            taxable_income,
            tax_before_credits,
            credits,
            nonrefundable_credits,
            refundable_credits,
            total_credits: nonrefundable_credits + refundable_credits,
            local_tax,
            tax_liability,
            withholding,
            refund_or_owed,
        })
    }
}

/// A state whose law the configuration fully describes.
#[derive(Debug, Clone, Copy)]
pub struct StandardStateCalculator {
    config: &'static StateTaxConfig,
}

impl StandardStateCalculator {
    pub fn new(config: &'static StateTaxConfig) -> Self {
        Self { config }
    }
}

impl StateTaxCalculator for StandardStateCalculator {
    fn config(&self) -> &StateTaxConfig {
        self.config
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rust_decimal::Decimal;
    use tax_core::{
        Dependent, FederalTaxEngine, FilingStatus, Relationship, SpouseInfo, TaxReturn,
        TaxpayerInfo, W2,
    };

    /// A 2025 return with one W-2 for `wages`, withholding `state_withheld`
    /// for `state`.
    pub(crate) fn wage_return(
        status: FilingStatus,
        state: &str,
        wages: Decimal,
        state_withheld: Decimal,
    ) -> TaxReturn {
        let mut info = TaxpayerInfo::new(status);
        info.age = 40;
        if status.is_married() {
            info.spouse = Some(SpouseInfo {
                age: 40,
                ..SpouseInfo::default()
            });
        }
        let mut tax_return = TaxReturn::new(2025, info);
        tax_return.state_of_residence = Some(state.to_string());
        let mut w2 = W2::new("Northwind", wages, Decimal::ZERO);
        w2.state = Some(state.to_string());
        w2.state_wages = wages;
        w2.state_withholding = state_withheld;
        tax_return.income.w2s.push(w2);
        tax_return
    }

    /// A resident child living at home all year.
    pub(crate) fn child(
        name: &str,
        age: u32,
    ) -> Dependent {
        Dependent {
            name: name.to_string(),
            age,
            relationship: Relationship::Child,
            months_in_home: 12,
            full_time_student: false,
            permanently_disabled: false,
            resident: true,
        }
    }

    /// Runs the 2025 federal engine and attaches its result.
    pub(crate) fn with_federal(mut tax_return: TaxReturn) -> TaxReturn {
        let engine = FederalTaxEngine::for_year(2025).unwrap();
        engine.calculate_complete_return(&mut tax_return).unwrap();
        tax_return
    }

    pub(crate) fn single(
        state: &str,
        wages: Decimal,
    ) -> TaxReturn {
        with_federal(wage_return(FilingStatus::Single, state, wages, Decimal::ZERO))
    }
}

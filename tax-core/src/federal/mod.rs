//! Form 1040 computation.
//!
//! The engine runs the return through the form in line order:
//!
//! 1. Schedule SE, whose deductible half is an adjustment
//! 2. Adjustments other than student loan interest
//! 3. Taxable Social Security (its worksheet needs the adjustments above)
//! 4. Total income, student loan interest, AGI
//! 5. Standard or itemized deduction, taxable income
//! 6. Regular tax, through the capital gain worksheet when preferential
//!    income is present
//! 7. Credits, SE tax, payments
//!
//! Intermediate values stay unrounded; every figure that lands on the
//! result is rounded to cents once, where it is reported.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculations::common::{money, non_negative, phaseout_fraction};
use crate::calculations::{
    CapitalGainsWorksheet, CreditContext, CreditEvaluator, SeWorksheet, SeWorksheetResult,
    SocialSecurityWorksheet,
};
use crate::error::{ConfigError, TaxError};
use crate::{
    AdjustmentsBreakdown, DeductionMethod, FederalCalculation, FilingStatus, IncomeBreakdown,
    Owner, TaxReturn, TaxYearConfig,
};

#[derive(Debug, Clone, Copy)]
pub struct FederalTaxEngine<'a> {
    config: &'a TaxYearConfig,
}

impl FederalTaxEngine<'static> {
    /// An engine bound to the built-in configuration for `year`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedTaxYear`] when no table exists.
    pub fn for_year(year: i32) -> Result<Self, ConfigError> {
        Ok(Self::new(TaxYearConfig::for_year(year)?))
    }
}

/// Itemized total together with the capped SALT amount inside it.
struct Itemized {
    total: Decimal,
    salt: Decimal,
}

impl<'a> FederalTaxEngine<'a> {
    /// An engine bound to `config`, which may be a built-in year or one
    /// derived from it with [`TaxYearConfig::with_brackets`].
    ///
    /// # Arguments
    ///
    /// * `config` - Thresholds, brackets and limits for one tax year
    ///
    /// # Examples
    ///
    /// ```
    /// use tax_core::{FederalTaxEngine, TaxYearConfig};
    ///
    /// let config = TaxYearConfig::for_year(2025).unwrap();
    /// let engine = FederalTaxEngine::new(config);
    ///
    /// assert_eq!(engine.tax_year(), 2025);
    /// ```
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// The configuration every calculation reads from.
    pub fn config(&self) -> &'a TaxYearConfig {
        self.config
    }

    /// The only tax year this engine accepts returns for.
    pub fn tax_year(&self) -> i32 {
        self.config.tax_year
    }

    /// Computes the federal return without modifying it.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::TaxYearMismatch`] when the return's year differs from
    ///   the engine's configuration
    /// * any [`ConfigError`] from validating the configuration
    /// * any [`crate::ValidationError`] from validating the return
    pub fn calculate(
        &self,
        tax_return: &TaxReturn,
    ) -> Result<FederalCalculation, TaxError> {
        if tax_return.tax_year != self.config.tax_year {
            return Err(ConfigError::TaxYearMismatch {
                engine_year: self.config.tax_year,
                return_year: tax_return.tax_year,
            }
            .into());
        }
        self.config.validate()?;
        tax_return.validate()?;

        let status = tax_return.filing_status();
        let income = &tax_return.income;
        let adjustments_input = &tax_return.deductions.adjustments;
        debug!(tax_year = self.config.tax_year, filing_status = %status, "starting federal calculation");

        // Schedule SE
        let net_business_income = income.net_business_income();
        let se = SeWorksheet::new(&self.config.self_employment)
            .calculate(net_business_income, income.social_security_wages())
            .map_err(|e| ConfigError::InvalidLimits {
                tax_year: self.config.tax_year,
                reason: e.to_string(),
            })?;

        // Income other than Social Security
        let capital_gains = self.allowed_capital_gain(status, income.net_capital_gain());
        let wages = income.wages();
        let income_before_benefits = wages
            + income.taxable_interest
            + income.ordinary_dividends
            + net_business_income
            + capital_gains
            + income.retirement_distributions
            + income.unemployment_compensation
            + income.other_income;

        // Adjustments the benefits worksheet subtracts
        let educator_expenses = self.educator_expenses(tax_return);
        let hsa_deduction = self.hsa_deduction(tax_return);
        let ira_deduction = self.ira_deduction(tax_return);
        let partial_adjustments =
            educator_expenses + hsa_deduction + se.se_tax_deduction + ira_deduction;

        let taxable_social_security = SocialSecurityWorksheet::new(&self.config.social_security)
            .taxable_benefits(
                status,
                income.social_security_benefits,
                income_before_benefits,
                income.tax_exempt_interest,
                partial_adjustments,
            );

        let total_income = income_before_benefits + taxable_social_security;

        let student_loan_interest = self.student_loan_interest(
            status,
            adjustments_input.student_loan_interest,
            total_income - partial_adjustments,
        );
        let total_adjustments = partial_adjustments + student_loan_interest;
        let agi = money(total_income - total_adjustments);
        debug!(%total_income, %total_adjustments, %agi, "adjusted gross income computed");

        // Deductions
        let standard_deduction = money(
            self.config
                .standard_deduction
                .amount(status, tax_return.taxpayer.additional_deduction_conditions()),
        );
        let itemized = self.itemized_deductions(tax_return, agi);
        let itemized_total = money(itemized.total);
        let (deduction_method, deduction_amount) =
            if !tax_return.deductions.force_standard && itemized_total > standard_deduction {
                (DeductionMethod::Itemized, itemized_total)
            } else {
                (DeductionMethod::Standard, standard_deduction)
            };
        let taxable_income = money(non_negative(agi - deduction_amount));
        debug!(?deduction_method, %deduction_amount, %taxable_income, "deduction selected");

        // Regular tax
        let schedule = self.config.brackets.get(status);
        let preferential_income = income.qualified_dividends
            + non_negative(income.long_term_capital_gains.min(income.net_capital_gain()));
        let tax_before_credits = money(if preferential_income > Decimal::ZERO {
            CapitalGainsWorksheet::new(schedule, &self.config.capital_gains, status)
                .tax(taxable_income, preferential_income)
        } else {
            schedule.tax_on(taxable_income)
        });

        // Credits
        let (taxpayer_earned, spouse_earned) = Self::earned_income(tax_return, &se);
        let context = CreditContext {
            config: self.config,
            tax_return,
            adjusted_gross_income: agi,
            modified_agi: agi,
            earned_income: taxpayer_earned + spouse_earned,
            taxpayer_earned_income: taxpayer_earned,
            spouse_earned_income: spouse_earned,
            investment_income: income.taxable_interest
                + income.tax_exempt_interest
                + income.ordinary_dividends
                + non_negative(income.net_capital_gain()),
            nontaxable_social_security: non_negative(
                income.social_security_benefits - taxable_social_security,
            ),
        };
        let credits = CreditEvaluator::new(context).apply(tax_before_credits);

        let tax_after_nonrefundable_credits = tax_before_credits - credits.total_nonrefundable;
        let self_employment_tax = money(se.self_employment_tax);
        let total_tax = tax_after_nonrefundable_credits + self_employment_tax;
        let total_tax_liability = total_tax - credits.total_refundable;

        let federal_withholding = money(income.federal_withholding());
        let estimated_tax_payments = money(income.estimated_tax_payments);
        let refund_or_owed = federal_withholding + estimated_tax_payments - total_tax_liability;

        let effective_rate = if agi > Decimal::ZERO {
            (non_negative(total_tax_liability) / agi).round_dp(4)
        } else {
            Decimal::ZERO
        };

        let calculation = FederalCalculation {
            tax_year: self.config.tax_year,
            filing_status: status,
            income: IncomeBreakdown {
                wages: money(wages),
                taxable_interest: money(income.taxable_interest),
                ordinary_dividends: money(income.ordinary_dividends),
                qualified_dividends: money(income.qualified_dividends),
                business_income: money(net_business_income),
                capital_gains: money(capital_gains),
                retirement_distributions: money(income.retirement_distributions),
                social_security_benefits: money(income.social_security_benefits),
                taxable_social_security: money(taxable_social_security),
                unemployment_compensation: money(income.unemployment_compensation),
                other_income: money(income.other_income),
            },
            total_income: money(total_income),
            adjustments: AdjustmentsBreakdown {
                educator_expenses: money(educator_expenses),
                hsa_deduction: money(hsa_deduction),
                self_employment_tax_deduction: money(se.se_tax_deduction),
                ira_deduction: money(ira_deduction),
                student_loan_interest: money(student_loan_interest),
                total: money(total_adjustments),
            },
            adjusted_gross_income: agi,
            standard_deduction,
            itemized_deductions: itemized_total,
            salt_deduction: money(itemized.salt),
            deduction_method,
            deduction_amount,
            taxable_income,
            tax_before_credits,
            credits,
            tax_after_nonrefundable_credits,
            self_employment_tax,
            total_tax,
            total_tax_liability,
            federal_withholding,
            estimated_tax_payments,
            refund_or_owed,
            marginal_rate: schedule.marginal_rate(taxable_income),
            effective_rate,
        };

        info!(
            tax_year = calculation.tax_year,
            filing_status = %status,
            agi = %calculation.adjusted_gross_income,
            taxable_income = %calculation.taxable_income,
            liability = %calculation.total_tax_liability,
            refund_or_owed = %calculation.refund_or_owed,
            "federal calculation complete"
        );

        Ok(calculation)
    }

    /// Computes the return and attaches the result to it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::calculate`]; the return is left untouched on error.
    pub fn calculate_complete_return<'r>(
        &self,
        tax_return: &'r mut TaxReturn,
    ) -> Result<&'r FederalCalculation, TaxError> {
        let calculation = self.calculate(tax_return)?;
        Ok(tax_return.federal.insert(calculation))
    }

    /// Net capital gain, or the loss allowed against ordinary income.
    fn allowed_capital_gain(
        &self,
        status: FilingStatus,
        net_gain: Decimal,
    ) -> Decimal {
        let limit = if status == FilingStatus::MarriedFilingSeparately {
            self.config.capital_gains.loss_limit_separate
        } else {
            self.config.capital_gains.loss_limit
        };
        net_gain.max(-limit)
    }

    /// One capped entry per educator; only a joint return has two.
    fn educator_expenses(
        &self,
        tax_return: &TaxReturn,
    ) -> Decimal {
        let cap = self.config.adjustments.educator_expense_max;
        let educators = tax_return.taxpayer.filer_count() as usize;
        tax_return
            .deductions
            .adjustments
            .educator_expenses
            .iter()
            .take(educators)
            .map(|&expense| non_negative(expense).min(cap))
            .sum()
    }

    fn hsa_deduction(
        &self,
        tax_return: &TaxReturn,
    ) -> Decimal {
        let limits = &self.config.adjustments;
        let adjustments = &tax_return.deductions.adjustments;
        let mut limit = if adjustments.hsa_family_coverage {
            limits.hsa_family
        } else {
            limits.hsa_self_only
        };
        if tax_return.taxpayer.age >= limits.hsa_catch_up_age {
            limit += limits.hsa_catch_up;
        }
        non_negative(adjustments.hsa_contributions).min(limit)
    }

    /// Contribution limit per filer, with catch-up by age. Workplace-plan
    /// deduction phaseouts are not applied.
    fn ira_deduction(
        &self,
        tax_return: &TaxReturn,
    ) -> Decimal {
        let limits = &self.config.adjustments;
        let limit_for = |age: u32| {
            if age >= limits.ira_catch_up_age {
                limits.ira_max + limits.ira_catch_up
            } else {
                limits.ira_max
            }
        };
        let taxpayer = &tax_return.taxpayer;
        let limit = limit_for(taxpayer.age) + taxpayer.joint_spouse().map_or(Decimal::ZERO, |s| limit_for(s.age));
        non_negative(tax_return.deductions.adjustments.ira_contributions).min(limit)
    }

    fn student_loan_interest(
        &self,
        status: FilingStatus,
        paid: Decimal,
        magi: Decimal,
    ) -> Decimal {
        if status == FilingStatus::MarriedFilingSeparately {
            return Decimal::ZERO;
        }
        let limits = &self.config.adjustments;
        let allowed = non_negative(paid).min(limits.student_loan_interest_max);
        let fraction = phaseout_fraction(
            magi,
            *limits.student_loan_phaseout_start.get(status),
            *limits.student_loan_phaseout_range.get(status),
        );
        allowed * (Decimal::ONE - fraction)
    }

    /// Schedule A: medical over the AGI floor, capped SALT, and the rest in
    /// full.
    fn itemized_deductions(
        &self,
        tax_return: &TaxReturn,
        agi: Decimal,
    ) -> Itemized {
        let limits = &self.config.deductions;
        let itemized = &tax_return.deductions.itemized;

        let medical = non_negative(itemized.medical_expenses - agi * limits.medical_agi_floor);
        let salt_cap = if tax_return.filing_status() == FilingStatus::MarriedFilingSeparately {
            limits.salt_cap_separate
        } else {
            limits.salt_cap
        };
        let salt = itemized.salt_total().min(salt_cap);

        let total = medical
            + salt
            + itemized.mortgage_interest
            + itemized.charitable_total()
            + itemized.casualty_losses
            + itemized.other;

        Itemized { total, salt }
    }

    /// Earned income per person: W-2 wages plus, for the taxpayer, net SE
    /// earnings less the deductible half of SE tax.
    fn earned_income(
        tax_return: &TaxReturn,
        se: &SeWorksheetResult,
    ) -> (Decimal, Decimal) {
        let income = &tax_return.income;
        let self_employment = se.net_earnings - se.se_tax_deduction;
        let taxpayer = income.wages_for(Owner::Taxpayer) + self_employment;
        let spouse = if tax_return.taxpayer.joint_spouse().is_some() {
            income.wages_for(Owner::Spouse)
        } else {
            Decimal::ZERO
        };
        (taxpayer, spouse)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{Credit, SpouseInfo, TaxpayerInfo, W2};

    fn engine() -> FederalTaxEngine<'static> {
        FederalTaxEngine::for_year(2025).unwrap()
    }

    fn single_with_wages(wages: Decimal) -> TaxReturn {
        let mut tax_return = TaxReturn::new(2025, TaxpayerInfo::new(FilingStatus::Single));
        tax_return.taxpayer.age = 30;
        tax_return.income.w2s.push(W2::new("Acme", wages, Decimal::ZERO));
        tax_return
    }

    // =========================================================================
    // income and adjustments
    // =========================================================================

    #[test]
    fn capital_loss_limited_against_ordinary_income() {
        let mut tax_return = single_with_wages(dec!(50000));
        tax_return.income.short_term_capital_gains = dec!(-10000);

        let calc = engine().calculate(&tax_return).unwrap();

        assert_eq!(calc.income.capital_gains, dec!(-3000.00));
        assert_eq!(calc.adjusted_gross_income, dec!(47000.00));
    }

    #[test]
    fn self_employment_half_reduces_agi() {
        let mut tax_return = TaxReturn::new(2025, TaxpayerInfo::new(FilingStatus::Single));
        tax_return.income.business_income = dec!(100000);

        let calc = engine().calculate(&tax_return).unwrap();

        assert_eq!(calc.self_employment_tax, dec!(14129.55));
        assert_eq!(calc.adjustments.self_employment_tax_deduction, dec!(7064.78));
        assert_eq!(calc.adjusted_gross_income, dec!(92935.22));
        assert_eq!(calc.total_tax, calc.tax_after_nonrefundable_credits + dec!(14129.55));
    }

    #[test]
    fn educator_expenses_capped_per_educator() {
        let mut tax_return = single_with_wages(dec!(50000));
        tax_return.deductions.adjustments.educator_expenses = vec![dec!(450), dec!(300)];

        let calc = engine().calculate(&tax_return).unwrap();

        // A single filer has one educator slot.
        assert_eq!(calc.adjustments.educator_expenses, dec!(300.00));
    }

    #[test]
    fn student_loan_interest_phases_out() {
        let mut tax_return = single_with_wages(dec!(92500));
        tax_return.deductions.adjustments.student_loan_interest = dec!(2500);

        let calc = engine().calculate(&tax_return).unwrap();

        // Halfway through 85,000..100,000
        assert_eq!(calc.adjustments.student_loan_interest, dec!(1250.00));
    }

    #[test]
    fn hsa_limited_to_self_only_amount() {
        let mut tax_return = single_with_wages(dec!(60000));
        tax_return.deductions.adjustments.hsa_contributions = dec!(5000);

        let calc = engine().calculate(&tax_return).unwrap();

        assert_eq!(calc.adjustments.hsa_deduction, dec!(4300.00));
    }

    // =========================================================================
    // deductions
    // =========================================================================

    #[test]
    fn salt_cap_applies_before_itemized_comparison() {
        let mut tax_return = single_with_wages(dec!(200000));
        tax_return.deductions.itemized.state_local_income_taxes = dec!(14000);
        tax_return.deductions.itemized.real_estate_taxes = dec!(6000);
        tax_return.deductions.itemized.mortgage_interest = dec!(9000);

        let calc = engine().calculate(&tax_return).unwrap();

        assert_eq!(calc.salt_deduction, dec!(10000.00));
        assert_eq!(calc.itemized_deductions, dec!(19000.00));
        assert_eq!(calc.deduction_method, DeductionMethod::Itemized);
    }

    #[test]
    fn forced_standard_ignores_larger_itemized() {
        let mut tax_return = single_with_wages(dec!(200000));
        tax_return.deductions.itemized.mortgage_interest = dec!(30000);
        tax_return.deductions.force_standard = true;

        let calc = engine().calculate(&tax_return).unwrap();

        assert_eq!(calc.deduction_method, DeductionMethod::Standard);
        assert_eq!(calc.deduction_amount, dec!(15000.00));
    }

    #[test]
    fn medical_counts_only_above_floor() {
        let mut tax_return = single_with_wages(dec!(100000));
        tax_return.deductions.itemized.medical_expenses = dec!(20000);

        let calc = engine().calculate(&tax_return).unwrap();

        // 20,000 - 7.5% × 100,000
        assert_eq!(calc.itemized_deductions, dec!(12500.00));
        assert_eq!(calc.deduction_method, DeductionMethod::Standard);
    }

    #[test]
    fn senior_joint_filers_get_two_additional_amounts() {
        let mut info = TaxpayerInfo::new(FilingStatus::MarriedFilingJointly);
        info.age = 67;
        info.spouse = Some(SpouseInfo {
            age: 66,
            ..SpouseInfo::default()
        });
        let tax_return = TaxReturn::new(2025, info);

        let calc = engine().calculate(&tax_return).unwrap();

        assert_eq!(calc.standard_deduction, dec!(33200.00));
    }

    // =========================================================================
    // tax and payments
    // =========================================================================

    #[test]
    fn qualified_dividends_use_preferential_rates() {
        let mut tax_return = single_with_wages(dec!(40000));
        tax_return.income.ordinary_dividends = dec!(10000);
        tax_return.income.qualified_dividends = dec!(10000);

        let calc = engine().calculate(&tax_return).unwrap();

        // Taxable 35,000, all of it under the 0% ceiling; ordinary 25,000
        let ordinary_tax = dec!(1192.50) + (dec!(25000) - dec!(11925)) * dec!(0.12);
        assert_eq!(calc.tax_before_credits, money(ordinary_tax));
    }

    #[test]
    fn refund_is_payments_less_liability() {
        let mut tax_return = single_with_wages(dec!(50000));
        tax_return.income.w2s[0].federal_withholding = dec!(6000);
        tax_return.income.estimated_tax_payments = dec!(500);

        let calc = engine().calculate(&tax_return).unwrap();

        // Taxable 35,000: 1,192.50 + 23,075 × 12% = 3,961.50
        assert_eq!(calc.tax_before_credits, dec!(3961.50));
        assert_eq!(calc.refund_or_owed, dec!(2538.50));
        assert!(calc.is_refund());
    }

    #[test]
    fn refundable_credit_can_make_liability_negative() {
        let mut tax_return = single_with_wages(dec!(9000));
        tax_return.credits.claim_earned_income_credit = true;

        let calc = engine().calculate(&tax_return).unwrap();

        assert_eq!(calc.tax_before_credits, dec!(0.00));
        assert_eq!(calc.credits.get(Credit::EarnedIncome), dec!(649.00));
        assert_eq!(calc.total_tax_liability, dec!(-649.00));
        assert_eq!(calc.refund_or_owed, dec!(649.00));
    }

    // =========================================================================
    // errors and attachment
    // =========================================================================

    #[test]
    fn year_mismatch_is_rejected() {
        let tax_return = TaxReturn::new(2024, TaxpayerInfo::new(FilingStatus::Single));

        assert_eq!(
            engine().calculate(&tax_return),
            Err(TaxError::Configuration(ConfigError::TaxYearMismatch {
                engine_year: 2025,
                return_year: 2024,
            }))
        );
    }

    #[test]
    fn complete_return_attaches_result() {
        let mut tax_return = single_with_wages(dec!(50000));

        let taxable = engine()
            .calculate_complete_return(&mut tax_return)
            .unwrap()
            .taxable_income;

        assert_eq!(taxable, dec!(35000.00));
        assert_eq!(
            tax_return.federal.as_ref().map(|f| f.taxable_income),
            Some(dec!(35000.00))
        );
    }
}

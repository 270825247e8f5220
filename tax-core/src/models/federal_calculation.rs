use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DeductionMethod, FilingStatus};

/// Federal credits, declared in the order nonrefundable credits consume
/// tax (Form 1040 line 19 and Schedule 3 as limited by the Schedule 8812
/// and Form 8839 credit-limit worksheets). Refundable credits follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credit {
    DependentCare,
    LifetimeLearning,
    AmericanOpportunity,
    ElderlyDisabled,
    CleanVehicle,
    ChildAndOtherDependent,
    Adoption,
    OtherNonrefundable,
    EarnedIncome,
    AdditionalChildTax,
    AmericanOpportunityRefundable,
}

impl Credit {
    pub fn is_refundable(&self) -> bool {
        matches!(
            self,
            Self::EarnedIncome | Self::AdditionalChildTax | Self::AmericanOpportunityRefundable
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DependentCare => "Child and dependent care credit",
            Self::LifetimeLearning => "Lifetime learning credit",
            Self::AmericanOpportunity => "American opportunity credit",
            Self::ElderlyDisabled => "Credit for the elderly or disabled",
            Self::CleanVehicle => "Clean vehicle credit",
            Self::ChildAndOtherDependent => "Child tax credit / credit for other dependents",
            Self::Adoption => "Adoption credit",
            Self::OtherNonrefundable => "Other nonrefundable credits",
            Self::EarnedIncome => "Earned income credit",
            Self::AdditionalChildTax => "Additional child tax credit",
            Self::AmericanOpportunityRefundable => "American opportunity credit (refundable)",
        }
    }
}

impl fmt::Display for Credit {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Income lines as they enter total income (after the capital loss limit
/// and the taxable Social Security computation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub wages: Decimal,
    pub taxable_interest: Decimal,
    pub ordinary_dividends: Decimal,
    pub qualified_dividends: Decimal,
    pub business_income: Decimal,
    pub capital_gains: Decimal,
    pub retirement_distributions: Decimal,
    pub social_security_benefits: Decimal,
    pub taxable_social_security: Decimal,
    pub unemployment_compensation: Decimal,
    pub other_income: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentsBreakdown {
    pub educator_expenses: Decimal,
    pub hsa_deduction: Decimal,
    pub self_employment_tax_deduction: Decimal,
    pub ira_deduction: Decimal,
    pub student_loan_interest: Decimal,
    pub total: Decimal,
}

/// Applied credit amounts. Nonrefundable amounts are after the tax limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSummary {
    pub nonrefundable: BTreeMap<Credit, Decimal>,
    pub refundable: BTreeMap<Credit, Decimal>,
    pub total_nonrefundable: Decimal,
    pub total_refundable: Decimal,
}

impl CreditSummary {
    pub fn total(&self) -> Decimal {
        self.total_nonrefundable + self.total_refundable
    }

    pub fn get(
        &self,
        credit: Credit,
    ) -> Decimal {
        self.nonrefundable
            .get(&credit)
            .or_else(|| self.refundable.get(&credit))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Line-item result of the federal computation. Every dollar field is
/// rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalCalculation {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub income: IncomeBreakdown,
    pub total_income: Decimal,
    pub adjustments: AdjustmentsBreakdown,
    pub adjusted_gross_income: Decimal,
    pub standard_deduction: Decimal,
    pub itemized_deductions: Decimal,
    /// Capped state and local taxes included in `itemized_deductions`.
    pub salt_deduction: Decimal,
    pub deduction_method: DeductionMethod,
    pub deduction_amount: Decimal,
    pub taxable_income: Decimal,
    pub tax_before_credits: Decimal,
    pub credits: CreditSummary,
    pub tax_after_nonrefundable_credits: Decimal,
    pub self_employment_tax: Decimal,
    /// Tax after nonrefundable credits plus other taxes.
    pub total_tax: Decimal,
    /// `total_tax` less refundable credits; negative when refundable
    /// credits exceed the tax.
    pub total_tax_liability: Decimal,
    pub federal_withholding: Decimal,
    pub estimated_tax_payments: Decimal,
    /// Positive for a refund, negative for an amount owed.
    pub refund_or_owed: Decimal,
    pub marginal_rate: Decimal,
    pub effective_rate: Decimal,
}

impl FederalCalculation {
    pub fn credits_applied(&self) -> Decimal {
        self.credits.total()
    }

    pub fn is_refund(&self) -> bool {
        self.refund_or_owed > Decimal::ZERO
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Deductions, FederalCalculation, FilingStatus, Income, TaxCredits, TaxpayerInfo};
use crate::error::ValidationError;

/// One filing: the inputs assembled by the caller plus the federal result
/// the engine attaches once it has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReturn {
    pub tax_year: i32,
    /// Two-letter code of the state of residence.
    #[serde(default)]
    pub state_of_residence: Option<String>,
    /// Local income tax rate override (county, city or school district).
    #[serde(default)]
    pub local_tax_rate: Option<Decimal>,
    /// City or county of residence, for states whose local tax depends on
    /// it (e.g. "NYC").
    #[serde(default)]
    pub locality: Option<String>,
    pub taxpayer: TaxpayerInfo,
    #[serde(default)]
    pub income: Income,
    #[serde(default)]
    pub deductions: Deductions,
    #[serde(default)]
    pub credits: TaxCredits,
    #[serde(default, skip_deserializing)]
    pub federal: Option<FederalCalculation>,
}

impl TaxReturn {
    pub fn new(
        tax_year: i32,
        taxpayer: TaxpayerInfo,
    ) -> Self {
        Self {
            tax_year,
            state_of_residence: None,
            local_tax_rate: None,
            locality: None,
            taxpayer,
            income: Income::default(),
            deductions: Deductions::default(),
            credits: TaxCredits::default(),
            federal: None,
        }
    }

    pub fn filing_status(&self) -> FilingStatus {
        self.taxpayer.filing_status
    }

    /// Rejects inputs that would make the computation meaningless.
    ///
    /// Negative amounts are errors everywhere except the signed capital gain
    /// and business income fields; nothing is clamped here.
    ///
    /// # Errors
    ///
    /// The first [`ValidationError`] found, naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let status = self.filing_status();
        if status.is_joint() && self.taxpayer.spouse.is_none() {
            return Err(ValidationError::MissingSpouse {
                filing_status: status,
            });
        }

        for (index, dependent) in self.taxpayer.dependents.iter().enumerate() {
            if dependent.name.trim().is_empty() {
                return Err(ValidationError::InvalidDependent {
                    index,
                    reason: "name is empty".to_string(),
                });
            }
            if dependent.months_in_home > 12 {
                return Err(ValidationError::InvalidDependent {
                    index,
                    reason: format!("months_in_home must be 0-12, got {}", dependent.months_in_home),
                });
            }
            if dependent.age > 130 {
                return Err(ValidationError::InvalidDependent {
                    index,
                    reason: format!("age {} is not plausible", dependent.age),
                });
            }
        }

        for (index, w2) in self.income.w2s.iter().enumerate() {
            let boxes = [
                ("wages", w2.wages),
                ("federal_withholding", w2.federal_withholding),
                ("social_security_wages", w2.social_security_wages),
                ("social_security_tax_withheld", w2.social_security_tax_withheld),
                ("medicare_wages", w2.medicare_wages),
                ("medicare_tax_withheld", w2.medicare_tax_withheld),
                ("state_wages", w2.state_wages),
                ("state_withholding", w2.state_withholding),
                ("military_pay", w2.military_pay),
            ];
            for (field, value) in boxes {
                if value < Decimal::ZERO {
                    return Err(ValidationError::negative(format!("w2s[{index}].{field}"), value));
                }
            }
            if w2.military_pay > w2.wages {
                return Err(ValidationError::InvalidW2 {
                    index,
                    reason: "military_pay exceeds wages".to_string(),
                });
            }
        }

        let income = &self.income;
        non_negative_fields(&[
            ("income.taxable_interest", income.taxable_interest),
            ("income.tax_exempt_interest", income.tax_exempt_interest),
            ("income.us_obligation_interest", income.us_obligation_interest),
            ("income.ordinary_dividends", income.ordinary_dividends),
            ("income.qualified_dividends", income.qualified_dividends),
            ("income.business_expenses", income.business_expenses),
            ("income.retirement_distributions", income.retirement_distributions),
            ("income.social_security_benefits", income.social_security_benefits),
            ("income.unemployment_compensation", income.unemployment_compensation),
            ("income.other_income", income.other_income),
            ("income.estimated_tax_payments", income.estimated_tax_payments),
        ])?;
        if income.qualified_dividends > income.ordinary_dividends {
            return Err(ValidationError::negative(
                "income.ordinary_dividends - income.qualified_dividends",
                income.ordinary_dividends - income.qualified_dividends,
            ));
        }
        if income.us_obligation_interest > income.taxable_interest {
            return Err(ValidationError::negative(
                "income.taxable_interest - income.us_obligation_interest",
                income.taxable_interest - income.us_obligation_interest,
            ));
        }

        let itemized = &self.deductions.itemized;
        non_negative_fields(&[
            ("deductions.itemized.medical_expenses", itemized.medical_expenses),
            ("deductions.itemized.state_local_income_taxes", itemized.state_local_income_taxes),
            ("deductions.itemized.real_estate_taxes", itemized.real_estate_taxes),
            ("deductions.itemized.personal_property_taxes", itemized.personal_property_taxes),
            ("deductions.itemized.mortgage_interest", itemized.mortgage_interest),
            ("deductions.itemized.charitable_cash", itemized.charitable_cash),
            ("deductions.itemized.charitable_noncash", itemized.charitable_noncash),
            ("deductions.itemized.casualty_losses", itemized.casualty_losses),
            ("deductions.itemized.other", itemized.other),
        ])?;

        let adjustments = &self.deductions.adjustments;
        for (index, amount) in adjustments.educator_expenses.iter().enumerate() {
            if *amount < Decimal::ZERO {
                return Err(ValidationError::negative(
                    format!("deductions.adjustments.educator_expenses[{index}]"),
                    *amount,
                ));
            }
        }
        non_negative_fields(&[
            ("deductions.adjustments.hsa_contributions", adjustments.hsa_contributions),
            ("deductions.adjustments.ira_contributions", adjustments.ira_contributions),
            ("deductions.adjustments.student_loan_interest", adjustments.student_loan_interest),
        ])?;

        let credits = &self.credits;
        if credits.dependent_care_expenses < Decimal::ZERO {
            return Err(ValidationError::negative(
                "credits.dependent_care_expenses",
                credits.dependent_care_expenses,
            ));
        }
        for (index, expense) in credits.education.iter().enumerate() {
            if expense.qualified_expenses < Decimal::ZERO {
                return Err(ValidationError::negative(
                    format!("credits.education[{index}].qualified_expenses"),
                    expense.qualified_expenses,
                ));
            }
        }
        for (index, amount) in credits.adoption_expenses.iter().enumerate() {
            if *amount < Decimal::ZERO {
                return Err(ValidationError::negative(
                    format!("credits.adoption_expenses[{index}]"),
                    *amount,
                ));
            }
        }
        if let Some(vehicle) = &credits.clean_vehicle {
            non_negative_fields(&[
                ("credits.clean_vehicle.sale_price", vehicle.sale_price),
                ("credits.clean_vehicle.certified_credit", vehicle.certified_credit),
            ])?;
        }
        if let Some(claim) = &credits.elderly_disabled {
            if claim.nontaxable_pensions < Decimal::ZERO {
                return Err(ValidationError::negative(
                    "credits.elderly_disabled.nontaxable_pensions",
                    claim.nontaxable_pensions,
                ));
            }
        }
        non_negative_fields(&[
            ("credits.other_nonrefundable", credits.other_nonrefundable),
            ("credits.rent_paid", credits.rent_paid),
        ])?;

        if let Some(rate) = self.local_tax_rate {
            if rate < Decimal::ZERO {
                return Err(ValidationError::negative("local_tax_rate", rate));
            }
        }

        Ok(())
    }
}

fn non_negative_fields(fields: &[(&str, Decimal)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| *value < Decimal::ZERO) {
        Some((field, value)) => Err(ValidationError::negative(*field, *value)),
        None => Ok(()),
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whose income a record belongs to on a joint return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    #[default]
    Taxpayer,
    Spouse,
}

/// A Form W-2 wage statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct W2 {
    pub employer: String,
    pub owner: Owner,
    /// Box 1.
    pub wages: Decimal,
    /// Box 2.
    pub federal_withholding: Decimal,
    /// Box 3.
    pub social_security_wages: Decimal,
    /// Box 4.
    pub social_security_tax_withheld: Decimal,
    /// Box 5.
    pub medicare_wages: Decimal,
    /// Box 6.
    pub medicare_tax_withheld: Decimal,
    /// Box 15, two-letter state code.
    pub state: Option<String>,
    /// Box 16.
    pub state_wages: Decimal,
    /// Box 17.
    pub state_withholding: Decimal,
    /// Portion of box 1 that is active-duty military pay.
    pub military_pay: Decimal,
}

impl W2 {
    pub fn new(
        employer: impl Into<String>,
        wages: Decimal,
        federal_withholding: Decimal,
    ) -> Self {
        Self {
            employer: employer.into(),
            wages,
            federal_withholding,
            social_security_wages: wages,
            medicare_wages: wages,
            ..Self::default()
        }
    }
}

/// Every income item on the return. Amounts are non-negative except the
/// capital gain and business fields, which may carry a loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Income {
    pub w2s: Vec<W2>,
    pub taxable_interest: Decimal,
    pub tax_exempt_interest: Decimal,
    /// Interest on U.S. Treasury obligations, included in `taxable_interest`
    /// but exempt from state tax.
    pub us_obligation_interest: Decimal,
    pub ordinary_dividends: Decimal,
    /// Portion of `ordinary_dividends` taxed at capital gain rates.
    pub qualified_dividends: Decimal,
    /// Signed.
    pub short_term_capital_gains: Decimal,
    /// Signed.
    pub long_term_capital_gains: Decimal,
    /// Schedule C gross receipts, signed to allow a net loss after expenses.
    pub business_income: Decimal,
    pub business_expenses: Decimal,
    /// Taxable IRA, pension and annuity distributions.
    pub retirement_distributions: Decimal,
    /// Gross Social Security benefits (SSA-1099 box 5).
    pub social_security_benefits: Decimal,
    pub unemployment_compensation: Decimal,
    pub other_income: Decimal,
    pub estimated_tax_payments: Decimal,
}

impl Income {
    pub fn wages(&self) -> Decimal {
        self.w2s.iter().map(|w| w.wages).sum()
    }

    pub fn wages_for(
        &self,
        owner: Owner,
    ) -> Decimal {
        self.w2s
            .iter()
            .filter(|w| w.owner == owner)
            .map(|w| w.wages)
            .sum()
    }

    pub fn social_security_wages(&self) -> Decimal {
        self.w2s.iter().map(|w| w.social_security_wages).sum()
    }

    pub fn military_pay(&self) -> Decimal {
        self.w2s.iter().map(|w| w.military_pay).sum()
    }

    pub fn federal_withholding(&self) -> Decimal {
        self.w2s.iter().map(|w| w.federal_withholding).sum()
    }

    /// Employee social security and medicare tax withheld.
    pub fn fica_withheld(&self) -> Decimal {
        self.w2s
            .iter()
            .map(|w| w.social_security_tax_withheld + w.medicare_tax_withheld)
            .sum()
    }

    /// Box 17 withholding reported for `state`.
    pub fn state_withholding(
        &self,
        state: &str,
    ) -> Decimal {
        self.w2s
            .iter()
            .filter(|w| {
                w.state
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(state))
            })
            .map(|w| w.state_withholding)
            .sum()
    }

    /// Schedule C net profit (negative for a loss).
    pub fn net_business_income(&self) -> Decimal {
        self.business_income - self.business_expenses
    }

    pub fn net_capital_gain(&self) -> Decimal {
        self.short_term_capital_gains + self.long_term_capital_gains
    }
}

//! Federal credit evaluation.
//!
//! Each credit computes its tentative amount independently (eligibility and
//! phaseout). [`CreditEvaluator::apply`] then lets nonrefundable credits
//! consume tax in [`Credit`] order, which follows the form order:
//! Schedule 3 personal credits first, then the child tax credit (whose
//! limit worksheet subtracts them), then the adoption credit (whose limit
//! worksheet subtracts the child tax credit). Refundable credits are added
//! last and may exceed the remaining tax.

mod adoption;
mod child_tax;
mod clean_vehicle;
mod dependent_care;
mod earned_income;
mod education;
mod elderly_disabled;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

pub use adoption::adoption_credit;
pub use child_tax::{ChildTaxCredit, additional_child_tax_credit, child_tax_credit};
pub use clean_vehicle::clean_vehicle_credit;
pub use dependent_care::dependent_care_credit;
pub use earned_income::earned_income_credit;
pub use education::{EducationCredits, education_credits};
pub use elderly_disabled::elderly_disabled_credit;

use crate::calculations::common::money;
use crate::{Credit, CreditSummary, TaxReturn, TaxYearConfig};

/// Figures every credit may need, computed once by the engine.
#[derive(Debug, Clone)]
pub struct CreditContext<'a> {
    pub config: &'a TaxYearConfig,
    pub tax_return: &'a TaxReturn,
    pub adjusted_gross_income: Decimal,
    /// No foreign exclusions are modelled, so this equals AGI.
    pub modified_agi: Decimal,
    pub earned_income: Decimal,
    pub taxpayer_earned_income: Decimal,
    pub spouse_earned_income: Decimal,
    pub investment_income: Decimal,
    pub nontaxable_social_security: Decimal,
}

impl CreditContext<'_> {
    pub fn filing_status(&self) -> crate::FilingStatus {
        self.tax_return.filing_status()
    }
}

pub struct CreditEvaluator<'a> {
    context: CreditContext<'a>,
}

impl<'a> CreditEvaluator<'a> {
    pub fn new(context: CreditContext<'a>) -> Self {
        Self { context }
    }

    /// Tentative nonrefundable credits before the tax limit, rounded.
    pub fn tentative_nonrefundable(&self) -> (BTreeMap<Credit, Decimal>, ChildTaxCredit, Decimal) {
        let ctx = &self.context;
        let mut credits = BTreeMap::new();

        credits.insert(Credit::DependentCare, money(dependent_care_credit(ctx)));

        let education = education_credits(ctx);
        credits.insert(Credit::LifetimeLearning, money(education.lifetime_learning));
        credits.insert(
            Credit::AmericanOpportunity,
            money(education.american_opportunity_nonrefundable),
        );

        credits.insert(Credit::ElderlyDisabled, money(elderly_disabled_credit(ctx)));
        credits.insert(Credit::CleanVehicle, money(clean_vehicle_credit(ctx)));

        let child = child_tax_credit(ctx);
        credits.insert(Credit::ChildAndOtherDependent, money(child.total));

        credits.insert(Credit::Adoption, money(adoption_credit(ctx)));
        credits.insert(
            Credit::OtherNonrefundable,
            money(ctx.tax_return.credits.other_nonrefundable),
        );

        credits.retain(|_, amount| !amount.is_zero());
        (credits, child, money(education.american_opportunity_refundable))
    }

    /// Applies every credit against `tax_before_credits`.
    pub fn apply(
        &self,
        tax_before_credits: Decimal,
    ) -> CreditSummary {
        let ctx = &self.context;
        let (tentative, child, aotc_refundable) = self.tentative_nonrefundable();

        let mut remaining = tax_before_credits;
        let mut nonrefundable = BTreeMap::new();
        for (credit, amount) in tentative {
            let applied = amount.min(remaining);
            if applied < amount {
                debug!(
                    credit = credit.label(),
                    tentative = %amount,
                    %applied,
                    "credit limited by remaining tax"
                );
            }
            remaining -= applied;
            if !applied.is_zero() {
                nonrefundable.insert(credit, applied);
            }
        }

        let applied_child = nonrefundable
            .get(&Credit::ChildAndOtherDependent)
            .copied()
            .unwrap_or(Decimal::ZERO);

        let mut refundable = BTreeMap::new();
        refundable.insert(Credit::EarnedIncome, money(earned_income_credit(ctx)));
        refundable.insert(
            Credit::AdditionalChildTax,
            money(additional_child_tax_credit(ctx, &child, applied_child)),
        );
        refundable.insert(Credit::AmericanOpportunityRefundable, aotc_refundable);
        refundable.retain(|_, amount| !amount.is_zero());

        let total_nonrefundable = nonrefundable.values().copied().sum();
        let total_refundable = refundable.values().copied().sum();

        CreditSummary {
            nonrefundable,
            refundable,
            total_nonrefundable,
            total_refundable,
        }
    }
}

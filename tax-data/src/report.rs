//! Plain-text rendering of calculation results.

use std::fmt::Write;

use rust_decimal::Decimal;
use tax_core::{DeductionMethod, FederalCalculation};
use tax_states::{StateCalculationBreakdown, UsState};

const LABEL_WIDTH: usize = 36;
const AMOUNT_WIDTH: usize = 14;

fn line(
    out: &mut String,
    label: &str,
    amount: Decimal,
) {
    let _ = writeln!(out, "  {label:<LABEL_WIDTH$}{amount:>AMOUNT_WIDTH$.2}");
}

fn heading(
    out: &mut String,
    title: &str,
) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH + 2));
}

/// Signed refund line: "Refund" when positive, "Amount owed" otherwise.
fn settlement(
    out: &mut String,
    refund_or_owed: Decimal,
) {
    if refund_or_owed > Decimal::ZERO {
        line(out, "Refund", refund_or_owed);
    } else {
        line(out, "Amount owed", -refund_or_owed);
    }
}

fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).round_dp(2)
}

pub fn render_federal(calculation: &FederalCalculation) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!(
            "Federal {} ({})",
            calculation.tax_year,
            calculation.filing_status.name()
        ),
    );

    let income = &calculation.income;
    for (label, amount) in [
        ("Wages", income.wages),
        ("Taxable interest", income.taxable_interest),
        ("Ordinary dividends", income.ordinary_dividends),
        ("Business income", income.business_income),
        ("Capital gain or loss", income.capital_gains),
        ("Retirement distributions", income.retirement_distributions),
        ("Taxable social security", income.taxable_social_security),
        ("Unemployment compensation", income.unemployment_compensation),
        ("Other income", income.other_income),
    ] {
        if !amount.is_zero() {
            line(&mut out, label, amount);
        }
    }
    line(&mut out, "Total income", calculation.total_income);
    line(&mut out, "Adjustments", calculation.adjustments.total);
    line(&mut out, "Adjusted gross income", calculation.adjusted_gross_income);

    let method = match calculation.deduction_method {
        DeductionMethod::Standard => "Standard deduction",
        DeductionMethod::Itemized => "Itemized deductions",
    };
    line(&mut out, method, calculation.deduction_amount);
    line(&mut out, "Taxable income", calculation.taxable_income);
    line(&mut out, "Tax", calculation.tax_before_credits);

    for (credit, amount) in &calculation.credits.nonrefundable {
        line(&mut out, credit.label(), -*amount);
    }
    if !calculation.self_employment_tax.is_zero() {
        line(&mut out, "Self-employment tax", calculation.self_employment_tax);
    }
    line(&mut out, "Total tax", calculation.total_tax);
    for (credit, amount) in &calculation.credits.refundable {
        line(&mut out, credit.label(), -*amount);
    }
    line(&mut out, "Tax liability", calculation.total_tax_liability);
    line(
        &mut out,
        "Payments",
        calculation.federal_withholding + calculation.estimated_tax_payments,
    );
    settlement(&mut out, calculation.refund_or_owed);
    line(&mut out, "Marginal rate %", percent(calculation.marginal_rate));
    line(&mut out, "Effective rate %", percent(calculation.effective_rate));
    out
}

pub fn render_state(breakdown: &StateCalculationBreakdown) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!(
            "{} ({}) {} ({})",
            breakdown.state_name,
            breakdown.state_code,
            breakdown.tax_year,
            breakdown.filing_status.name()
        ),
    );

    line(&mut out, "Starting income", breakdown.starting_income);
    if !breakdown.additions.is_zero() {
        line(&mut out, "Additions", breakdown.additions);
    }
    if !breakdown.subtractions.is_zero() {
        line(&mut out, "Subtractions", -breakdown.subtractions);
    }
    line(&mut out, "State AGI", breakdown.state_agi);
    line(&mut out, "Deduction", breakdown.deduction_used);
    if !breakdown.exemptions.is_zero() {
        line(&mut out, "Exemptions", breakdown.exemptions);
    }
    line(&mut out, "Taxable income", breakdown.taxable_income);
    line(&mut out, "Tax", breakdown.tax_before_credits);
    for (name, amount) in &breakdown.credits {
        line(&mut out, name, -*amount);
    }
    if !breakdown.local_tax.is_zero() {
        line(&mut out, "Local tax", breakdown.local_tax);
    }
    line(&mut out, "Tax liability", breakdown.tax_liability);
    line(&mut out, "Withholding", breakdown.withholding);
    settlement(&mut out, breakdown.refund_or_owed);
    line(&mut out, "Effective rate %", percent(breakdown.effective_rate()));
    out
}

/// Supported states and the states with no income tax, one code per line.
pub fn render_state_list(
    tax_year: i32,
    supported: &[UsState],
    no_income_tax: &[UsState],
) -> String {
    let mut out = String::new();
    let taxed: Vec<_> = supported.iter().filter(|s| s.has_income_tax()).collect();

    heading(&mut out, &format!("State income tax calculators for {tax_year}"));
    for state in &taxed {
        let _ = writeln!(out, "  {}  {}", state.code(), state.name());
    }
    let _ = writeln!(out);
    heading(&mut out, "No state income tax");
    for state in no_income_tax {
        let _ = writeln!(out, "  {}  {}", state.code(), state.name());
    }
    out
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use tax_core::{FederalTaxEngine, FilingStatus, TaxReturn, TaxpayerInfo, W2};
    use tax_states::{StateRegistry, StateTaxEngine};

    use super::*;

    fn wage_return(state: &str) -> TaxReturn {
        let mut info = TaxpayerInfo::new(FilingStatus::Single);
        info.age = 40;
        let mut tax_return = TaxReturn::new(2025, info);
        tax_return.state_of_residence = Some(state.to_string());
        let mut w2 = W2::new("Northwind", dec!(75000), dec!(9000));
        w2.state = Some(state.to_string());
        w2.state_wages = dec!(75000);
        tax_return.income.w2s.push(w2);
        FederalTaxEngine::for_year(2025)
            .unwrap()
            .calculate_complete_return(&mut tax_return)
            .unwrap();
        tax_return
    }

    #[test]
    fn federal_report_lists_key_lines() {
        let tax_return = wage_return("PA");

        let text = render_federal(tax_return.federal.as_ref().unwrap());

        assert!(text.starts_with("Federal 2025 (Single)"), "{text}");
        assert!(text.contains("Standard deduction"), "{text}");
        assert!(text.contains("15000.00"), "{text}");
        assert!(text.contains("8114.00"), "{text}");
        // 9,000 withheld against 8,114 owed
        assert!(text.contains("Refund"), "{text}");
        assert!(text.contains("886.00"), "{text}");
        assert!(!text.contains("Business income"), "{text}");
    }

    #[test]
    fn state_report_shows_amount_owed() {
        let registry = StateRegistry::with_builtin_states();
        let engine = StateTaxEngine::new(&registry, 2025);
        let tax_return = wage_return("PA");

        let breakdown = engine.calculate_residence(&tax_return).unwrap().unwrap();
        let text = render_state(&breakdown);

        assert!(text.starts_with("Pennsylvania (PA) 2025"), "{text}");
        assert!(text.contains("2302.50"), "{text}");
        assert!(text.contains("Amount owed"), "{text}");
    }

    #[test]
    fn state_list_separates_untaxed_states() {
        let registry = StateRegistry::with_builtin_states();
        let engine = StateTaxEngine::new(&registry, 2025);

        let text = render_state_list(
            2025,
            &engine.get_supported_states(),
            &engine.get_no_income_tax_states(),
        );

        let (taxed, untaxed) = text.split_once("No state income tax").unwrap();
        assert!(taxed.contains("CA  California"));
        assert!(taxed.contains("DC  "));
        assert!(!taxed.contains("TX  Texas"));
        assert!(untaxed.contains("TX  Texas"));
        assert_eq!(untaxed.lines().filter(|l| l.starts_with("  ")).count(), 9);
    }
}

//! Sample returns from `test-data/` run through both engines, the way the
//! `tax-calc` binary does it.

use std::fs::File;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{Credit, FederalTaxEngine, FilingStatus, TaxReturn, TaxYearConfig};
use tax_data::{TaxBracketLoader, load_return};
use tax_states::{StateRegistry, StateTaxEngine, UsState};

fn test_data(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(relative)
}

fn federal(mut tax_return: TaxReturn) -> TaxReturn {
    FederalTaxEngine::for_year(tax_return.tax_year)
        .unwrap()
        .calculate_complete_return(&mut tax_return)
        .unwrap();
    tax_return
}

// =========================================================================
// Single filer in Pennsylvania
// =========================================================================

#[test]
fn single_pennsylvania_federal() {
    let tax_return = federal(load_return(&test_data("returns/single_pennsylvania.toml")).unwrap());
    let calculation = tax_return.federal.as_ref().unwrap();

    assert_eq!(calculation.filing_status, FilingStatus::Single);
    assert_eq!(calculation.adjusted_gross_income, dec!(75000.00));
    assert_eq!(calculation.taxable_income, dec!(60000.00));
    assert_eq!(calculation.tax_before_credits, dec!(8114.00));
    assert_eq!(calculation.refund_or_owed, dec!(886.00));
}

#[test]
fn single_pennsylvania_state() {
    let registry = StateRegistry::with_builtin_states();
    let engine = StateTaxEngine::new(&registry, 2025);
    let tax_return = federal(load_return(&test_data("returns/single_pennsylvania.toml")).unwrap());

    let breakdown = engine.calculate_residence(&tax_return).unwrap().unwrap();

    assert_eq!(breakdown.state_code, UsState::PA);
    assert_eq!(breakdown.tax_liability, dec!(2302.50));
    assert_eq!(breakdown.withholding, dec!(2400.00));
    assert_eq!(breakdown.refund_or_owed, dec!(97.50));
}

#[test]
fn state_override_uses_another_calculator() {
    let registry = StateRegistry::with_builtin_states();
    let engine = StateTaxEngine::new(&registry, 2025);
    let tax_return = federal(load_return(&test_data("returns/single_pennsylvania.toml")).unwrap());

    let breakdown = engine.calculate(&tax_return, "oh").unwrap().unwrap();

    assert_eq!(breakdown.state_code, UsState::OH);
    // Box 17 withholding belongs to Pennsylvania
    assert_eq!(breakdown.withholding, dec!(0));
    assert!(breakdown.refund_or_owed < dec!(0));
}

// =========================================================================
// Joint filers with children in New York City
// =========================================================================

#[test]
fn family_new_york_city_federal() {
    let tax_return = federal(load_return(&test_data("returns/family_new_york_city.toml")).unwrap());
    let calculation = tax_return.federal.as_ref().unwrap();

    assert_eq!(calculation.filing_status, FilingStatus::MarriedFilingJointly);
    // 150,000 wages + 640 interest - 300 educator expenses
    assert_eq!(calculation.adjusted_gross_income, dec!(150340.00));
    assert_eq!(calculation.taxable_income, dec!(120340.00));
    assert_eq!(calculation.tax_before_credits, dec!(16302.80));
    assert_eq!(
        calculation.credits.get(Credit::ChildAndOtherDependent),
        dec!(4000.00)
    );
}

#[test]
fn family_new_york_city_pays_city_tax() {
    let registry = StateRegistry::with_builtin_states();
    let engine = StateTaxEngine::new(&registry, 2025);
    let tax_return = federal(load_return(&test_data("returns/family_new_york_city.toml")).unwrap());

    let breakdown = engine.calculate_residence(&tax_return).unwrap().unwrap();

    assert_eq!(breakdown.state_code, UsState::NY);
    assert!(breakdown.local_tax > dec!(0));
    assert_eq!(breakdown.withholding, dec!(6800.00));
    assert_eq!(
        breakdown.refund_or_owed,
        breakdown.withholding - breakdown.tax_liability
    );
}

// =========================================================================
// Brackets loaded from CSV
// =========================================================================

#[test]
fn csv_brackets_reproduce_builtin_results() {
    let base = TaxYearConfig::for_year(2025).unwrap();
    let file = File::open(test_data("tax_brackets_2025.csv")).unwrap();
    let records = TaxBracketLoader::parse(file).unwrap();
    let loaded = TaxBracketLoader::apply(base, &records).unwrap();

    for name in [
        "returns/single_pennsylvania.toml",
        "returns/family_new_york_city.toml",
    ] {
        let tax_return = load_return(&test_data(name)).unwrap();

        let builtin = FederalTaxEngine::new(base).calculate(&tax_return).unwrap();
        let from_csv = FederalTaxEngine::new(&loaded).calculate(&tax_return).unwrap();

        assert_eq!(from_csv, builtin, "{name}");
    }
}

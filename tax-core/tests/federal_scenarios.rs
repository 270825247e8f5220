//! End-to-end federal returns for tax year 2025.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{
    Credit, DeductionMethod, Dependent, FederalTaxEngine, FilingStatus, Owner, Relationship,
    SpouseInfo, TaxError, TaxReturn, TaxYearConfig, TaxpayerInfo, ValidationError, W2,
};

fn engine() -> FederalTaxEngine<'static> {
    FederalTaxEngine::for_year(2025).unwrap()
}

fn child(
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

fn joint_family() -> TaxReturn {
    let mut info = TaxpayerInfo::new(FilingStatus::MarriedFilingJointly);
    info.first_name = "Pat".to_string();
    info.age = 41;
    info.spouse = Some(SpouseInfo {
        first_name: "Sam".to_string(),
        age: 39,
        ..SpouseInfo::default()
    });
    info.dependents = vec![child("Ada", 8), child("Ben", 12)];

    let mut tax_return = TaxReturn::new(2025, info);
    tax_return
        .income
        .w2s
        .push(W2::new("Northwind", dec!(90000), dec!(9000)));
    let mut spouse_w2 = W2::new("Contoso", dec!(70000), dec!(6000));
    spouse_w2.owner = Owner::Spouse;
    tax_return.income.w2s.push(spouse_w2);
    tax_return.credits.claim_earned_income_credit = true;
    tax_return.credits.claim_child_tax_credit = true;
    tax_return
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn zero_income_return_owes_nothing_and_refunds_withholding() {
    let mut tax_return = TaxReturn::new(2025, TaxpayerInfo::new(FilingStatus::Single));
    tax_return
        .income
        .w2s
        .push(W2::new("Fabrikam", Decimal::ZERO, dec!(250)));

    let calc = engine().calculate(&tax_return).unwrap();

    assert_eq!(calc.total_tax_liability, dec!(0));
    assert_eq!(calc.refund_or_owed, dec!(250.00));
}

#[test]
fn married_joint_family_with_two_children() {
    let mut tax_return = joint_family();

    let calc = engine()
        .calculate_complete_return(&mut tax_return)
        .unwrap()
        .clone();

    assert_eq!(calc.adjusted_gross_income, dec!(160000.00));
    assert_eq!(calc.deduction_method, DeductionMethod::Standard);
    assert_eq!(calc.taxable_income, dec!(130000.00));
    // 2,385 + 8,772 + 33,050 × 22%
    assert_eq!(calc.tax_before_credits, dec!(18428.00));
    assert_eq!(calc.credits.get(Credit::ChildAndOtherDependent), dec!(4000.00));
    assert_eq!(calc.credits.get(Credit::EarnedIncome), dec!(0));
    assert_eq!(calc.total_tax_liability, dec!(14428.00));
    assert_eq!(calc.refund_or_owed, dec!(572.00));
    assert!(calc.total_tax_liability >= Decimal::ZERO);
    assert_eq!(tax_return.federal, Some(calc));
}

#[test]
fn itemized_deductions_win_when_larger() {
    let mut tax_return = TaxReturn::new(2025, TaxpayerInfo::new(FilingStatus::Single));
    tax_return
        .income
        .w2s
        .push(W2::new("Tailspin", dec!(120000), dec!(20000)));
    tax_return.deductions.itemized.state_local_income_taxes = dec!(7000);
    tax_return.deductions.itemized.mortgage_interest = dec!(11000);
    tax_return.deductions.itemized.charitable_cash = dec!(2000);

    let calc = engine().calculate(&tax_return).unwrap();

    assert_eq!(calc.deduction_method, DeductionMethod::Itemized);
    assert_eq!(calc.deduction_amount, dec!(20000.00));
    assert_eq!(calc.taxable_income, dec!(100000.00));
}

#[test]
fn self_employed_single_filer_pays_se_tax() {
    let mut tax_return = TaxReturn::new(2025, TaxpayerInfo::new(FilingStatus::Single));
    tax_return.income.business_income = dec!(60000);
    tax_return.income.business_expenses = dec!(10000);
    tax_return.income.estimated_tax_payments = dec!(8000);

    let calc = engine().calculate(&tax_return).unwrap();

    // 46,175 net earnings: 1,339.08 medicare + 5,725.70 social security
    assert_eq!(calc.self_employment_tax, dec!(7064.78));
    assert_eq!(calc.total_tax, calc.tax_after_nonrefundable_credits + calc.self_employment_tax);
}

#[test]
fn low_income_head_of_household_gets_refundable_credits() {
    let mut info = TaxpayerInfo::new(FilingStatus::HeadOfHousehold);
    info.age = 29;
    info.dependents = vec![child("Cleo", 4)];
    let mut tax_return = TaxReturn::new(2025, info);
    tax_return
        .income
        .w2s
        .push(W2::new("Litware", dec!(20000), dec!(300)));
    tax_return.credits.claim_earned_income_credit = true;
    tax_return.credits.claim_child_tax_credit = true;

    let calc = engine().calculate(&tax_return).unwrap();

    assert_eq!(calc.taxable_income, dec!(0.00));
    assert_eq!(calc.credits.get(Credit::EarnedIncome), dec!(4328.00));
    // 15% × 17,500 = 2,625, capped at 1,700 for one child
    assert_eq!(calc.credits.get(Credit::AdditionalChildTax), dec!(1700.00));
    assert_eq!(calc.refund_or_owed, dec!(6328.00));
}

// =========================================================================
// Properties
// =========================================================================

#[test]
fn tax_before_credits_is_monotonic_in_wages() {
    let engine = engine();
    let mut previous = Decimal::ZERO;
    for step in 0..120 {
        let wages = Decimal::from(step) * dec!(5000);
        let mut tax_return = TaxReturn::new(2025, TaxpayerInfo::new(FilingStatus::Single));
        tax_return
            .income
            .w2s
            .push(W2::new("Wingtip", wages, Decimal::ZERO));

        let calc = engine.calculate(&tax_return).unwrap();

        assert!(
            calc.tax_before_credits >= previous,
            "tax fell at wages {wages}"
        );
        previous = calc.tax_before_credits;
    }
}

#[test]
fn every_status_has_nonnegative_tax() {
    for status in FilingStatus::ALL {
        let mut info = TaxpayerInfo::new(status);
        if status.is_married() {
            info.spouse = Some(SpouseInfo::default());
        }
        let mut tax_return = TaxReturn::new(2025, info);
        tax_return
            .income
            .w2s
            .push(W2::new("Adatum", dec!(75000), dec!(8000)));

        let calc = engine().calculate(&tax_return).unwrap();

        assert!(calc.tax_before_credits >= Decimal::ZERO, "{status}");
        assert!(calc.marginal_rate > Decimal::ZERO, "{status}");
    }
}

#[test]
fn custom_brackets_replace_schedule() {
    let base = TaxYearConfig::for_year(2025).unwrap();
    let flat = tax_core::BracketSchedule::flat(dec!(0.10));
    let config = base
        .with_brackets(tax_core::ByFilingStatus::uniform(flat))
        .unwrap();
    let mut tax_return = TaxReturn::new(2025, TaxpayerInfo::new(FilingStatus::Single));
    tax_return
        .income
        .w2s
        .push(W2::new("Proseware", dec!(115000), Decimal::ZERO));

    let calc = FederalTaxEngine::new(&config).calculate(&tax_return).unwrap();

    assert_eq!(calc.tax_before_credits, dec!(10000.00));
}

// =========================================================================
// Rejections
// =========================================================================

#[test]
fn negative_income_is_rejected_before_calculation() {
    let mut tax_return = TaxReturn::new(2025, TaxpayerInfo::new(FilingStatus::Single));
    tax_return.income.taxable_interest = dec!(-10);

    assert_eq!(
        engine().calculate(&tax_return),
        Err(TaxError::Validation(ValidationError::NegativeAmount {
            field: "income.taxable_interest".to_string(),
            value: dec!(-10),
        }))
    );
}

#[test]
fn failed_calculation_leaves_return_untouched() {
    let mut tax_return = joint_family();
    tax_return.taxpayer.spouse = None;

    assert!(engine().calculate_complete_return(&mut tax_return).is_err());
    assert_eq!(tax_return.federal, None);
}

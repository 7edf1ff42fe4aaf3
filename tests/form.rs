//! 폼 제출 동작 테스트.
use solar_roi_calculator::form::{Field, FormError, RoiForm};

fn filled(cost: &str, bill: &str) -> RoiForm {
    let mut form = RoiForm::new();
    form.set_value(Field::SystemCost, cost);
    form.set_value(Field::MonthlyBill, bill);
    form
}

#[test]
fn submit_replaces_previous_result() {
    let mut form = filled("25000", "150");
    assert_eq!(form.submit().expect("first").break_even, "13.9");
    form.set_value(Field::SystemCost, "10000");
    form.set_value(Field::MonthlyBill, "100");
    assert_eq!(form.submit().expect("second").break_even, "8.3");
    assert_eq!(form.result().map(|r| r.twenty_year_roi.as_str()), Some("14000.00"));
}

#[test]
fn empty_required_field_blocks_and_keeps_result() {
    let mut form = filled("25000", "150");
    let first = form.submit().expect("first").clone();

    form.set_value(Field::MonthlyBill, "   ");
    assert_eq!(form.submit(), Err(FormError::MissingRequired(Field::MonthlyBill)));
    assert_eq!(form.result(), Some(&first));
}

#[test]
fn cost_checked_before_bill() {
    let mut form = RoiForm::new();
    assert_eq!(form.submit(), Err(FormError::MissingRequired(Field::SystemCost)));
}

#[test]
fn non_numeric_text_becomes_nan() {
    let mut form = filled("lots", "150");
    let report = form.submit().expect("non-empty text is submitted");
    assert_eq!(report.annual_savings, "1800.00");
    assert_eq!(report.break_even, "NaN");
    assert_eq!(report.twenty_year_roi, "NaN");
}

#[test]
fn trailing_text_is_not_a_number() {
    let mut form = filled(" 25000 ", "150/mo");
    let report = form.submit().expect("submit");
    assert_eq!(report.annual_savings, "NaN");
    assert_eq!(report.break_even, "NaN");
    assert_eq!(report.twenty_year_roi, "NaN");
}

#[test]
fn zero_bill_displays_infinity() {
    let mut form = filled("25000", "0");
    let report = form.submit().expect("submit");
    assert_eq!(report.annual_savings, "0.00");
    assert_eq!(report.break_even, "Infinity");
    assert_eq!(report.twenty_year_roi, "-25000.00");
}

#[test]
fn idempotent_submission() {
    let mut form = filled("50000", "50");
    let a = form.submit().expect("a").clone();
    let b = form.submit().expect("b").clone();
    assert_eq!(a, b);
}

#[test]
fn rate_is_parsed_but_unused() {
    let mut form = filled("25000", "150");
    form.set_value(Field::ElectricityRate, "0.30");
    let with_rate = form.submit().expect("submit").clone();
    assert_eq!(form.input().electricity_rate, 0.30);
    form.set_value(Field::ElectricityRate, "x");
    assert_eq!(form.submit().expect("submit"), &with_rate);
}

#[test]
fn clear_result_hides_results() {
    let mut form = filled("1", "1");
    form.submit().expect("submit");
    form.clear_result();
    assert!(form.result().is_none());
    assert_eq!(form.value(Field::SystemCost), "1");
}

#[test]
fn field_metadata() {
    assert!(Field::SystemCost.is_required());
    assert!(Field::MonthlyBill.is_required());
    assert!(!Field::ElectricityRate.is_required());
    assert_eq!(Field::SystemCost.placeholder(), "e.g., 25000");
    assert_eq!(Field::ElectricityRate.placeholder(), "e.g., 0.13");
}

//! ROI 계산 예제 및 성질 테스트.
use proptest::prelude::*;
use solar_roi_calculator::solar::{calculate_roi, RoiInput};

fn roi(cost: f64, bill: f64) -> solar_roi_calculator::solar::RoiResult {
    calculate_roi(&RoiInput {
        system_cost: cost,
        monthly_bill: bill,
        electricity_rate: 0.13,
    })
}

#[test]
fn typical_residential_system() {
    let report = roi(25000.0, 150.0).report();
    assert_eq!(report.annual_savings, "1800.00");
    assert_eq!(report.break_even, "13.9");
    assert_eq!(report.twenty_year_roi, "11000.00");
}

#[test]
fn small_system() {
    let report = roi(10000.0, 100.0).report();
    assert_eq!(report.annual_savings, "1200.00");
    assert_eq!(report.break_even, "8.3");
    assert_eq!(report.twenty_year_roi, "14000.00");
}

#[test]
fn negative_net_savings() {
    let res = roi(50000.0, 50.0);
    let report = res.report();
    assert_eq!(report.annual_savings, "600.00");
    assert_eq!(report.break_even, "83.3");
    assert_eq!(report.twenty_year_roi, "-38000.00");
    assert!(res.is_net_loss());
}

#[test]
fn zero_bill_breaks_even_never() {
    let res = roi(25000.0, 0.0);
    assert_eq!(res.annual_savings, 0.0);
    assert_eq!(res.break_even_years, f64::INFINITY);
    assert_eq!(res.report().break_even, "Infinity");
    assert_eq!(res.report().twenty_year_roi, "-25000.00");
}

#[test]
fn zero_bill_and_zero_cost_is_nan() {
    let res = roi(0.0, 0.0);
    assert!(res.break_even_years.is_nan());
    assert_eq!(res.report().break_even, "NaN");
    assert_eq!(res.report().twenty_year_roi, "0.00");
}

#[test]
fn negative_cost_with_zero_bill() {
    assert_eq!(roi(-100.0, 0.0).break_even_years, f64::NEG_INFINITY);
}

#[test]
fn nan_propagates_to_every_field() {
    let report = roi(f64::NAN, 150.0).report();
    assert_eq!(report.annual_savings, "1800.00");
    assert_eq!(report.break_even, "NaN");
    assert_eq!(report.twenty_year_roi, "NaN");

    let report = roi(25000.0, f64::NAN).report();
    assert_eq!(report.annual_savings, "NaN");
    assert_eq!(report.break_even, "NaN");
    assert_eq!(report.twenty_year_roi, "NaN");
}

#[test]
fn negative_bill_is_not_rejected() {
    let report = roi(1200.0, -10.0).report();
    assert_eq!(report.annual_savings, "-120.00");
    assert_eq!(report.break_even, "-10.0");
    assert_eq!(report.twenty_year_roi, "-3600.00");
}

proptest! {
    #[test]
    fn prop_formulas_hold(cost in 0.0f64..1e7, bill in 0.01f64..1e5) {
        let res = roi(cost, bill);
        prop_assert_eq!(res.annual_savings, bill * 12.0);
        prop_assert_eq!(res.break_even_years, cost / (bill * 12.0));
        prop_assert_eq!(res.twenty_year_roi, bill * 12.0 * 20.0 - cost);
    }

    #[test]
    fn prop_identical_inputs_identical_results(cost in -1e7f64..1e7, bill in -1e5f64..1e5) {
        prop_assert_eq!(roi(cost, bill).report(), roi(cost, bill).report());
    }

    #[test]
    fn prop_zero_bill_is_non_finite(cost in -1e7f64..1e7) {
        prop_assert!(!roi(cost, 0.0).break_even_years.is_finite());
    }
}

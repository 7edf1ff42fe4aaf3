//! 입력 해석/고정 소수점 출력 성질 테스트.
use proptest::prelude::*;
use solar_roi_calculator::numeric::{parse_float, to_fixed};

#[test]
fn break_even_tie_rounds_up() {
    // 300 / 1200 = 0.25 (이진수로 정확히 표현됨)
    assert_eq!(to_fixed(300.0 / 1200.0, 1), "0.3");
}

#[test]
fn exact_binary_value_decides() {
    assert_eq!(to_fixed(1.005, 2), "1.00");
    assert_eq!(to_fixed(8.345, 2), "8.35");
}

proptest! {
    #[test]
    fn prop_display_roundtrips_through_parse(x in -1e12f64..1e12) {
        prop_assert_eq!(parse_float(&format!("{x}")), x);
    }

    #[test]
    fn prop_fixed_two_is_within_half_cent(x in -1e9f64..1e9) {
        let s = to_fixed(x, 2);
        let back = parse_float(&s);
        prop_assert!((back - x).abs() <= 0.005 + 1e-6, "x={} s={}", x, s);
        let frac = s.split_once('.').map(|(_, f)| f.len());
        prop_assert_eq!(frac, Some(2));
    }

    #[test]
    fn prop_trailing_text_is_nan(x in 0.0f64..1e6, suffix in "[a-z$/%]{1,4}") {
        let input = format!("{x}{suffix}");
        prop_assert!(parse_float(&input).is_nan());
    }

    #[test]
    fn prop_surrounding_spaces_ignored(x in -1e6f64..1e6, pad in " {0,3}") {
        prop_assert_eq!(parse_float(&format!("{pad}{x}{pad}")), x);
    }
}

use crate::Coerce;

use serde_json::{Value, json};

/// **VALUE**: Verifies integers accept the representations grid editors and the CLI produce.
///
/// **WHY THIS MATTERS**: A speed limit typed into a text cell arrives as `"250"`. Rejecting
/// it would make every text-backed editor useless.
///
/// **BUG THIS CATCHES**: Would catch string parsing or integral-float handling being dropped.
#[test]
fn given_integer_like_values_when_coerced_to_i64_then_succeeds() {
    assert_eq!(i64::coerce(&json!(42)), Some(42));
    assert_eq!(i64::coerce(&json!(" 250 ")), Some(250));
    assert_eq!(i64::coerce(&json!(7.0)), Some(7));
    assert_eq!(i64::coerce(&json!(true)), Some(1));
}

/// **VALUE**: Verifies lossy or nonsensical integer coercions are refused.
///
/// **BUG THIS CATCHES**: Would catch `1.5` silently truncating to `1` or `"abc"` becoming `0`.
#[test]
fn given_non_integral_values_when_coerced_to_i64_then_fails() {
    assert_eq!(i64::coerce(&json!(1.5)), None);
    assert_eq!(i64::coerce(&json!("abc")), None);
    assert_eq!(i64::coerce(&Value::Null), None);
    assert_eq!(i64::coerce(&json!([1])), None);
}

/// **VALUE**: Verifies floats at or beyond 2^63 are refused instead of saturating.
///
/// **BUG THIS CATCHES**: Would catch an inclusive upper bound, which lets `2^63` (exactly
/// representable as a float) through and `as i64` clamps it to `i64::MAX`.
#[test]
fn given_float_at_two_pow_63_when_coerced_to_i64_then_fails() {
    assert_eq!(i64::coerce(&json!(9.223372036854775808e18)), None);
    assert_eq!(i64::coerce(&json!(9_223_372_036_854_775_808_u64)), None);
    assert_eq!(i64::coerce(&json!(-9.223372036854775808e18)), Some(i64::MIN));
    assert_eq!(i64::coerce(&json!(i64::MAX)), Some(i64::MAX));
}

#[test]
fn given_out_of_range_value_when_coerced_to_i32_then_fails() {
    assert_eq!(i32::coerce(&json!(i64::from(i32::MAX) + 1)), None);
    assert_eq!(i32::coerce(&json!(-1)), Some(-1));
}

#[test]
fn given_flag_spellings_when_coerced_to_bool_then_maps_correctly() {
    assert_eq!(bool::coerce(&json!(true)), Some(true));
    assert_eq!(bool::coerce(&json!(0)), Some(false));
    assert_eq!(bool::coerce(&json!("Yes")), Some(true));
    assert_eq!(bool::coerce(&json!("off")), Some(false));
    assert_eq!(bool::coerce(&json!(2)), None);
    assert_eq!(bool::coerce(&json!("maybe")), None);
}

/// **VALUE**: Verifies the optional representation: null clears, values wrap.
///
/// **WHY THIS MATTERS**: Mutator fields are all `Option`. "Set to null" must mean "no longer
/// pending", while "set to 5" must mean `Some(5)`, not a type error.
///
/// **BUG THIS CATCHES**: Would catch `Option<T>` delegating null to `T` (which fails).
#[test]
fn given_null_and_value_when_coerced_to_option_then_wraps_or_clears() {
    assert_eq!(Option::<i64>::coerce(&Value::Null), Some(None));
    assert_eq!(Option::<i64>::coerce(&json!("5")), Some(Some(5)));
    assert_eq!(Option::<i64>::coerce(&json!("five")), None);
}

#[test]
fn given_scalar_or_array_when_coerced_to_vec_then_builds_list() {
    assert_eq!(Vec::<i64>::coerce(&json!([1, "2", 3.0])), Some(vec![1, 2, 3]));
    assert_eq!(Vec::<String>::coerce(&json!("movies")), Some(vec![String::from("movies")]));
    assert_eq!(Vec::<i64>::coerce(&json!([1, "x"])), None);
    assert_eq!(Vec::<i64>::coerce(&Value::Null), None);
}

#[test]
fn given_numbers_when_coerced_to_f64_then_accepts_strings_but_not_nan() {
    assert_eq!(f64::coerce(&json!(2)), Some(2.0));
    assert_eq!(f64::coerce(&json!("1.25")), Some(1.25));
    assert_eq!(f64::coerce(&json!("NaN")), None);
}

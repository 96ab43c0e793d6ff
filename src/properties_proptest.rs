//! Property-based tests for the properties container and comparators.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::cmp::Ordering;

    use crate::comparators::{Comparator, TransformingComparator};
    use crate::properties::tokenizer::{escape_value, split_values};
    use crate::properties::{ExtendedProperties, PropertyValue};
    use proptest::prelude::*;

    /// Values the text format preserves: no control characters, no outer
    /// whitespace (lines are trimmed) and no `${` references.
    fn storable_value() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[a-zA-Z0-9,\\\\=#!:/.]",
            "[a-zA-Z0-9,\\\\=#!:/.][a-zA-Z0-9,\\\\=#!:/. ]{0,20}[a-zA-Z0-9,\\\\=#!:/.]",
        ]
    }

    /// Keys the text format preserves: anything non-empty without control
    /// characters, including comment markers, separators and backslashes.
    fn property_key() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z][a-z0-9_.]{0,12}",
            "[a-z0-9_.#!=\\\\ ]{1,12}",
        ]
        .prop_filter("include key is consumed on load", |key| {
            !key.eq_ignore_ascii_case("include")
        })
    }

    // ============================================================================
    // tokenizer property tests
    // ============================================================================

    proptest! {
        /// Property: an escaped value always splits back into exactly itself
        #[test]
        fn escaped_value_is_a_single_element(value in storable_value()) {
            let split = split_values(&escape_value(&value));
            prop_assert_eq!(split, vec![value]);
        }

        /// Property: split elements never carry outer whitespace or are empty
        /// when the raw value is a list
        #[test]
        fn list_elements_are_trimmed_and_non_empty(raw in "[a-z ,]{1,30}") {
            prop_assume!(raw.contains(','));
            for element in split_values(&raw) {
                prop_assert!(!element.is_empty());
                prop_assert_eq!(element.trim(), element.as_str());
            }
        }
    }

    // ============================================================================
    // save/load round trip
    // ============================================================================

    proptest! {
        /// Property: save followed by load reproduces every string and vector
        #[test]
        fn save_then_load_round_trips(
            entries in prop::collection::vec((property_key(), storable_value()), 1..12)
        ) {
            let mut original = ExtendedProperties::new();
            for (key, value) in &entries {
                original.add_property_direct(key.as_str(), value.as_str());
            }

            let mut buffer = Vec::new();
            original.save(&mut buffer, Some("generated")).unwrap();

            let mut reloaded = ExtendedProperties::new();
            reloaded.load(buffer.as_slice()).unwrap();

            prop_assert_eq!(reloaded.len(), original.len());
            for key in original.keys() {
                prop_assert_eq!(reloaded.get_string(key), original.get_string(key));
                prop_assert_eq!(reloaded.get_vector(key), original.get_vector(key));
            }
        }

        /// Property: a literal value set through its escaped form reads back
        /// unchanged as a single value
        #[test]
        fn escaped_set_property_reads_back_literal(value in storable_value()) {
            let mut props = ExtendedProperties::new();
            props.set_property("key", escape_value(&value));
            prop_assert_eq!(props.get_string("key"), Some(value.clone()));
            prop_assert_eq!(props.get_vector("key"), vec![PropertyValue::String(value)]);
        }

        /// Property: the number of keys never counts a repeated key twice
        #[test]
        fn repeated_keys_accumulate(values in prop::collection::vec("[a-z]{1,5}", 1..8)) {
            let mut props = ExtendedProperties::new();
            for value in &values {
                props.add_property("one", value.as_str());
            }
            prop_assert_eq!(props.len(), 1);
            prop_assert_eq!(props.get_string_array("one"), values);
        }
    }

    // ============================================================================
    // comparator property tests
    // ============================================================================

    proptest! {
        /// Property: the decorator equals the base comparator on transformed values
        #[test]
        fn transforming_comparator_matches_manual(x in any::<i32>(), y in any::<i32>()) {
            let f = |n: &i64| n.rem_euclid(7);
            let base = |a: &i64, b: &i64| b.cmp(a);
            let cmp = TransformingComparator::with_comparator(f, base);

            let (x, y) = (i64::from(x), i64::from(y));
            prop_assert_eq!(cmp.compare(&x, &y), base(&f(&x), &f(&y)));
        }

        /// Property: the decorator is antisymmetric
        #[test]
        fn transforming_comparator_is_antisymmetric(a in ".{0,8}", b in ".{0,8}") {
            let cmp = TransformingComparator::new(|s: &String| s.to_lowercase());
            prop_assert_eq!(cmp.compare(&a, &b), cmp.compare(&b, &a).reverse());
            prop_assert_eq!(cmp.compare(&a, &a), Ordering::Equal);
        }
    }
}

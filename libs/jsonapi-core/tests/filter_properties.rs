//! Property tests for the filter query parser.
//!
//! Properties:
//! - a successful parse never holds an empty operator map, an empty value set
//!   or a blank/untrimmed value
//! - parsing is deterministic and insensitive to pair order
//! - keys outside the `filter[x][y]` grammar never reach the result

use jsonapi_core::{parse_filter_parameters, Error, FilterOperator};
use proptest::prelude::*;

fn arb_operator_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("EQ".to_string()),
        Just("ST".to_string()),
    ]
}

fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-z0-9]{1,6}",
        " {0,2}[a-z]{1,4} {0,2}",
    ]
}

fn arb_filter_pair() -> impl Strategy<Value = (String, String)> {
    ("[a-z_]{1,8}", arb_operator_name(), arb_value())
        .prop_map(|(attr, op, value)| (format!("filter[{attr}][{op}]"), value))
}

fn arb_unrelated_pair() -> impl Strategy<Value = (String, String)> {
    (
        prop_oneof![
            Just("page[size]".to_string()),
            Just("sort".to_string()),
            Just("include".to_string()),
            Just("filter[name]".to_string()),
            Just("filter[][EQ]".to_string()),
        ],
        "[a-z]{0,4}",
    )
}

proptest! {
    #[test]
    fn parsed_filters_hold_structural_invariants(
        pairs in prop::collection::vec(arb_filter_pair(), 0..24)
    ) {
        let parsed = parse_filter_parameters(pairs.iter().map(|(k, v)| (k, v))).unwrap();

        for (_, operators) in parsed.iter() {
            prop_assert!(!operators.is_empty());
            for values in operators.values() {
                prop_assert!(!values.is_empty());
                for value in values {
                    prop_assert!(!value.is_empty());
                    prop_assert_eq!(value.trim(), value.as_str());
                }
            }
        }
    }

    #[test]
    fn parsing_is_deterministic_and_order_insensitive(
        pairs in prop::collection::vec(arb_filter_pair(), 0..24)
    ) {
        let first = parse_filter_parameters(pairs.iter().map(|(k, v)| (k, v))).unwrap();
        let again = parse_filter_parameters(pairs.iter().map(|(k, v)| (k, v))).unwrap();
        let reversed = parse_filter_parameters(pairs.iter().rev().map(|(k, v)| (k, v))).unwrap();

        prop_assert_eq!(&first, &again);
        prop_assert_eq!(&first, &reversed);
    }

    #[test]
    fn unrelated_keys_never_appear(
        filters in prop::collection::vec(arb_filter_pair(), 0..12),
        noise in prop::collection::vec(arb_unrelated_pair(), 0..12)
    ) {
        let with_noise = parse_filter_parameters(
            filters.iter().chain(noise.iter()).map(|(k, v)| (k, v)),
        )
        .unwrap();
        let without_noise = parse_filter_parameters(filters.iter().map(|(k, v)| (k, v))).unwrap();

        prop_assert_eq!(with_noise, without_noise);
    }

    #[test]
    fn padded_values_equal_trimmed_values(attr in "[a-z]{1,8}", value in "[a-z0-9]{1,8}") {
        let key = format!("filter[{attr}][EQ]");
        let padded = parse_filter_parameters([(key.as_str(), format!("  {value}\t"))]).unwrap();
        let plain = parse_filter_parameters([(key.as_str(), value.clone())]).unwrap();

        prop_assert_eq!(&padded, &plain);
        prop_assert_eq!(
            padded.values(&attr, FilterOperator::Eq).map(|s| s.len()),
            Some(1)
        );
    }

    #[test]
    fn unknown_operator_with_value_fails(
        attr in "[a-z]{1,8}",
        op in "[A-Z]{1,3}".prop_filter("known operator", |op| op != "EQ" && op != "ST"),
        value in "[a-z]{1,4}"
    ) {
        let key = format!("filter[{attr}][{op}]");
        let result = parse_filter_parameters([(key.as_str(), value.as_str())]);
        prop_assert_eq!(
            result,
            Err(Error::InvalidOperator { key: key.clone(), operator: op.clone() })
        );
    }
}

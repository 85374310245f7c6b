use proptest::prelude::*;
use props_core::parse_inlined_properties;

proptest! {
    #[test]
    fn test_parser_never_panics(entries in proptest::collection::vec("\\PC*", 0..8)) {
        // Arbitrary printable strings: must return Ok or a MalformedEntry
        // error, never panic.
        let _ = parse_inlined_properties(&entries);
    }

    #[test]
    fn test_last_one_wins_and_order_is_first_seen(
        pairs in proptest::collection::vec(("[a-e]{1,2}", "[A-Za-z0-9]{0,6}"), 1..20)
    ) {
        let entries: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        let map = parse_inlined_properties(&entries).unwrap();

        // Expected: first-seen key order, last value per key.
        let mut expected: Vec<(String, String)> = Vec::new();
        for (key, value) in &pairs {
            match expected.iter_mut().find(|(k, _)| k == key) {
                Some((_, v)) => *v = value.clone(),
                None => expected.push((key.clone(), value.clone())),
            }
        }

        let actual: Vec<(String, String)> = map
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}

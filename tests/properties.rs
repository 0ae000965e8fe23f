//! Property tests for the map/filter/fold laws, on both layers.

use proptest::prelude::*;

use rust_sequence_processing::engine;
use rust_sequence_processing::operand::Operand;
use rust_sequence_processing::processing::{filter, filter_in_place, fold, map, map_in_place};
use rust_sequence_processing::signature::Function;
use rust_sequence_processing::types::{Sequence, Value};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_ints() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_i64..1_000, 0..64)
}

fn arb_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{0,6}", 0..32)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn map_preserves_length_and_input(items in arb_ints()) {
        let before = items.clone();
        let out = map(&items, |x| x.to_string());
        prop_assert_eq!(out.len(), items.len());
        prop_assert_eq!(items, before);
    }

    #[test]
    fn engine_transform_preserves_length_and_input(items in arb_words()) {
        let seq = Operand::from(Sequence::from_vec(items.clone()));
        let len = Operand::from(Function::unary(|s: String| s.len() as i64));
        let out = engine::transform(&seq, &len).unwrap();
        prop_assert_eq!(out.len(), items.len());
        prop_assert_eq!(seq.as_sequence().unwrap().to_vec::<String>().unwrap(), items);
    }

    #[test]
    fn in_place_map_round_trips_through_inverse(items in arb_ints(), k in -50_i64..50) {
        let mut v = items.clone();
        map_in_place(&mut v, |x| x + k);
        map_in_place(&mut v, |x| x - k);
        prop_assert_eq!(&v, &items);

        let mut seq = Operand::from(Sequence::from_vec(items.clone()));
        let add = Operand::from(Function::unary(move |x: i64| x + k));
        let sub = Operand::from(Function::unary(move |x: i64| x - k));
        engine::transform_in_place(&mut seq, &add).unwrap();
        engine::transform_in_place(&mut seq, &sub).unwrap();
        prop_assert_eq!(seq.as_sequence().unwrap().to_vec::<i64>().unwrap(), items);
    }

    #[test]
    fn filter_length_matches_count_and_keeps_order(items in arb_ints(), m in 2_i64..7) {
        let keep = |x: &i64| x.rem_euclid(m) == 0;
        let out = filter(&items, keep);
        prop_assert_eq!(out.len(), items.iter().filter(|x| keep(*x)).count());

        // Kept elements appear as a subsequence of the input.
        let mut rest = items.iter();
        for kept in &out {
            prop_assert!(rest.any(|x| x == kept));
        }
    }

    #[test]
    fn filter_is_idempotent(items in arb_ints()) {
        let once = filter(&items, |x| *x > 0);
        let twice = filter(&once, |x| *x > 0);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn copy_and_in_place_filters_agree(items in arb_words()) {
        let copied = filter(&items, |s| s.len() % 2 == 0);
        let mut in_place = items.clone();
        filter_in_place(&mut in_place, |s| s.len() % 2 == 0);
        prop_assert_eq!(&copied, &in_place);

        let mut seq = Operand::from(Sequence::from_vec(items));
        let even_len = Operand::from(Function::unary(|s: String| s.len() % 2 == 0));
        engine::filter_in_place(&mut seq, &even_len).unwrap();
        prop_assert_eq!(seq.as_sequence().unwrap().to_vec::<String>().unwrap(), copied);
    }

    #[test]
    fn fold_matches_iterator_sum(items in arb_ints()) {
        let expected: i64 = items.iter().sum();
        prop_assert_eq!(fold(&items, |a, b| a + b, 0), expected);

        let seq = Operand::from(Sequence::from_vec(items));
        let add = Operand::from(Function::binary(|a: i64, b: i64| a + b));
        prop_assert_eq!(engine::fold(&seq, &add, Value::Int64(0)).unwrap(), Value::Int64(expected));
    }

    #[test]
    fn fold_of_singleton_ignores_zero_and_combiner(x in any::<i64>(), zero in any::<i64>()) {
        prop_assert_eq!(fold(&[x], |_, _| zero, zero), x);
    }

    #[test]
    fn fold_concatenation_is_left_to_right(items in arb_words()) {
        let out = fold(&items, |a, b| format!("{a}{b}"), String::new());
        prop_assert_eq!(out, items.concat());
    }
}

#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn prize(id: &str, probability: f64) -> PrizeEntry {
    PrizeEntry { id: id.into(), name: format!("prize {id}"), probability, color: None, image: None }
}

fn reference_table() -> Vec<PrizeEntry> {
    vec![prize("a", 0.1), prize("b", 0.4), prize("c", 0.05), prize("d", 0.4), prize("e", 0.03), prize("f", 0.02)]
}

// =============================================================
// pick_index
// =============================================================

#[test]
fn pick_index_empty_table_is_none() {
    assert_eq!(pick_index(&[], 0.5), None);
}

#[test]
fn pick_index_walks_cumulative_sum() {
    let table = reference_table();
    assert_eq!(pick_index(&table, 0.0), Some(0));
    assert_eq!(pick_index(&table, 0.05), Some(0));
    assert_eq!(pick_index(&table, 0.1), Some(0));
    assert_eq!(pick_index(&table, 0.10001), Some(1));
    assert_eq!(pick_index(&table, 0.52), Some(2));
    assert_eq!(pick_index(&table, 0.9), Some(3));
    assert_eq!(pick_index(&table, 0.97), Some(4));
    assert_eq!(pick_index(&table, 0.999), Some(5));
}

#[test]
fn pick_index_falls_back_to_last_entry_when_sum_is_short() {
    let table = vec![prize("a", 0.2), prize("b", 0.3)];
    assert_eq!(pick_index(&table, 0.9), Some(1));
}

#[test]
fn pick_index_fallback_ignores_last_entry_weight() {
    let table = vec![prize("a", 0.2), prize("b", 0.0)];
    assert_eq!(pick_index(&table, 0.5), Some(1));
}

#[test]
fn pick_index_skips_zero_weight_entries() {
    let table = vec![prize("zero", 0.0), prize("a", 0.5), prize("b", 0.5)];
    assert_eq!(pick_index(&table, 0.0), Some(1));
}

#[test]
fn pick_index_treats_nan_and_negative_as_zero() {
    let table = vec![prize("nan", f64::NAN), prize("neg", -0.5), prize("a", 1.0)];
    assert_eq!(pick_index(&table, 0.3), Some(2));
}

#[test]
fn pick_index_caps_weights_at_one() {
    let table = vec![prize("big", 7.0), prize("b", 0.5)];
    assert_eq!(pick_index(&table, 0.99), Some(0));
}

// =============================================================
// select_outcome
// =============================================================

#[test]
fn select_outcome_empty_table_is_none() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(select_outcome(&[], &mut rng).is_none());
}

#[test]
fn select_outcome_returns_matching_index_and_entry() {
    let table = reference_table();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..100 {
        let (index, entry) = select_outcome(&table, &mut rng).unwrap();
        assert_eq!(&table[index], entry);
    }
}

#[test]
fn select_outcome_converges_to_declared_probabilities() {
    const TRIALS: usize = 100_000;
    let table = reference_table();
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut counts = [0usize; 6];
    for _ in 0..TRIALS {
        let (index, _) = select_outcome(&table, &mut rng).unwrap();
        counts[index] += 1;
    }
    for (entry, count) in table.iter().zip(counts) {
        #[allow(clippy::cast_precision_loss)]
        let freq = count as f64 / TRIALS as f64;
        assert!(
            (freq - entry.probability).abs() < 0.01,
            "prize {} drew {freq:.4}, declared {}",
            entry.id,
            entry.probability
        );
    }
}

#[test]
fn select_outcome_single_entry_always_wins() {
    let table = vec![prize("only", 0.01)];
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        assert_eq!(select_outcome(&table, &mut rng).unwrap().0, 0);
    }
}

// =============================================================
// audit
// =============================================================

#[test]
fn audit_clean_table_has_no_warnings() {
    assert!(audit(&reference_table()).is_empty());
}

#[test]
fn audit_flags_empty_table() {
    assert_eq!(audit(&[]), vec![TableWarning::Empty]);
}

#[test]
fn audit_flags_short_sum() {
    let warnings = audit(&[prize("a", 0.2), prize("b", 0.3)]);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], TableWarning::SumMismatch { sum } if (sum - 0.5).abs() < 1e-12));
}

#[test]
fn audit_flags_out_of_range_and_duplicates() {
    let warnings = audit(&[prize("a", 1.5), prize("a", -0.5)]);
    assert!(warnings.contains(&TableWarning::OutOfRange { id: "a".into(), probability: 1.5 }));
    assert!(warnings.contains(&TableWarning::OutOfRange { id: "a".into(), probability: -0.5 }));
    assert!(warnings.contains(&TableWarning::DuplicateId("a".into())));
}

#[test]
fn audit_tolerates_float_rounding() {
    let table = vec![prize("a", 0.1), prize("b", 0.2), prize("c", 0.7)];
    assert!(audit(&table).is_empty());
}

#[test]
fn warning_messages_are_readable() {
    assert_eq!(TableWarning::Empty.to_string(), "prize table has no entries");
    assert_eq!(TableWarning::DuplicateId("x".into()).to_string(), "prize id x appears more than once");
}

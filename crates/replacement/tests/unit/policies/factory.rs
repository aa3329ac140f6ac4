//! Factory and Selector Tests.
//!
//! Verifies name-based policy construction, configuration-error reporting,
//! and the serde/`FromStr` surface of the policy selector.

use core::str::FromStr;

use waysim_replacement::{CachePolicy, ErrorKind, PolicyKind, ReplacementError};

// ══════════════════════════════════════════════════════════
// 1. Name-based construction
// ══════════════════════════════════════════════════════════

#[test]
fn create_lru_by_name() {
    let policy = CachePolicy::create("LRU", 4).expect("LRU should construct");
    assert_eq!(policy.kind(), PolicyKind::Lru);
    assert_eq!(policy.get_ways(), 4);
}

#[test]
fn create_pseudo_lru_by_name() {
    let policy = CachePolicy::create("Pseudo-LRU", 4).expect("Pseudo-LRU should construct");
    assert_eq!(policy.kind(), PolicyKind::PseudoLru);
    assert_eq!(policy.get_ways(), 4);
}

/// Unknown names are configuration errors and the diagnostic enumerates the
/// supported policies.
#[test]
fn create_unknown_name_lists_supported_policies() {
    let err = CachePolicy::create("bogus", 4).expect_err("unknown name must fail");
    assert_eq!(err, ReplacementError::UnknownPolicy("bogus".to_owned()));
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let message = err.to_string();
    assert!(message.contains("bogus"), "diagnostic names the bad input");
    assert!(message.contains("LRU"), "diagnostic lists LRU");
    assert!(message.contains("Pseudo-LRU"), "diagnostic lists Pseudo-LRU");
}

/// Name matching is exact and case-sensitive.
#[test]
fn create_rejects_case_variants() {
    assert!(CachePolicy::create("lru", 4).is_err());
    assert!(CachePolicy::create("pseudo-lru", 4).is_err());
    assert!(CachePolicy::create("PLRU", 4).is_err());
}

/// `ways == 0` is always a construction error, regardless of policy.
#[test]
fn zero_ways_is_rejected_for_every_policy() {
    for kind in [PolicyKind::Lru, PolicyKind::PseudoLru] {
        let err = CachePolicy::new(kind, 0).expect_err("zero ways must fail");
        assert_eq!(err, ReplacementError::ZeroWays);
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}

// ══════════════════════════════════════════════════════════
// 2. Capacity invariant
// ══════════════════════════════════════════════════════════

/// `get_ways()` returns the constructed way count for the policy's lifetime,
/// across operations that reshuffle internal state.
#[rstest::rstest]
#[case(PolicyKind::Lru, 1)]
#[case(PolicyKind::Lru, 3)]
#[case(PolicyKind::Lru, 8)]
#[case(PolicyKind::PseudoLru, 1)]
#[case(PolicyKind::PseudoLru, 4)]
#[case(PolicyKind::PseudoLru, 16)]
fn get_ways_is_stable(#[case] kind: PolicyKind, #[case] ways: usize) {
    let mut policy = CachePolicy::new(kind, ways).expect("construction should succeed");
    assert_eq!(policy.get_ways(), ways);
    for _ in 0..(2 * ways) {
        let victim = policy.update();
        assert!(victim < ways, "victim {victim} out of range");
        policy.touch(victim).expect("victim is always tracked");
    }
    assert_eq!(policy.get_ways(), ways);
}

// ══════════════════════════════════════════════════════════
// 3. Selector parsing
// ══════════════════════════════════════════════════════════

#[test]
fn selector_parses_canonical_names() {
    assert_eq!(PolicyKind::from_str("LRU"), Ok(PolicyKind::Lru));
    assert_eq!(PolicyKind::from_str("Pseudo-LRU"), Ok(PolicyKind::PseudoLru));
    assert!(PolicyKind::from_str("FIFO").is_err());
}

/// `Display` emits the canonical name accepted by the factory.
#[test]
fn selector_display_round_trips() {
    for kind in [PolicyKind::Lru, PolicyKind::PseudoLru] {
        assert_eq!(PolicyKind::from_str(&kind.to_string()), Ok(kind));
    }
}

/// The selector deserializes from config fragments under its canonical names.
#[test]
fn selector_deserializes_from_json() {
    let lru: PolicyKind = serde_json::from_str("\"LRU\"").expect("LRU deserializes");
    assert_eq!(lru, PolicyKind::Lru);

    let plru: PolicyKind = serde_json::from_str("\"Pseudo-LRU\"").expect("Pseudo-LRU deserializes");
    assert_eq!(plru, PolicyKind::PseudoLru);

    assert!(serde_json::from_str::<PolicyKind>("\"Random\"").is_err());
}

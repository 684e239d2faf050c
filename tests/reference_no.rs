use std::collections::HashSet;
use wallet_ledger::domain::reference::{new_reference_no, QRIS_PREFIX, TOPUP_PREFIX};

#[test]
fn burst_of_references_never_collides() {
    // The reference doubles as the idempotency key, so same-user bursts
    // within one clock tick must still be unique.
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        assert!(seen.insert(new_reference_no(TOPUP_PREFIX)));
    }
}

#[test]
fn references_carry_their_flow_prefix() {
    assert!(new_reference_no(TOPUP_PREFIX).starts_with("TOP-"));
    assert!(new_reference_no(QRIS_PREFIX).starts_with("QRP-"));
}

#[test]
fn reference_length_is_stable() {
    let a = new_reference_no(TOPUP_PREFIX);
    let b = new_reference_no(TOPUP_PREFIX);
    assert_eq!(a.len(), b.len());
}

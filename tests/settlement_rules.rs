use rust_decimal_macros::dec;
use wallet_ledger::domain::transaction::TransactionStatus;
use wallet_ledger::service::settlement::{
    amount_within_tolerance, decide, SettlementDecision,
};

#[test]
fn pending_with_exact_amount_settles() {
    let out = decide(TransactionStatus::Pending, dec!(100000), dec!(100000.00));
    assert_eq!(out, SettlementDecision::Apply);
}

#[test]
fn processing_settles_like_pending() {
    let out = decide(TransactionStatus::Processing, dec!(100000), dec!(100000));
    assert_eq!(out, SettlementDecision::Apply);
}

#[test]
fn second_settlement_is_a_no_op() {
    // Duplicate webhook delivery or a webhook/poll race: the loser sees the
    // already-successful row and must not mutate anything.
    let out = decide(TransactionStatus::Success, dec!(100000), dec!(100000));
    assert_eq!(out, SettlementDecision::AlreadySettled);
}

#[test]
fn failed_transaction_never_settles() {
    let out = decide(TransactionStatus::Failed, dec!(100000), dec!(100000));
    assert_eq!(out, SettlementDecision::InvalidState);
}

#[test]
fn rounding_noise_within_tolerance_is_absorbed() {
    assert!(amount_within_tolerance(dec!(100000), dec!(100000.01)));
    assert!(amount_within_tolerance(dec!(100000), dec!(99999.99)));
    let out = decide(TransactionStatus::Pending, dec!(100000), dec!(100000.01));
    assert_eq!(out, SettlementDecision::Apply);
}

#[test]
fn underpayment_beyond_tolerance_is_flagged() {
    // 99999.50 against an expected 100000: off by 0.50, stays pending.
    assert!(!amount_within_tolerance(dec!(100000), dec!(99999.50)));
    let out = decide(TransactionStatus::Pending, dec!(100000), dec!(99999.50));
    assert_eq!(out, SettlementDecision::AmountMismatch);
}

#[test]
fn overpayment_beyond_tolerance_is_flagged() {
    let out = decide(TransactionStatus::Pending, dec!(100000), dec!(100000.02));
    assert_eq!(out, SettlementDecision::AmountMismatch);
}

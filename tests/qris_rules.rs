use rust_decimal_macros::dec;
use wallet_ledger::gateways::DecodedQr;
use wallet_ledger::service::qris_service::has_sufficient_balance;

#[test]
fn total_amount_includes_fee() {
    let decoded = DecodedQr {
        merchant_name: "WARUNG SEBELAH".to_string(),
        amount: dec!(25000),
        fee_amount: dec!(500),
        reference_no: "qr_ref_1".to_string(),
        initiation_method: "MPM".to_string(),
    };
    assert_eq!(decoded.total_amount(), dec!(25500));
}

#[test]
fn payment_over_balance_is_insufficient() {
    // Balance 50000 against a 70000 total: rejected before any gateway call.
    assert!(!has_sufficient_balance(dec!(50000), dec!(70000)));
}

#[test]
fn payment_equal_to_balance_is_allowed() {
    assert!(has_sufficient_balance(dec!(70000), dec!(70000)));
    assert!(has_sufficient_balance(dec!(70000.01), dec!(70000)));
}

#[test]
fn empty_wallet_covers_nothing() {
    assert!(!has_sufficient_balance(dec!(0), dec!(0.01)));
    assert!(has_sufficient_balance(dec!(0), dec!(0)));
}

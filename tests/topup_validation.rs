use rust_decimal_macros::dec;
use wallet_ledger::domain::transaction::CreateTopUpRequest;
use wallet_ledger::service::topup_service::{validate_topup, SUPPORTED_BANKS};

#[test]
fn accepts_supported_bank_and_positive_amount() {
    let req = CreateTopUpRequest {
        amount: dec!(100000),
        bank: "bca".to_string(),
    };
    assert!(validate_topup(&req).is_ok());
}

#[test]
fn bank_check_is_case_insensitive() {
    let req = CreateTopUpRequest {
        amount: dec!(50000),
        bank: "Mandiri".to_string(),
    };
    assert!(validate_topup(&req).is_ok());
}

#[test]
fn rejects_zero_and_negative_amounts() {
    for amount in [dec!(0), dec!(-1)] {
        let req = CreateTopUpRequest {
            amount,
            bank: "bca".to_string(),
        };
        let (status, body) = validate_topup(&req).unwrap_err();
        assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(body.error.code, "INVALID_AMOUNT");
    }
}

#[test]
fn rejects_bank_outside_allow_list() {
    let req = CreateTopUpRequest {
        amount: dec!(100000),
        bank: "monopoly_bank".to_string(),
    };
    let (_, body) = validate_topup(&req).unwrap_err();
    assert_eq!(body.error.code, "UNSUPPORTED_BANK");
}

#[test]
fn allow_list_is_lowercase() {
    for bank in SUPPORTED_BANKS {
        assert_eq!(*bank, bank.to_lowercase());
    }
}

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use wallet_ledger::http::handlers::webhook::{
    ack_envelope, timestamp_is_fresh, validate_notification, PaymentNotification, SnapAmount,
};

fn notification() -> PaymentNotification {
    PaymentNotification {
        partner_service_id: "88081".to_string(),
        customer_no: "00000912".to_string(),
        virtual_account_no: "8808100000000912".to_string(),
        trx_id: "TOP-0190f5a2c3d84f6e9b2a7c1e5d3f8a01".to_string(),
        paid_amount: Some(SnapAmount {
            value: "100000.00".to_string(),
            currency: "IDR".to_string(),
        }),
        trx_date_time: Utc::now().to_rfc3339(),
        additional_info: serde_json::json!({ "channel": "VIRTUAL_ACCOUNT_BCA" }),
    }
}

#[test]
fn valid_notification_yields_parsed_amount() {
    let amount = validate_notification(&notification(), "88081").unwrap();
    assert_eq!(amount, dec!(100000.00));
}

#[test]
fn partner_mismatch_is_unauthorized() {
    let err = validate_notification(&notification(), "99999").unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.response_code, "4012500");
}

#[test]
fn missing_reference_is_rejected() {
    let mut n = notification();
    n.trx_id = String::new();
    let err = validate_notification(&n, "88081").unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.response_code, "4002502");
}

#[test]
fn missing_paid_amount_is_rejected() {
    let mut n = notification();
    n.paid_amount = None;
    let err = validate_notification(&n, "88081").unwrap_err();
    assert_eq!(err.response_code, "4002502");
}

#[test]
fn malformed_amount_is_rejected() {
    let mut n = notification();
    n.paid_amount = Some(SnapAmount {
        value: "seratus ribu".to_string(),
        currency: "IDR".to_string(),
    });
    let err = validate_notification(&n, "88081").unwrap_err();
    assert_eq!(err.response_code, "4002501");
}

#[test]
fn partner_ids_are_compared_trimmed() {
    // SNAP pads partnerServiceId with leading spaces to eight chars.
    let mut n = notification();
    n.partner_service_id = "   88081".to_string();
    assert!(validate_notification(&n, "88081").is_ok());
}

#[test]
fn ack_echoes_account_fields() {
    let n = notification();
    let ack = ack_envelope(&n);
    assert_eq!(ack["responseCode"], "2002500");
    assert_eq!(ack["virtualAccountData"]["trxId"], n.trx_id.as_str());
    assert_eq!(
        ack["virtualAccountData"]["virtualAccountNo"],
        n.virtual_account_no.as_str()
    );
    assert_eq!(ack["virtualAccountData"]["paidAmount"]["value"], "100000.00");
}

#[test]
fn freshness_window_is_symmetric() {
    let now = Utc::now();
    let skew = Duration::seconds(300);

    let recent = (now - Duration::seconds(60)).to_rfc3339();
    assert!(timestamp_is_fresh(&recent, now, skew));

    let slightly_ahead = (now + Duration::seconds(60)).to_rfc3339();
    assert!(timestamp_is_fresh(&slightly_ahead, now, skew));

    let stale = (now - Duration::seconds(3600)).to_rfc3339();
    assert!(!timestamp_is_fresh(&stale, now, skew));
}

#[test]
fn unparseable_timestamp_counts_as_stale() {
    assert!(!timestamp_is_fresh("yesterday-ish", Utc::now(), Duration::seconds(300)));
}

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use wallet_ledger::gateways::mock::MockGateway;
use wallet_ledger::gateways::{
    AccountHolder, CreateVaRequest, PayQrRequest, PaymentGateway, VaStatusRequest,
};

fn va_request() -> CreateVaRequest {
    CreateVaRequest {
        holder: AccountHolder {
            name: "Test User".to_string(),
            email: "test@example.test".to_string(),
            phone_number: "+620000000001".to_string(),
        },
        amount: dec!(100000),
        reference_no: "TOP-test".to_string(),
        bank_channel: "bca".to_string(),
        expires_at: Utc::now() + Duration::hours(24),
    }
}

#[tokio::test]
async fn successful_va_creation_returns_channel_and_expiry() {
    let gateway = MockGateway::new("ALWAYS_SUCCESS");
    let va = gateway.create_virtual_account(va_request()).await.unwrap();
    assert_eq!(va.bank_name, "BCA");
    assert!(!va.va_number.is_empty());
    assert!(va.payment_guide_url.contains("TOP-test"));
}

#[tokio::test]
async fn failure_behavior_aborts_every_call() {
    let gateway = MockGateway::new("ALWAYS_FAILURE");
    assert!(gateway.create_virtual_account(va_request()).await.is_err());
    assert!(gateway.decode_qr("00020101").await.is_err());
    assert!(gateway
        .pay_qr(PayQrRequest {
            payload: "00020101".to_string(),
            amount: dec!(25000),
            fee_amount: dec!(500),
            auth_code: None,
        })
        .await
        .is_err());
}

#[tokio::test]
async fn decoded_qr_total_is_amount_plus_fee() {
    let gateway = MockGateway::new("ALWAYS_SUCCESS");
    let decoded = gateway.decode_qr("00020101").await.unwrap();
    assert_eq!(decoded.total_amount(), decoded.amount + decoded.fee_amount);
}

#[tokio::test]
async fn va_status_follows_behavior() {
    let request = VaStatusRequest {
        va_number: "8808100000000912".to_string(),
        customer_no: "00000912".to_string(),
        partner_service_id: "88081".to_string(),
        reference_no: "TOP-test".to_string(),
    };

    let unpaid = MockGateway::new("VA_UNPAID")
        .check_va_status(request.clone())
        .await
        .unwrap();
    assert!(!unpaid.paid);
    assert!(unpaid.paid_amount.is_none());

    let paid = MockGateway::new("VA_PAID")
        .check_va_status(request)
        .await
        .unwrap();
    assert!(paid.paid);
    assert_eq!(paid.paid_amount, Some(dec!(100000)));
}

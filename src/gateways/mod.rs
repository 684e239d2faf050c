use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod mock;
pub mod snap;

/// Holder details registered against a virtual account.
#[derive(Debug, Clone)]
pub struct AccountHolder {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct CreateVaRequest {
    pub holder: AccountHolder,
    pub amount: Decimal,
    pub reference_no: String,
    pub bank_channel: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualAccount {
    pub va_number: String,
    pub bank_name: String,
    pub expires_at: DateTime<Utc>,
    pub payment_guide_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedQr {
    pub merchant_name: String,
    pub amount: Decimal,
    pub fee_amount: Decimal,
    pub reference_no: String,
    pub initiation_method: String,
}

impl DecodedQr {
    /// Amount the payer's wallet is debited: principal plus fee.
    pub fn total_amount(&self) -> Decimal {
        self.amount + self.fee_amount
    }
}

#[derive(Debug, Clone)]
pub struct PayQrRequest {
    pub payload: String,
    pub amount: Decimal,
    pub fee_amount: Decimal,
    pub auth_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrPaymentReceipt {
    pub gateway_reference_no: String,
    pub transaction_date: DateTime<Utc>,
    pub acquirer_name: String,
}

#[derive(Debug, Clone)]
pub struct VaStatusRequest {
    pub va_number: String,
    pub customer_no: String,
    pub partner_service_id: String,
    pub reference_no: String,
}

#[derive(Debug, Clone)]
pub struct VaStatus {
    pub paid: bool,
    pub paid_amount: Option<Decimal>,
}

/// Synchronous third-party payment rail. All four calls are single HTTPS
/// round-trips with no built-in retry; failures surface as opaque errors and
/// the caller decides whether to re-initiate. `pay_qr` in particular must
/// never be retried blindly, it is not idempotent on the external side.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_virtual_account(&self, request: CreateVaRequest) -> Result<VirtualAccount>;

    async fn decode_qr(&self, payload: &str) -> Result<DecodedQr>;

    async fn pay_qr(&self, request: PayQrRequest) -> Result<QrPaymentReceipt>;

    async fn check_va_status(&self, request: VaStatusRequest) -> Result<VaStatus>;
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Topup,
    QrisPayment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Topup => "topup",
            TransactionType::QrisPayment => "qris_payment",
        }
    }

    pub fn parse(s: &str) -> TransactionType {
        match s {
            "qris_payment" => TransactionType::QrisPayment,
            _ => TransactionType::Topup,
        }
    }
}

/// Lifecycle: `pending -> success` or `pending -> failed`, both terminal.
/// `processing` is a pre-terminal state a gateway may report; it settles the
/// same way `pending` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Processing => "processing",
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> TransactionStatus {
        match s {
            "success" => TransactionStatus::Success,
            "processing" => TransactionStatus::Processing,
            "failed" => TransactionStatus::Failed,
            _ => TransactionStatus::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Success | TransactionStatus::Failed)
    }
}

/// Ledger row as exposed to clients. `amount` is signed: positive credits,
/// negative debits. Fixed at creation, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct WalletTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub reference_no: String,
    pub payment_method: String,
    pub status: TransactionStatus,
    pub bank_account: Option<String>,
    pub bank_name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTopUpRequest {
    pub amount: Decimal,
    pub bank: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopUpResponse {
    pub reference_no: String,
    pub va_number: String,
    pub bank_name: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub expires_at: DateTime<Utc>,
    pub payment_guide_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionStatusResponse {
    pub reference_no: String,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub amount: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QrisDecodeRequest {
    pub payload: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QrisDecodeResponse {
    pub merchant_name: String,
    pub amount: Decimal,
    pub fee_amount: Decimal,
    pub total_amount: Decimal,
    pub reference_no: String,
    pub initiation_method: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QrisPayRequest {
    pub payload: String,
    pub auth_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QrisPayResponse {
    pub reference_no: String,
    pub gateway_reference_no: String,
    pub merchant_name: String,
    pub total_amount: Decimal,
    pub status: TransactionStatus,
    pub balance_after: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

pub fn error_response(
    status: axum::http::StatusCode,
    code: &str,
    message: &str,
) -> (axum::http::StatusCode, ErrorEnvelope) {
    (
        status,
        ErrorEnvelope {
            error: ErrorPayload {
                code: code.to_string(),
                message: message.to_string(),
                details: None,
            },
        },
    )
}

pub fn internal_error(e: anyhow::Error) -> (axum::http::StatusCode, ErrorEnvelope) {
    error_response(
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        &e.to_string(),
    )
}

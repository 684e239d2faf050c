use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Knobs for inbound notification handling. Staleness rejection is
/// configurable: the gateway's clocks skew in practice, so the default is to
/// log stale timestamps and settle anyway.
#[derive(Clone)]
pub struct WebhookSettings {
    pub expected_partner_service_id: String,
    pub max_skew_secs: i64,
    pub reject_stale: bool,
}

/// SNAP-shaped payment notification. `trx_id` carries the reference number
/// the settlement engine keys on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotification {
    #[serde(default)]
    pub partner_service_id: String,
    #[serde(default)]
    pub customer_no: String,
    #[serde(default)]
    pub virtual_account_no: String,
    #[serde(default)]
    pub trx_id: String,
    pub paid_amount: Option<SnapAmount>,
    #[serde(default)]
    pub trx_date_time: String,
    #[serde(default)]
    pub additional_info: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapAmount {
    pub value: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationReject {
    pub status: StatusCode,
    pub response_code: &'static str,
    pub response_message: &'static str,
}

/// Basic validation: required fields present, partner identifier matches, and
/// the paid amount parses as a decimal. Returns the parsed amount.
pub fn validate_notification(
    n: &PaymentNotification,
    expected_partner_service_id: &str,
) -> Result<Decimal, NotificationReject> {
    let Some(paid) = &n.paid_amount else {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "4002502",
            "Invalid Mandatory Field paidAmount",
        ));
    };
    if n.trx_id.is_empty() || n.virtual_account_no.is_empty() || n.trx_date_time.is_empty() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "4002502",
            "Invalid Mandatory Field",
        ));
    }
    if n.partner_service_id.trim() != expected_partner_service_id.trim() {
        return Err(reject(StatusCode::UNAUTHORIZED, "4012500", "Unauthorized"));
    }

    paid.value.parse::<Decimal>().map_err(|_| {
        reject(
            StatusCode::BAD_REQUEST,
            "4002501",
            "Invalid Field Format paidAmount.value",
        )
    })
}

/// An unparseable timestamp counts as stale; the caller decides whether
/// stale means reject or just a warning.
pub fn timestamp_is_fresh(raw: &str, now: DateTime<Utc>, max_skew: Duration) -> bool {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => (now - ts.with_timezone(&Utc)).abs() <= max_skew,
        Err(_) => false,
    }
}

/// Success-shaped acknowledgement echoing the notification's account fields.
/// The gateway keeps redelivering until it sees this envelope, so it is sent
/// regardless of the internal settlement outcome.
pub fn ack_envelope(n: &PaymentNotification) -> Value {
    json!({
        "responseCode": "2002500",
        "responseMessage": "Successful",
        "virtualAccountData": {
            "partnerServiceId": n.partner_service_id,
            "customerNo": n.customer_no,
            "virtualAccountNo": n.virtual_account_no,
            "trxId": n.trx_id,
            "paidAmount": n.paid_amount,
        }
    })
}

pub fn reject_envelope(r: &NotificationReject) -> Value {
    json!({
        "responseCode": r.response_code,
        "responseMessage": r.response_message,
    })
}

pub async fn va_payment(
    State(state): State<AppState>,
    Json(notification): Json<PaymentNotification>,
) -> Response {
    let paid_amount =
        match validate_notification(&notification, &state.webhook.expected_partner_service_id) {
            Ok(amount) => amount,
            Err(r) => {
                tracing::warn!(
                    trx_id = %notification.trx_id,
                    code = r.response_code,
                    "rejected payment notification"
                );
                return (r.status, Json(reject_envelope(&r))).into_response();
            }
        };

    let fresh = timestamp_is_fresh(
        &notification.trx_date_time,
        Utc::now(),
        Duration::seconds(state.webhook.max_skew_secs),
    );
    if !fresh {
        if state.webhook.reject_stale {
            let r = reject(
                StatusCode::BAD_REQUEST,
                "4002501",
                "Invalid Field Format trxDateTime",
            );
            tracing::warn!(
                trx_id = %notification.trx_id,
                trx_date_time = %notification.trx_date_time,
                "rejected stale payment notification"
            );
            return (r.status, Json(reject_envelope(&r))).into_response();
        }
        tracing::warn!(
            trx_id = %notification.trx_id,
            trx_date_time = %notification.trx_date_time,
            "stale notification timestamp, settling anyway"
        );
    }

    // The ack below goes out no matter what happens here; logs are the only
    // place that distinguishes "accepted" from "settled".
    match state.settlement.settle(&notification.trx_id, paid_amount).await {
        Ok(outcome) => {
            tracing::info!(trx_id = %notification.trx_id, ?outcome, "payment notification processed");
        }
        Err(e) => {
            tracing::error!(
                trx_id = %notification.trx_id,
                error = %e,
                "settlement errored, transaction left pending for gateway retry or poll"
            );
        }
    }

    (StatusCode::OK, Json(ack_envelope(&notification))).into_response()
}

fn reject(
    status: StatusCode,
    response_code: &'static str,
    response_message: &'static str,
) -> NotificationReject {
    NotificationReject {
        status,
        response_code,
        response_message,
    }
}

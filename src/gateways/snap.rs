use crate::gateways::{
    CreateVaRequest, DecodedQr, PayQrRequest, PaymentGateway, QrPaymentReceipt, VaStatus,
    VaStatusRequest, VirtualAccount,
};
use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};

/// Adapter for a SNAP-style virtual-account/QRIS provider. Every call is one
/// HTTPS round-trip with a hard timeout and no retry; a non-2xx answer or a
/// malformed body surfaces as an opaque error for the caller to handle.
pub struct SnapGateway {
    pub base_url: String,
    pub partner_id: String,
    pub channel_id: String,
    pub client_secret: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl SnapGateway {
    async fn post(&self, path: &str, external_id: &str, body: Value) -> Result<Value> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("Content-Type", "application/json")
            .header("X-PARTNER-ID", &self.partner_id)
            .header("CHANNEL-ID", &self.channel_id)
            .header("X-EXTERNAL-ID", external_id)
            .bearer_auth(&self.client_secret)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!(
                "gateway returned HTTP {} on {}: {}",
                status.as_u16(),
                path,
                body.chars().take(200).collect::<String>()
            );
        }

        Ok(resp.json().await?)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for SnapGateway {
    fn name(&self) -> &'static str {
        "snap"
    }

    async fn create_virtual_account(&self, request: CreateVaRequest) -> Result<VirtualAccount> {
        let body = json!({
            "partnerServiceId": self.partner_id,
            "trxId": request.reference_no,
            "virtualAccountName": request.holder.name,
            "virtualAccountEmail": request.holder.email,
            "virtualAccountPhone": request.holder.phone_number,
            "totalAmount": snap_amount(request.amount),
            "expiredDate": request.expires_at.to_rfc3339(),
            "additionalInfo": { "bankCd": request.bank_channel.to_uppercase() }
        });

        let v = self
            .post("/v1.0/transfer-va/create-va", &request.reference_no, body)
            .await?;
        let data = object_field(&v, "virtualAccountData")?;

        Ok(VirtualAccount {
            va_number: str_field(data, "virtualAccountNo")?.trim().to_string(),
            bank_name: request.bank_channel.to_uppercase(),
            expires_at: date_field(data, "expiredDate").unwrap_or(request.expires_at),
            payment_guide_url: str_field(data, "howToPayPage").unwrap_or_else(|_| {
                format!("{}/how-to-pay/{}", self.base_url, request.reference_no)
            }),
        })
    }

    async fn decode_qr(&self, payload: &str) -> Result<DecodedQr> {
        let external_id = uuid::Uuid::new_v4().simple().to_string();
        let v = self
            .post(
                "/v1.0/qr/qr-mpm-decode",
                &external_id,
                json!({ "qrContent": payload }),
            )
            .await?;
        let data = object_field(&v, "transactionData")?;

        Ok(DecodedQr {
            merchant_name: str_field(data, "merchantName")?,
            amount: amount_field(data, "amount")?,
            fee_amount: amount_field(data, "feeAmount").unwrap_or(Decimal::ZERO),
            reference_no: str_field(data, "referenceNo")?,
            initiation_method: str_field(data, "initiationMethod")
                .unwrap_or_else(|_| "MPM".to_string()),
        })
    }

    async fn pay_qr(&self, request: PayQrRequest) -> Result<QrPaymentReceipt> {
        let external_id = uuid::Uuid::new_v4().simple().to_string();
        let body = json!({
            "qrContent": request.payload,
            "amount": snap_amount(request.amount),
            "feeAmount": snap_amount(request.fee_amount),
            "authCode": request.auth_code,
        });

        let v = self.post("/v1.0/qr/qr-mpm-payment", &external_id, body).await?;
        let data = object_field(&v, "transactionData")?;

        Ok(QrPaymentReceipt {
            gateway_reference_no: str_field(data, "referenceNo")?,
            transaction_date: date_field(data, "transactionDate").unwrap_or_else(|_| Utc::now()),
            acquirer_name: str_field(data, "acquirerName").unwrap_or_default(),
        })
    }

    async fn check_va_status(&self, request: VaStatusRequest) -> Result<VaStatus> {
        let body = json!({
            "partnerServiceId": request.partner_service_id,
            "customerNo": request.customer_no,
            "virtualAccountNo": request.va_number,
            "inquiryRequestId": request.reference_no,
        });

        let v = self
            .post("/v1.0/transfer-va/status", &request.reference_no, body)
            .await?;
        let data = object_field(&v, "virtualAccountData")?;

        // "00" is the gateway's paid flag; anything else is still unpaid.
        let paid = str_field(data, "paymentFlagStatus").map(|s| s == "00").unwrap_or(false);
        let paid_amount = amount_field(data, "paidAmount").ok();

        Ok(VaStatus { paid, paid_amount })
    }
}

fn snap_amount(amount: Decimal) -> Value {
    json!({ "value": format!("{:.2}", amount), "currency": "IDR" })
}

fn object_field<'a>(v: &'a Value, key: &str) -> Result<&'a Value> {
    v.get(key)
        .filter(|d| d.is_object())
        .ok_or_else(|| anyhow!("gateway response missing object '{}'", key))
}

fn str_field(v: &Value, key: &str) -> Result<String> {
    v.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| anyhow!("gateway response missing field '{}'", key))
}

fn amount_field(v: &Value, key: &str) -> Result<Decimal> {
    let raw = v
        .get(key)
        .and_then(|a| a.get("value"))
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("gateway response missing amount '{}'", key))?;
    raw.parse::<Decimal>()
        .map_err(|e| anyhow!("gateway amount '{}' is not a decimal: {}", raw, e))
}

fn date_field(v: &Value, key: &str) -> Result<DateTime<Utc>> {
    let raw = v
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("gateway response missing date '{}'", key))?;
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

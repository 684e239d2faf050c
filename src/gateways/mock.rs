use crate::gateways::{
    CreateVaRequest, DecodedQr, PayQrRequest, PaymentGateway, QrPaymentReceipt, VaStatus,
    VaStatusRequest, VirtualAccount,
};
use anyhow::{bail, Result};
use chrono::Utc;
use rust_decimal::Decimal;

/// Behavior-driven stand-in for the real rail, used in local development and
/// tests. Behaviors: ALWAYS_SUCCESS (default), ALWAYS_FAILURE, VA_PAID,
/// VA_UNPAID.
pub struct MockGateway {
    pub behavior: String,
}

impl MockGateway {
    pub fn new(behavior: &str) -> Self {
        Self {
            behavior: behavior.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_virtual_account(&self, request: CreateVaRequest) -> Result<VirtualAccount> {
        if self.behavior == "ALWAYS_FAILURE" {
            bail!("mock gateway declined VA creation");
        }

        Ok(VirtualAccount {
            va_number: format!("8808{:012}", request.reference_no.len() as u64 * 7919),
            bank_name: request.bank_channel.to_uppercase(),
            expires_at: request.expires_at,
            payment_guide_url: format!("https://mock.gateway/how-to-pay/{}", request.reference_no),
        })
    }

    async fn decode_qr(&self, _payload: &str) -> Result<DecodedQr> {
        if self.behavior == "ALWAYS_FAILURE" {
            bail!("mock gateway could not decode QR payload");
        }

        Ok(DecodedQr {
            merchant_name: "KOPI MANTAP".to_string(),
            amount: Decimal::new(25_000, 0),
            fee_amount: Decimal::new(500, 0),
            reference_no: format!("mock_qr_{}", uuid::Uuid::new_v4().simple()),
            initiation_method: "MPM".to_string(),
        })
    }

    async fn pay_qr(&self, _request: PayQrRequest) -> Result<QrPaymentReceipt> {
        if self.behavior == "ALWAYS_FAILURE" {
            bail!("mock gateway declined QR payment");
        }

        Ok(QrPaymentReceipt {
            gateway_reference_no: format!("mock_pay_{}", uuid::Uuid::new_v4().simple()),
            transaction_date: Utc::now(),
            acquirer_name: "MOCK ACQUIRER".to_string(),
        })
    }

    async fn check_va_status(&self, _request: VaStatusRequest) -> Result<VaStatus> {
        match self.behavior.as_str() {
            "ALWAYS_FAILURE" => bail!("mock gateway status inquiry failed"),
            "VA_PAID" => Ok(VaStatus {
                paid: true,
                paid_amount: Some(Decimal::new(100_000, 0)),
            }),
            _ => Ok(VaStatus {
                paid: false,
                paid_amount: None,
            }),
        }
    }
}

use crate::domain::reference::{new_reference_no, QRIS_PREFIX};
use crate::domain::transaction::{
    error_response, internal_error, ErrorEnvelope, QrisDecodeResponse, QrisPayRequest,
    QrisPayResponse, TransactionStatus, TransactionType,
};
use crate::gateways::{PayQrRequest, PaymentGateway};
use crate::repo::transaction_repo::{TransactionRecordInput, TransactionRepo};
use crate::repo::wallet_repo::WalletRepo;
use axum::http::StatusCode;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub fn has_sufficient_balance(balance: Decimal, total_amount: Decimal) -> bool {
    balance >= total_amount
}

/// Scan-to-pay: decode, balance-check, debit the external rail, record. The
/// debit is confirmed by the gateway's immediate response, so the ledger row
/// is born `success` within the same request.
#[derive(Clone)]
pub struct QrisService {
    pub pool: PgPool,
    pub wallet_repo: WalletRepo,
    pub transaction_repo: TransactionRepo,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl QrisService {
    pub async fn decode(
        &self,
        payload: &str,
    ) -> Result<QrisDecodeResponse, (StatusCode, ErrorEnvelope)> {
        let decoded = self.gateway.decode_qr(payload).await.map_err(|e| {
            error_response(
                StatusCode::BAD_GATEWAY,
                "GATEWAY_ERROR",
                &format!("QR decode failed: {e}"),
            )
        })?;

        Ok(QrisDecodeResponse {
            total_amount: decoded.total_amount(),
            merchant_name: decoded.merchant_name,
            amount: decoded.amount,
            fee_amount: decoded.fee_amount,
            reference_no: decoded.reference_no,
            initiation_method: decoded.initiation_method,
        })
    }

    pub async fn pay(
        &self,
        user_id: Uuid,
        req: QrisPayRequest,
    ) -> Result<QrisPayResponse, (StatusCode, ErrorEnvelope)> {
        let decoded = self.gateway.decode_qr(&req.payload).await.map_err(|e| {
            error_response(
                StatusCode::BAD_GATEWAY,
                "GATEWAY_ERROR",
                &format!("QR decode failed: {e}"),
            )
        })?;
        let total_amount = decoded.total_amount();

        let wallet = self
            .wallet_repo
            .get_or_create(user_id)
            .await
            .map_err(internal_error)?;

        // Fail fast before any side effect: the gateway is never called for a
        // payment the wallet cannot cover.
        if !has_sufficient_balance(wallet.balance, total_amount) {
            return Err(error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "INSUFFICIENT_BALANCE",
                "wallet balance does not cover the payment total",
            ));
        }

        // Irreversible external step. On failure nothing was persisted
        // locally, the caller simply re-initiates.
        let receipt = self
            .gateway
            .pay_qr(PayQrRequest {
                payload: req.payload.clone(),
                amount: decoded.amount,
                fee_amount: decoded.fee_amount,
                auth_code: req.auth_code.clone(),
            })
            .await
            .map_err(|e| {
                error_response(
                    StatusCode::BAD_GATEWAY,
                    "GATEWAY_ERROR",
                    &format!("QR payment failed: {e}"),
                )
            })?;

        let reference_no = new_reference_no(QRIS_PREFIX);
        let record = TransactionRecordInput {
            id: Uuid::now_v7(),
            user_id,
            amount: -total_amount,
            transaction_type: TransactionType::QrisPayment,
            reference_no: reference_no.clone(),
            payment_method: "qris".to_string(),
            status: TransactionStatus::Success,
            bank_account: None,
            bank_name: None,
            description: Some(format!(
                "QRIS payment to {} (gateway ref {})",
                decoded.merchant_name, receipt.gateway_reference_no
            )),
        };

        // From here on funds have already left via the gateway. A failure in
        // this unit under-reports the ledger, so it is error-logged with the
        // external reference retained for manual reconciliation.
        let outcome: anyhow::Result<Decimal> = async {
            let mut tx = self.pool.begin().await?;
            let debited =
                WalletRepo::debit_if_sufficient_tx(&mut tx, user_id, total_amount).await?;
            if !debited {
                tx.rollback().await?;
                anyhow::bail!("balance changed concurrently, debit no longer covered");
            }
            TransactionRepo::insert_tx(&mut tx, &record).await?;
            tx.commit().await?;
            Ok(wallet.balance - total_amount)
        }
        .await;

        match outcome {
            Ok(balance_after) => Ok(QrisPayResponse {
                reference_no,
                gateway_reference_no: receipt.gateway_reference_no,
                merchant_name: decoded.merchant_name,
                total_amount,
                status: TransactionStatus::Success,
                balance_after,
            }),
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    gateway_reference_no = %receipt.gateway_reference_no,
                    total_amount = %total_amount,
                    error = %e,
                    "external debit succeeded but local ledger write failed, manual reconciliation required"
                );
                Err(error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LEDGER_WRITE_FAILED",
                    "payment executed externally but could not be recorded locally",
                ))
            }
        }
    }
}

use crate::domain::reference::{new_reference_no, TOPUP_PREFIX};
use crate::domain::transaction::{
    error_response, internal_error, CreateTopUpRequest, ErrorEnvelope, TopUpResponse,
    TransactionStatus, TransactionStatusResponse, TransactionType, WalletTransaction,
};
use crate::gateways::{AccountHolder, CreateVaRequest, PaymentGateway, VaStatusRequest};
use crate::identity::IdentityDirectory;
use crate::repo::transaction_repo::{TransactionRecordInput, TransactionRepo};
use crate::repo::wallet_repo::WalletRepo;
use crate::service::settlement::SettlementEngine;
use axum::http::StatusCode;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub const SUPPORTED_BANKS: &[&str] = &["bca", "bni", "bri", "mandiri", "permata", "cimb"];

pub fn validate_topup(req: &CreateTopUpRequest) -> Result<(), (StatusCode, ErrorEnvelope)> {
    if req.amount <= rust_decimal::Decimal::ZERO {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_AMOUNT",
            "top-up amount must be greater than zero",
        ));
    }
    if !SUPPORTED_BANKS.contains(&req.bank.to_lowercase().as_str()) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "UNSUPPORTED_BANK",
            "bank is not in the supported channel list",
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct TopUpService {
    pub wallet_repo: WalletRepo,
    pub transaction_repo: TransactionRepo,
    pub identity: Arc<dyn IdentityDirectory>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub settlement: SettlementEngine,
    pub partner_service_id: String,
}

impl TopUpService {
    /// Opens a pending ledger row backed by a fresh virtual account. The
    /// local row is persisted only after the gateway call succeeds; a crash
    /// between the two leaves an orphaned VA on the gateway side, which is
    /// why the reference number is error-logged on that path.
    pub async fn create(
        &self,
        user_id: Uuid,
        req: CreateTopUpRequest,
    ) -> Result<TopUpResponse, (StatusCode, ErrorEnvelope)> {
        validate_topup(&req)?;
        let bank = req.bank.to_lowercase();

        self.wallet_repo
            .get_or_create(user_id)
            .await
            .map_err(internal_error)?;

        let reference_no = new_reference_no(TOPUP_PREFIX);
        let profile = self.identity.get_by_id(user_id).await.map_err(|e| {
            error_response(
                StatusCode::BAD_GATEWAY,
                "IDENTITY_UNAVAILABLE",
                &format!("could not resolve account holder: {e}"),
            )
        })?;

        let expires_at = Utc::now() + chrono::Duration::hours(24);
        let va = self
            .gateway
            .create_virtual_account(CreateVaRequest {
                holder: AccountHolder {
                    name: profile.name,
                    email: profile.email,
                    phone_number: profile.phone_number,
                },
                amount: req.amount,
                reference_no: reference_no.clone(),
                bank_channel: bank.clone(),
                expires_at,
            })
            .await
            .map_err(|e| {
                error_response(
                    StatusCode::BAD_GATEWAY,
                    "GATEWAY_ERROR",
                    &format!("virtual account creation failed: {e}"),
                )
            })?;

        let record = TransactionRecordInput {
            id: Uuid::now_v7(),
            user_id,
            amount: req.amount,
            transaction_type: TransactionType::Topup,
            reference_no: reference_no.clone(),
            payment_method: "virtual_account".to_string(),
            status: TransactionStatus::Pending,
            bank_account: Some(va.va_number.clone()),
            bank_name: Some(va.bank_name.clone()),
            description: Some(format!("Wallet top-up via {} virtual account", va.bank_name)),
        };

        if let Err(e) = self.transaction_repo.insert(&record).await {
            tracing::error!(
                reference_no,
                va_number = %va.va_number,
                error = %e,
                "VA created on gateway but local ledger insert failed, orphaned VA needs manual cleanup"
            );
            return Err(internal_error(e));
        }

        Ok(TopUpResponse {
            reference_no,
            va_number: va.va_number,
            bank_name: va.bank_name,
            amount: req.amount,
            status: TransactionStatus::Pending,
            expires_at: va.expires_at,
            payment_guide_url: va.payment_guide_url,
        })
    }

    /// On-demand reconciliation: if the gateway already saw the payment,
    /// settle it through the same engine the webhook uses. A failed
    /// best-effort settlement must not break a simple status query, so every
    /// failure path falls back to the last-known local status.
    pub async fn check_status(
        &self,
        reference_no: &str,
    ) -> Result<TransactionStatusResponse, (StatusCode, ErrorEnvelope)> {
        let Some(txn) = self
            .transaction_repo
            .find_by_reference(reference_no)
            .await
            .map_err(internal_error)?
        else {
            return Err(error_response(
                StatusCode::NOT_FOUND,
                "TRANSACTION_NOT_FOUND",
                "no transaction with that reference number",
            ));
        };

        // Fast path: already settled, nothing to reconcile.
        if txn.status == TransactionStatus::Success {
            return Ok(status_response(&txn));
        }
        // Only top-ups have a virtual account to poll.
        if txn.transaction_type != TransactionType::Topup {
            return Ok(status_response(&txn));
        }

        let va_number = txn.bank_account.clone().unwrap_or_default();
        let customer_no = va_number
            .strip_prefix(self.partner_service_id.trim())
            .unwrap_or(va_number.as_str())
            .to_string();

        match self
            .gateway
            .check_va_status(VaStatusRequest {
                va_number,
                customer_no,
                partner_service_id: self.partner_service_id.clone(),
                reference_no: reference_no.to_string(),
            })
            .await
        {
            Ok(status) if status.paid => {
                let paid_amount = status.paid_amount.unwrap_or(txn.amount);
                match self.settlement.settle(reference_no, paid_amount).await {
                    Ok(outcome) => {
                        tracing::info!(reference_no, ?outcome, "poll-triggered settlement finished");
                    }
                    Err(e) => {
                        tracing::warn!(
                            reference_no,
                            error = %e,
                            "poll-triggered settlement failed, returning last-known status"
                        );
                    }
                }

                let refreshed = self
                    .transaction_repo
                    .find_by_reference(reference_no)
                    .await
                    .ok()
                    .flatten()
                    .unwrap_or(txn);
                Ok(status_response(&refreshed))
            }
            Ok(_) => Ok(status_response(&txn)),
            Err(e) => {
                tracing::warn!(reference_no, error = %e, "gateway status inquiry failed");
                Ok(status_response(&txn))
            }
        }
    }
}

fn status_response(txn: &WalletTransaction) -> TransactionStatusResponse {
    TransactionStatusResponse {
        reference_no: txn.reference_no.clone(),
        transaction_type: txn.transaction_type,
        status: txn.status,
        amount: txn.amount,
        updated_at: txn.updated_at,
    }
}

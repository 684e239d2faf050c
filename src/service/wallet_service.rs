use crate::domain::transaction::{internal_error, ErrorEnvelope, WalletTransaction};
use crate::domain::wallet::BalanceResponse;
use crate::repo::transaction_repo::TransactionRepo;
use crate::repo::wallet_repo::WalletRepo;
use axum::http::StatusCode;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamps client-supplied paging into sane bounds.
pub fn normalize_page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

#[derive(Clone)]
pub struct WalletService {
    pub wallet_repo: WalletRepo,
    pub transaction_repo: TransactionRepo,
}

impl WalletService {
    pub async fn get_balance(
        &self,
        user_id: Uuid,
    ) -> Result<BalanceResponse, (StatusCode, ErrorEnvelope)> {
        let wallet = self
            .wallet_repo
            .get_or_create(user_id)
            .await
            .map_err(internal_error)?;

        Ok(BalanceResponse {
            user_id: wallet.user_id,
            balance: wallet.balance,
            updated_at: wallet.updated_at,
        })
    }

    pub async fn list_transactions(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<WalletTransaction>, (StatusCode, ErrorEnvelope)> {
        let (limit, offset) = normalize_page(limit, offset);
        self.transaction_repo
            .list_by_user(user_id, limit, offset)
            .await
            .map_err(internal_error)
    }
}

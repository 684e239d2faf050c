use crate::domain::transaction::TransactionStatus;
use crate::repo::transaction_repo::TransactionRepo;
use crate::repo::wallet_repo::WalletRepo;
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

/// Absolute tolerance when comparing the gateway-reported paid amount with
/// the expected amount. Absorbs formatting/rounding noise, nothing more.
pub fn amount_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementOutcome {
    Settled,
    AlreadySettled,
    AmountMismatch,
    NotFound,
    InvalidState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementDecision {
    Apply,
    AlreadySettled,
    AmountMismatch,
    InvalidState,
}

pub fn amount_within_tolerance(expected: Decimal, paid: Decimal) -> bool {
    (expected - paid).abs() <= amount_tolerance()
}

/// Pure settlement rule: success is terminal and idempotent, only pending or
/// processing rows may settle, and the paid amount must match the ledgered
/// amount within tolerance. A mismatch leaves the row pending for manual
/// review, it is never auto-corrected.
pub fn decide(status: TransactionStatus, expected: Decimal, paid: Decimal) -> SettlementDecision {
    match status {
        TransactionStatus::Success => SettlementDecision::AlreadySettled,
        TransactionStatus::Pending | TransactionStatus::Processing => {
            if amount_within_tolerance(expected, paid) {
                SettlementDecision::Apply
            } else {
                SettlementDecision::AmountMismatch
            }
        }
        TransactionStatus::Failed => SettlementDecision::InvalidState,
    }
}

/// Applies a confirmed payment to the ledger and the wallet balance exactly
/// once. Shared by the webhook handler and the poll path so the two triggers
/// cannot diverge in behavior.
#[derive(Clone)]
pub struct SettlementEngine {
    pub pool: PgPool,
}

impl SettlementEngine {
    /// The whole operation runs in one database transaction with the ledger
    /// row locked, so a webhook racing a poll on the same reference number
    /// serializes: the loser of the race observes `success` after the
    /// winner's commit and reports `AlreadySettled`. Any failure mid-unit
    /// rolls everything back, leaving the row pending and retryable.
    pub async fn settle(&self, reference_no: &str, paid_amount: Decimal) -> Result<SettlementOutcome> {
        let mut tx = self.pool.begin().await?;

        let Some(txn) =
            TransactionRepo::find_by_reference_for_update_tx(&mut tx, reference_no).await?
        else {
            tx.rollback().await?;
            return Ok(SettlementOutcome::NotFound);
        };

        match decide(txn.status, txn.amount, paid_amount) {
            SettlementDecision::AlreadySettled => {
                tx.rollback().await?;
                return Ok(SettlementOutcome::AlreadySettled);
            }
            SettlementDecision::InvalidState => {
                tx.rollback().await?;
                return Ok(SettlementOutcome::InvalidState);
            }
            SettlementDecision::AmountMismatch => {
                tx.rollback().await?;
                tracing::warn!(
                    reference_no,
                    expected = %txn.amount,
                    paid = %paid_amount,
                    "paid amount outside tolerance, transaction left pending for manual review"
                );
                return Ok(SettlementOutcome::AmountMismatch);
            }
            SettlementDecision::Apply => {}
        }

        TransactionRepo::mark_status_tx(&mut tx, txn.id, TransactionStatus::Success).await?;
        WalletRepo::apply_delta_tx(&mut tx, txn.user_id, txn.amount).await?;
        tx.commit().await?;

        tracing::info!(
            reference_no,
            user_id = %txn.user_id,
            amount = %txn.amount,
            "transaction settled and balance credited"
        );

        Ok(SettlementOutcome::Settled)
    }
}

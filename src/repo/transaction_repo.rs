use crate::domain::transaction::{TransactionStatus, TransactionType, WalletTransaction};
use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

pub struct TransactionRecordInput {
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
}

#[derive(Clone)]
pub struct TransactionRepo {
    pub pool: PgPool,
}

const COLUMNS: &str = "id, user_id, amount, transaction_type, reference_no, payment_method, \
                       status, bank_account, bank_name, description, created_at, updated_at";

impl TransactionRepo {
    pub async fn insert(&self, data: &TransactionRecordInput) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        Self::insert_tx(&mut tx, data).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        data: &TransactionRecordInput,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO wallet_transactions (
                id, user_id, amount, transaction_type, reference_no,
                payment_method, status, bank_account, bank_name, description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(data.id)
        .bind(data.user_id)
        .bind(data.amount)
        .bind(data.transaction_type.as_str())
        .bind(&data.reference_no)
        .bind(&data.payment_method)
        .bind(data.status.as_str())
        .bind(&data.bank_account)
        .bind(&data.bank_name)
        .bind(&data.description)
        .execute(tx.as_mut())
        .await?;

        Ok(())
    }

    pub async fn find_by_reference(&self, reference_no: &str) -> Result<Option<WalletTransaction>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM wallet_transactions WHERE reference_no = $1"
        ))
        .bind(reference_no)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(from_row))
    }

    /// Locks the ledger row for the rest of the caller's transaction. This is
    /// what serializes a webhook racing a client poll on the same reference:
    /// the second settler blocks here until the first one commits.
    pub async fn find_by_reference_for_update_tx(
        tx: &mut Transaction<'_, Postgres>,
        reference_no: &str,
    ) -> Result<Option<WalletTransaction>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM wallet_transactions WHERE reference_no = $1 FOR UPDATE"
        ))
        .bind(reference_no)
        .fetch_optional(tx.as_mut())
        .await?;

        Ok(row.map(from_row))
    }

    pub async fn mark_status_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<()> {
        sqlx::query("UPDATE wallet_transactions SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(tx.as_mut())
            .await?;

        Ok(())
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WalletTransaction>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {COLUMNS} FROM wallet_transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(from_row).collect())
    }
}

fn from_row(row: PgRow) -> WalletTransaction {
    WalletTransaction {
        id: row.get("id"),
        user_id: row.get("user_id"),
        amount: row.get("amount"),
        transaction_type: TransactionType::parse(row.get::<String, _>("transaction_type").as_str()),
        reference_no: row.get("reference_no"),
        payment_method: row.get("payment_method"),
        status: TransactionStatus::parse(row.get::<String, _>("status").as_str()),
        bank_account: row.get("bank_account"),
        bank_name: row.get("bank_name"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

use crate::domain::wallet::Wallet;
use anyhow::{bail, Result};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

#[derive(Clone)]
pub struct WalletRepo {
    pub pool: PgPool,
}

impl WalletRepo {
    /// Lazily creates the wallet with a zero balance on first access.
    pub async fn get_or_create(&self, user_id: Uuid) -> Result<Wallet> {
        sqlx::query("INSERT INTO wallets (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let row = sqlx::query("SELECT user_id, balance, updated_at FROM wallets WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(Wallet {
            user_id: row.get("user_id"),
            balance: row.get("balance"),
            updated_at: row.get("updated_at"),
        })
    }

    pub async fn get(&self, user_id: Uuid) -> Result<Option<Wallet>> {
        let row = sqlx::query("SELECT user_id, balance, updated_at FROM wallets WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Wallet {
            user_id: row.get("user_id"),
            balance: row.get("balance"),
            updated_at: row.get("updated_at"),
        }))
    }

    /// Server-side increment, only valid inside the same transaction that
    /// settles the justifying ledger row. The balance is never mutated
    /// standalone.
    pub async fn apply_delta_tx(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        delta: Decimal,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE wallets SET balance = balance + $2, updated_at = now() WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(delta)
        .execute(tx.as_mut())
        .await?;

        if result.rows_affected() == 0 {
            bail!("wallet {} not found while applying delta", user_id);
        }

        Ok(())
    }

    /// Conditional decrement guarded by the current balance. The wallet row
    /// lock serializes concurrent debits for one user, so two parallel QRIS
    /// payments cannot both pass a stale balance check.
    pub async fn debit_if_sufficient_tx(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE wallets
            SET balance = balance - $2, updated_at = now()
            WHERE user_id = $1 AND balance >= $2
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .execute(tx.as_mut())
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

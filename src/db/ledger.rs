//! Postgres implementation of the ledger ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::AccountStatement;
use crate::error::AppError;
use crate::ports::{Ledger, LedgerTx};

const LIST_QUERY: &str = r#"
    SELECT id, fk_account_id, type_charge, charged_at, currency, amount, tenant_id, transaction_id
    FROM account_statement
    WHERE fk_account_id = $1 AND type_charge = $2
    ORDER BY charged_at DESC
"#;

const LIST_SINCE_QUERY: &str = r#"
    SELECT id, fk_account_id, type_charge, charged_at, currency, amount, tenant_id, transaction_id
    FROM account_statement
    WHERE fk_account_id = $1 AND type_charge = $2 AND charged_at >= $3
    ORDER BY charged_at DESC
"#;

#[derive(Clone)]
pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Ledger for PgLedger {
    async fn begin(&self) -> Result<Box<dyn LedgerTx>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgLedgerTx { tx }))
    }

    async fn list_by_account(
        &self,
        fk_account_id: i32,
        charge_type: &str,
    ) -> Result<Vec<AccountStatement>, AppError> {
        let rows = sqlx::query_as::<_, AccountStatement>(LIST_QUERY)
            .bind(fk_account_id)
            .bind(charge_type)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn list_by_account_since(
        &self,
        fk_account_id: i32,
        charge_type: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<AccountStatement>, AppError> {
        let rows = sqlx::query_as::<_, AccountStatement>(LIST_SINCE_QUERY)
            .bind(fk_account_id)
            .bind(charge_type)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

/// Transaction guard over a pooled connection. sqlx rolls the transaction
/// back when the guard is dropped without `commit`.
pub struct PgLedgerTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LedgerTx for PgLedgerTx {
    async fn insert_statement(
        &mut self,
        credit: &AccountStatement,
    ) -> Result<AccountStatement, AppError> {
        let mut persisted = credit.clone();
        persisted.charged_at = Some(Utc::now());
        persisted.transaction_id = Some(Uuid::new_v4());

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO account_statement
                (fk_account_id, type_charge, charged_at, currency, amount, tenant_id, transaction_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(persisted.fk_account_id)
        .bind(&persisted.charge_type)
        .bind(persisted.charged_at)
        .bind(&persisted.currency)
        .bind(&persisted.amount)
        .bind(&persisted.tenant_id)
        .bind(persisted.transaction_id)
        .fetch_one(&mut *self.tx)
        .await?;

        persisted.id = Some(id);
        Ok(persisted)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

//! Capability boundary of the credit orchestrator.
//!
//! One orchestrator runs against these traits; production wires the reqwest
//! clients and the Postgres ledger, tests swap in fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::db::models::{Account, AccountStatement, Transfer};
use crate::error::AppError;

/// Resolves an opaque account identifier to the account record owning it.
#[async_trait]
pub trait AccountResolver: Send + Sync {
    async fn resolve(&self, account_id: &str) -> Result<Account, AppError>;
}

/// Posts monetary effects to the fund service.
#[async_trait]
pub trait FundPoster: Send + Sync {
    /// Apply a persisted credit to the account balance.
    async fn post_credit(&self, credit: &AccountStatement) -> Result<(), AppError>;

    /// Ship a compensation transfer when the credit path is unavailable.
    async fn post_transfer(&self, transfer: &Transfer) -> Result<(), AppError>;
}

/// Durable statement store.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn LedgerTx>, AppError>;

    async fn list_by_account(
        &self,
        fk_account_id: i32,
        charge_type: &str,
    ) -> Result<Vec<AccountStatement>, AppError>;

    async fn list_by_account_since(
        &self,
        fk_account_id: i32,
        charge_type: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<AccountStatement>, AppError>;
}

/// One open ledger transaction.
///
/// Dropping the guard without calling `commit` rolls the transaction back and
/// releases the underlying connection.
#[async_trait]
pub trait LedgerTx: Send {
    /// Insert a statement row. The store assigns `id`, `charged_at` and
    /// `transaction_id`; any caller-supplied values for those are ignored.
    async fn insert_statement(
        &mut self,
        credit: &AccountStatement,
    ) -> Result<AccountStatement, AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;

    async fn rollback(self: Box<Self>) -> Result<(), AppError>;
}

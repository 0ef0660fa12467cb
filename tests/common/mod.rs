#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use credit_core::db::models::{Account, AccountStatement, Transfer};
use credit_core::error::AppError;
use credit_core::ports::{AccountResolver, FundPoster, Ledger, LedgerTx};

pub fn sample_credit(charge_type: &str, amount: &str) -> AccountStatement {
    AccountStatement {
        id: None,
        fk_account_id: None,
        account_id: "ACC-001".to_string(),
        charge_type: charge_type.to_string(),
        charged_at: None,
        currency: "USD".to_string(),
        amount: amount.parse::<BigDecimal>().unwrap(),
        tenant_id: Some("tenant-1".to_string()),
        observation: None,
        transaction_id: None,
    }
}

/// In-memory ledger. Rows inserted through a transaction become visible only
/// once that transaction commits.
pub struct MemLedger {
    rows: Arc<Mutex<Vec<AccountStatement>>>,
    next_id: Arc<AtomicUsize>,
}

impl Default for MemLedger {
    fn default() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicUsize::new(1)),
        }
    }
}

impl MemLedger {
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl Ledger for MemLedger {
    async fn begin(&self) -> Result<Box<dyn LedgerTx>, AppError> {
        Ok(Box::new(MemLedgerTx {
            rows: Arc::clone(&self.rows),
            next_id: Arc::clone(&self.next_id),
            staged: Vec::new(),
        }))
    }

    async fn list_by_account(
        &self,
        fk_account_id: i32,
        charge_type: &str,
    ) -> Result<Vec<AccountStatement>, AppError> {
        let mut rows: Vec<AccountStatement> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.fk_account_id == Some(fk_account_id) && r.charge_type == charge_type)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.charged_at.cmp(&a.charged_at));
        Ok(rows)
    }

    async fn list_by_account_since(
        &self,
        fk_account_id: i32,
        charge_type: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<AccountStatement>, AppError> {
        let rows = self
            .list_by_account(fk_account_id, charge_type)
            .await?
            .into_iter()
            .filter(|r| r.charged_at.is_some_and(|t| t >= since))
            .collect();
        Ok(rows)
    }
}

pub struct MemLedgerTx {
    rows: Arc<Mutex<Vec<AccountStatement>>>,
    next_id: Arc<AtomicUsize>,
    staged: Vec<AccountStatement>,
}

#[async_trait]
impl LedgerTx for MemLedgerTx {
    async fn insert_statement(
        &mut self,
        credit: &AccountStatement,
    ) -> Result<AccountStatement, AppError> {
        let mut persisted = credit.clone();
        persisted.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst) as i32);
        persisted.charged_at = Some(Utc::now());
        persisted.transaction_id = Some(Uuid::new_v4());
        self.staged.push(persisted.clone());
        Ok(persisted)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let this = *self;
        this.rows.lock().unwrap().extend(this.staged);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        Ok(())
    }
}

/// Resolver that always maps to account 42 and counts its calls.
#[derive(Default)]
pub struct FakeResolver {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

#[async_trait]
impl AccountResolver for FakeResolver {
    async fn resolve(&self, account_id: &str) -> Result<Account, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::NotFound(account_id.to_string()));
        }
        Ok(Account {
            id: 42,
            account_id: account_id.to_string(),
            person_id: None,
            create_at: None,
            tenant_id: None,
        })
    }
}

/// Fund poster that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingFunds {
    pub credits: Mutex<Vec<AccountStatement>>,
    pub transfers: Mutex<Vec<Transfer>>,
    pub fail_credit: AtomicBool,
    pub fail_transfer: AtomicBool,
}

#[async_trait]
impl FundPoster for RecordingFunds {
    async fn post_credit(&self, credit: &AccountStatement) -> Result<(), AppError> {
        if self.fail_credit.load(Ordering::SeqCst) {
            return Err(AppError::Server("fund service unavailable".to_string()));
        }
        self.credits.lock().unwrap().push(credit.clone());
        Ok(())
    }

    async fn post_transfer(&self, transfer: &Transfer) -> Result<(), AppError> {
        if self.fail_transfer.load(Ordering::SeqCst) {
            return Err(AppError::Server(
                "compensation service unavailable".to_string(),
            ));
        }
        self.transfers.lock().unwrap().push(transfer.clone());
        Ok(())
    }
}

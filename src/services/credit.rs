//! Credit orchestration: one local transaction coordinated with the remote
//! account, fund and compensation services.

use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use failsafe::CircuitBreaker;

use crate::breaker::CreditBreaker;
use crate::db::models::{AccountStatement, Transfer};
use crate::error::AppError;
use crate::ports::{AccountResolver, FundPoster, Ledger};

/// Charge type accepted on the regular credit path.
pub const CREDIT_TYPE: &str = "CREDIT";

/// Type tag that drives the breaker probe into failure. Requests carrying it
/// are diverted to the compensation path instead of being persisted.
pub const BREAKER_PROBE_TYPE: &str = "CREDITX";

/// Note recorded on statements that went through the compensation path.
pub const DIVERTED_NOTE: &str = "transaction sent through the compensation path";

#[derive(Clone)]
pub struct CreditService {
    ledger: Arc<dyn Ledger>,
    accounts: Arc<dyn AccountResolver>,
    funds: Arc<dyn FundPoster>,
    breaker: CreditBreaker,
}

impl CreditService {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        accounts: Arc<dyn AccountResolver>,
        funds: Arc<dyn FundPoster>,
        breaker: CreditBreaker,
    ) -> Self {
        Self {
            ledger,
            accounts,
            funds,
            breaker,
        }
    }

    /// Returns the breaker state as seen by the next caller.
    pub fn circuit_state(&self) -> &'static str {
        if self.breaker.is_call_permitted() {
            "closed"
        } else {
            "open"
        }
    }

    /// Record a credit against the account statement ledger.
    ///
    /// The whole operation runs inside one ledger transaction: any failure
    /// after `begin` drops the transaction guard, which rolls back the row
    /// and releases the connection. The transaction is intentionally opened
    /// before any validation so that every exit funnels through the same
    /// guard.
    pub async fn add_credit(
        &self,
        mut credit: AccountStatement,
    ) -> Result<AccountStatement, AppError> {
        let mut tx = self.ledger.begin().await?;

        // The probe is driven by the request's type tag; an open circuit
        // rejects the call without running it.
        let charge_type = credit.charge_type.clone();
        let probe = self.breaker.call(move || {
            if charge_type == BREAKER_PROBE_TYPE {
                Err(AppError::TransInvalid)
            } else {
                Ok(())
            }
        });

        if let Err(err) = probe {
            tracing::warn!(error = ?err, account_id = %credit.account_id,
                "circuit breaker diverted credit to the compensation path");

            let transfer = Transfer::from_credit(&credit);
            self.funds.post_transfer(&transfer).await?;

            credit.observation = Some(DIVERTED_NOTE.to_string());
            // No row was written; committing just releases the transaction.
            tx.commit().await?;
            return Ok(credit);
        }

        if credit.charge_type != CREDIT_TYPE {
            return Err(AppError::TransInvalid);
        }
        if credit.amount < BigDecimal::from(0) {
            return Err(AppError::InvalidAmount);
        }

        let account = self.accounts.resolve(&credit.account_id).await?;
        credit.fk_account_id = Some(account.id);

        let persisted = tx.insert_statement(&credit).await?;

        // The balance post stays inside the transaction scope: if it fails,
        // the inserted row is rolled back with it.
        self.funds.post_credit(&persisted).await?;

        tx.commit().await?;
        Ok(persisted)
    }

    /// All credits recorded for an account, newest first.
    pub async fn list_credit(&self, account_id: &str) -> Result<Vec<AccountStatement>, AppError> {
        let account = self.accounts.resolve(account_id).await?;
        self.ledger.list_by_account(account.id, CREDIT_TYPE).await
    }

    /// Credits charged at or after `since`, newest first.
    pub async fn list_credit_per_date(
        &self,
        account_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<AccountStatement>, AppError> {
        let account = self.accounts.resolve(account_id).await?;
        self.ledger
            .list_by_account_since(account.id, CREDIT_TYPE, since)
            .await
    }
}

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::clients::map_status;
use crate::db::models::Account;
use crate::error::AppError;
use crate::ports::AccountResolver;

/// HTTP client for the account service.
#[derive(Clone)]
pub struct AccountClient {
    client: Client,
    base_url: String,
}

impl AccountClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        AccountClient { client, base_url }
    }
}

#[async_trait]
impl AccountResolver for AccountClient {
    async fn resolve(&self, account_id: &str) -> Result<Account, AppError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), account_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Server(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        response
            .json::<Account>()
            .await
            .map_err(|e| AppError::Unmarshal(e.to_string()))
    }
}

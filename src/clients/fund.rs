use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::clients::map_status;
use crate::db::models::{AccountStatement, Transfer};
use crate::error::AppError;
use crate::ports::FundPoster;

/// HTTP client for the fund service and its compensation endpoint.
#[derive(Clone)]
pub struct FundClient {
    client: Client,
    fund_url: String,
    compensation_url: String,
}

impl FundClient {
    pub fn new(fund_base_url: String, compensation_base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        FundClient {
            client,
            fund_url: format!("{}/add/fund", fund_base_url.trim_end_matches('/')),
            compensation_url: format!(
                "{}/creditFundSchedule",
                compensation_base_url.trim_end_matches('/')
            ),
        }
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<(), AppError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Server(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        Ok(())
    }
}

#[async_trait]
impl FundPoster for FundClient {
    async fn post_credit(&self, credit: &AccountStatement) -> Result<(), AppError> {
        self.post_json(&self.fund_url, credit).await
    }

    async fn post_transfer(&self, transfer: &Transfer) -> Result<(), AppError> {
        self.post_json(&self.compensation_url, transfer).await
    }
}

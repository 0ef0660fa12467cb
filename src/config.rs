use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub account_service_url: String,
    pub fund_service_url: String,
    pub compensation_service_url: String,
    pub http_timeout_secs: u64,
    pub breaker_failure_threshold: u32,
    pub breaker_reset_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")?,
            account_service_url: env::var("ACCOUNT_SERVICE_URL")?,
            fund_service_url: env::var("FUND_SERVICE_URL")?,
            compensation_service_url: env::var("COMPENSATION_SERVICE_URL")?,
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            breaker_failure_threshold: env::var("BREAKER_FAILURE_THRESHOLD")
                .unwrap_or_else(|_| "3".to_string())
                .parse()?,
            breaker_reset_timeout_secs: env::var("BREAKER_RESET_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
        })
    }
}

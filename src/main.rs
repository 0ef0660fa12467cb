use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sqlx::migrate::Migrator;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use credit_core::clients::account::AccountClient;
use credit_core::clients::fund::FundClient;
use credit_core::config::Config;
use credit_core::db::ledger::PgLedger;
use credit_core::services::credit::CreditService;
use credit_core::{AppState, breaker, create_app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The database may come up after us; retry before giving up.
    let mut attempt = 1;
    let pool = loop {
        match db::create_pool(&config).await {
            Ok(pool) => break pool,
            Err(e) if attempt < 3 => {
                tracing::error!(error = %e, attempt, "database not reachable, retrying");
                tokio::time::sleep(Duration::from_secs(3)).await;
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    };

    // Run migrations
    let migrator = Migrator::new(Path::new("./migrations")).await?;
    migrator.run(&pool).await?;
    tracing::info!("database migrations completed");

    let timeout = Duration::from_secs(config.http_timeout_secs);
    let accounts = AccountClient::new(config.account_service_url.clone(), timeout);
    let funds = FundClient::new(
        config.fund_service_url.clone(),
        config.compensation_service_url.clone(),
        timeout,
    );
    let breaker = breaker::with_settings(
        config.breaker_failure_threshold,
        config.breaker_reset_timeout_secs,
    );

    let credit = CreditService::new(
        Arc::new(PgLedger::new(pool.clone())),
        Arc::new(accounts),
        Arc::new(funds),
        breaker,
    );

    let app = create_app(AppState { db: pool, credit });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

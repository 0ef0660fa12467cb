pub mod breaker;
pub mod clients;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ports;
pub mod services;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::credit::CreditService;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub credit: CreditService,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/add", post(handlers::credit::add_credit))
        .route("/list/:id", get(handlers::credit::list_credit))
        .route(
            "/listPerDate/:id",
            get(handlers::credit::list_credit_per_date),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

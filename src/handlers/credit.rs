use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::AppState;
use crate::db::models::AccountStatement;
use crate::error::AppError;

pub async fn add_credit(
    State(state): State<AppState>,
    Json(payload): Json<AccountStatement>,
) -> Result<impl IntoResponse, AppError> {
    let credit = state.credit.add_credit(payload).await?;
    Ok(Json(credit))
}

pub async fn list_credit(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let credits = state.credit.list_credit(&account_id).await?;
    Ok(Json(credits))
}

#[derive(Debug, Deserialize)]
pub struct DateFilter {
    pub date: NaiveDate,
}

pub async fn list_credit_per_date(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(filter): Query<DateFilter>,
) -> Result<impl IntoResponse, AppError> {
    let since = filter.date.and_time(NaiveTime::MIN).and_utc();
    let credits = state
        .credit
        .list_credit_per_date(&account_id, since)
        .await?;
    Ok(Json(credits))
}

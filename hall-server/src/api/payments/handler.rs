//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use surrealdb::RecordId;

use crate::core::ServerState;
use crate::db::models::{Payment, PaymentCreate};
use crate::db::repository::PaymentRepository;
use crate::utils::time::parse_date_range;
use crate::utils::{AppError, AppResult};

/// Query params for listing payments (defaults to today)
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/payments - 按日期区间查询收款 (默认当天)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Payment>>> {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let start_date = query.start_date.unwrap_or_else(|| today.clone());
    let end_date = query.end_date.unwrap_or(today);
    let (start, end) = parse_date_range(&start_date, &end_date)?;

    let repo = PaymentRepository::new(state.db.clone());
    let payments = repo.list_by_range(start, end).await?;
    Ok(Json(payments))
}

/// GET /api/payments/session/:session_id - 场次收款列表
pub async fn list_by_session(
    State(state): State<ServerState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<Vec<Payment>>> {
    let session_key: RecordId = session_id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid session ID: {}", session_id)))?;
    let repo = PaymentRepository::new(state.db.clone());
    let payments = repo.list_by_session(&session_key).await?;
    Ok(Json(payments))
}

/// POST /api/payments - 记录收款 (OUTSTANDING 同时生成挂账)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<Payment>> {
    let payment = state.credit_service.record_payment(payload).await?;
    Ok(Json(payment))
}

/// DELETE /api/payments/:id - 删除收款 (管理操作)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = PaymentRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

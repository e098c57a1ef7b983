//! Table Session API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    ApplyPromotion, CloseSession, OpenSession, TableSession, TableSessionDetail, TransferSession,
};
use crate::utils::time::parse_date_range;
use crate::utils::AppResult;

/// Query params for listing sessions
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/sessions - 按开台日期区间查询场次
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<TableSession>>> {
    let (start, end) = parse_date_range(&query.start_date, &query.end_date)?;
    let sessions = state.session_engine.list(start, end).await?;
    Ok(Json(sessions))
}

/// GET /api/sessions/:id - 场次详情 (含点单与收款)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TableSessionDetail>> {
    let detail = state.session_engine.get_detail(&id).await?;
    Ok(Json(detail))
}

/// GET /api/sessions/table/:table_id/active - 球台上进行中的场次
pub async fn active_for_table(
    State(state): State<ServerState>,
    Path(table_id): Path<String>,
) -> AppResult<Json<Option<TableSession>>> {
    let session = state.session_engine.active_for_table(&table_id).await?;
    Ok(Json(session))
}

/// POST /api/sessions/open - 开台
pub async fn open(
    State(state): State<ServerState>,
    Json(payload): Json<OpenSession>,
) -> AppResult<Json<TableSession>> {
    let session = state.session_engine.open(payload).await?;
    Ok(Json(session))
}

/// POST /api/sessions/:id/close - 关台结账
pub async fn close(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Option<Json<CloseSession>>,
) -> AppResult<Json<TableSession>> {
    let req = payload.map(|Json(p)| p).unwrap_or_default();
    let session = state.session_engine.close(&id, req).await?;
    Ok(Json(session))
}

/// POST /api/sessions/:id/pause - 暂停计时
pub async fn pause(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TableSession>> {
    let session = state.session_engine.pause(&id).await?;
    Ok(Json(session))
}

/// POST /api/sessions/:id/resume - 恢复计时
pub async fn resume(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TableSession>> {
    let session = state.session_engine.resume(&id).await?;
    Ok(Json(session))
}

/// POST /api/sessions/:id/transfer - 转台
pub async fn transfer(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransferSession>,
) -> AppResult<Json<TableSession>> {
    let session = state.session_engine.transfer(&id, payload).await?;
    Ok(Json(session))
}

/// POST /api/sessions/:id/apply-promotion - 应用优惠 (预览折扣)
pub async fn apply_promotion(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ApplyPromotion>,
) -> AppResult<Json<TableSession>> {
    let session = state.session_engine.apply_promotion(&id, payload).await?;
    Ok(Json(session))
}

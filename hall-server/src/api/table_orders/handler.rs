//! Table Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{PlaceOrder, TableOrder};
use crate::utils::AppResult;

/// GET /api/table-orders/session/:session_id - 场次点单列表
pub async fn list_by_session(
    State(state): State<ServerState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<Vec<TableOrder>>> {
    let orders = state.order_service.list_by_session(&session_id).await?;
    Ok(Json(orders))
}

/// POST /api/table-orders - 下单 (预留库存)
pub async fn place(
    State(state): State<ServerState>,
    Json(payload): Json<PlaceOrder>,
) -> AppResult<Json<TableOrder>> {
    let order = state.order_service.place(payload).await?;
    Ok(Json(order))
}

/// DELETE /api/table-orders/:id - 撤单 (归还库存)
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.order_service.cancel(&id).await?;
    Ok(Json(true))
}

//! Creditor API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{CreditStatus, Creditor, CreditorPayment, CreditorRepay};
use crate::db::repository::CreditorRepository;
use crate::utils::{AppError, AppResult};

/// Query params for listing creditors
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// GET /api/creditors - 挂账列表 (可按状态过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Creditor>>> {
    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some("PENDING") => Some(CreditStatus::Pending),
        Some("PAID") => Some(CreditStatus::Paid),
        Some(other) => {
            return Err(AppError::validation(format!(
                "Invalid status filter: {}",
                other
            )));
        }
    };
    let repo = CreditorRepository::new(state.db.clone());
    let creditors = repo.find_all(status).await?;
    Ok(Json(creditors))
}

/// GET /api/creditors/:id - 获取单条挂账
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Creditor>> {
    let repo = CreditorRepository::new(state.db.clone());
    let creditor = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Creditor {} not found", id)))?;
    Ok(Json(creditor))
}

/// GET /api/creditors/:id/payments - 还款记录
pub async fn list_payments(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<CreditorPayment>>> {
    let payments = state.credit_service.list_repayments(&id).await?;
    Ok(Json(payments))
}

/// POST /api/creditors/:id/pay - 还款
pub async fn repay(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CreditorRepay>,
) -> AppResult<Json<Creditor>> {
    let creditor = state.credit_service.repay(&id, payload).await?;
    Ok(Json(creditor))
}

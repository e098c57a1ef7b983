//! Billiard Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{BilliardTable, BilliardTableCreate, BilliardTableUpdate};
use crate::db::repository::BilliardTableRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/tables - 获取所有球台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<BilliardTable>>> {
    let repo = BilliardTableRepository::new(state.db.clone());
    let tables = repo.find_all().await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - 获取单个球台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<BilliardTable>> {
    let repo = BilliardTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建球台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BilliardTableCreate>,
) -> AppResult<Json<BilliardTable>> {
    if !payload.rate_per_hour.is_finite() || payload.rate_per_hour < 0.0 {
        return Err(AppError::validation("rate_per_hour must be non-negative"));
    }
    let repo = BilliardTableRepository::new(state.db.clone());
    let table = repo.create(payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/:id - 更新球台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BilliardTableUpdate>,
) -> AppResult<Json<BilliardTable>> {
    if let Some(rate) = payload.rate_per_hour
        && (!rate.is_finite() || rate < 0.0)
    {
        return Err(AppError::validation("rate_per_hour must be non-negative"));
    }
    let repo = BilliardTableRepository::new(state.db.clone());
    let table = repo.update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/:id - 删除球台
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = BilliardTableRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

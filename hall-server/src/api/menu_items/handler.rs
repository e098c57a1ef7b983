//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::menu_item::LowStockMenuItem;
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult};

/// Query params for listing menu items
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// Query params for the low-stock view
#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<i64>,
}

/// GET /api/menu-items - 获取餐品列表 (可按分类过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo.find_all(query.category.as_deref()).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/low-stock - 低库存餐品
pub async fn low_stock(
    State(state): State<ServerState>,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<Vec<LowStockMenuItem>>> {
    let threshold = query
        .threshold
        .unwrap_or(state.config.low_stock_threshold);
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo.find_low_stock(threshold).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/:id - 获取单个餐品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/menu-items - 创建餐品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(AppError::validation("price must be non-negative"));
    }
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.create(payload).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/:id - 更新餐品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(price) = payload.price
        && (!price.is_finite() || price < 0.0)
    {
        return Err(AppError::validation("price must be non-negative"));
    }
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id - 删除餐品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

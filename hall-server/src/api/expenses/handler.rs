//! Expense API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Expense, ExpenseCreate, ExpenseUpdate};
use crate::db::repository::ExpenseRepository;
use crate::utils::time::{day_start_millis, now_millis, parse_date, parse_date_range};
use crate::utils::{AppError, AppResult};

/// Query params for listing expenses
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/expenses - 按日期区间查询支出
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Expense>>> {
    let (start, end) = parse_date_range(&query.start_date, &query.end_date)?;
    let repo = ExpenseRepository::new(state.db.clone());
    let expenses = repo.find_range(start, end).await?;
    Ok(Json(expenses))
}

/// GET /api/expenses/:id - 获取单条支出
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Expense>> {
    let repo = ExpenseRepository::new(state.db.clone());
    let expense = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Expense {} not found", id)))?;
    Ok(Json(expense))
}

/// POST /api/expenses - 创建支出
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseCreate>,
) -> AppResult<Json<Expense>> {
    if !payload.amount.is_finite() || payload.amount <= 0.0 {
        return Err(AppError::validation("amount must be a positive number"));
    }
    let date = day_start_millis(parse_date(&payload.date)?);

    let now = now_millis();
    let expense = Expense {
        id: None,
        category: payload.category,
        description: payload.description,
        amount: payload.amount,
        date,
        created_at: now,
        updated_at: now,
    };

    let repo = ExpenseRepository::new(state.db.clone());
    let created = repo.create(expense).await?;
    Ok(Json(created))
}

/// PUT /api/expenses/:id - 更新支出
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> AppResult<Json<Expense>> {
    if let Some(amount) = payload.amount
        && (!amount.is_finite() || amount <= 0.0)
    {
        return Err(AppError::validation("amount must be a positive number"));
    }
    let date = match payload.date.as_deref() {
        Some(d) => Some(day_start_millis(parse_date(d)?)),
        None => None,
    };
    let repo = ExpenseRepository::new(state.db.clone());
    let expense = repo.update(&id, payload, date).await?;
    Ok(Json(expense))
}

/// DELETE /api/expenses/:id - 删除支出
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ExpenseRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

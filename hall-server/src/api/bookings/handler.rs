//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Booking, BookingCreate, BookingStatus, BookingUpdate};
use crate::db::repository::{BilliardTableRepository, BookingRepository};
use crate::utils::time::{day_start_millis, now_millis, parse_date, parse_date_range};
use crate::utils::{AppError, AppResult};

/// Query params for listing bookings
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/bookings - 按预订日期区间查询
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let (start, end) = parse_date_range(&query.start_date, &query.end_date)?;
    let repo = BookingRepository::new(state.db.clone());
    let bookings = repo.find_range(start, end).await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/:id - 获取单条预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let repo = BookingRepository::new(state.db.clone());
    let booking = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {} not found", id)))?;
    Ok(Json(booking))
}

/// POST /api/bookings - 创建预订 (快照台名)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    let booking_date = day_start_millis(parse_date(&payload.booking_date)?);

    let tables = BilliardTableRepository::new(state.db.clone());
    let table = tables
        .find_by_id(&payload.table_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", payload.table_id)))?;
    let table_id = table
        .id
        .clone()
        .ok_or_else(|| AppError::internal("table record missing id"))?;

    let now = now_millis();
    let booking = Booking {
        id: None,
        table: table_id,
        table_name: table.name,
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        booking_date,
        start_time: payload.start_time,
        end_time: payload.end_time,
        status: BookingStatus::Confirmed,
        note: payload.note,
        created_at: now,
        updated_at: now,
    };

    let repo = BookingRepository::new(state.db.clone());
    let created = repo.create(booking).await?;
    Ok(Json(created))
}

/// PUT /api/bookings/:id - 更新预订
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BookingUpdate>,
) -> AppResult<Json<Booking>> {
    let repo = BookingRepository::new(state.db.clone());
    let booking = repo.update(&id, payload).await?;
    Ok(Json(booking))
}

/// DELETE /api/bookings/:id - 删除预订
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = BookingRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

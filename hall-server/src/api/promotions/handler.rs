//! Promotion API Handlers
//!
//! 日期字段以 YYYY-MM-DD 传入，此处转换为毫秒时间戳：
//! start_date 取当日零点，end_date 取当日最后一毫秒 (窗口含头含尾)。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Promotion, PromotionCreate, PromotionStatus, PromotionUpdate};
use crate::db::repository::PromotionRepository;
use crate::utils::time::{day_end_millis, day_start_millis, now_millis, parse_date};
use crate::utils::{AppError, AppResult};

/// Query params for active promotions
#[derive(Debug, Deserialize)]
pub struct ActiveQuery {
    pub table_type: Option<String>,
}

/// GET /api/promotions - 全部优惠活动
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Promotion>>> {
    let repo = PromotionRepository::new(state.db.clone());
    let promos = repo.find_all().await?;
    Ok(Json(promos))
}

/// GET /api/promotions/active - 当前生效的优惠 (可按台型过滤)
pub async fn list_active(
    State(state): State<ServerState>,
    Query(query): Query<ActiveQuery>,
) -> AppResult<Json<Vec<Promotion>>> {
    let repo = PromotionRepository::new(state.db.clone());
    let promos = repo
        .find_active(query.table_type.as_deref(), now_millis())
        .await?;
    Ok(Json(promos))
}

/// GET /api/promotions/:id - 获取单个优惠
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Promotion>> {
    let repo = PromotionRepository::new(state.db.clone());
    let promo = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Promotion {} not found", id)))?;
    Ok(Json(promo))
}

/// POST /api/promotions - 创建优惠活动
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PromotionCreate>,
) -> AppResult<Json<Promotion>> {
    validate_parameters(
        payload.play_hours,
        payload.free_hours,
        payload.discount_pct,
        payload.discount_amt,
    )?;
    let start_date = day_start_millis(parse_date(&payload.start_date)?);
    let end_date = day_end_millis(parse_date(&payload.end_date)?) - 1;
    if end_date < start_date {
        return Err(AppError::validation("end_date is before start_date"));
    }

    let now = now_millis();
    let promo = Promotion {
        id: None,
        name: payload.name,
        description: payload.description,
        promotion_type: payload.promotion_type,
        play_hours: payload.play_hours,
        free_hours: payload.free_hours,
        discount_pct: payload.discount_pct,
        discount_amt: payload.discount_amt,
        table_types: payload.table_types,
        start_date,
        end_date,
        status: payload.status.unwrap_or(PromotionStatus::Active),
        created_at: now,
        updated_at: now,
    };

    let repo = PromotionRepository::new(state.db.clone());
    let created = repo.create(promo).await?;
    Ok(Json(created))
}

/// PUT /api/promotions/:id - 更新优惠活动
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PromotionUpdate>,
) -> AppResult<Json<Promotion>> {
    validate_parameters(
        payload.play_hours.unwrap_or(0.0),
        payload.free_hours.unwrap_or(0.0),
        payload.discount_pct.unwrap_or(0.0),
        payload.discount_amt.unwrap_or(0.0),
    )?;
    let start_date = match payload.start_date.as_deref() {
        Some(d) => Some(day_start_millis(parse_date(d)?)),
        None => None,
    };
    let end_date = match payload.end_date.as_deref() {
        Some(d) => Some(day_end_millis(parse_date(d)?) - 1),
        None => None,
    };

    let repo = PromotionRepository::new(state.db.clone());
    let updated = repo.update(&id, payload, start_date, end_date).await?;
    Ok(Json(updated))
}

/// DELETE /api/promotions/:id - 删除优惠活动
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = PromotionRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

fn validate_parameters(
    play_hours: f64,
    free_hours: f64,
    discount_pct: f64,
    discount_amt: f64,
) -> AppResult<()> {
    for (name, value) in [
        ("play_hours", play_hours),
        ("free_hours", free_hours),
        ("discount_amt", discount_amt),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::validation(format!(
                "{} must be non-negative, got {}",
                name, value
            )));
        }
    }
    if !discount_pct.is_finite() || !(0.0..=100.0).contains(&discount_pct) {
        return Err(AppError::validation(format!(
            "discount_pct must be between 0 and 100, got {}",
            discount_pct
        )));
    }
    Ok(())
}

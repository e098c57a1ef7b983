//! Promotion Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Discount rule type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionType {
    /// Play N hours, get M hours free (discount = free_hours × rate)
    FreeHours,
    /// Percentage off the table charge
    DiscountPct,
    /// Flat amount off
    DiscountAmt,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionStatus {
    Active,
    Inactive,
}

/// Promotion entity (优惠活动)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub promotion_type: PromotionType,
    /// FREE_HOURS: hours-played threshold
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub play_hours: f64,
    /// FREE_HOURS: hours granted once the threshold is reached
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub free_hours: f64,
    /// DISCOUNT_PCT: percentage (30 = 30%)
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub discount_pct: f64,
    /// DISCOUNT_AMT: flat amount in currency units
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub discount_amt: f64,
    /// Applicable table types; empty = all
    #[serde(default)]
    pub table_types: Vec<String>,
    /// Active window (Unix millis, inclusive)
    pub start_date: i64,
    pub end_date: i64,
    pub status: PromotionStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create promotion payload
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub promotion_type: PromotionType,
    #[serde(default)]
    pub play_hours: f64,
    #[serde(default)]
    pub free_hours: f64,
    #[serde(default)]
    pub discount_pct: f64,
    #[serde(default)]
    pub discount_amt: f64,
    #[serde(default)]
    pub table_types: Vec<String>,
    /// YYYY-MM-DD
    pub start_date: String,
    pub end_date: String,
    pub status: Option<PromotionStatus>,
}

/// Update promotion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub promotion_type: Option<PromotionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PromotionStatus>,
}

//! Table Session Model
//!
//! 场次是计费聚合根：开台创建，关台后不可变。
//! 台名/台型/费率在开台 (和转台) 时快照到场次上，
//! 保证历史账单不随球台记录后续修改而漂移。

use super::serde_helpers;
use super::{Payment, PaymentType, TableOrder};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Session lifecycle status
///
/// `ACTIVE → PAUSED → ACTIVE → … → CLOSED` (CLOSED terminal)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Active,
    Paused,
    Closed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "ACTIVE",
            SessionStatus::Paused => "PAUSED",
            SessionStatus::Closed => "CLOSED",
        }
    }
}

/// Table session entity (场次)
///
/// All timestamps are Unix millis; all minute fields are fractional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSession {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Current table reference
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    /// Snapshot at open/transfer time
    pub table_name: String,
    pub table_type: String,
    pub rate_per_hour: f64,
    pub status: SessionStatus,
    pub start_time: i64,
    #[serde(default)]
    pub end_time: Option<i64>,
    /// Set while PAUSED; cleared on resume
    #[serde(default)]
    pub paused_at: Option<i64>,
    /// Accrued incrementally on each resume
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub total_paused_mins: f64,
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub duration_mins: f64,
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub table_charge: f64,
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub food_total: f64,
    /// Manual discount supplied at close
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub discount: f64,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub promotion: Option<RecordId>,
    #[serde(default)]
    pub promotion_name: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub promotion_discount: f64,
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub grand_total: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Session detail view: session + nested orders/payments
#[derive(Debug, Clone, Serialize)]
pub struct TableSessionDetail {
    #[serde(flatten)]
    pub session: TableSession,
    pub orders: Vec<TableOrder>,
    pub payments: Vec<Payment>,
}

/// Open session payload
#[derive(Debug, Clone, Deserialize)]
pub struct OpenSession {
    pub table_id: String,
}

/// Close session payload; all fields optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloseSession {
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
    /// Payment type for the auto-created reconciling payment (defaults to CASH)
    #[serde(default)]
    pub payment_type: Option<PaymentType>,
    #[serde(default)]
    pub payment_note: Option<String>,
}

/// Transfer session payload
#[derive(Debug, Clone, Deserialize)]
pub struct TransferSession {
    pub new_table_id: String,
}

/// Apply promotion payload
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyPromotion {
    pub promotion_id: String,
}

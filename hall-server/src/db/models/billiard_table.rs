//! Billiard Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Table availability status
///
/// Mutated only by the session engine (open/close/transfer).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Available,
    InUse,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "AVAILABLE",
            TableStatus::InUse => "IN_USE",
        }
    }
}

/// Billiard table entity (球台)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilliardTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Table category, e.g. "SNOOKER" or "POOL"; promotions can be scoped to it
    pub table_type: String,
    pub rate_per_hour: f64,
    pub status: TableStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create billiard table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilliardTableCreate {
    pub name: String,
    pub table_type: String,
    pub rate_per_hour: f64,
    pub description: Option<String>,
}

/// Update billiard table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilliardTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

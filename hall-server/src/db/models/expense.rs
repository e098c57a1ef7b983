//! Expense Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Expense entity (支出)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    /// Expense day (Unix millis)
    pub date: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create expense payload
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseCreate {
    pub category: String,
    pub description: Option<String>,
    pub amount: f64,
    /// YYYY-MM-DD
    pub date: String,
}

/// Update expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

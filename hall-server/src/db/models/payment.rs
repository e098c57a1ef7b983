//! Payment Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Cash,
    Transfer,
    /// Deferred to credit; creates a creditor record
    Outstanding,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "CASH",
            PaymentType::Transfer => "TRANSFER",
            PaymentType::Outstanding => "OUTSTANDING",
        }
    }
}

/// Payment entity (收款), append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub session: RecordId,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Create payment payload
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCreate {
    pub session_id: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
}

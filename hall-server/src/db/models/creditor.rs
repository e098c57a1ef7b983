//! Creditor Model
//!
//! OUTSTANDING 收款产生应收账款记录，
//! 部分还款逐步核销，remaining 归零后记为 PAID。

use super::serde_helpers;
use super::PaymentType;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    Pending,
    Paid,
}

impl CreditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditStatus::Pending => "PENDING",
            CreditStatus::Paid => "PAID",
        }
    }
}

/// Creditor entity (挂账)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creditor {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub session: RecordId,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub amount: f64,
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub paid_amount: f64,
    pub remaining: f64,
    pub status: CreditStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub due_date: Option<i64>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Repayment record against a creditor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditorPayment {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub creditor: RecordId,
    pub amount: f64,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Repay payload
#[derive(Debug, Clone, Deserialize)]
pub struct CreditorRepay {
    pub amount: f64,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub note: Option<String>,
}

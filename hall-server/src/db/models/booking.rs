//! Booking Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

/// Booking entity (预订)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    pub table_name: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Booking day (Unix millis at 00:00 UTC)
    pub booking_date: i64,
    /// HH:MM
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create booking payload
#[derive(Debug, Clone, Deserialize)]
pub struct BookingCreate {
    pub table_id: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    /// YYYY-MM-DD
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub note: Option<String>,
}

/// Update booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

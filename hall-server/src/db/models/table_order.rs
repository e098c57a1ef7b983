//! Table Order Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order line entity (点单)
///
/// Name/price/cost are snapshotted from the menu item at order time.
/// An order line existing implies its quantity was reserved from stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOrder {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub session: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub cost_price: f64,
    pub quantity: i64,
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub discount: f64,
    /// price × quantity − discount, floored at 0
    pub total: f64,
    #[serde(default)]
    pub created_at: i64,
}

/// Place order payload
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrder {
    pub session_id: String,
    pub menu_item_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub discount: f64,
}

//! Order placement and cancellation
//!
//! Invariant: an order line existing implies its quantity was reserved
//! from menu-item stock. The pairing is create+decrement / delete+restore,
//! not a database constraint.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{PlaceOrder, TableOrder};
use crate::db::repository::{MenuItemRepository, TableOrderRepository, TableSessionRepository};
use crate::sessions::billing;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

pub struct OrderService {
    orders: TableOrderRepository,
    menu_items: MenuItemRepository,
    sessions: TableSessionRepository,
}

impl OrderService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: TableOrderRepository::new(db.clone()),
            menu_items: MenuItemRepository::new(db.clone()),
            sessions: TableSessionRepository::new(db),
        }
    }

    /// Place an order line against a session
    ///
    /// Snapshots name/price/cost from the menu item and reserves stock
    /// atomically; insufficient stock rejects without any state change.
    pub async fn place(&self, req: PlaceOrder) -> AppResult<TableOrder> {
        if req.quantity <= 0 {
            return Err(AppError::validation(format!(
                "quantity must be positive, got {}",
                req.quantity
            )));
        }
        if !req.discount.is_finite() || req.discount < 0.0 {
            return Err(AppError::validation(format!(
                "discount must be a non-negative number, got {}",
                req.discount
            )));
        }

        let session_key: RecordId = req.session_id.parse().map_err(|_| {
            AppError::validation(format!("Invalid session ID: {}", req.session_id))
        })?;
        self.sessions
            .find_by_id(&req.session_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Session {} not found", req.session_id)))?;

        let item = self
            .menu_items
            .find_by_id(&req.menu_item_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Menu item {} not found", req.menu_item_id))
            })?;
        let item_id = item
            .id
            .clone()
            .ok_or_else(|| AppError::internal("menu item record missing id"))?;

        if !self.menu_items.try_reserve(&item_id, req.quantity).await? {
            return Err(AppError::business_rule(format!(
                "Insufficient stock for '{}'",
                item.name
            )));
        }

        let order = TableOrder {
            id: None,
            session: session_key,
            menu_item: item_id.clone(),
            name: item.name,
            price: item.price,
            cost_price: item.cost_price,
            quantity: req.quantity,
            discount: req.discount,
            total: billing::line_total(item.price, req.quantity, req.discount),
            created_at: now_millis(),
        };

        match self.orders.create(order).await {
            Ok(created) => Ok(created),
            Err(e) => {
                // Reservation must not outlive a failed order write
                if let Err(restore_err) =
                    self.menu_items.adjust_quantity(&item_id, req.quantity).await
                {
                    tracing::error!(
                        menu_item = %item_id,
                        error = %restore_err,
                        "Failed to restore stock after order create failure"
                    );
                }
                Err(e.into())
            }
        }
    }

    /// Cancel an order line, restoring its reserved stock exactly
    pub async fn cancel(&self, order_id: &str) -> AppResult<()> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;
        let id = order
            .id
            .clone()
            .ok_or_else(|| AppError::internal("order record missing id"))?;

        self.orders.delete(&id).await?;
        self.menu_items
            .adjust_quantity(&order.menu_item, order.quantity)
            .await?;
        Ok(())
    }

    /// List order lines for a session
    pub async fn list_by_session(&self, session_id: &str) -> AppResult<Vec<TableOrder>> {
        let session_key: RecordId = session_id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid session ID: {}", session_id)))?;
        Ok(self.orders.list_by_session(&session_key).await?)
    }
}

//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemStatus, MenuItemUpdate};
use crate::utils::time::now_millis;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

/// Low-stock projection for the restock view
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct LowStockMenuItem {
    #[serde(default, with = "crate::db::models::serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find menu items, optionally filtered by category
    pub async fn find_all(&self, category: Option<&str>) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = match category {
            Some(cat) => {
                self.base
                    .db()
                    .query("SELECT * FROM menu_item WHERE category = $category ORDER BY name")
                    .bind(("category", cat.to_string()))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM menu_item ORDER BY name")
                    .await?
                    .take(0)?
            }
        };
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Create a menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let now = now_millis();
        let item = MenuItem {
            id: None,
            name: data.name,
            category: data.category,
            price: data.price,
            cost_price: data.cost_price.unwrap_or(0.0),
            quantity: data.quantity.unwrap_or(0),
            unit: data.unit,
            status: MenuItemStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let category = data.category.unwrap_or(existing.category);
        let price = data.price.unwrap_or(existing.price);
        let cost_price = data.cost_price.unwrap_or(existing.cost_price);
        let quantity = data.quantity.unwrap_or(existing.quantity);
        let unit = data.unit.or(existing.unit);
        let status = data.status.unwrap_or(existing.status);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, category = $category, price = $price, \
                 cost_price = $cost_price, quantity = $quantity, unit = $unit, \
                 status = $status, updated_at = $updated_at",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("category", category))
            .bind(("price", price))
            .bind(("cost_price", cost_price))
            .bind(("quantity", quantity))
            .bind(("unit", unit))
            .bind((
                "status",
                match status {
                    MenuItemStatus::Active => "ACTIVE",
                    MenuItemStatus::Inactive => "INACTIVE",
                },
            ))
            .bind(("updated_at", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Atomically reserve stock in a single conditional update, so two
    /// concurrent reservations cannot both succeed on the last units
    ///
    /// Returns false when stock is insufficient.
    pub async fn try_reserve(&self, id: &RecordId, qty: i64) -> RepoResult<bool> {
        let updated: Vec<MenuItem> = self
            .base
            .db()
            .query(
                "UPDATE $thing SET quantity = quantity - $qty, updated_at = $updated_at \
                 WHERE quantity >= $qty RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("qty", qty))
            .bind(("updated_at", now_millis()))
            .await?
            .take(0)?;
        Ok(!updated.is_empty())
    }

    /// Adjust stock by a signed delta (positive = release a reservation)
    pub async fn adjust_quantity(&self, id: &RecordId, delta: i64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET quantity = quantity + $delta, updated_at = $updated_at")
            .bind(("thing", id.clone()))
            .bind(("delta", delta))
            .bind(("updated_at", now_millis()))
            .await?;
        Ok(())
    }

    /// Items at or below the stock threshold, most depleted first
    pub async fn find_low_stock(&self, threshold: i64) -> RepoResult<Vec<LowStockMenuItem>> {
        let items: Vec<LowStockMenuItem> = self
            .base
            .db()
            .query(
                "SELECT id, name, category, quantity, unit FROM menu_item \
                 WHERE quantity <= $threshold AND status = 'ACTIVE' ORDER BY quantity ASC",
            )
            .bind(("threshold", threshold))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}

//! Table Order Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::TableOrder;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "table_order";

#[derive(Clone)]
pub struct TableOrderRepository {
    base: BaseRepository,
}

impl TableOrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List all order lines for a session
    pub async fn list_by_session(&self, session: &RecordId) -> RepoResult<Vec<TableOrder>> {
        let orders: Vec<TableOrder> = self
            .base
            .db()
            .query("SELECT * FROM table_order WHERE session = $session ORDER BY created_at ASC")
            .bind(("session", session.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TableOrder>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let order: Option<TableOrder> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Create an order line
    pub async fn create(&self, order: TableOrder) -> RepoResult<TableOrder> {
        let created: Option<TableOrder> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table order".to_string()))
    }

    /// Delete an order line
    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", id.clone()))
            .await?;
        Ok(())
    }
}

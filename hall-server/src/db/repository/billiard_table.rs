//! Billiard Table Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{BilliardTable, BilliardTableCreate, BilliardTableUpdate, TableStatus};
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "billiard_table";

#[derive(Clone)]
pub struct BilliardTableRepository {
    base: BaseRepository,
}

impl BilliardTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active tables
    pub async fn find_all(&self) -> RepoResult<Vec<BilliardTable>> {
        let tables: Vec<BilliardTable> = self
            .base
            .db()
            .query("SELECT * FROM billiard_table WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<BilliardTable>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let table: Option<BilliardTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<BilliardTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM billiard_table WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let tables: Vec<BilliardTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new table; name must be unique
    pub async fn create(&self, data: BilliardTableCreate) -> RepoResult<BilliardTable> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                data.name
            )));
        }

        let now = now_millis();
        let table = BilliardTable {
            id: None,
            name: data.name,
            table_type: data.table_type,
            rate_per_hour: data.rate_per_hour,
            status: TableStatus::Available,
            description: data.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<BilliardTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create billiard table".to_string()))
    }

    /// Update a table
    pub async fn update(&self, id: &str, data: BilliardTableUpdate) -> RepoResult<BilliardTable> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        if let Some(name) = data.name.as_ref()
            && name != &existing.name
            && self.find_by_name(name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                name
            )));
        }

        let name = data.name.unwrap_or(existing.name);
        let table_type = data.table_type.unwrap_or(existing.table_type);
        let rate_per_hour = data.rate_per_hour.unwrap_or(existing.rate_per_hour);
        let description = data.description.or(existing.description);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, table_type = $table_type, \
                 rate_per_hour = $rate_per_hour, description = $description, \
                 is_active = $is_active, updated_at = $updated_at",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("table_type", table_type))
            .bind(("rate_per_hour", rate_per_hour))
            .bind(("description", description))
            .bind(("is_active", is_active))
            .bind(("updated_at", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Set table availability status
    pub async fn set_status(&self, id: &RecordId, status: TableStatus) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $updated_at")
            .bind(("thing", id.clone()))
            .bind(("status", status.as_str().to_string()))
            .bind(("updated_at", now_millis()))
            .await?;
        Ok(())
    }

    /// Hard delete a table
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

//! Expense Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Expense, ExpenseUpdate};
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "expense";

#[derive(Clone)]
pub struct ExpenseRepository {
    base: BaseRepository,
}

impl ExpenseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List expenses dated in [start, end)
    pub async fn find_range(&self, start: i64, end: i64) -> RepoResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self
            .base
            .db()
            .query(
                "SELECT * FROM expense WHERE date >= $start AND date < $end \
                 ORDER BY date DESC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(expenses)
    }

    /// Find expense by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Expense>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let expense: Option<Expense> = self.base.db().select(thing).await?;
        Ok(expense)
    }

    /// Create an expense
    pub async fn create(&self, expense: Expense) -> RepoResult<Expense> {
        let created: Option<Expense> = self.base.db().create(TABLE).content(expense).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create expense".to_string()))
    }

    /// Update an expense
    ///
    /// `date` arrives pre-converted to millis by the handler layer.
    pub async fn update(
        &self,
        id: &str,
        data: ExpenseUpdate,
        date: Option<i64>,
    ) -> RepoResult<Expense> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))?;

        self.base
            .db()
            .query(
                "UPDATE $thing SET category = $category, description = $description, \
                 amount = $amount, date = $date, updated_at = $updated_at",
            )
            .bind(("thing", thing))
            .bind(("category", data.category.unwrap_or(existing.category)))
            .bind(("description", data.description.or(existing.description)))
            .bind(("amount", data.amount.unwrap_or(existing.amount)))
            .bind(("date", date.unwrap_or(existing.date)))
            .bind(("updated_at", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))
    }

    /// Hard delete an expense
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

//! Payment Repository
//!
//! 收款记录只增不改；删除是独立的管理操作，不在关台流程内。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Payment;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "payment";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List payments for a session
    pub async fn list_by_session(&self, session: &RecordId) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE session = $session ORDER BY created_at ASC")
            .bind(("session", session.to_string()))
            .await?
            .take(0)?;
        Ok(payments)
    }

    /// List payments created in [start, end)
    pub async fn list_by_range(&self, start: i64, end: i64) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query(
                "SELECT * FROM payment WHERE created_at >= $start AND created_at < $end \
                 ORDER BY created_at ASC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(payments)
    }

    /// Create a payment record
    pub async fn create(&self, payment: Payment) -> RepoResult<Payment> {
        let created: Option<Payment> = self.base.db().create(TABLE).content(payment).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create payment".to_string()))
    }

    /// Administrative delete
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

//! Creditor Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{CreditStatus, Creditor, CreditorPayment};
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "creditor";
const PAYMENT_TABLE: &str = "creditor_payment";

#[derive(Clone)]
pub struct CreditorRepository {
    base: BaseRepository,
}

impl CreditorRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List creditors, optionally filtered by status
    pub async fn find_all(&self, status: Option<CreditStatus>) -> RepoResult<Vec<Creditor>> {
        let creditors: Vec<Creditor> = match status {
            Some(s) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM creditor WHERE status = $status ORDER BY created_at DESC",
                    )
                    .bind(("status", s.as_str().to_string()))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM creditor ORDER BY created_at DESC")
                    .await?
                    .take(0)?
            }
        };
        Ok(creditors)
    }

    /// Find creditor by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Creditor>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let creditor: Option<Creditor> = self.base.db().select(thing).await?;
        Ok(creditor)
    }

    /// Create a creditor record
    pub async fn create(&self, creditor: Creditor) -> RepoResult<Creditor> {
        let created: Option<Creditor> = self.base.db().create(TABLE).content(creditor).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create creditor".to_string()))
    }

    /// Persist repayment bookkeeping fields
    pub async fn update_balance(
        &self,
        id: &RecordId,
        paid_amount: f64,
        remaining: f64,
        status: CreditStatus,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $thing SET paid_amount = $paid_amount, remaining = $remaining, \
                 status = $status, updated_at = $updated_at",
            )
            .bind(("thing", id.clone()))
            .bind(("paid_amount", paid_amount))
            .bind(("remaining", remaining))
            .bind(("status", status.as_str().to_string()))
            .bind(("updated_at", now_millis()))
            .await?;
        Ok(())
    }

    /// Append a repayment record
    pub async fn create_payment(&self, payment: CreditorPayment) -> RepoResult<CreditorPayment> {
        let created: Option<CreditorPayment> = self
            .base
            .db()
            .create(PAYMENT_TABLE)
            .content(payment)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create creditor payment".to_string()))
    }

    /// List repayments for a creditor
    pub async fn list_payments(&self, creditor: &RecordId) -> RepoResult<Vec<CreditorPayment>> {
        let payments: Vec<CreditorPayment> = self
            .base
            .db()
            .query(
                "SELECT * FROM creditor_payment WHERE creditor = $creditor \
                 ORDER BY created_at ASC",
            )
            .bind(("creditor", creditor.to_string()))
            .await?
            .take(0)?;
        Ok(payments)
    }
}

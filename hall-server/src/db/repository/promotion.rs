//! Promotion Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Promotion, PromotionStatus, PromotionType, PromotionUpdate};
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "promotion";

#[derive(Clone)]
pub struct PromotionRepository {
    base: BaseRepository,
}

impl PromotionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all promotions, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Promotion>> {
        let promos: Vec<Promotion> = self
            .base
            .db()
            .query("SELECT * FROM promotion ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(promos)
    }

    /// Find promotion by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Promotion>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let promo: Option<Promotion> = self.base.db().select(thing).await?;
        Ok(promo)
    }

    /// Promotions active at `now`, optionally restricted to a table type
    ///
    /// An empty `table_types` list means the promotion applies to every type.
    pub async fn find_active(
        &self,
        table_type: Option<&str>,
        now: i64,
    ) -> RepoResult<Vec<Promotion>> {
        let promos: Vec<Promotion> = match table_type {
            Some(tt) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM promotion WHERE status = 'ACTIVE' \
                         AND start_date <= $now AND end_date >= $now \
                         AND (array::len(table_types) = 0 OR $table_type IN table_types)",
                    )
                    .bind(("now", now))
                    .bind(("table_type", tt.to_string()))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM promotion WHERE status = 'ACTIVE' \
                         AND start_date <= $now AND end_date >= $now",
                    )
                    .bind(("now", now))
                    .await?
                    .take(0)?
            }
        };
        Ok(promos)
    }

    /// Create a promotion
    pub async fn create(&self, promo: Promotion) -> RepoResult<Promotion> {
        let created: Option<Promotion> = self.base.db().create(TABLE).content(promo).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create promotion".to_string()))
    }

    /// Update a promotion
    ///
    /// Date fields arrive pre-converted to millis by the handler layer.
    pub async fn update(
        &self,
        id: &str,
        data: PromotionUpdate,
        start_date: Option<i64>,
        end_date: Option<i64>,
    ) -> RepoResult<Promotion> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Promotion {} not found", id)))?;

        let promotion_type = data.promotion_type.unwrap_or(existing.promotion_type);
        let status = data.status.unwrap_or(existing.status);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, description = $description, type = $type, \
                 play_hours = $play_hours, free_hours = $free_hours, \
                 discount_pct = $discount_pct, discount_amt = $discount_amt, \
                 table_types = $table_types, start_date = $start_date, end_date = $end_date, \
                 status = $status, updated_at = $updated_at",
            )
            .bind(("thing", thing))
            .bind(("name", data.name.unwrap_or(existing.name)))
            .bind(("description", data.description.or(existing.description)))
            .bind((
                "type",
                match promotion_type {
                    PromotionType::FreeHours => "FREE_HOURS",
                    PromotionType::DiscountPct => "DISCOUNT_PCT",
                    PromotionType::DiscountAmt => "DISCOUNT_AMT",
                },
            ))
            .bind(("play_hours", data.play_hours.unwrap_or(existing.play_hours)))
            .bind(("free_hours", data.free_hours.unwrap_or(existing.free_hours)))
            .bind((
                "discount_pct",
                data.discount_pct.unwrap_or(existing.discount_pct),
            ))
            .bind((
                "discount_amt",
                data.discount_amt.unwrap_or(existing.discount_amt),
            ))
            .bind(("table_types", data.table_types.unwrap_or(existing.table_types)))
            .bind(("start_date", start_date.unwrap_or(existing.start_date)))
            .bind(("end_date", end_date.unwrap_or(existing.end_date)))
            .bind((
                "status",
                match status {
                    PromotionStatus::Active => "ACTIVE",
                    PromotionStatus::Inactive => "INACTIVE",
                },
            ))
            .bind(("updated_at", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Promotion {} not found", id)))
    }

    /// Hard delete a promotion
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

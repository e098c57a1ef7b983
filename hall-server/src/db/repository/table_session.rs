//! Table Session Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::TableSession;
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "table_session";

#[derive(Clone)]
pub struct TableSessionRepository {
    base: BaseRepository,
}

impl TableSessionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find sessions whose start_time falls in [start, end)
    pub async fn find_range(&self, start: i64, end: i64) -> RepoResult<Vec<TableSession>> {
        let sessions: Vec<TableSession> = self
            .base
            .db()
            .query(
                "SELECT * FROM table_session WHERE start_time >= $start AND start_time < $end \
                 ORDER BY start_time DESC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(sessions)
    }

    /// Find session by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TableSession>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let session: Option<TableSession> = self.base.db().select(thing).await?;
        Ok(session)
    }

    /// Find the ACTIVE or PAUSED session bound to a table, if any
    ///
    /// Table-status gating guarantees at most one such session per table.
    pub async fn find_active_by_table(
        &self,
        table: &RecordId,
    ) -> RepoResult<Option<TableSession>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM table_session WHERE table = $table \
                 AND status IN ['ACTIVE', 'PAUSED'] LIMIT 1",
            )
            .bind(("table", table.to_string()))
            .await?;
        let sessions: Vec<TableSession> = result.take(0)?;
        Ok(sessions.into_iter().next())
    }

    /// Create a new session
    pub async fn create(&self, mut session: TableSession) -> RepoResult<TableSession> {
        let now = now_millis();
        session.created_at = now;
        session.updated_at = now;
        let created: Option<TableSession> = self.base.db().create(TABLE).content(session).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table session".to_string()))
    }

    /// Persist all mutable session fields
    ///
    /// Full-field write: the caller holds the per-session lock, so the
    /// read-modify-write cannot interleave with another mutation.
    pub async fn update(&self, id: &RecordId, session: &TableSession) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $thing SET status = $status, end_time = $end_time, \
                 paused_at = $paused_at, total_paused_mins = $total_paused_mins, \
                 duration_mins = $duration_mins, table_charge = $table_charge, \
                 food_total = $food_total, discount = $discount, \
                 promotion = $promotion, promotion_name = $promotion_name, \
                 promotion_discount = $promotion_discount, grand_total = $grand_total, \
                 note = $note, table = $table, table_name = $table_name, \
                 table_type = $table_type, rate_per_hour = $rate_per_hour, \
                 updated_at = $updated_at",
            )
            .bind(("thing", id.clone()))
            .bind(("status", session.status.as_str().to_string()))
            .bind(("end_time", session.end_time))
            .bind(("paused_at", session.paused_at))
            .bind(("total_paused_mins", session.total_paused_mins))
            .bind(("duration_mins", session.duration_mins))
            .bind(("table_charge", session.table_charge))
            .bind(("food_total", session.food_total))
            .bind(("discount", session.discount))
            .bind(("promotion", session.promotion.as_ref().map(|p| p.to_string())))
            .bind(("promotion_name", session.promotion_name.clone()))
            .bind(("promotion_discount", session.promotion_discount))
            .bind(("grand_total", session.grand_total))
            .bind(("note", session.note.clone()))
            .bind(("table", session.table.to_string()))
            .bind(("table_name", session.table_name.clone()))
            .bind(("table_type", session.table_type.clone()))
            .bind(("rate_per_hour", session.rate_per_hour))
            .bind(("updated_at", now_millis()))
            .await?;
        Ok(())
    }
}

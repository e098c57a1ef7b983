//! Session Engine: table-rental lifecycle and invoice computation
//!
//! # State machine
//!
//! ```text
//! Open ──► ACTIVE ◄──────► PAUSED
//!            │   resume/pause  │
//!            └──── Close ◄─────┘
//!                    │
//!                 CLOSED (terminal)
//! ```
//!
//! # Close sequence
//!
//! ```text
//! close(session_id)
//!     ├─ 1. Acquire per-session lock
//!     ├─ 2. Re-read session, reject if CLOSED
//!     ├─ 3. Fold an in-progress pause into total_paused_mins
//!     ├─ 4. Compute duration and table charge (minimum one hour)
//!     ├─ 5. Recompute promotion discount from final elapsed minutes
//!     ├─ 6. Sum orders → food_total, payments → paid_total
//!     ├─ 7. Auto-create one reconciling payment if a balance remains
//!     ├─ 8. Persist CLOSED session
//!     └─ 9. Release the table
//! ```
//!
//! A failure at any step aborts the close: the session stays open and the
//! table stays IN_USE. Overpayment is neither refunded nor flagged.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    ApplyPromotion, CloseSession, OpenSession, Payment, PaymentType, SessionStatus, TableSession,
    TableSessionDetail, TableStatus, TransferSession,
};
use crate::db::repository::{
    BilliardTableRepository, PaymentRepository, PromotionRepository, TableOrderRepository,
    TableSessionRepository,
};
use crate::utils::time::{millis_to_minutes, now_millis};
use crate::utils::{AppError, AppResult};

use super::billing;
use super::locks::SessionLocks;

/// Orchestrates table state, time accrual, promotion application and
/// invoice finalization
pub struct SessionEngine {
    sessions: TableSessionRepository,
    tables: BilliardTableRepository,
    orders: TableOrderRepository,
    payments: PaymentRepository,
    promotions: PromotionRepository,
    locks: SessionLocks,
    /// Abort close when the attached promotion cannot be loaded,
    /// instead of keeping the previewed discount
    strict_promotion_close: bool,
}

impl std::fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine")
            .field("strict_promotion_close", &self.strict_promotion_close)
            .finish()
    }
}

impl SessionEngine {
    pub fn new(db: Surreal<Db>, strict_promotion_close: bool) -> Self {
        Self {
            sessions: TableSessionRepository::new(db.clone()),
            tables: BilliardTableRepository::new(db.clone()),
            orders: TableOrderRepository::new(db.clone()),
            payments: PaymentRepository::new(db.clone()),
            promotions: PromotionRepository::new(db),
            locks: SessionLocks::new(),
            strict_promotion_close,
        }
    }

    /// Open a session against an available table
    ///
    /// Serialized per table: two concurrent opens cannot both see AVAILABLE.
    pub async fn open(&self, req: OpenSession) -> AppResult<TableSession> {
        let table_key: RecordId = req
            .table_id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid table ID: {}", req.table_id)))?;

        let _guard = self.locks.acquire(&table_key.to_string()).await;

        let table = self
            .tables
            .find_by_id(&req.table_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {} not found", req.table_id)))?;
        if table.status != TableStatus::Available {
            return Err(AppError::business_rule(format!(
                "Table '{}' is not available",
                table.name
            )));
        }
        let table_id = table
            .id
            .clone()
            .ok_or_else(|| AppError::internal("table record missing id"))?;

        let session = TableSession {
            id: None,
            table: table_id.clone(),
            table_name: table.name,
            table_type: table.table_type,
            rate_per_hour: table.rate_per_hour,
            status: SessionStatus::Active,
            start_time: now_millis(),
            end_time: None,
            paused_at: None,
            total_paused_mins: 0.0,
            duration_mins: 0.0,
            table_charge: 0.0,
            food_total: 0.0,
            discount: 0.0,
            promotion: None,
            promotion_name: None,
            promotion_discount: 0.0,
            grand_total: 0.0,
            note: None,
            created_at: 0,
            updated_at: 0,
        };

        let created = self.sessions.create(session).await?;
        self.tables.set_status(&table_id, TableStatus::InUse).await?;

        tracing::info!(
            session = %created.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            table = %table_id,
            "Session opened"
        );
        Ok(created)
    }

    /// Pause an active session
    ///
    /// Records the pause start; nothing is added to total_paused_mins yet.
    pub async fn pause(&self, session_id: &str) -> AppResult<TableSession> {
        let (_guard, mut session, id) = self.lock_and_load(session_id).await?;

        if session.status != SessionStatus::Active {
            return Err(AppError::business_rule("Session is not active"));
        }
        session.paused_at = Some(now_millis());
        session.status = SessionStatus::Paused;
        self.sessions.update(&id, &session).await?;
        Ok(session)
    }

    /// Resume a paused session
    ///
    /// Paused time accrues incrementally here so multiple pause/resume
    /// cycles compose additively.
    pub async fn resume(&self, session_id: &str) -> AppResult<TableSession> {
        let (_guard, mut session, id) = self.lock_and_load(session_id).await?;

        let Some(paused_at) = session.paused_at else {
            return Err(AppError::business_rule("Session is not paused"));
        };
        if session.status != SessionStatus::Paused {
            return Err(AppError::business_rule("Session is not paused"));
        }
        session.total_paused_mins += millis_to_minutes(now_millis() - paused_at);
        session.paused_at = None;
        session.status = SessionStatus::Active;
        self.sessions.update(&id, &session).await?;
        Ok(session)
    }

    /// Move a running session to another available table
    ///
    /// The new table's rate applies to the whole elapsed duration at close;
    /// billing is not split per segment.
    pub async fn transfer(
        &self,
        session_id: &str,
        req: TransferSession,
    ) -> AppResult<TableSession> {
        let new_table_key: RecordId = req.new_table_id.parse().map_err(|_| {
            AppError::validation(format!("Invalid table ID: {}", req.new_table_id))
        })?;

        let (_guard, mut session, id) = self.lock_and_load(session_id).await?;
        // Lock ordering: session first, then table (same as open)
        let _table_guard = self.locks.acquire(&new_table_key.to_string()).await;

        if session.status == SessionStatus::Closed {
            return Err(AppError::business_rule("Session already closed"));
        }

        let new_table = self
            .tables
            .find_by_id(&req.new_table_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Table {} not found", req.new_table_id))
            })?;
        if new_table.status != TableStatus::Available {
            return Err(AppError::business_rule(format!(
                "Table '{}' is not available",
                new_table.name
            )));
        }
        let new_table_id = new_table
            .id
            .clone()
            .ok_or_else(|| AppError::internal("table record missing id"))?;

        let old_table_id = session.table.clone();
        session.table = new_table_id.clone();
        session.table_name = new_table.name;
        session.table_type = new_table.table_type;
        session.rate_per_hour = new_table.rate_per_hour;
        self.sessions.update(&id, &session).await?;

        self.tables
            .set_status(&old_table_id, TableStatus::Available)
            .await?;
        self.tables
            .set_status(&new_table_id, TableStatus::InUse)
            .await?;

        tracing::info!(session = %id, from = %old_table_id, to = %new_table_id, "Session transferred");
        Ok(session)
    }

    /// Attach a promotion and store a preview discount
    ///
    /// The preview uses elapsed active minutes so far; the definitive
    /// discount is recomputed at close from the final elapsed minutes.
    pub async fn apply_promotion(
        &self,
        session_id: &str,
        req: ApplyPromotion,
    ) -> AppResult<TableSession> {
        let promotion_key: RecordId = req.promotion_id.parse().map_err(|_| {
            AppError::validation(format!("Invalid promotion ID: {}", req.promotion_id))
        })?;

        let (_guard, mut session, id) = self.lock_and_load(session_id).await?;

        if session.status == SessionStatus::Closed {
            return Err(AppError::business_rule("Session already closed"));
        }

        let promo = self
            .promotions
            .find_by_id(&req.promotion_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Promotion {} not found", req.promotion_id))
            })?;

        let elapsed =
            billing::active_minutes(now_millis(), session.start_time, session.total_paused_mins);
        let preview_charge = elapsed / 60.0 * session.rate_per_hour;
        let discount =
            billing::promotion_discount(&promo, elapsed, session.rate_per_hour, preview_charge);

        session.promotion = Some(promotion_key);
        session.promotion_name = Some(promo.name);
        session.promotion_discount = discount;
        self.sessions.update(&id, &session).await?;
        Ok(session)
    }

    /// Close a session and compute the final invoice
    pub async fn close(&self, session_id: &str, req: CloseSession) -> AppResult<TableSession> {
        let (_guard, mut session, id) = self.lock_and_load(session_id).await?;

        if session.status == SessionStatus::Closed {
            return Err(AppError::business_rule("Session already closed"));
        }

        if let Some(discount) = req.discount {
            if !discount.is_finite() || discount < 0.0 {
                return Err(AppError::validation(format!(
                    "discount must be a non-negative number, got {}",
                    discount
                )));
            }
            session.discount = discount;
        }
        if req.note.is_some() {
            session.note = req.note.clone();
        }

        let now = now_millis();

        // Closing while paused: fold the open pause interval in first,
        // so pause time is never billed.
        if session.status == SessionStatus::Paused
            && let Some(paused_at) = session.paused_at.take()
        {
            session.total_paused_mins += millis_to_minutes(now - paused_at);
        }

        let total_mins =
            billing::active_minutes(now, session.start_time, session.total_paused_mins);
        session.duration_mins = billing::round2(total_mins);
        session.table_charge = billing::table_charge(total_mins, session.rate_per_hour);

        // Recompute the promotion discount from the final elapsed minutes,
        // replacing the preview stored at apply time.
        if let Some(promotion_id) = session.promotion.clone() {
            match self.promotions.find_by_id(&promotion_id.to_string()).await {
                Ok(Some(promo)) => {
                    session.promotion_discount = billing::promotion_discount(
                        &promo,
                        total_mins,
                        session.rate_per_hour,
                        session.table_charge,
                    );
                }
                Ok(None) if self.strict_promotion_close => {
                    return Err(AppError::business_rule(format!(
                        "Promotion {} no longer exists",
                        promotion_id
                    )));
                }
                Err(e) if self.strict_promotion_close => {
                    return Err(e.into());
                }
                Ok(None) => {
                    tracing::warn!(
                        session = %id,
                        promotion = %promotion_id,
                        "Promotion missing at close, keeping previewed discount"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        session = %id,
                        promotion = %promotion_id,
                        error = %e,
                        "Promotion lookup failed at close, keeping previewed discount"
                    );
                }
            }
        }

        let orders = self.orders.list_by_session(&id).await?;
        session.food_total = billing::sum_amounts(orders.iter().map(|o| o.total));

        session.grand_total = billing::grand_total(
            session.table_charge,
            session.food_total,
            session.discount,
            session.promotion_discount,
        );

        let payments = self.payments.list_by_session(&id).await?;
        let paid_total = billing::sum_amounts(payments.iter().map(|p| p.amount));

        // Auto-create one reconciling payment for any remaining balance.
        // A failure here aborts the close before CLOSED is persisted.
        let remaining = billing::round2(session.grand_total - paid_total);
        if remaining > 0.0 {
            self.payments
                .create(Payment {
                    id: None,
                    session: id.clone(),
                    payment_type: req.payment_type.unwrap_or(PaymentType::Cash),
                    amount: remaining,
                    note: req.payment_note.clone(),
                    created_at: now,
                })
                .await?;
        }

        session.status = SessionStatus::Closed;
        session.end_time = Some(now);
        self.sessions.update(&id, &session).await?;

        self.tables
            .set_status(&session.table, TableStatus::Available)
            .await?;

        tracing::info!(
            session = %id,
            duration_mins = session.duration_mins,
            grand_total = session.grand_total,
            "Session closed"
        );
        Ok(session)
    }

    /// Session with nested orders and payments
    pub async fn get_detail(&self, session_id: &str) -> AppResult<TableSessionDetail> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Session {} not found", session_id)))?;
        let id = session
            .id
            .clone()
            .ok_or_else(|| AppError::internal("session record missing id"))?;

        let orders = self.orders.list_by_session(&id).await?;
        let payments = self.payments.list_by_session(&id).await?;
        Ok(TableSessionDetail {
            session,
            orders,
            payments,
        })
    }

    /// Sessions started in [start, end), newest first
    pub async fn list(&self, start: i64, end: i64) -> AppResult<Vec<TableSession>> {
        Ok(self.sessions.find_range(start, end).await?)
    }

    /// The ACTIVE or PAUSED session on a table, if any
    pub async fn active_for_table(&self, table_id: &str) -> AppResult<Option<TableSession>> {
        let table_key: RecordId = table_id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid table ID: {}", table_id)))?;
        Ok(self.sessions.find_active_by_table(&table_key).await?)
    }

    /// Acquire the per-session lock, then re-read the session
    ///
    /// The read happens under the lock so the caller's state checks cannot
    /// race another mutation.
    async fn lock_and_load(
        &self,
        session_id: &str,
    ) -> AppResult<(tokio::sync::OwnedMutexGuard<()>, TableSession, RecordId)> {
        let session_key: RecordId = session_id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid session ID: {}", session_id)))?;

        let guard = self.locks.acquire(&session_key.to_string()).await;

        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Session {} not found", session_id)))?;
        let id = session
            .id
            .clone()
            .ok_or_else(|| AppError::internal("session record missing id"))?;
        Ok((guard, session, id))
    }
}

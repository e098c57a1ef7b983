//! Booking Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Booking, BookingStatus, BookingUpdate};
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List bookings for a day range [start, end)
    pub async fn find_range(&self, start: i64, end: i64) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking WHERE booking_date >= $start AND booking_date < $end \
                 ORDER BY booking_date ASC, start_time ASC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Find booking by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let booking: Option<Booking> = self.base.db().select(thing).await?;
        Ok(booking)
    }

    /// Create a booking
    pub async fn create(&self, booking: Booking) -> RepoResult<Booking> {
        let created: Option<Booking> = self.base.db().create(TABLE).content(booking).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// Update a booking
    pub async fn update(&self, id: &str, data: BookingUpdate) -> RepoResult<Booking> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))?;

        let status = data.status.unwrap_or(existing.status);

        self.base
            .db()
            .query(
                "UPDATE $thing SET customer_name = $customer_name, \
                 customer_phone = $customer_phone, start_time = $start_time, \
                 end_time = $end_time, status = $status, note = $note, \
                 updated_at = $updated_at",
            )
            .bind(("thing", thing))
            .bind((
                "customer_name",
                data.customer_name.unwrap_or(existing.customer_name),
            ))
            .bind((
                "customer_phone",
                data.customer_phone.or(existing.customer_phone),
            ))
            .bind(("start_time", data.start_time.unwrap_or(existing.start_time)))
            .bind(("end_time", data.end_time.unwrap_or(existing.end_time)))
            .bind((
                "status",
                match status {
                    BookingStatus::Confirmed => "CONFIRMED",
                    BookingStatus::Cancelled => "CANCELLED",
                    BookingStatus::Completed => "COMPLETED",
                },
            ))
            .bind(("note", data.note.or(existing.note)))
            .bind(("updated_at", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))
    }

    /// Hard delete a booking
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

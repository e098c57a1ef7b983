//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.
//!
//! # ID Convention
//!
//! 全栈统一使用 "table:id" 格式：
//!   - 解析: let id: RecordId = "billiard_table:abc".parse()?;
//!   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId
//!
//! 实体间引用字段经 serde_helpers 序列化为 "table:id" 字符串存储，
//! 查询比较时绑定同样的字符串形式。
//!
//! 时间戳一律为 `i64` Unix millis，由调用方传入。

// Venue
pub mod billiard_table;
pub mod booking;
pub mod expense;

// Catalog
pub mod menu_item;
pub mod promotion;

// Billing
pub mod creditor;
pub mod payment;
pub mod table_order;
pub mod table_session;

// Re-exports
pub use billiard_table::BilliardTableRepository;
pub use booking::BookingRepository;
pub use creditor::CreditorRepository;
pub use expense::ExpenseRepository;
pub use menu_item::MenuItemRepository;
pub use payment::PaymentRepository;
pub use promotion::PromotionRepository;
pub use table_order::TableOrderRepository;
pub use table_session::TableSessionRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

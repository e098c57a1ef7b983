//! Database Module
//!
//! 嵌入式 SurrealDB 存储 (RocksDB 引擎)。
//! 表结构为 schemaless，仅定义必要的唯一索引。

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "baize";
const DATABASE: &str = "hall";

/// Open the embedded database at the given path and apply schema definitions
pub async fn open(db_path: &Path) -> Result<Surreal<Db>, AppError> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    define_schema(&db).await?;

    tracing::info!(path = %db_path.display(), "Database ready (SurrealDB embedded)");
    Ok(db)
}

/// Apply table and index definitions (idempotent)
///
/// Tests call this directly against an in-memory engine.
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "
        DEFINE TABLE IF NOT EXISTS billiard_table SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS billiard_table_name ON billiard_table FIELDS name UNIQUE;

        DEFINE TABLE IF NOT EXISTS table_session SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS table_session_start ON table_session FIELDS start_time;

        DEFINE TABLE IF NOT EXISTS table_order SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS table_order_session ON table_order FIELDS session;

        DEFINE TABLE IF NOT EXISTS payment SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS payment_session ON payment FIELDS session;

        DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS promotion SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS creditor SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS creditor_payment SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS booking SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS expense SCHEMALESS;
        ",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to apply schema definitions: {e}")))?;
    Ok(())
}

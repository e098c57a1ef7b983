//! Per-entity async locks
//!
//! 同一场次的并发变更必须串行化：读-改-写之间不加锁会让两个并发
//! 关台请求同时通过 "not closed" 前置检查，各自再生成一笔找零收款。

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lock registry keyed by record id string
///
/// Entries are never evicted; the map is bounded by the number of
/// sessions and tables touched since startup.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the lock for the given key, waiting if another mutation holds it
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        lock.lock_owned().await
    }
}

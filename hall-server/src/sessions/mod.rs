//! Table Session Module
//!
//! 场次生命周期与计费引擎：
//!
//! - **engine**: 状态机编排 (open/pause/resume/transfer/apply_promotion/close)
//! - **billing**: 计费算术 (rust_decimal, 2 位小数半进位)
//! - **locks**: 按场次/球台串行化变更的锁表

pub mod billing;
pub mod engine;
pub mod locks;

pub use engine::SessionEngine;
pub use locks::SessionLocks;

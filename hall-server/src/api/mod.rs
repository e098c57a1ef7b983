//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`tables`] - 球台管理接口
//! - [`sessions`] - 场次生命周期接口
//! - [`table_orders`] - 点单接口
//! - [`menu_items`] - 餐品管理接口
//! - [`payments`] - 收款接口
//! - [`promotions`] - 优惠活动管理接口
//! - [`creditors`] - 挂账接口
//! - [`bookings`] - 预订管理接口
//! - [`expenses`] - 支出管理接口

pub mod health;

pub mod bookings;
pub mod creditors;
pub mod expenses;
pub mod menu_items;
pub mod payments;
pub mod promotions;
pub mod sessions;
pub mod table_orders;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

//! Baize Hall Server - 台球厅运营后端
//!
//! # 架构概述
//!
//! 本模块是 Hall Server 的主入口，提供以下核心功能：
//!
//! - **场次引擎** (`sessions`): 开台/暂停/恢复/转台/优惠/关台的状态机与计费
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **点单** (`ordering`): 餐品下单与库存预留
//! - **挂账** (`credit`): OUTSTANDING 收款与应收核销
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! hall-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! ├── sessions/      # 场次状态机与计费引擎
//! ├── ordering/      # 点单与库存
//! ├── credit/        # 收款与挂账
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod credit;
pub mod db;
pub mod ordering;
pub mod sessions;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState, app_router};
pub use credit::CreditService;
pub use ordering::OrderService;
pub use sessions::SessionEngine;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____        _
   / __ )____ _(_)___  ___
  / __  / __ `/ /_  / / _ \
 / /_/ / /_/ / / / /_/  __/
/_____/\__,_/_/ /___/\___/
    __  __      ____
   / / / /___ _/ / /
  / /_/ / __ `/ / /
 / __  / /_/ / / /
/_/ /_/\__,_/_/_/
    "#
    );
}

//! Server State

use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::credit::CreditService;
use crate::ordering::OrderService;
use crate::sessions::SessionEngine;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 (SurrealDB) |
/// | session_engine | 场次状态机与计费 |
/// | order_service | 点单/撤单与库存预留 |
/// | credit_service | 收款与挂账 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub session_engine: Arc<SessionEngine>,
    pub order_service: Arc<OrderService>,
    pub credit_service: Arc<CreditService>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .finish()
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：工作目录结构 → 数据库 → 各服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("hall.db");
        let db = crate::db::open(&db_path)
            .await
            .expect("Failed to initialize database");

        Self::with_db(config.clone(), db)
    }

    /// 基于现成数据库句柄构造状态 (测试用内存引擎也走这里)
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let session_engine = Arc::new(SessionEngine::new(
            db.clone(),
            config.strict_promotion_close,
        ));
        let order_service = Arc::new(OrderService::new(db.clone()));
        let credit_service = Arc::new(CreditService::new(db.clone()));

        Self {
            config,
            db,
            session_engine,
            order_service,
            credit_service,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}

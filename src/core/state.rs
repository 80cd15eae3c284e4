//! 服务器状态

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::usage::UsageGuard;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / Clone 实现浅拷贝，所有权成本极低。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 引用完整性守卫 (删除前的依赖检查)
    pub usage_guard: UsageGuard,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 打开数据库 (含索引定义、规则校验、幂等种子数据) 并装配服务。
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(config).await?;
        let db = db_service.db;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let usage_guard = UsageGuard::new(db.clone());

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            usage_guard,
        })
    }
}

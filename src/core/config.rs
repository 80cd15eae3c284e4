//! 服务器配置

use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_PATH | ./data/techpress.db | RocksDB 数据目录 (":memory:" 使用内存引擎) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | ADMIN_PASSWORD | (未设置) | 首次启动时引导管理员账号的密码 |
/// | LOG_DIR | (未设置) | 日志文件目录，未设置则仅输出到控制台 |
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据库路径 (":memory:" 表示内存引擎)
    pub database_path: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 首次启动时引导管理员账号的密码
    pub admin_password: Option<String>,
    /// 日志文件目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/techpress.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// 内存数据库配置 (测试用)
    pub fn for_tests() -> Self {
        Self {
            database_path: ":memory:".into(),
            http_port: 0,
            jwt: JwtConfig {
                secret: "test-secret-that-is-long-enough-for-hs256".into(),
                expiration_minutes: 60,
                issuer: "techpress-server".into(),
                audience: "techpress-clients".into(),
            },
            environment: "test".into(),
            request_timeout_ms: 5000,
            admin_password: None,
            log_dir: None,
        }
    }
}

use techpress_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境与日志
    dotenv::dotenv().ok();
    let config = Config::from_env();
    techpress_server::init_logger_with_file(None, config.log_dir.as_deref());

    tracing::info!("TechPress server starting...");

    // 2. 初始化服务器状态 (数据库、索引、种子数据)
    let state = ServerState::initialize(&config).await.map_err(|e| {
        tracing::error!("Initialization failed: {}", e);
        anyhow::anyhow!("initialization failed: {e}")
    })?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(anyhow::anyhow!("server error: {e}"));
    }

    Ok(())
}

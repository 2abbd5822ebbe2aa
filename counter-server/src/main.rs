use counter_server::{Server, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment()?;

    print_banner();
    tracing::info!("Counter server starting...");

    // 2. 初始化并启动 HTTP 服务器 (Ctrl-C 优雅退出)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

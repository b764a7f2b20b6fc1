use anyhow::{Context, Result};
use slr_paper_screener::config::Config;
use slr_paper_screener::logger;
use slr_paper_screener::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    let app = App::initialize(config).await.context("启动检查失败")?;
    app.run().await.context("运行失败")?;

    Ok(())
}

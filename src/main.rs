use anyhow::Result;
use clap::Parser;
use question_time::cli::Cli;
use question_time::utils::logging;
use question_time::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).run(cli.command).await
}

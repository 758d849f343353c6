use anyhow::Result;
use exam_question_parser::orchestrator::App;
use exam_question_parser::utils::logging;
use exam_question_parser::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}

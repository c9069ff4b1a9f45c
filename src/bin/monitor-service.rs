use driftwatch_ui_terminal::{bootstrap, logging, service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let level = std::env::var("DRIFTWATCH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    logging::init_tracing(&level);

    let config = bootstrap::load_config(None)?;
    service::run_service(config).await
}

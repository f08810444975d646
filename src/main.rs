use std::process::ExitCode;

use coupon_service::config::AppConfig;
use coupon_service::server;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    server::init_tracing(&config.server);

    if let Err(e) = server::run(config).await {
        tracing::error!(error = %e, "coupon service stopped with an error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use royale_autopilot::api::HttpApi;
use royale_autopilot::config::{AppConfig, CONFIG_PATH};
use royale_autopilot::controller::Controller;
use royale_autopilot::reporter;

#[derive(Parser)]
#[command(
    name = "royale-autopilot",
    about = "Claim royale rewards and keep buying tickets, forever"
)]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// Override `account.user_id` from the config file
    #[arg(long)]
    user_id: Option<u64>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(user_id) = args.user_id {
        config.account.user_id = user_id;
    }
    config.validate()?;
    info!("Loaded config from {}", args.config.display());

    let settings = config.controller_config();
    info!(
        "Starting royale autopilot — user={} battle_check={}ms api_interval={}ms",
        settings.user_id,
        settings.battle_check_interval.as_millis(),
        settings.api_interval.as_millis(),
    );

    let api = HttpApi::new(settings.endpoints.clone(), settings.user_id);
    let mut controller = Controller::new(api, settings);

    if args.once {
        controller.run_cycle().await;
    } else {
        info!("Entering cycle loop. Press Ctrl+C to stop.");
        controller
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!("Failed to listen for Ctrl+C: {e}");
                    std::future::pending::<()>().await;
                }
                info!("Shutdown signal received");
            })
            .await;
    }

    let summary = controller.stats().summary(chrono::Utc::now());
    reporter::report_exit_summary(&summary);

    Ok(())
}

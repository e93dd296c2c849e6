//! Probe: latest battle status
//!
//! POSTs `{ "user_id": <id> }` to the latest-battle endpoint and documents:
//! - HTTP status and latency
//! - Raw response body
//! - Which action the autopilot would take for it

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Value, json};

use royale_autopilot::config::{AppConfig, CONFIG_PATH};
use royale_autopilot::engine::decide;
use royale_autopilot::types::BattleStatus;

#[derive(Parser)]
#[command(name = "probe_status", about = "Fetch and print the latest battle status once")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// Override `account.user_id` from the config file
    #[arg(long)]
    user_id: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args.config)?;
    let user_id = args.user_id.unwrap_or(config.account.user_id);
    let url = &config.endpoints.latest_battle;

    println!("=== Probe: latest battle status ===");
    println!("User: {user_id}");
    println!("URL:  {url}");
    println!();

    let client = reqwest::Client::new();
    let start = Instant::now();
    let resp = client
        .post(url)
        .json(&json!({ "user_id": user_id }))
        .send()
        .await?;
    let latency = start.elapsed();
    let status = resp.status();
    let text = resp.text().await?;
    println!("Status: {status}");
    println!("Latency: {latency:?}");
    println!();

    let body: Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(_) => {
            println!("Body is not JSON:");
            println!("{text}");
            return Ok(());
        }
    };
    println!("Body:");
    println!("{}", serde_json::to_string_pretty(&body)?);
    println!();

    if let Some(user_data) = body.get("user_data").and_then(Value::as_object) {
        println!("user_data fields:");
        for key in user_data.keys() {
            println!("  - {key}");
        }
        println!();
    }

    let parsed: BattleStatus =
        serde_json::from_value(body).context("body does not match the expected status shape")?;
    println!("Decision: {:?}", decide(&parsed));

    Ok(())
}

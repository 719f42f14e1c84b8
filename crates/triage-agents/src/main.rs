use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use triage_agents::{ExaSearch, RigModelClient, TriageConfig, TriagePipeline};

const DEFAULT_ALERT: &str = "Payment processing service completely down. All transactions \
failing with 500 errors. Checkout page not loading. Revenue impact in progress.";

/// Local harness: triage one alert and print the result.
#[derive(Debug, Parser)]
#[command(name = "triage-agents", version, about)]
struct Cli {
    /// Alert text. Defaults to a canned payment-outage alert.
    alert: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = TriageConfig::from_env();
    config.validate().context("Invalid triage configuration")?;

    info!(
        model = %config.model.model,
        endpoint = %config.model.base_url,
        search = %config.search.url,
        budget_secs = config.execution_budget_secs,
        "Triage agent starting"
    );

    let model = RigModelClient::from_config(&config.model)?;
    let search = ExaSearch::from_config(&config.search);
    let pipeline = TriagePipeline::new(Box::new(model), Box::new(search), &config);

    let alert = cli.alert.unwrap_or_else(|| DEFAULT_ALERT.to_string());
    println!("Running triage agent...\n");
    println!("Alert:\n{}\n", alert.trim());
    println!("{}", "=".repeat(80));

    let output = pipeline.run(&alert).await;
    println!("{output}");

    Ok(())
}

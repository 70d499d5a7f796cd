use anyhow::Result;
use clap::Parser;
use resume_matcher::cli::{handle_command, Cli};
use resume_matcher::config::AppConfig;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

const DEFAULT_LOG_FILTER: &str = "resume_matcher=info,rocket::server=off";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging first
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let (plain, json) = if cli.log_json {
        (
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            ),
        )
    } else {
        (Some(fmt::layer()), None)
    };
    Registry::default()
        .with(filter)
        .with(plain)
        .with(json)
        .init();

    let config = AppConfig::load()?;
    handle_command(cli, config).await
}

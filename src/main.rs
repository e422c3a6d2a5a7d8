//! Proxy Probe - Entry Point
//!
//! Runs one check pass over the configured proxies and exits.

use std::io;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use proxy_probe::config::{Config, LogConfig};
use proxy_probe::{ConsoleReport, HyperProbeClient, ProxyChecker};

#[tokio::main(flavor = "current_thread")]
async fn main() -> proxy_probe::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log);

    info!(
        "Starting proxy probe: {} proxies, {}s timeout",
        config.checker.endpoints.len(),
        config.checker.timeout.as_secs()
    );

    let checker = ProxyChecker::new(HyperProbeClient::new(), &config.checker);
    let mut report = ConsoleReport::new(io::stdout().lock());
    checker
        .run_all_checks(&config.checker.endpoints, &mut report)
        .await?;

    info!("Proxy probe finished");
    Ok(())
}

/// Logs go to stderr so stdout carries only the report
fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("proxy_probe={}", log.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if log.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }
}

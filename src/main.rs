//! Block until Kubernetes services have external IPs or load balancer ingress.
//!
//! # Environment Variables
//!
//! - `WAIT_NAMESPACE`: namespace to search (default: all namespaces)
//! - `WAIT_TIMEOUT_SECS`: total time budget in seconds (default: 300)
//! - `WAIT_POLL_INTERVAL_SECS`: seconds between polls (default: 5)
//! - `RUST_LOG`: log filter (default: info)

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use external_ip_wait::{WaitConfig, wait};
use tracing::{Level, error, info};

/// Wait for Kubernetes services to become externally available
#[derive(Parser, Debug)]
#[command(name = "external-ip-wait", version, about, long_about = None)]
struct Cli {
    /// Service names to wait for (matched as substrings of pod names)
    #[arg(required = true, num_args = 1..)]
    services: Vec<String>,

    /// Namespace to search; all namespaces when omitted
    #[arg(short, long, env = "WAIT_NAMESPACE")]
    namespace: Option<String>,

    /// Total time budget in seconds
    #[arg(long, env = "WAIT_TIMEOUT_SECS", default_value_t = 300)]
    timeout: u64,

    /// Seconds between polls
    #[arg(long, env = "WAIT_POLL_INTERVAL_SECS", default_value_t = 5)]
    poll_interval: u64,
}

impl Cli {
    fn into_config(self) -> WaitConfig {
        let mut config = WaitConfig::new(self.services)
            .timeout(Duration::from_secs(self.timeout))
            .poll_interval(Duration::from_secs(self.poll_interval));
        if let Some(ns) = self.namespace {
            config = config.namespace(ns);
        }

        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()),
        )
        .init();

    let config = Cli::parse().into_config();

    info!(
        "Waiting up to {:?} for {:?} (polling every {:?})",
        config.timeout, config.service_names, config.poll_interval
    );
    if let Some(ref ns) = config.namespace {
        info!("Namespace: {ns}");
    }

    match wait(config).await {
        Ok(()) => {
            info!("All services are externally available");
            ExitCode::SUCCESS
        }

        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

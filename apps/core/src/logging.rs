//! Tracing subscriber setup.
//!
//! `RUST_LOG` drives filtering (default `info`). JSON output uses the Bunyan
//! layout so log shippers can parse it; pretty output is for local runs.

use crate::config::LogFormat;
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

const APP_NAME: &str = "heartline";

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Build the subscriber without installing it.
pub fn build_subscriber(format: LogFormat, default_directive: &str) -> Box<dyn Subscriber + Send + Sync> {
    let registry = Registry::default().with(env_filter(default_directive));
    match format {
        LogFormat::Json => Box::new(
            registry
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(APP_NAME.to_string(), std::io::stdout)),
        ),
        LogFormat::Pretty => Box::new(registry.with(fmt::layer().with_target(false))),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(format: LogFormat) -> anyhow::Result<()> {
    set_global_default(build_subscriber(format, "info"))?;
    Ok(())
}

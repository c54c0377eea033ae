//! Logging setup
//!
//! Logs always go to stderr: stdout belongs to the wrapped tool.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `binlaunch=warn`, `binlaunch=info` with `--verbose`)
//! - `BINLAUNCH_LOG_FORMAT`: `json` for structured output, anything else for compact text

use anyhow::Result;
use binlaunch_core::constants::ENV_LOG_FORMAT;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(verbose: bool) -> Result<()> {
    let default_directive = if verbose {
        "binlaunch=info"
    } else {
        "binlaunch=warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directive))?;

    let log_format = std::env::var(ENV_LOG_FORMAT).unwrap_or_else(|_| "compact".to_string());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}

//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation for the workspace binaries.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LogConfig, init_tracing};
//!
//! init_tracing(&LogConfig::from_verbose_level(2))?;
//! tracing::debug!(target: "dirent::dir", "visible at -vv");
//! ```

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use super::config::{LOG_ENV, LogConfig};

/// Installs a global subscriber writing to stderr.
///
/// The filter comes from [`LOG_ENV`] when it is set and parses, otherwise
/// from [`LogConfig::directive`]. Fails if a global subscriber is already set.
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    init_tracing_with_writer(config, io::stderr)
}

/// Installs a global subscriber writing to `writer`.
pub fn init_tracing_with_writer<W>(config: &LogConfig, writer: W) -> Result<(), TryInitError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .without_time();

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(layer)
        .try_init()
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(config.directive()))
}

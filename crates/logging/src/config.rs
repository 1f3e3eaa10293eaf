//! crates/logging/src/config.rs
//! Verbosity configuration mapped onto tracing filter directives.

use tracing::level_filters::LevelFilter;

/// Target used for directory handle lifecycle events.
pub const DIR_TARGET: &str = "dirent::dir";

/// Target used for per-entry native search events.
pub const SEARCH_TARGET: &str = "dirent::search";

/// Environment variable whose value replaces the computed filter directive.
pub const LOG_ENV: &str = "DIRENT_LOG";

/// Logging configuration shared by the workspace binaries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogConfig {
    level: LevelFilter,
    directive: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_verbose_level(0)
    }
}

impl LogConfig {
    /// Creates a configuration from a `-v` count.
    ///
    /// Level 0 keeps warnings only, 1 adds per-directory summaries, 2 adds
    /// handle lifecycle events (open, exhaustion, close) and 3 or more adds
    /// per-entry tracing.
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        let level = match level {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level,
            directive: None,
        }
    }

    /// Replaces the computed directive with an explicit `EnvFilter` directive.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// Returns the level selected for workspace targets.
    #[must_use]
    pub const fn level(&self) -> LevelFilter {
        self.level
    }

    /// Returns the filter directive this configuration installs.
    ///
    /// Third-party crates stay at `warn`; the dirent targets and the listing
    /// tool follow the configured level.
    #[must_use]
    pub fn directive(&self) -> String {
        match &self.directive {
            Some(directive) => directive.clone(),
            None => {
                let level = self.level.to_string().to_lowercase();
                format!("warn,dirent={level},dirls={level}")
            }
        }
    }
}

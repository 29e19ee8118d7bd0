//! Logging setup for formcraft.
//!
//! Library code only emits `tracing` events. The binary installs one
//! subscriber at startup with [`init_logging`]; events go to stderr so
//! command output on stdout can be piped.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// How much the binary logs, chosen with `-q` and `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// `-q`: errors only.
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// `-v`: also saves, submissions and deletions.
    Verbose,
    /// `-vv`: also every storage read and builder edit.
    Trace,
}

impl Verbosity {
    /// Map the command-line flags. `quiet` wins over any `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level shown.
    #[must_use]
    pub fn level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::Trace => LevelFilter::DEBUG,
        }
    }

    /// Filter directive limited to this crate's events.
    fn directive(self) -> String {
        format!("formcraft={}", self.level())
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, replaces the filter derived from `verbosity`.
/// Calling this again is harmless; the first subscriber stays.
///
/// # Examples
///
/// ```no_run
/// use formcraft::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= Verbosity::Trace)
        .without_time()
        .try_init();
}

/// Initialize logging for tests: warnings and errors only.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

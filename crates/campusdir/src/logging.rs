//! Diagnostic logging.
//!
//! Diagnostics go to stderr through `tracing`, so they never mix with the
//! rendered output on stdout. `RUST_LOG` overrides the level picked from the
//! command line.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much diagnostic output to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and errors, such as rejected session input.
    #[default]
    Normal,
    /// Catalog loading, searches and transitions.
    Verbose,
    /// Everything, including blank-query short circuits.
    Trace,
}

impl Verbosity {
    /// Map the `--quiet` flag and the `-v` count to a verbosity.
    ///
    /// Quiet wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level that gets through.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn directive(self) -> String {
        format!("campusdir={}", self.level())
    }

    fn is_detailed(self) -> bool {
        matches!(self, Self::Verbose | Self::Trace)
    }
}

/// Install the global subscriber.
///
/// Only the first call has any effect. Module targets are shown from
/// [`Verbosity::Verbose`] up, source locations only at [`Verbosity::Trace`].
///
/// # Examples
///
/// ```no_run
/// use campusdir::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity.is_detailed())
        .with_file(verbosity == Verbosity::Trace)
        .with_line_number(verbosity == Verbosity::Trace);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

/// Route logs to the test harness's captured output.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("campusdir=debug")
        .with_test_writer()
        .try_init();
}

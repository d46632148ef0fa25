//! Maps a CLI verbosity count onto a global `tracing` subscriber.
//!
//! The store has no analogue of rsync's dozens of per-subsystem INFO/DEBUG
//! flags, so this is a single linear scale rather than a flag matrix:
//! `-q` lowers it, each `-v` raises it, and [`init`] installs a
//! `tracing_subscriber::fmt` subscriber writing to stderr so stdout stays
//! available for structured command output.
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Once;

use tracing::Level;

static INIT: Once = Once::new();

/// Verbosity requested on the command line, as a signed count: `-q` counts
/// as `-1`, bare invocation is `0`, each `-v` adds `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerbosityConfig {
    level: i8,
}

impl VerbosityConfig {
    /// Builds a config from `-v` repeat count minus `-q` repeat count.
    #[must_use]
    pub fn new(level: i8) -> Self {
        Self { level }
    }

    /// The raw signed verbosity level.
    #[must_use]
    pub const fn level(self) -> i8 {
        self.level
    }

    /// Maps this level onto a `tracing::Level`, clamped at the extremes.
    #[must_use]
    pub fn tracing_level(self) -> Level {
        match self.level {
            i8::MIN..=-1 => Level::ERROR,
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Installs the global subscriber exactly once; later calls are no-ops so
/// tests and repeated CLI entry points can call it unconditionally.
pub fn init(config: VerbosityConfig) {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(config.tracing_level())
            .with_writer(std::io::stderr)
            .init();
    });
}

//! Logger bootstrap for the binary and for tests that want to see output.
use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Filter applied when `RUST_LOG` is unset.
///
/// Verbose mode only raises this crate to `debug`; Bevy and other
/// dependencies stay at `info` so per-frame steering logs remain readable.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("{},{}={level}", LevelFilter::Info, env!("CARGO_CRATE_NAME"))
}

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` overrides [`default_filter`]. Calling this more than once is
/// harmless.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set.
    if builder.try_init().is_err() {
        debug!("logger already installed; keeping it");
    }
}

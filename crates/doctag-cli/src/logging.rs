//! Log output of the CLI
//!
//! Library crates log through `tracing`; the binary installs a fmt subscriber
//! on stderr so stdout stays free for command output such as `dump-model`.

use tracing_subscriber::EnvFilter;

/// Filter used when no flag is given and `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Filter directive selected by the verbosity flags, if any
pub fn flag_filter(verbose: bool, quiet: bool) -> Option<&'static str> {
    match (verbose, quiet) {
        (true, _) => Some("debug"),
        (false, true) => Some("warn"),
        (false, false) => None,
    }
}

/// Install the global subscriber.
///
/// `-v`/`-q` win over `RUST_LOG`, which wins over [`DEFAULT_FILTER`].
pub fn init(verbose: bool, quiet: bool) {
    let filter = match flag_filter(verbose, quiet) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("A global subscriber was already installed");
    }
}

/// Diagnostic logging to stderr.
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Overrides the default filter, e.g. `LOGPARSE_LOG=logparse=trace`.
pub const LOG_ENV: &str = "LOGPARSE_LOG";

/// Install the global subscriber. `--verbose` raises the default level to debug.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "logparse=debug"
    } else {
        "logparse=warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

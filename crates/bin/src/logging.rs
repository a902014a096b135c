//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub(crate) const LOG_ENV: &str = "HOBART_LOG";

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// JSON and CSV output.
pub(crate) fn init(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

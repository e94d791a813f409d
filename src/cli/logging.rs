//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize logging based on debug flag
///
/// Logs go to stderr so stdout only ever carries the dependency list.
/// `RUST_LOG` takes precedence over the flag.
pub fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    if debug {
        builder
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        builder.with_target(false).without_time().init();
    }
}

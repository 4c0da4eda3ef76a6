use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Env var holding an EnvFilter directive, e.g. `placement_io=debug`.
pub const LOG_ENV: &str = "PLACEMENT_LOG";

/// Install the stderr subscriber. `log` records from the library crates are
/// bridged in along with it.
///
/// `PLACEMENT_LOG` wins when set; otherwise `-v`/`-vv` pick the level.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .without_time();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}

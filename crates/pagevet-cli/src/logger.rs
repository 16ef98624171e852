//! Logging infrastructure for the pagevet CLI.
//!
//! Structured logging via the `tracing` ecosystem, written to stderr.
//! The per-URL diagnostic lines are printed directly by the library and
//! never pass through tracing, so the default output stays exactly the
//! diagnostic surface.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber.
///
/// Call once at startup, before any logging occurs.
///
/// # Verbosity Levels
///
/// 1. `--verbose`: debug level for the pagevet crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: warn level
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("pagevet=debug,pagevet_cli=debug")
    } else if quiet {
        EnvFilter::new("pagevet=error,pagevet_cli=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pagevet=warn,pagevet_cli=warn"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

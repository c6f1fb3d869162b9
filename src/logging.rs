//! Logging setup.
//!
//! Agents log through `tracing`. Output goes to stderr so stdout stays free
//! for the board display and status line.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber.
///
/// `level` is the default directive (`"info"`, `"debug"`, ...); `RUST_LOG`
/// directives are layered on top. Unknown levels fall back to `info`.
/// Calling this twice is harmless: the second call leaves the first
/// subscriber in place.
pub fn init_logging(level: Option<&str>) {
    let level = match level.map(str::to_ascii_lowercase).as_deref() {
        Some("trace") => tracing::Level::TRACE,
        Some("debug") => tracing::Level::DEBUG,
        Some("warn") => tracing::Level::WARN,
        Some("error") => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init();
}

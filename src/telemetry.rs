use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global JSON subscriber. `RUST_LOG` controls the filter and
/// falls back to `info` when unset or unparsable.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // CloudWatch stamps every line itself.
    fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(true)
        .without_time()
        .with_ansi(false)
        .init();
}

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Diagnostics go to stderr so the
/// JSON transport on stdout stays clean; `RUST_LOG` overrides the default
/// `info` filter.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
}

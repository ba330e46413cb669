use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// Filtering is controlled with `RUST_LOG`; the default of `info` keeps
/// the bot's own progress messages visible in the workflow log.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a stderr tracing subscriber filtered by `RUST_LOG`, falling back
/// to `default_directives` when it's unset or invalid.
pub fn setup_logging(default_directives: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init()
}

// Logging setup for binaries and tests built on eterm
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

// ETERM_LOG wins over RUST_LOG so eterm can be tuned without touching the host app
pub const ENV_LOG: &str = "ETERM_LOG";
const DEFAULT_FILTER: &str = "eterm=info,eterm_transport=info";

fn filter_directives() -> String {
    std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install a stderr `fmt` subscriber. Returns false if one was already set.
pub fn init_logging() -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directives()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok()
}

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber.
///
/// Filter precedence is `RUST_LOG`, then `LOG_LEVEL`, then `default_level`.
/// Per-statement sqlx logging is capped at `warn` unless the filter mentions `sqlx`.
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(default_level: &str) -> bool {
    let directives = filter_directives(default_level);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

fn filter_directives(default_level: &str) -> String {
    let base = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| default_level.to_owned());

    if base.contains("sqlx") {
        base
    } else {
        format!("{base},sqlx=warn")
    }
}

pub fn init() {
    // Initialize tracing subscriber once, honoring RUST_LOG if set.
    // Default to info level; write to stderr so command output stays clean.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a metrics-like line; there is no exporter behind it.
pub fn log_metric(scope: &str, metric: &str, value: f64) {
    tracing::info!(scope = scope, metric = metric, value = value, "metric");
}

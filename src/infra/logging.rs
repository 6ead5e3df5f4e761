use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Логгер для CLI. RUST_LOG важнее `default_level`.
pub fn init_cli_logger(verbose: bool, json: bool, default_level: &str) {
    let fallback = if verbose {
        "poker_client=debug,info".to_string()
    } else {
        format!("poker_client={default_level}")
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}

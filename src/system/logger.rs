use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter directives are read from `TICKLOAD_LOG`, then `RUST_LOG`.
pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = std::env::var("TICKLOAD_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default_level(verbose)),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

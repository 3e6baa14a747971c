use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr; stdout carries usage and progress output.
pub fn init_logging(log_level: Level) {
    let level_filter = LevelFilter::from_level(log_level);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(stderr_layer.with_filter(level_filter))
        .init();
}

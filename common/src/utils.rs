// common/src/utils.rs
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Parse a `LOG_LEVEL` style value, defaulting to INFO
pub fn parse_level(value: Option<&str>) -> Level {
    value
        .and_then(|v| Level::from_str(v.trim()).ok())
        .unwrap_or(Level::INFO)
}

/// Setup tracing for the client.
///
/// Logs go to stderr so stdout stays reserved for the rendered view.
pub fn setup_tracing() {
    let level = parse_level(std::env::var("LOG_LEVEL").ok().as_deref());
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

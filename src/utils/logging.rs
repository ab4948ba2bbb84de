use std::str::FromStr;
use tracing::Level;
use crate::core::domain::Configuration;

// Installs a JSON fmt subscriber at the configured level. Returns false when a
// global subscriber was already set, which leaves the existing one in place.
pub fn setup_tracing(config: &Configuration) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(parse_level(config.log_level.as_str()))
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .json()
        .try_init()
        .is_ok()
}

pub(crate) fn parse_level(level: &str) -> Level {
    Level::from_str(level).unwrap_or(Level::INFO)
}

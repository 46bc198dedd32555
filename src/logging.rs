//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter from `RUST_LOG`, or from `log_level` when it is unset or invalid.
pub fn env_filter(log_level: &str) -> EnvFilter {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_or(directives.as_deref(), log_level)
}

fn filter_or(directives: Option<&str>, log_level: &str) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(log_level))
}

/// Install the global fmt subscriber.
///
/// Only the first call installs anything, later calls keep the existing subscriber.
pub fn init(log_level: &str) {
    let result = tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn test_init_twice() {
        init("debug");
        init("info");
        tracing::info!("still logging");
    }

    #[rstest]
    #[case::unset(None, "warn", "warn")]
    #[case::blank(Some(" "), "warn", "warn")]
    #[case::directives(Some("debug"), "warn", "debug")]
    #[case::invalid_directives(Some("crate=loud"), "warn", "warn")]
    fn test_filter_or(
        #[case] directives: Option<&str>,
        #[case] log_level: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(filter_or(directives, log_level).to_string(), expected);
    }
}

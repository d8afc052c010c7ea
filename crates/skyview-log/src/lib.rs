//! Structured logging for skyview.
//!
//! Console output with uptime timestamps and module targets, plus a JSON log
//! file in debug builds. `RUST_LOG` wins over the configured level.

use std::path::Path;

use skyview_config::Config;
use tracing::info;
pub use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives appended to every filter to keep GPU backend chatter down.
const BACKEND_DIRECTIVES: &str = "wgpu=warn,naga=warn";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "skyview.log";

/// Build the filter string for the given configuration.
///
/// An empty configured level falls back to `info`.
pub fn filter_directives(config: Option<&Config>) -> String {
    let level = config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or("info");
    format!("{level},{BACKEND_DIRECTIVES}")
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(filter_directives(None))
}

/// Install the global tracing subscriber.
///
/// `log` records emitted by lower crates are bridged into the subscriber.
/// When `debug_build` is set and `log_dir` can be created, a JSON file layer
/// writes to `log_dir/skyview.log` as well.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));
    let filter = env_filter.to_string();

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).try_init()?;
        info!(%filter, log_file = %log_dir.join(LOG_FILE_NAME).display(), "Logging initialized");
        return Ok(());
    }

    subscriber.try_init()?;
    info!(%filter, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let directives = filter_directives(None);
        assert_eq!(directives, "info,wgpu=warn,naga=warn");
        let filter_str = format!("{}", default_env_filter());
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
    }

    #[test]
    fn test_config_level_is_used() {
        let mut config = Config::default();
        config.debug.log_level = "debug,skyview_sky=trace".to_string();
        let directives = filter_directives(Some(&config));
        assert!(directives.starts_with("debug,skyview_sky=trace"));
        assert!(directives.ends_with(BACKEND_DIRECTIVES));
    }

    #[test]
    fn test_blank_config_level_falls_back_to_info() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert!(filter_directives(Some(&config)).starts_with("info,"));
    }

    #[test]
    fn test_directives_parse() {
        for level in ["error", "warn", "info", "debug,skyview_ui=trace"] {
            let mut config = Config::default();
            config.debug.log_level = level.to_string();
            let directives = filter_directives(Some(&config));
            assert!(
                EnvFilter::try_new(&directives).is_ok(),
                "failed to parse {directives}"
            );
        }
    }

    #[test]
    fn test_debug_init_writes_startup_record_to_file() {
        let dir = tempfile::tempdir().unwrap();
        // Only one test can own the global subscriber.
        if init_logging(Some(dir.path()), true, None).is_err()
            || std::env::var_os("RUST_LOG").is_some()
        {
            return;
        }
        let contents = std::fs::read_to_string(dir.path().join(LOG_FILE_NAME)).unwrap();
        assert!(contents.contains("Logging initialized"));
        assert!(contents.contains("wgpu=warn"));
    }

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let first = init_logging(Some(dir.path()), true, None);
        let second = init_logging(None, false, None);
        // Another test may have won the race for the global subscriber, but
        // at most one call can succeed.
        assert!(first.is_err() || second.is_err());
    }
}

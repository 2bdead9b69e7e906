//! Logger setup for both targets.
//!
//! The logger is installed before the configuration is read so that problems
//! with the config itself get reported. The configured level is applied
//! afterwards with [`set_level`].

use crate::config::LogLevel;

/// Install the global logger at the default level. Safe to call more than
/// once; later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    // The logger itself passes everything; log::max_level does the filtering
    // unless RUST_LOG narrows it
    let result = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .parse_default_env()
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialized");
    }
    set_level(LogLevel::default());
}

/// Install the global logger at the default level. Safe to call more than
/// once; later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    if console_log::init_with_level(log::Level::Trace).is_err() {
        log::debug!("Logger already initialized");
    }
    set_level(LogLevel::default());
}

/// Apply the configured verbosity. RUST_LOG, when set, takes precedence.
pub fn set_level(level: LogLevel) {
    if env_filter_set() {
        return;
    }
    log::set_max_level(level.to_level_filter());
}

#[cfg(not(target_arch = "wasm32"))]
fn env_filter_set() -> bool {
    std::env::var_os("RUST_LOG").is_some()
}

#[cfg(target_arch = "wasm32")]
fn env_filter_set() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_applied_after_init() {
        init();
        if env_filter_set() {
            return;
        }
        assert_eq!(log::max_level(), log::LevelFilter::Info);

        // A warning from config loading is visible before the config level applies
        assert!(log::log_enabled!(log::Level::Warn));

        set_level(LogLevel::Debug);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        assert!(log::log_enabled!(log::Level::Debug));

        set_level(LogLevel::Error);
        assert!(!log::log_enabled!(log::Level::Warn));
    }
}

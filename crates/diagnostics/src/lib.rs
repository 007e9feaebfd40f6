//! Logging for the theorem catalog tools.
//!
//! Usage:
//! - Set CATALOG_LOG=off (default) - no logs
//! - Set CATALOG_LOG=warn - rejected records, fallbacks, sync conflicts
//! - Set CATALOG_LOG=info - load, render and sync summaries
//! - Set CATALOG_LOG=debug - per-record detail

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "CATALOG_LOG";

static INIT: Once = Once::new();

/// What a `CATALOG_LOG` value asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSetting {
    Off,
    Min(emit::Level),
}

/// Parse a `CATALOG_LOG` value. Returns `None` for unknown values.
pub fn log_setting(value: &str) -> Option<LogSetting> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "off" => Some(LogSetting::Off),
        "error" => Some(LogSetting::Min(emit::Level::Error)),
        "warn" => Some(LogSetting::Min(emit::Level::Warn)),
        "info" => Some(LogSetting::Min(emit::Level::Info)),
        "debug" => Some(LogSetting::Min(emit::Level::Debug)),
        _ => None,
    }
}

/// Initialize diagnostics from the CATALOG_LOG environment variable.
///
/// Call once at startup; later calls are ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let raw = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let level = match log_setting(&raw) {
            Some(LogSetting::Off) => return,
            Some(LogSetting::Min(level)) => level,
            None => {
                // Bootstrap warning, the emitter is not running yet
                eprintln!("Warning: Unknown {} value '{}', using 'info'", LOG_ENV, raw);
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        // The emitter lives for the rest of the process.
        std::mem::forget(rt);
    });
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;

/// Summaries: records loaded, views written, files synced.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Per-record detail.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Recoverable problems: a rejected record, a link rendered from its raw text.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_setting_levels() {
        assert_eq!(log_setting("off"), Some(LogSetting::Off));
        assert_eq!(log_setting(""), Some(LogSetting::Off));
        assert_eq!(log_setting("DEBUG"), Some(LogSetting::Min(emit::Level::Debug)));
        assert_eq!(log_setting(" warn "), Some(LogSetting::Min(emit::Level::Warn)));
        assert_eq!(log_setting("verbose"), None);
    }

    #[test]
    fn test_init_is_safe_to_call_multiple_times() {
        init_diagnostics();
        init_diagnostics();
    }

    #[test]
    fn test_macros_compile() {
        info!("Loaded {count} records", count: 3);
        debug!("Parsed {file}", file: "Q11518.md");
        warn!("Rejected record");
        error!("Failed to write view");
    }
}

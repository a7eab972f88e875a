//! Console logging for Dawn to Dusk.
//!
//! Installs a `tracing` subscriber that also receives `log` records, so the
//! render crate's `log` macros and wgpu's own output land in the same stream.
//! Nothing is written to disk.

use dusk_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config gives one.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the configured `debug.log_level` is
/// used; a bare level such as `debug` keeps the wgpu/naga noise at `warn`.
///
/// ```no_run
/// use dusk_config::Config;
/// use dusk_log::init_logging;
///
/// init_logging(Some(&Config::default()));
/// ```
pub fn init_logging(config: Option<&Config>) {
    let filter_str = filter_directive(config.map(|c| c.debug.log_level.as_str()));
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();

    tracing::debug!(filter = %filter_str, "Logging initialized");
}

/// Filter directive for a configured level.
///
/// Empty means [`DEFAULT_FILTER`]. A single bare level gets the wgpu and naga
/// targets pinned to `warn`; anything containing `,` or `=` is taken as a
/// complete directive.
pub fn filter_directive(level: Option<&str>) -> String {
    match level.map(str::trim) {
        None | Some("") => DEFAULT_FILTER.to_string(),
        Some(full) if full.contains(',') || full.contains('=') => full.to_string(),
        Some(bare) => format!("{bare},wgpu=warn,naga=warn"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter_str = format!("{}", EnvFilter::new(filter_directive(None)));
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_missing_or_empty_level_uses_default() {
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
        assert_eq!(filter_directive(Some("")), DEFAULT_FILTER);
        assert_eq!(filter_directive(Some("  ")), DEFAULT_FILTER);
    }

    #[test]
    fn test_bare_level_keeps_gpu_quiet() {
        assert_eq!(
            filter_directive(Some("debug")),
            "debug,wgpu=warn,naga=warn"
        );
    }

    #[test]
    fn test_full_directive_passes_through() {
        assert_eq!(
            filter_directive(Some("warn,dusk_app=trace")),
            "warn,dusk_app=trace"
        );
        assert_eq!(filter_directive(Some("dusk_render=debug")), "dusk_render=debug");
    }

    #[test]
    fn test_config_level_is_used() {
        let mut config = Config::default();
        config.debug.log_level = "trace".to_string();
        let directive = filter_directive(Some(config.debug.log_level.as_str()));
        assert!(EnvFilter::try_new(&directive).is_ok());
        assert!(directive.starts_with("trace"));
    }

    #[test]
    fn test_env_filter_parsing() {
        for filter_str in [
            "info",
            "debug,dusk_render=trace",
            "warn,dusk_app=debug,dusk_sky=trace",
            "error",
        ] {
            assert!(
                EnvFilter::try_new(filter_str).is_ok(),
                "Failed to parse filter: {filter_str}"
            );
        }
    }
}

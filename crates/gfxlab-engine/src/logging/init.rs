use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "gfxlab_engine=debug,wgpu_core=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter string, overriding `RUST_LOG`.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; later calls are ignored. Filter precedence is the explicit
/// `env_filter`, then `RUST_LOG`, then `info` with wgpu internals at `warn`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

fn resolve_filter(explicit: Option<String>, env: Option<String>) -> Option<String> {
    explicit
        .filter(|f| !f.trim().is_empty())
        .or_else(|| env.filter(|f| !f.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_env() {
        let f = resolve_filter(Some("debug".into()), Some("warn".into()));
        assert_eq!(f.as_deref(), Some("debug"));
    }

    #[test]
    fn env_filter_used_when_no_explicit() {
        let f = resolve_filter(None, Some("hw04_orbit=trace".into()));
        assert_eq!(f.as_deref(), Some("hw04_orbit=trace"));
    }

    #[test]
    fn blank_filters_fall_back_to_default() {
        assert_eq!(resolve_filter(Some("  ".into()), Some(String::new())), None);
        assert_eq!(resolve_filter(None, None), None);
    }

    #[test]
    fn with_filter_sets_explicit_filter() {
        let c = LoggingConfig::with_filter("warn");
        assert_eq!(c.env_filter.as_deref(), Some("warn"));
    }
}

use std::sync::Once;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

/// How the diagnostics log is filtered and styled.
///
/// The log is a developer aid only: window and framebuffer sizes, the GL
/// version, shape uploads and the frame rate. The two user-facing startup
/// failures are printed on stdout by the runtime, never through here.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"glshapes_engine=debug,winit=warn"`.
    /// Takes precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the stderr logger for the process. Only the first call has any
/// effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        // A logger installed by the host wins.
        if builder(&config, rust_log.as_deref()).try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

/// Filter: `config.env_filter`, then `rust_log`, then `info`. Output always
/// goes to stderr so stdout carries nothing but the failure messages.
fn builder(config: &LoggingConfig, rust_log: Option<&str>) -> Builder {
    let mut builder = Builder::new();

    match config.env_filter.as_deref().or(rust_log) {
        Some(directives) => builder.parse_filters(directives),
        None => builder.filter_level(LevelFilter::Info),
    };

    builder.write_style(config.write_style).target(Target::Stderr);
    builder
}

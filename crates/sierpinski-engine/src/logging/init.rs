use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "sierpinski_engine=debug,wgpu=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,

    /// Level used when neither `env_filter` nor `RUST_LOG` is set.
    pub default_level: log::LevelFilter,

    /// Caps wgpu/naga internals at `warn` unless a filter says otherwise.
    pub quiet_gpu: bool,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            quiet_gpu: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

const GPU_CRATES: [&str; 4] = ["wgpu_core", "wgpu_hal", "wgpu", "naga"];

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let filter = config.env_filter.or_else(|| std::env::var("RUST_LOG").ok());
        match filter {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.default_level);
                if config.quiet_gpu {
                    for krate in GPU_CRATES {
                        builder.filter_module(krate, log::LevelFilter::Warn);
                    }
                }
            }
        }

        builder.write_style(config.write_style);

        // try_init: a test harness may have installed a logger already.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

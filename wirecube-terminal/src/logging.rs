/// Logger initialization for the terminal front end
///
/// The terminal sits in the alternate screen while a scene runs, so log lines
/// written to stderr would be drawn over. Pass a file to keep them readable.
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "wirecube_core=debug"). When unset, `RUST_LOG` is consulted.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Append log lines to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) -> io::Result<()> {
    let target = match &config.log_file {
        Some(path) => Some(File::options().create(true).append(true).open(path)?),
        None => None,
    };

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else if target.is_some() {
            builder.filter_level(log::LevelFilter::Info);
        } else {
            // stderr shares the screen with the scene
            builder.filter_level(log::LevelFilter::Warn);
        }

        if let Some(file) = target {
            builder
                .target(env_logger::Target::Pipe(Box::new(file)))
                .write_style(env_logger::WriteStyle::Never);
        }

        builder.init();
        log::debug!("logging initialized");
    });

    Ok(())
}

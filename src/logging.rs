use crate::config::{log_dir, LogConfig};
use anyhow::{anyhow, Context, Result};
use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;

const LOG_FILE_BASENAME: &str = "dragboard";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Starts the global logger. The returned handle must be kept alive for the
/// rest of the process, otherwise buffered records are lost.
pub fn init_logging(config: &LogConfig, mirror_to_stderr: bool) -> Result<LoggerHandle> {
    let dir = log_dir(config)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {:?}", dir))?;

    let duplicate = if mirror_to_stderr {
        Duplicate::All
    } else {
        Duplicate::None
    };
    let handle = Logger::try_with_str(&config.level)
        .map_err(|err| anyhow!("invalid log level `{}`: {}", config.level, err))?
        .log_to_file(
            FileSpec::default()
                .directory(dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .duplicate_to_stderr(duplicate)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| anyhow!("failed to start logger: {}", err))?;

    info!(
        "event=app_start version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        config.level,
        dir.display()
    );
    Ok(handle)
}

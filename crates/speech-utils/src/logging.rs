//! Logger construction
//!
//! Lines are written as `2024-05-01 12:00:00 [INFO    ] message`, to a
//! truncated file when one is configured and to stderr otherwise.

use crate::error::UtilsError;
use chrono::Local;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log file, truncated on creation; stderr when `None`
    pub file: Option<PathBuf>,
    /// Most verbose level emitted
    pub level: Level,
    /// Logger name, reported in the first line
    pub name: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: Level::INFO,
            name: "speech".to_string(),
        }
    }
}

struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = event.metadata().level().to_string();
        write!(
            writer,
            "{} [{:<8}] ",
            Local::now().format(TIMESTAMP_FORMAT),
            level
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build a subscriber for `config` without installing it
pub fn build_subscriber(
    config: &LoggerConfig,
) -> Result<Box<dyn Subscriber + Send + Sync>, UtilsError> {
    let builder = tracing_subscriber::fmt()
        .event_format(LineFormat)
        .with_max_level(config.level);

    let subscriber: Box<dyn Subscriber + Send + Sync> = match &config.file {
        Some(path) => {
            let file = File::create(path).map_err(UtilsError::io(path))?;
            Box::new(builder.with_writer(Mutex::new(file)).finish())
        }
        None => Box::new(builder.with_writer(std::io::stderr).finish()),
    };
    Ok(subscriber)
}

/// Install the global logger
pub fn create_logger(config: &LoggerConfig) -> Result<(), UtilsError> {
    let subscriber = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| UtilsError::Logger(e.to_string()))?;

    info!(
        "Logger '{}' initialised at level {}",
        config.name, config.level
    );
    Ok(())
}

//! Leveled logging to the console and, optionally, to log files.
//!
//! The console threshold comes from the command line. When a log directory
//! is available two files are written next to each other: `log.txt` with
//! INFO and above, `log.debug.txt` with everything down to DEBUG.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;

pub const LOG_FILE: &str = "log.txt";
pub const DEBUG_LOG_FILE: &str = "log.debug.txt";

/// `~/.local/share/youtube-monitor/logs` or the platform equivalent.
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("youtube-monitor").join("logs"))
}

/// Where the log files go, and whether failing to open them is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSink<'a> {
    Off,
    /// Given on the command line; setup errors are returned.
    Required(&'a Path),
    /// The per-user default; setup errors fall back to console only.
    BestEffort(&'a Path),
}

impl<'a> FileSink<'a> {
    /// An explicit directory wins over the default one.
    pub fn resolve(explicit: Option<&'a Path>, default: Option<&'a Path>) -> Self {
        match (explicit, default) {
            (Some(dir), _) => FileSink::Required(dir),
            (None, Some(dir)) => FileSink::BestEffort(dir),
            (None, None) => FileSink::Off,
        }
    }
}

fn file_appender(dir: &Path, name: &str) -> Result<RollingFileAppender> {
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)?)
}

fn file_appenders(dir: &Path) -> Result<(RollingFileAppender, RollingFileAppender)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    Ok((
        file_appender(dir, LOG_FILE)?,
        file_appender(dir, DEBUG_LOG_FILE)?,
    ))
}

/// Build the subscriber without installing it.
///
/// A [`FileSink::BestEffort`] directory that cannot be set up is reported on
/// the console and skipped.
pub fn subscriber<W>(
    console_level: LevelFilter,
    sink: FileSink<'_>,
    console: W,
) -> Result<impl Subscriber + Send + Sync + 'static>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let appenders = match sink {
        FileSink::Off => None,
        FileSink::Required(dir) => Some(file_appenders(dir)?),
        FileSink::BestEffort(dir) => match file_appenders(dir) {
            Ok(appenders) => Some(appenders),
            Err(e) => {
                writeln!(
                    console.make_writer(),
                    "WARN file logging disabled: {:#}",
                    e
                )?;
                None
            }
        },
    };

    let console_layer = fmt::layer()
        .with_writer(console)
        .with_target(false)
        .with_filter(console_level);

    let (info_layer, debug_layer) = match appenders {
        Some((info, debug)) => {
            let info = fmt::layer()
                .with_writer(info)
                .with_ansi(false)
                .with_filter(LevelFilter::INFO);
            let debug = fmt::layer()
                .with_writer(debug)
                .with_ansi(false)
                .with_filter(LevelFilter::DEBUG);
            (Some(info), Some(debug))
        }
        None => (None, None),
    };

    Ok(tracing_subscriber::registry()
        .with(console_layer)
        .with(info_layer)
        .with(debug_layer))
}

/// Install the global subscriber, logging to standard error.
pub fn init(console_level: LevelFilter, sink: FileSink<'_>) -> Result<()> {
    let subscriber = subscriber(console_level, sink, std::io::stderr)?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

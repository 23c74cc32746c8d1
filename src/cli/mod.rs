pub mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "youtube-monitor")]
#[command(about = "Wait for new videos on a YouTube channel", long_about = None)]
pub struct Cli {
    /// The number of new videos to watch for
    #[arg(short = 'n', default_value_t = 1)]
    pub n: u32,

    /// The channel id to monitor (default: load from the config file)
    #[arg(long)]
    pub channel: Option<String>,

    /// Store channel in config and exit
    #[arg(long)]
    pub store_config: bool,

    /// Config file to use instead of ~/.config/youtube-monitor/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for log.txt and log.debug.txt
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Hibernate computer once condition is met
    #[arg(long, help_heading = "Actions")]
    pub hibernate: bool,

    /// Increase verbosity (may be repeated)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Debug")]
    pub verbose: u8,

    /// Decrease verbosity (may be repeated)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Debug")]
    pub quiet: u8,
}

/// Console log level chosen with `-v`/`-q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Error,
    Critical,
    Warning,
    Info,
    Debug,
}

impl Verbosity {
    /// Start at [`Verbosity::Warning`], step once per flag, clamp at both ends.
    pub fn from_counts(verbose: u8, quiet: u8) -> Self {
        match (2 + i32::from(verbose) - i32::from(quiet)).clamp(0, 4) {
            0 => Verbosity::Error,
            1 => Verbosity::Critical,
            2 => Verbosity::Warning,
            3 => Verbosity::Info,
            _ => Verbosity::Debug,
        }
    }

    /// tracing has nothing above ERROR, so `Critical` filters like `Error`.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Error | Verbosity::Critical => LevelFilter::ERROR,
            Verbosity::Warning => LevelFilter::WARN,
            Verbosity::Info => LevelFilter::INFO,
            Verbosity::Debug => LevelFilter::DEBUG,
        }
    }
}

/// Resolved command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub n: u32,
    pub channel: Option<String>,
    pub store_config: bool,
    pub hibernate: bool,
    pub verbosity: Verbosity,
    pub config_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Self {
            n: cli.n,
            channel: cli.channel,
            store_config: cli.store_config,
            hibernate: cli.hibernate,
            verbosity: Verbosity::from_counts(cli.verbose, cli.quiet),
            config_path: cli.config,
            log_dir: cli.log_dir,
        }
    }
}

impl Options {
    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Self::from)
    }
}

use clap::Parser;

use youtube_monitor::app::AppContext;
use youtube_monitor::cli::{commands, Cli, Options};
use youtube_monitor::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let options = Options::from(Cli::parse());

    let default_log_dir = logging::default_log_dir();
    let sink = logging::FileSink::resolve(options.log_dir.as_deref(), default_log_dir.as_deref());
    logging::init(options.verbosity.level_filter(), sink)?;
    tracing::debug!("options: {:?}", options);

    let ctx = AppContext::new(options.config_path.clone())?;
    commands::run(&options, &ctx).await?;

    Ok(())
}

use anyhow::Result;
use clap::Parser;

use fintrack::{cli::Cli, logging, App};
use fintrack_auth::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = match cli.log_dir {
        Some(dir) => dir,
        None => logging::default_log_dir()?,
    };
    let _log = logging::init_logging(&log_dir)?;

    let mut settings = Settings::new()?;
    if let Some(url) = cli.server_url {
        settings.server_url = url;
    }

    if let Err(e) = App::new(settings)?.run(cli.command).await {
        tracing::error!("Command failed: {}", e);
        return Err(e);
    }

    Ok(())
}

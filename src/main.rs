use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use promptlens::app::App;
use promptlens::cli::Cli;

fn init_tracing() {
    let filter = std::env::var("PROMPTLENS_LOG")
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("promptlens=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(cmd) => {
            let mut app = App::new().await?;
            app.run_command(cmd).await?;
        }
        None => {
            // Default to showing help when no command is specified
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

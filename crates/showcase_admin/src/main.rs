use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod repl;
mod settings;

#[derive(Parser)]
#[command(name = "showcase-admin")]
#[command(about = "Terminal console for curating the portfolio catalog", long_about = None)]
struct Cli {
    /// Path to the RON settings file.
    #[arg(long, default_value = "admin_console.ron")]
    config: PathBuf,
    /// Overrides the API base URL from the settings file.
    #[arg(long)]
    base_url: Option<String>,
    /// Raises the log level to debug.
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    console_logging::initialize_terminal(level);

    let mut settings = settings::load(&cli.config);
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }

    repl::run(settings).await
}

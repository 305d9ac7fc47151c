mod client;
mod commands;
mod source;

use anyhow::Result;
use calitask_core::CalitaskConfig;
use clap::{Parser, Subcommand};
use env_logger::Env;
use source::FeedSource;

#[derive(Parser)]
#[command(name = "calitask")]
#[command(about = "Import calendar feeds into your calitask todo list")]
struct Cli {
    /// Storage API base URL (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import upcoming and recurring events as todos
    Import {
        /// .ics file path, or an http(s):// or webcal:// URL
        source: String,

        /// Project title (defaults to the feed's file name)
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Print the todos an import would create, without sending them
    Preview {
        /// .ics file path, or an http(s):// or webcal:// URL
        source: String,
    },
    /// Show the config file (creates it if missing; --api-url is saved)
    Config,
    /// Print a stored due date in the strict wire format
    NormalizeDue {
        /// e.g. "2025-03-10 09:00:00" or "2025-03-10T11:00:00+02:00"
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import { source, project } => {
            let config = load_config(cli.api_url)?;
            let source = FeedSource::parse(&source)?;
            commands::import::run(&config, &source, project).await
        }
        Commands::Preview { source } => {
            let config = load_config(cli.api_url)?;
            let source = FeedSource::parse(&source)?;
            commands::preview::run(&config, &source).await
        }
        Commands::Config => commands::config::run(cli.api_url),
        Commands::NormalizeDue { value } => commands::normalize::run(&value),
    }
}

fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn load_config(api_url: Option<String>) -> Result<CalitaskConfig> {
    let mut config = CalitaskConfig::load()?;

    if let Some(url) = api_url {
        config.api_url = url;
    }

    Ok(config)
}

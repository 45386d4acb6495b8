use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use mobile_assistant_360::{info_time, AppRecord, CollisionPolicy, Config, MobileAssistant360, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Search and download apps from the 360 Mobile Assistant market")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Folder the apps are downloaded into
    #[arg(long, global = true, default_value = "./")]
    download_dir: PathBuf,

    /// Market address, for mirrors
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Leave already downloaded apps alone instead of replacing them
    #[arg(long, global = true)]
    skip_existing: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search apps by keyword
    Search {
        keyword: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Download the apps found
        #[arg(long)]
        download: bool,
    },
    /// List the apps of a category
    Browse {
        cat_id: String,
        #[arg(long)]
        limit: usize,
        /// Download the apps found
        #[arg(long)]
        download: bool,
    },
    /// List the market's categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the JSON results.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let start_time = Local::now();
    let cli = Cli::parse();

    let mut config = Config::default().with_download_dir(cli.download_dir);
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if cli.skip_existing {
        config = config.with_collision_policy(CollisionPolicy::Skip);
    }
    let market = MobileAssistant360::with_config(config)?;

    match cli.command {
        Command::Search { keyword, limit, download } => {
            let apps = market.search(&keyword, limit).await;
            print_apps(&market, apps, download).await?;
        }
        Command::Browse { cat_id, limit, download } => {
            let apps = market.browse(&cat_id, Some(limit)).await?;
            print_apps(&market, apps, download).await?;
        }
        Command::Categories => {
            let categories = market.list_categories().await;
            println!("{}", serde_json::to_string_pretty(&categories)?);
        }
    }

    info_time!(start_time, "Full program time:");
    Ok(())
}

async fn print_apps(market: &MobileAssistant360, apps: Vec<AppRecord>, download: bool) -> Result<()> {
    let apps = if download { market.download(&apps).await? } else { apps };
    println!("{}", serde_json::to_string_pretty(&apps)?);
    Ok(())
}

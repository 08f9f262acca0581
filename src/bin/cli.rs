//! canvas-sync CLI
//!
//! Local execution entry point. For AWS Lambda, use `canvas-sync-lambda`.

use std::path::PathBuf;

use canvas_sync::{
    config::{CONFIG_FILE, load_config},
    error::Result,
    pipeline,
    services::NotionClient,
    storage::LocalStorage,
    utils::{console, http},
};
use chrono::Local;
use clap::{Parser, Subcommand};

/// canvas-sync - Canvas calendar to Notion tasks
#[derive(Parser, Debug)]
#[command(
    name = "canvas-sync",
    version,
    about = "Sync Canvas assignment deadlines into a Notion tasks database"
)]
struct Cli {
    /// Path to storage directory containing config.toml and the hand-off file
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the calendar feed and create tasks for new assignments
    Sync {
        /// Include assignments whose due date has passed
        #[arg(long)]
        all_dates: bool,

        /// Write planned tasks to the hand-off file instead of creating them
        #[arg(long)]
        handoff: bool,

        /// Keep assignments without a due date
        #[arg(long)]
        keep_undated: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the tasks listed in a hand-off file
    Publish {
        /// Hand-off file (default: sync.handoff_file in the storage directory)
        #[arg(long)]
        file: Option<String>,
    },

    /// Show the tasks in a hand-off file grouped by course
    Preview {
        #[arg(long)]
        file: Option<String>,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Keep stdout clean for the JSON summary
    let json_output = matches!(cli.command, Command::Sync { json: true, .. });
    console::init(if json_output { "warn" } else { "info" });

    let config_path = cli.storage_dir.join(CONFIG_FILE);
    let mut config = load_config(&config_path)?;
    log::debug!("Loaded configuration from {}", config_path.display());

    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command {
        Command::Sync {
            all_dates,
            handoff,
            keep_undated,
            json,
        } => {
            if all_dates {
                config.sync.filter_future_only = false;
            }
            if handoff {
                config.sync.direct_publish = false;
            }
            if keep_undated {
                config.sync.keep_undated = true;
            }

            let client = http::create_async_client(&config.feed)?;
            let store = NotionClient::new(client.clone(), config.notion.clone());
            let summary = pipeline::run_sync(
                &config,
                &client,
                store,
                &storage,
                Local::now().date_naive(),
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }

        Command::Publish { file } => {
            let file = file.unwrap_or_else(|| config.sync.handoff_file.clone());
            let client = http::create_async_client(&config.feed)?;
            let store = NotionClient::new(client, config.notion.clone());
            pipeline::run_publish(&config, store, &storage, &file).await?;
        }

        Command::Preview { file } => {
            let file = file.unwrap_or_else(|| config.sync.handoff_file.clone());
            pipeline::run_preview(&storage, &file).await?;
        }

        Command::Validate => {
            pipeline::run_validate(&config, &config_path)?;
            console::success("All validations passed!");
        }
    }

    Ok(())
}

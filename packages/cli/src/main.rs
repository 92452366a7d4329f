//! `wishpocket` - create, edit and share birthday wishlists from the terminal.

mod cmd;
mod context;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use wishpocket_client::{LocalDb, WishPocketClient, DEFAULT_API_BASE};

use crate::context::AppContext;

#[derive(Parser)]
#[command(name = "wishpocket", version, about = "Shareable birthday wishlists")]
struct Cli {
    /// API base URL
    #[arg(long, env = "WISHPOCKET_API", default_value = DEFAULT_API_BASE, global = true)]
    api_base: String,

    /// Base URL of the web app, used for share links
    #[arg(
        long,
        env = "WISHPOCKET_SHARE_BASE",
        default_value = "http://localhost:5173",
        global = true
    )]
    share_base: String,

    /// Local fallback database (defaults to the user data directory)
    #[arg(long, global = true)]
    local_db: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 8, global = true)]
    timeout_secs: u64,

    /// Skip confirmations and decorative output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new list and print its links
    Create {
        #[arg(long)]
        owner: String,
        /// YYYY-MM-DD
        #[arg(long)]
        birthday: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Edit a list interactively
    Edit { id: String },
    /// Show a list
    View { id: String },
    /// Add a product by URL
    Add {
        id: String,
        url: String,
        #[arg(long)]
        comment: Option<String>,
        /// Mark as most wanted
        #[arg(long)]
        high: bool,
    },
    /// Remove an item from a list
    Remove { id: String, item_id: String },
    /// Delete a list
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let local_path = match cli.local_db {
        Some(path) => path,
        None => LocalDb::default_path().context("Failed to locate the local database")?,
    };
    let client = WishPocketClient::with_timeout(
        cli.api_base,
        LocalDb::new(local_path),
        std::time::Duration::from_secs(cli.timeout_secs),
    )
    .context("Failed to build API client")?;

    let ctx = AppContext::new(client, cli.share_base, cli.quiet);

    match cli.command {
        Command::Create {
            owner,
            birthday,
            password,
        } => cmd::create::run(&ctx, owner, birthday, password).await,
        Command::Edit { id } => cmd::edit::run(&ctx, &id).await,
        Command::View { id } => cmd::view::run(&ctx, &id).await,
        Command::Add {
            id,
            url,
            comment,
            high,
        } => cmd::items::add(&ctx, &id, &url, comment.as_deref(), high).await,
        Command::Remove { id, item_id } => cmd::items::remove(&ctx, &id, &item_id).await,
        Command::Delete { id } => cmd::delete::run(&ctx, &id).await,
    }
}

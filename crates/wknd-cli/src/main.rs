mod commands;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wknd_storefront::SortKey;

#[derive(Debug, Parser)]
#[command(name = "wknd-cli")]
#[command(about = "WKND storefront command line interface")]
struct Cli {
    /// Read adventures from a saved `adventures-all` response instead of the
    /// content repository
    #[arg(long, global = true, env = "WKND_CONTENT_FIXTURE_PATH")]
    fixture: Option<PathBuf>,

    /// Storefront YAML with collections, menus and pages (defaults to
    /// `WKND_STOREFRONT_PATH`, then the bundled file)
    #[arg(long, global = true)]
    storefront: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally filtered by a search keyword
    Products {
        /// Search keyword, e.g. `winter` or `hidden-homepage-carousel`
        #[arg(long)]
        query: Option<String>,
        /// relevance, title or price
        #[arg(long, default_value = "relevance")]
        sort: SortKey,
        #[arg(long)]
        reverse: bool,
    },
    /// Show one product by handle
    Product { handle: String },
    /// List the collections shown on the search page
    Collections,
    /// Show the storefront cart
    Cart,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut overrides = HashMap::new();
    if let Some(path) = &cli.fixture {
        overrides.insert("WKND_CONTENT_FIXTURE_PATH", path.display().to_string());
    }
    let config = wknd_core::load_app_config_with_overrides(&overrides)?;

    // Logs go to stderr so stdout stays valid JSON.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let storefront = commands::build_storefront(&config, cli.storefront.as_deref())?;

    match cli.command {
        Commands::Products {
            query,
            sort,
            reverse,
        } => commands::run_products(&storefront, query, sort, reverse).await,
        Commands::Product { handle } => commands::run_product(&storefront, &handle).await,
        Commands::Collections => commands::run_collections(&storefront),
        Commands::Cart => commands::run_cart(&storefront).await,
    }
}

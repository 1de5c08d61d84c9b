//! Launchpad Server
//!
//! Axum server exposing the launch catalog query pipeline as a JSON API,
//! plus CLI subcommands that drive the same pipeline from a terminal.

mod api;
mod cli;

use anyhow::Context;
use api::{AppState, SharedState};
use clap::{Args as ClapArgs, Parser, Subcommand};
use launchpad_core::catalog::CatalogSource;
use launchpad_core::config::LaunchpadConfig;
use launchpad_core::query::FilterSpec;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Clone)]
#[command(author, version, about = "Launchpad - browse the public launch catalog")]
struct Args {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Start the API server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
    /// Print one page of launches
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Page to show (clamped into range)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Launches per page
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Manage favorite launches
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
    /// Interactive search: each stdin line replaces the query text
    Search {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Subcommand, Clone)]
enum FavoritesCommand {
    /// List favorite launch ids
    List,
    /// Mark a launch as favorite
    Add { id: String },
    /// Unmark a favorite
    Remove { id: String },
}

#[derive(ClapArgs, Clone, Default)]
struct FilterArgs {
    /// Case-insensitive mission name substring
    #[arg(long)]
    search: Option<String>,
    /// Launch year, or "all"
    #[arg(long)]
    year: Option<String>,
    /// Only successful launches
    #[arg(long)]
    success_only: bool,
    /// Only favorite launches
    #[arg(long)]
    favorites_only: bool,
}

impl From<FilterArgs> for FilterSpec {
    fn from(args: FilterArgs) -> Self {
        FilterSpec {
            search: args.search.unwrap_or_default(),
            year: args.year.unwrap_or_default().into(),
            success_only: args.success_only,
            favorites_only: args.favorites_only,
        }
    }
}

pub async fn run_server(config: LaunchpadConfig, port: u16) -> anyhow::Result<()> {
    let favorites = cli::open_favorites(&config)?;
    let catalog = Arc::new(
        CatalogSource::from_config(&config).context("Failed to build catalog source")?,
    );

    // Initial load runs in the background; clients see `loading` until it lands
    tokio::spawn({
        let catalog = Arc::clone(&catalog);
        async move {
            if let Err(e) = catalog.load().await {
                tracing::warn!("Initial catalog load failed: {}", e);
            }
        }
    });

    let state: SharedState = Arc::new(AppState {
        catalog,
        favorites,
        config,
    });
    let app = api::router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("Launchpad server running at http://{}", addr);
    tracing::info!("API docs at http://{}/api/v1/openapi.json", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = LaunchpadConfig::load()?;

    match args.command {
        None => run_server(config, 8080).await,
        Some(CliCommand::Serve { port }) => run_server(config, port).await,
        Some(CliCommand::List {
            filters,
            page,
            per_page,
        }) => cli::list(&config, filters.into(), page, per_page).await,
        Some(CliCommand::Favorites { action }) => match action {
            FavoritesCommand::List => cli::favorites_list(&config),
            FavoritesCommand::Add { id } => cli::favorites_set(&config, &id, true),
            FavoritesCommand::Remove { id } => cli::favorites_set(&config, &id, false),
        },
        Some(CliCommand::Search { filters }) => cli::search(&config, filters.into()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::query::YearFilter;

    #[test]
    fn test_list_args_parse_into_filters() {
        let args = Args::parse_from([
            "launchpad",
            "list",
            "--search",
            "crs",
            "--year",
            "2019",
            "--success-only",
            "--page",
            "3",
        ]);

        let Some(CliCommand::List {
            filters,
            page,
            per_page,
        }) = args.command
        else {
            panic!("expected list command");
        };

        let spec = FilterSpec::from(filters);
        assert_eq!(spec.search, "crs");
        assert_eq!(spec.year, YearFilter::Year("2019".to_string()));
        assert!(spec.success_only);
        assert!(!spec.favorites_only);
        assert_eq!(page, 3);
        assert_eq!(per_page, None);
    }

    #[test]
    fn test_missing_year_means_all() {
        let spec = FilterSpec::from(FilterArgs::default());
        assert!(spec.year.is_all());
        assert!(spec.is_unrestricted());
    }

    #[test]
    fn test_favorites_subcommands_parse() {
        let args = Args::parse_from(["launchpad", "favorites", "add", "5eb87cd9ffd86e000604b32a"]);
        assert!(matches!(
            args.command,
            Some(CliCommand::Favorites {
                action: FavoritesCommand::Add { ref id }
            }) if id == "5eb87cd9ffd86e000604b32a"
        ));
    }
}

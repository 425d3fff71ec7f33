//! # Reelshelf Server
//!
//! Serves the film catalog API. Storage is Postgres when a database URL is
//! configured and an in-memory map otherwise; search runs against an
//! in-process index rebuilt from the store at startup.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use reelshelf_config::{Config, ConfigLoad, ConfigLoader, ConfigLoaderOptions};
use reelshelf_core::{
    database::{CatalogStore, InMemoryCatalogStore, PostgresCatalogStore},
    search::{InMemorySearchIndex, NullSearchProvider, SearchProvider},
};
use reelshelf_server::{AppState, create_app};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "reelshelf-server")]
#[command(about = "Film catalog API with filtering, search and pagination")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a reelshelf.toml configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
    /// Recompute stored title sort keys and exit
    BackfillTitles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_runtime_config(&cli.serve)?;

    match cli.command {
        Some(Command::Db(DbCommand::Migrate)) => {
            let store = connect_postgres(&config).await?;
            store.migrate().await.context("database migration failed")?;
            info!("Database migrations applied successfully");
            Ok(())
        }
        Some(Command::Db(DbCommand::BackfillTitles)) => {
            let store = connect_postgres(&config).await?;
            let updated = store
                .refresh_orderable_titles()
                .await
                .context("title backfill failed")?;
            info!(updated, "orderable titles refreshed");
            Ok(())
        }
        None => run_server(config).await,
    }
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let ConfigLoad {
        mut config,
        warnings,
    } = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: args.config.clone(),
        env_file: args.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    Ok(config)
}

async fn connect_postgres(config: &Config) -> anyhow::Result<PostgresCatalogStore> {
    let url = config
        .database
        .url
        .as_deref()
        .context("DATABASE_URL must be set for database commands")?;
    PostgresCatalogStore::connect(url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn CatalogStore>> {
    if config.database.url.is_none() {
        info!("Using in-memory catalog store");
        return Ok(Arc::new(InMemoryCatalogStore::new()));
    }

    let store = connect_postgres(config).await?;
    if config.database.run_migrations {
        store.migrate().await.context("database migration failed")?;
        info!("Database migrations applied");
    }
    Ok(Arc::new(store))
}

fn build_search(config: &Config) -> Arc<dyn SearchProvider> {
    if config.search.enabled {
        Arc::new(InMemorySearchIndex::new(config.search.match_mode()))
    } else {
        Arc::new(NullSearchProvider)
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let store = build_store(&config).await?;
    let search = build_search(&config);
    let state = AppState::new(
        store,
        search,
        config.query_policy(),
        config.search.timeout(),
    );

    if config.search.enabled {
        let indexed = state
            .writer
            .reindex_all()
            .await
            .context("failed to build the search index")?;
        info!(indexed, "search index ready");
    }

    let router = create_app(state);
    let addr = config.server.bind_address();

    info!("Starting Reelshelf server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

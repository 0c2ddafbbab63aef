// src/main.rs

mod cli;

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moviehub::application::{self, AppState, CommandResult};
use moviehub::config::AppConfig;
use moviehub::db::{create_connection_pool, get_connection, initialize_database, verify_database_integrity};
use moviehub::events::EventBus;
use moviehub::integrations::TmdbClient;
use moviehub::repositories::{KeyValueFavoritesRepository, SqliteKeyValueRepository};

use cli::{CliArgs, Command, FavoritesCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli_args = CliArgs::parse_args();
    cli_args.validate().map_err(anyhow::Error::msg)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli_args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load(cli_args.config.as_deref()).context("loading configuration")?;

    // 1. INFRASTRUCTURE
    let db_path = config.storage.resolve_database_path()?;
    let pool = Arc::new(create_connection_pool(&db_path)?);
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }
    log::debug!("Using database at {}", db_path.display());

    let event_bus = Arc::new(EventBus::new());
    let catalog = Arc::new(TmdbClient::new(&config.catalog)?);

    // 2. REPOSITORIES
    let kv_repo = Arc::new(SqliteKeyValueRepository::new(Arc::clone(&pool)));
    let favorites_repo = Arc::new(KeyValueFavoritesRepository::new(
        kv_repo,
        config.storage.favorites_key.clone(),
    ));

    // 3. APPLICATION STATE
    let state = AppState::new(favorites_repo, catalog, event_bus, &config.catalog);

    if !dispatch(cli_args.command, &state).await? {
        std::process::exit(1);
    }

    Ok(())
}

/// Runs one command and prints its result. Returns false if the command failed.
async fn dispatch(command: Command, state: &AppState) -> anyhow::Result<bool> {
    match command {
        Command::Favorites(FavoritesCommand::List { stored: true }) => {
            print_result(application::list_stored_favorites(state).await)
        }
        Command::Favorites(FavoritesCommand::List { stored: false }) => {
            print_result(application::list_favorites(state).await)
        }
        Command::Favorites(FavoritesCommand::Add { id }) => {
            print_result(application::add_favorite(id, state).await)
        }
        Command::Favorites(FavoritesCommand::Remove { id }) => {
            print_result(application::remove_favorite(id, state).await)
        }
        Command::Favorites(FavoritesCommand::Toggle { id }) => {
            print_result(application::toggle_favorite(id, state).await)
        }
        Command::Favorites(FavoritesCommand::Clear) => {
            print_result(application::clear_favorites(state).await)
        }
        Command::Movie { id } => print_result(application::get_movie_detail(id, state).await),
        Command::Search { keyword } => {
            print_result(application::search_movies(keyword, state).await)
        }
        Command::Genres => print_result(application::list_genres(state).await),
        Command::Genre { id } => print_result(application::discover_by_genre(id, state).await),
        Command::Recommend { id } => {
            print_result(application::get_recommendations(id, state).await)
        }
    }
}

fn print_result<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<bool> {
    let (json, ok) = match &result {
        Ok(value) => (serde_json::to_string_pretty(value)?, true),
        Err(error) => (serde_json::to_string_pretty(error)?, false),
    };
    println!("{}", json);
    Ok(ok)
}

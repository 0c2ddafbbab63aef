use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Parser)]
#[command(author, version, about = "Browse movies and keep a local favorites list", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage the favorites list
    #[command(subcommand)]
    Favorites(FavoritesCommand),

    /// Show one movie with its favorite status
    Movie { id: i64 },

    /// Search movies by keyword
    Search { keyword: String },

    /// List catalog genres
    Genres,

    /// Discover movies in a genre
    Genre { id: i64 },

    /// Movies recommended for a movie
    Recommend { id: i64 },
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// Show favorites with fresh catalog details
    List {
        /// Print what is stored without contacting the catalog
        #[arg(long)]
        stored: bool,
    },
    Add { id: i64 },
    Remove { id: i64 },
    Toggle { id: i64 },
    /// Remove every favorite
    Clear,
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log level '{}'. Valid levels are: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        let id = match &self.command {
            Command::Movie { id } | Command::Recommend { id } => Some(*id),
            Command::Favorites(
                FavoritesCommand::Add { id }
                | FavoritesCommand::Remove { id }
                | FavoritesCommand::Toggle { id },
            ) => Some(*id),
            _ => None,
        };
        if matches!(id, Some(id) if id <= 0) {
            return Err("movie id must be a positive number".to_string());
        }

        Ok(())
    }
}

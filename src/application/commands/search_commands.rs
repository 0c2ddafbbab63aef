// src/application/commands/search_commands.rs
//
// Catalog Browsing Command Handlers

use crate::application::{
    dto::{GenreDto, MovieCardDto},
    error_handling::CommandResult,
    state::AppState,
};
use crate::domain::MovieSummary;

pub async fn search_movies(keyword: String, state: &AppState) -> CommandResult<Vec<MovieCardDto>> {
    let movies = state.catalog_service.search_by_keyword(&keyword).await?;
    Ok(to_cards(movies, state))
}

pub async fn list_genres(state: &AppState) -> CommandResult<Vec<GenreDto>> {
    let genres = state.catalog_service.list_genres().await?;
    Ok(genres.into_iter().map(GenreDto::from).collect())
}

pub async fn discover_by_genre(
    genre_id: i64,
    state: &AppState,
) -> CommandResult<Vec<MovieCardDto>> {
    let movies = state.catalog_service.discover_by_genre(genre_id).await?;
    Ok(to_cards(movies, state))
}

fn to_cards(movies: Vec<MovieSummary>, state: &AppState) -> Vec<MovieCardDto> {
    movies
        .into_iter()
        .map(|movie| MovieCardDto::from_summary(movie, &state.poster_base_url))
        .collect()
}

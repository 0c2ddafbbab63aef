// src/application/commands/movie_commands.rs
//
// Movie Detail Command Handlers

use crate::application::{
    dto::{MovieCardDto, MovieDetailDto},
    error_handling::CommandResult,
    state::AppState,
};
use crate::domain::MovieId;

/// Full record plus current membership, both fetched fresh
pub async fn get_movie_detail(
    movie_id: MovieId,
    state: &AppState,
) -> CommandResult<MovieDetailDto> {
    let movie = state.hydration_service.hydrate_one(movie_id).await?;
    let is_favorite = state.hydration_service.is_favorite(movie_id)?;

    Ok(MovieDetailDto::from_detail(
        movie,
        is_favorite,
        &state.poster_base_url,
    ))
}

pub async fn get_recommendations(
    movie_id: MovieId,
    state: &AppState,
) -> CommandResult<Vec<MovieCardDto>> {
    let movies = state.catalog_service.recommendations(movie_id).await?;

    Ok(movies
        .into_iter()
        .map(|movie| MovieCardDto::from_summary(movie, &state.poster_base_url))
        .collect())
}

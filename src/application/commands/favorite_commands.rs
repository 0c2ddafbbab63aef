// src/application/commands/favorite_commands.rs
//
// Favorites Command Handlers

use crate::application::{
    dto::{FavoriteStatusDto, FavoritesViewDto, MovieCardDto},
    error_handling::CommandResult,
    state::AppState,
};
use crate::domain::MovieId;

/// Favorites as currently stored, without contacting the catalog
pub async fn list_stored_favorites(state: &AppState) -> CommandResult<Vec<MovieCardDto>> {
    let favorites = state.favorites_service.list()?;

    Ok(favorites
        .into_iter()
        .map(|movie| MovieCardDto::from_summary(movie, &state.poster_base_url))
        .collect())
}

/// Favorites re-fetched from the catalog. Entries that fail to fetch are
/// left out of `movies` and listed in `unavailable`.
pub async fn list_favorites(state: &AppState) -> CommandResult<FavoritesViewDto> {
    let favorites = state.favorites_service.list()?;
    let report = state
        .hydration_service
        .hydrate_all_with_report(&favorites)
        .await;

    Ok(FavoritesViewDto::from_report(report, &state.poster_base_url))
}

pub async fn is_favorite(movie_id: MovieId, state: &AppState) -> CommandResult<FavoriteStatusDto> {
    let is_favorite = state.hydration_service.is_favorite(movie_id)?;
    Ok(FavoriteStatusDto {
        movie_id,
        is_favorite,
    })
}

/// Looks the movie up in the catalog and stores its summary
pub async fn add_favorite(movie_id: MovieId, state: &AppState) -> CommandResult<FavoriteStatusDto> {
    let movie = state.hydration_service.hydrate_one(movie_id).await?;
    state.favorites_service.add(movie.summary())?;

    Ok(FavoriteStatusDto {
        movie_id,
        is_favorite: true,
    })
}

pub async fn remove_favorite(
    movie_id: MovieId,
    state: &AppState,
) -> CommandResult<FavoriteStatusDto> {
    state.favorites_service.remove(movie_id)?;

    Ok(FavoriteStatusDto {
        movie_id,
        is_favorite: false,
    })
}

/// Membership is decided by the store under its mutation lock, so two
/// overlapping toggles cancel out. A summary is fetched only when the movie
/// is not stored yet.
pub async fn toggle_favorite(
    movie_id: MovieId,
    state: &AppState,
) -> CommandResult<FavoriteStatusDto> {
    let stored = state.favorites_service.list()?.get(movie_id).cloned();
    let summary = match stored {
        Some(summary) => summary,
        None => state.hydration_service.hydrate_one(movie_id).await?.summary(),
    };

    let is_favorite = state.favorites_service.toggle(summary)?;

    Ok(FavoriteStatusDto {
        movie_id,
        is_favorite,
    })
}

pub async fn clear_favorites(state: &AppState) -> CommandResult<()> {
    state.favorites_service.clear()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support::{detail, test_state};
    use crate::application::ErrorType;
    use crate::config::CatalogConfig;
    use crate::domain::{Genre, MovieDetail, MovieSummary};
    use crate::error::{AppError, AppResult};
    use crate::integrations::{MockMovieCatalog, MovieCatalog, TmdbClient};
    use std::time::Duration;

    fn catalog_with_missing(missing: MovieId) -> MockMovieCatalog {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_get_movie().returning(move |id| {
            if id == missing {
                Err(AppError::NotFound)
            } else {
                Ok(detail(id))
            }
        });
        catalog
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let (_dir, state) = test_state(catalog_with_missing(0));

        add_favorite(1, &state).await.unwrap();
        add_favorite(2, &state).await.unwrap();

        let stored = list_stored_favorites(&state).await.unwrap();
        assert_eq!(stored.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            stored[0].poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster1.jpg")
        );

        let view = list_favorites(&state).await.unwrap();
        assert_eq!(view.movies.len(), 2);
        assert!(view.unavailable.is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_movie_is_not_found() {
        let (_dir, state) = test_state(catalog_with_missing(404));

        let error = add_favorite(404, &state).await.unwrap_err();
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert!(list_stored_favorites(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_reports_unavailable_entries() {
        let (_dir, state) = test_state(catalog_with_missing(2));
        state
            .favorites_service
            .add(MovieSummary::new(2, "Gone"))
            .unwrap();
        add_favorite(3, &state).await.unwrap();

        let view = list_favorites(&state).await.unwrap();

        assert_eq!(view.movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(view.unavailable[0].movie_id, 2);
    }

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let (_dir, state) = test_state(catalog_with_missing(0));

        assert!(toggle_favorite(9, &state).await.unwrap().is_favorite);
        assert!(is_favorite(9, &state).await.unwrap().is_favorite);

        assert!(!toggle_favorite(9, &state).await.unwrap().is_favorite);
        assert!(!is_favorite(9, &state).await.unwrap().is_favorite);
    }

    #[tokio::test]
    async fn test_remove_absent_is_ok() {
        let (_dir, state) = test_state(MockMovieCatalog::new());

        let status = remove_favorite(77, &state).await.unwrap();
        assert!(!status.is_favorite);
    }

    #[tokio::test]
    async fn test_overlapping_toggles_cancel_out() {
        struct SlowCatalog;

        #[async_trait::async_trait]
        impl MovieCatalog for SlowCatalog {
            async fn get_movie(&self, id: MovieId) -> AppResult<MovieDetail> {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Ok(detail(id))
            }
            async fn search_movies(&self, _query: &str) -> AppResult<Vec<MovieSummary>> {
                Ok(Vec::new())
            }
            async fn discover_by_genre(&self, _genre_id: i64) -> AppResult<Vec<MovieSummary>> {
                Ok(Vec::new())
            }
            async fn recommendations(&self, _id: MovieId) -> AppResult<Vec<MovieSummary>> {
                Ok(Vec::new())
            }
            async fn list_genres(&self) -> AppResult<Vec<Genre>> {
                Ok(Vec::new())
            }
        }

        let (_dir, state) = test_state(SlowCatalog);

        // Both calls see the movie as absent before either writes
        let (first, second) =
            tokio::join!(toggle_favorite(9, &state), toggle_favorite(9, &state));

        let mut outcomes = vec![first.unwrap().is_favorite, second.unwrap().is_favorite];
        outcomes.sort();
        assert_eq!(outcomes, vec![false, true]);
        assert!(!is_favorite(9, &state).await.unwrap().is_favorite);
    }

    #[tokio::test]
    async fn test_stored_commands_work_without_credentials() {
        let client = TmdbClient::new(&CatalogConfig::default()).unwrap();
        let (_dir, state) = test_state(client);
        state
            .favorites_service
            .add(MovieSummary::new(4, "Stored"))
            .unwrap();

        assert_eq!(list_stored_favorites(&state).await.unwrap().len(), 1);
        assert!(!toggle_favorite(4, &state).await.unwrap().is_favorite);
        clear_favorites(&state).await.unwrap();

        let error = add_favorite(4, &state).await.unwrap_err();
        assert_eq!(error.error_type, ErrorType::Validation);
    }
}

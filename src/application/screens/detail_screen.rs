// src/application/screens/detail_screen.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::domain::{DomainError, MovieDetail, MovieId};
use crate::error::{AppError, AppResult, ErrorKind};
use crate::events::{EventBus, FavoriteAdded, FavoriteRemoved, SubscriptionId};
use crate::services::{FavoritesService, HydrationService};

/// What the detail screen currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Init,
    Loading { movie_id: MovieId },
    Loaded { movie: MovieDetail, is_favorite: bool },
    NotFound { movie_id: MovieId },
    Error { movie_id: MovieId, kind: ErrorKind },
}

impl DetailView {
    fn loaded_id(&self) -> Option<MovieId> {
        match self {
            DetailView::Loaded { movie, .. } => Some(movie.id),
            _ => None,
        }
    }
}

/// Movie detail. Entered with a movie id only.
/// Store calls are made inline; only catalog fetches are awaited.
pub struct DetailScreen {
    favorites: Arc<FavoritesService>,
    hydration: Arc<HydrationService>,
    event_bus: EventBus,
    subscriptions: [SubscriptionId; 2],
    generation: AtomicU64,
    view: Arc<Mutex<DetailView>>,
}

impl DetailScreen {
    pub fn new(
        favorites: Arc<FavoritesService>,
        hydration: Arc<HydrationService>,
        event_bus: &EventBus,
    ) -> Self {
        let view = Arc::new(Mutex::new(DetailView::Init));

        let weak = Arc::downgrade(&view);
        let added = event_bus.subscribe::<FavoriteAdded, _>(move |event| {
            set_membership(&weak, event.movie_id, true);
        });
        let weak = Arc::downgrade(&view);
        let removed = event_bus.subscribe::<FavoriteRemoved, _>(move |event| {
            set_membership(&weak, event.movie_id, false);
        });

        Self {
            favorites,
            hydration,
            event_bus: event_bus.clone(),
            subscriptions: [added, removed],
            generation: AtomicU64::new(0),
            view,
        }
    }

    /// `Init/any -> Loading -> {Loaded, NotFound, Error}`.
    /// Returns false if a later `open` or `close` superseded this one.
    pub async fn open(&self, movie_id: MovieId) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.lock_view() = DetailView::Loading { movie_id };

        let next = match self.hydration.hydrate_one(movie_id).await {
            Ok(movie) => DetailView::Loaded {
                is_favorite: self.membership_or_false(movie_id),
                movie,
            },
            Err(AppError::NotFound) => DetailView::NotFound { movie_id },
            Err(e) => {
                log::warn!("Could not load movie {}: {}", movie_id, e);
                DetailView::Error {
                    movie_id,
                    kind: e.kind(),
                }
            }
        };

        let mut view = self.lock_view();
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Discarding stale detail for movie {}", movie_id);
            return false;
        }
        *view = next;
        true
    }

    /// Re-reads membership from the store, e.g. when the screen regains focus
    pub fn refresh_membership(&self) -> AppResult<()> {
        let Some(movie_id) = self.lock_view().loaded_id() else {
            return Ok(());
        };

        let is_member = self.hydration.is_favorite(movie_id)?;
        set_membership(&Arc::downgrade(&self.view), movie_id, is_member);
        Ok(())
    }

    /// Flips the flag before writing and restores it if the write fails.
    /// Returns the membership after the write.
    pub fn toggle_favorite(&self) -> AppResult<bool> {
        let (summary, was_favorite) = {
            let mut view = self.lock_view();
            match &mut *view {
                DetailView::Loaded { movie, is_favorite } => {
                    let was_favorite = *is_favorite;
                    *is_favorite = !was_favorite;
                    (movie.summary(), was_favorite)
                }
                other => {
                    return Err(AppError::Domain(DomainError::InvalidStateTransition(
                        format!("Cannot toggle favorite while {:?}", other),
                    )))
                }
            }
        };

        let movie_id = summary.id;
        let written = if was_favorite {
            self.favorites.remove(movie_id)
        } else {
            self.favorites.add(summary)
        };

        match written {
            Ok(_) => Ok(!was_favorite),
            Err(e) => {
                log::warn!("Reverting favorite toggle for movie {}: {}", movie_id, e);
                set_membership(&Arc::downgrade(&self.view), movie_id, was_favorite);
                Err(e)
            }
        }
    }

    /// Leaves the screen. Any load still in flight is discarded.
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.lock_view() = DetailView::Init;
    }

    pub fn view(&self) -> DetailView {
        self.lock_view().clone()
    }

    fn membership_or_false(&self, movie_id: MovieId) -> bool {
        self.hydration.is_favorite(movie_id).unwrap_or_else(|e| {
            log::warn!("Could not read membership of movie {}: {}", movie_id, e);
            false
        })
    }

    fn lock_view(&self) -> MutexGuard<'_, DetailView> {
        self.view.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for DetailScreen {
    fn drop(&mut self) {
        for id in self.subscriptions {
            self.event_bus.unsubscribe(id);
        }
    }
}

fn set_membership(view: &Weak<Mutex<DetailView>>, movie_id: MovieId, member: bool) {
    let Some(view) = view.upgrade() else {
        return;
    };
    let mut view = view.lock().unwrap_or_else(|e| e.into_inner());
    if let DetailView::Loaded { movie, is_favorite } = &mut *view {
        if movie.id == movie_id {
            *is_favorite = member;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::domain::{FavoritesList, MovieSummary};
    use crate::integrations::{MockMovieCatalog, MovieCatalog};
    use crate::repositories::{
        FavoritesRepository, KeyValueFavoritesRepository, MockFavoritesRepository,
        SqliteKeyValueRepository, DEFAULT_FAVORITES_KEY,
    };
    use std::time::Duration;

    fn detail(id: MovieId) -> MovieDetail {
        MovieDetail {
            id,
            title: format!("Movie {}", id),
            poster_path: None,
            release_date: None,
            vote_average: Some(8.1),
            overview: "Plot".to_string(),
            tagline: None,
            runtime_minutes: Some(120),
            genres: Vec::new(),
        }
    }

    fn catalog() -> MockMovieCatalog {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_get_movie().returning(|id| match id {
            404 => Err(AppError::NotFound),
            503 => Err(AppError::Transport("503 Service Unavailable".to_string())),
            _ => Ok(detail(id)),
        });
        catalog
    }

    fn screen_with(
        repo: Arc<dyn FavoritesRepository>,
        catalog: impl MovieCatalog + 'static,
    ) -> (Arc<FavoritesService>, DetailScreen) {
        let bus = Arc::new(EventBus::new());
        let favorites = Arc::new(FavoritesService::new(repo, Arc::clone(&bus)));
        let hydration = Arc::new(HydrationService::new(
            Arc::new(catalog),
            Arc::clone(&favorites),
            Arc::clone(&bus),
            4,
        ));
        let screen = DetailScreen::new(Arc::clone(&favorites), hydration, &bus);
        (favorites, screen)
    }

    fn sqlite_repo() -> (tempfile::TempDir, Arc<dyn FavoritesRepository>) {
        let (dir, pool) = create_test_pool();
        let kv = Arc::new(SqliteKeyValueRepository::new(Arc::new(pool)));
        (
            dir,
            Arc::new(KeyValueFavoritesRepository::new(kv, DEFAULT_FAVORITES_KEY)),
        )
    }

    #[tokio::test]
    async fn test_open_loads_with_membership() {
        let (_dir, repo) = sqlite_repo();
        let (favorites, screen) = screen_with(repo, catalog());
        favorites.add(MovieSummary::new(7, "Seven")).unwrap();

        assert_eq!(screen.view(), DetailView::Init);
        assert!(screen.open(7).await);

        assert_eq!(
            screen.view(),
            DetailView::Loaded {
                movie: detail(7),
                is_favorite: true
            }
        );
    }

    #[tokio::test]
    async fn test_open_distinguishes_not_found_from_error() {
        let (_dir, repo) = sqlite_repo();
        let (_favorites, screen) = screen_with(repo, catalog());

        screen.open(404).await;
        assert_eq!(screen.view(), DetailView::NotFound { movie_id: 404 });

        screen.open(503).await;
        assert_eq!(
            screen.view(),
            DetailView::Error {
                movie_id: 503,
                kind: ErrorKind::Transport
            }
        );
    }

    #[tokio::test]
    async fn test_toggle_writes_through() {
        let (_dir, repo) = sqlite_repo();
        let (favorites, screen) = screen_with(repo, catalog());
        screen.open(3).await;

        assert!(screen.toggle_favorite().unwrap());
        assert!(favorites.contains(3).unwrap());
        assert_eq!(favorites.list().unwrap().as_slice()[0].title, "Movie 3");

        assert!(!screen.toggle_favorite().unwrap());
        assert!(!favorites.contains(3).unwrap());
        assert!(matches!(
            screen.view(),
            DetailView::Loaded { is_favorite: false, .. }
        ));
    }

    #[tokio::test]
    async fn test_toggle_reverts_when_write_fails() {
        let mut repo = MockFavoritesRepository::new();
        repo.expect_load().returning(|| Ok(FavoritesList::new()));
        repo.expect_save()
            .returning(|_| Err(AppError::Pool("database is locked".to_string())));
        let (_favorites, screen) = screen_with(Arc::new(repo), catalog());
        screen.open(3).await;

        let result = screen.toggle_favorite();

        assert!(matches!(result, Err(AppError::Pool(_))));
        assert!(matches!(
            screen.view(),
            DetailView::Loaded { is_favorite: false, .. }
        ));
    }

    #[tokio::test]
    async fn test_toggle_outside_loaded_is_rejected() {
        let (_dir, repo) = sqlite_repo();
        let (_favorites, screen) = screen_with(repo, catalog());

        let result = screen.toggle_favorite();
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidStateTransition(_)))
        ));
    }

    #[tokio::test]
    async fn test_membership_follows_external_changes() {
        let (_dir, repo) = sqlite_repo();
        let (favorites, screen) = screen_with(repo, catalog());
        screen.open(9).await;

        favorites.add(MovieSummary::new(9, "Nine")).unwrap();
        assert!(matches!(screen.view(), DetailView::Loaded { is_favorite: true, .. }));

        favorites.remove(9).unwrap();
        screen.refresh_membership().unwrap();
        assert!(matches!(screen.view(), DetailView::Loaded { is_favorite: false, .. }));
    }

    #[tokio::test]
    async fn test_stale_open_does_not_overwrite_newer() {
        struct SlowForOne;

        #[async_trait::async_trait]
        impl MovieCatalog for SlowForOne {
            async fn get_movie(&self, id: MovieId) -> AppResult<MovieDetail> {
                if id == 1 {
                    tokio::time::sleep(Duration::from_millis(80)).await;
                }
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
            async fn list_genres(&self) -> AppResult<Vec<crate::domain::Genre>> {
                Ok(Vec::new())
            }
        }

        let (_dir, repo) = sqlite_repo();
        let (_favorites, screen) = screen_with(repo, SlowForOne);

        let (first, second) = tokio::join!(screen.open(1), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            screen.open(2).await
        });

        assert!(!first);
        assert!(second);
        assert_eq!(screen.view().loaded_id(), Some(2));
    }

    #[tokio::test]
    async fn test_close_resets_view() {
        let (_dir, repo) = sqlite_repo();
        let (_favorites, screen) = screen_with(repo, catalog());
        screen.open(5).await;

        screen.close();
        assert_eq!(screen.view(), DetailView::Init);
    }

    #[test]
    fn test_dropping_screen_unsubscribes() {
        let bus = Arc::new(EventBus::new());
        let (_dir, repo) = sqlite_repo();
        let favorites = Arc::new(FavoritesService::new(repo, Arc::clone(&bus)));
        let hydration = Arc::new(HydrationService::new(
            Arc::new(catalog()),
            Arc::clone(&favorites),
            Arc::clone(&bus),
            4,
        ));

        let screen = DetailScreen::new(Arc::clone(&favorites), hydration, &bus);
        assert_eq!(bus.subscriber_count::<FavoriteAdded>(), 1);
        assert_eq!(bus.subscriber_count::<FavoriteRemoved>(), 1);

        drop(screen);
        assert_eq!(bus.subscriber_count::<FavoriteAdded>(), 0);
        assert_eq!(bus.subscriber_count::<FavoriteRemoved>(), 0);

        favorites.add(MovieSummary::new(1, "After close")).unwrap();
    }
}

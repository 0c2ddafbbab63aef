use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::movie::{MovieId, MovieSummary};

/// Ordered list of favorited movies, unique by id.
///
/// Insertion order is favorite order. Serialized as a plain JSON array of
/// summaries, which is the persisted form. Deserializing goes through
/// `from_movies`, so a list never holds the same id twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<MovieSummary>", into = "Vec<MovieSummary>")]
pub struct FavoritesList {
    movies: Vec<MovieSummary>,
}

impl FavoritesList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from arbitrary input, keeping the first occurrence of
    /// each id and dropping later duplicates.
    pub fn from_movies(movies: Vec<MovieSummary>) -> Self {
        let mut seen = HashSet::with_capacity(movies.len());
        let movies = movies
            .into_iter()
            .filter(|movie| seen.insert(movie.id))
            .collect();
        Self { movies }
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.iter().any(|movie| movie.id == id)
    }

    pub fn get(&self, id: MovieId) -> Option<&MovieSummary> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    /// Appends `movie` unless its id is already present.
    /// Returns true if the list changed.
    pub fn insert(&mut self, movie: MovieSummary) -> bool {
        if self.contains(movie.id) {
            return false;
        }
        self.movies.push(movie);
        true
    }

    /// Returns true if an entry was removed.
    pub fn remove(&mut self, id: MovieId) -> bool {
        let before = self.movies.len();
        self.movies.retain(|movie| movie.id != id);
        self.movies.len() != before
    }

    pub fn ids(&self) -> Vec<MovieId> {
        self.movies.iter().map(|movie| movie.id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MovieSummary> {
        self.movies.iter()
    }

    pub fn as_slice(&self) -> &[MovieSummary] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl From<Vec<MovieSummary>> for FavoritesList {
    fn from(movies: Vec<MovieSummary>) -> Self {
        Self::from_movies(movies)
    }
}

impl From<FavoritesList> for Vec<MovieSummary> {
    fn from(list: FavoritesList) -> Self {
        list.movies
    }
}

impl<'a> IntoIterator for &'a FavoritesList {
    type Item = &'a MovieSummary;
    type IntoIter = std::slice::Iter<'a, MovieSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

impl IntoIterator for FavoritesList {
    type Item = MovieSummary;
    type IntoIter = std::vec::IntoIter<MovieSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId) -> MovieSummary {
        MovieSummary::new(id, format!("Movie {}", id))
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut list = FavoritesList::new();
        assert!(list.insert(movie(42)));
        assert!(!list.insert(movie(42)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut list = FavoritesList::new();
        list.insert(movie(1));
        list.insert(movie(2));
        list.insert(movie(3));
        assert_eq!(list.ids(), vec![1, 2, 3]);

        assert!(list.remove(2));
        assert_eq!(list.ids(), vec![1, 3]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = FavoritesList::from_movies(vec![movie(1)]);
        assert!(!list.remove(99));
        assert_eq!(list.ids(), vec![1]);
    }

    #[test]
    fn test_from_movies_keeps_first_duplicate() {
        let mut first = movie(5);
        first.title = "First".to_string();
        let mut second = movie(5);
        second.title = "Second".to_string();

        let list = FavoritesList::from_movies(vec![first, movie(6), second]);
        assert_eq!(list.ids(), vec![5, 6]);
        assert_eq!(list.get(5).unwrap().title, "First");
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let list = FavoritesList::from_movies(vec![movie(1), movie(2)]);
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.starts_with('['));

        let back: FavoritesList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_deserialize_drops_duplicate_ids() {
        let list: FavoritesList = serde_json::from_str(
            r#"[{"id": 1, "title": "A"}, {"id": 2, "title": "B"}, {"id": 1, "title": "A again"}]"#,
        )
        .unwrap();

        assert_eq!(list.ids(), vec![1, 2]);
        assert_eq!(list.get(1).unwrap().title, "A");
    }
}

//! Vec-backed movie store. Linear scans; sized for fixture-scale data.

use super::{MovieRepository, StoreError};
use crate::domain::movie::{Movie, MoviePatch};

#[derive(Debug, Default, Clone)]
pub struct InMemoryMovieStore {
    movies: Vec<Movie>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with already-validated records, keeping their order.
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.id == id)
    }
}

impl MovieRepository for InMemoryMovieStore {
    fn list_all(&self) -> Vec<Movie> {
        self.movies.clone()
    }

    fn list_by_genre(&self, genre: &str) -> Vec<Movie> {
        self.movies
            .iter()
            .filter(|m| m.has_genre(genre))
            .cloned()
            .collect()
    }

    fn get_by_id(&self, id: &str) -> Option<Movie> {
        self.movies.iter().find(|m| m.id == id).cloned()
    }

    fn insert(&mut self, movie: Movie) -> Movie {
        self.movies.push(movie.clone());
        movie
    }

    fn update_by_id(&mut self, id: &str, patch: MoviePatch) -> Result<Movie, StoreError> {
        let idx = self.position(id).ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        let movie = &mut self.movies[idx];
        movie.apply(patch);
        Ok(movie.clone())
    }

    fn delete_by_id(&mut self, id: &str) -> Result<Movie, StoreError> {
        let idx = self.position(id).ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        Ok(self.movies.remove(idx))
    }

    fn len(&self) -> usize {
        self.movies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, genre: &[&str]) -> Movie {
        Movie {
            id: id.to_string(),
            title: format!("Movie {id}"),
            year: 2000,
            director: "Someone".to_string(),
            duration: 100,
            poster: "https://example.com/p.jpg".to_string(),
            genre: genre.iter().map(|g| g.to_string()).collect(),
            rate: 7.0,
        }
    }

    fn seeded() -> InMemoryMovieStore {
        InMemoryMovieStore::with_movies(vec![
            movie("a", &["Action"]),
            movie("b", &["Drama"]),
            movie("c", &["Drama", "Action"]),
        ])
    }

    fn ids(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn insert_appends_in_order() {
        let mut store = InMemoryMovieStore::new();
        assert!(store.is_empty());
        store.insert(movie("x", &["Horror"]));
        store.insert(movie("y", &["Comedy"]));
        assert_eq!(ids(&store.list_all()), vec!["x", "y"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn genre_filter_is_case_insensitive() {
        let store = seeded();
        assert_eq!(ids(&store.list_by_genre("action")), vec!["a", "c"]);
        assert_eq!(ids(&store.list_by_genre("DRAMA")), vec!["b", "c"]);
        assert!(store.list_by_genre("horror").is_empty());
    }

    #[test]
    fn get_by_id_finds_exact_record() {
        let store = seeded();
        assert_eq!(store.get_by_id("b"), Some(movie("b", &["Drama"])));
        assert_eq!(store.get_by_id("zzz"), None);
    }

    #[test]
    fn update_keeps_position() {
        let mut store = seeded();
        let updated = store
            .update_by_id(
                "b",
                MoviePatch {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(ids(&store.list_all()), vec!["a", "b", "c"]);
        assert_eq!(store.get_by_id("b").unwrap().title, "Renamed");
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut store = seeded();
        let err = store.update_by_id("nope", MoviePatch::default()).unwrap_err();
        assert_eq!(err, StoreError::NotFound { id: "nope".to_string() });
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn delete_shifts_later_records() {
        let mut store = seeded();
        let removed = store.delete_by_id("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(ids(&store.list_all()), vec!["b", "c"]);
    }

    #[test]
    fn repeated_delete_is_not_found() {
        let mut store = seeded();
        store.delete_by_id("c").unwrap();
        assert!(matches!(store.delete_by_id("c"), Err(StoreError::NotFound { .. })));
        assert_eq!(store.len(), 2);
    }
}

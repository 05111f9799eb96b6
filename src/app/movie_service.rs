//! The movie service.
//!
//! Sits between the HTTP handlers and the record store and runs each request's
//! pipeline: validate (for writes), locate (for item routes), then read or mutate.

use crate::domain::movie::{validate_movie, validate_partial_movie, Movie, ValidationErrors};
use crate::storage::{MovieRepository, StoreError};
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("movie not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id } => ServiceError::NotFound(id),
        }
    }
}

/// Owns the store for the lifetime of the process. Shared behind an async `RwLock`;
/// writers hold the write half for the whole validate/locate/mutate sequence.
pub struct MovieService {
    store: Box<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(store: impl MovieRepository + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// All movies, or only those tagged with `genre` (case-insensitive).
    pub fn list(&self, genre: Option<&str>) -> Vec<Movie> {
        match genre {
            Some(g) => self.store.list_by_genre(g),
            None => self.store.list_all(),
        }
    }

    pub fn get(&self, id: &str) -> Result<Movie, ServiceError> {
        self.store
            .get_by_id(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Validates the payload, assigns a fresh id and appends the record.
    pub fn create(&mut self, payload: &JsonValue) -> Result<Movie, ServiceError> {
        let new = validate_movie(payload)?;
        let id = self.fresh_id();
        let movie = self.store.insert(Movie::from_new(id, new));
        tracing::debug!(id = %movie.id, title = %movie.title, "movie created");
        Ok(movie)
    }

    /// Validates the patch first, then merges it onto the existing record.
    pub fn update(&mut self, id: &str, payload: &JsonValue) -> Result<Movie, ServiceError> {
        let patch = validate_partial_movie(payload)?;
        let movie = self.store.update_by_id(id, patch)?;
        tracing::debug!(id = %movie.id, "movie updated");
        Ok(movie)
    }

    pub fn delete(&mut self, id: &str) -> Result<Movie, ServiceError> {
        let movie = self.store.delete_by_id(id)?;
        tracing::debug!(id = %movie.id, "movie deleted");
        Ok(movie)
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }

    // v4 collisions are negligible, but fixture ids are arbitrary strings.
    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.store.get_by_id(&id).is_none() {
                return id;
            }
        }
    }
}

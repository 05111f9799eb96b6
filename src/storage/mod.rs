//! Record storage for movies.

pub mod fixture;
pub mod memory;

pub use memory::InMemoryMovieStore;

use crate::domain::movie::{Movie, MoviePatch};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("movie not found: {id}")]
    NotFound { id: String },
}

/// The contract every movie store implements.
///
/// Callers only go through these operations, so the in-memory store can be
/// swapped for another backend without touching the service or HTTP layers.
pub trait MovieRepository: Send + Sync {
    /// All records, in insertion order.
    fn list_all(&self) -> Vec<Movie>;

    /// Records whose genre list contains `genre` (case-insensitive). Empty if none match.
    fn list_by_genre(&self, genre: &str) -> Vec<Movie>;

    fn get_by_id(&self, id: &str) -> Option<Movie>;

    /// Appends a record. The caller must have assigned the id and validated the fields.
    fn insert(&mut self, movie: Movie) -> Movie;

    /// Merges `patch` onto the record with `id`, keeping its position.
    fn update_by_id(&mut self, id: &str, patch: MoviePatch) -> Result<Movie, StoreError>;

    /// Removes the record with `id`, shifting later records down.
    fn delete_by_id(&mut self, id: &str) -> Result<Movie, StoreError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

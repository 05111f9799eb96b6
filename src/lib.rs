pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::movie_service::{MovieService, ServiceError};
pub use domain::movie::{Movie, MoviePatch, NewMovie};
pub use storage::{InMemoryMovieStore, MovieRepository};

use crate::app::movie_service::MovieService;
use crate::domain::movie::Issue;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::{IntoParams, ToSchema};

pub const MOVIE_NOT_FOUND: &str = "Movie not found";
pub const MOVIE_DELETED: &str = "Movie deleted";

#[derive(Clone)]
pub struct AppState {
    pub movie_service: Arc<RwLock<MovieService>>,
}

impl AppState {
    pub fn new(movie_service: MovieService) -> Self {
        Self {
            movie_service: Arc::new(RwLock::new(movie_service)),
        }
    }
}

#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMoviesQuery {
    /// Only return movies tagged with this genre (case-insensitive).
    pub genre: Option<String>,
}

impl ListMoviesQuery {
    /// Built from raw pairs so repeated or unexpected keys never reject the request.
    /// The first non-empty `genre` wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let genre = pairs
            .into_iter()
            .find(|(k, v)| k == "genre" && !v.is_empty())
            .map(|(_, v)| v);
        Self { genre }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of a 400: one entry per violated field constraint.
#[derive(Serialize, Debug, ToSchema)]
pub struct ValidationErrorResponse {
    pub error: Vec<Issue>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Number of movies currently held in memory.
    pub movies: usize,
}

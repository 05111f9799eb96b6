use crate::domain::movie::{Movie, MoviePatch, NewMovie};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{
    AppState, ListMoviesQuery, MessageResponse, ValidationErrorResponse, MOVIE_DELETED,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/movies",
    params(ListMoviesQuery),
    responses(
        (status = 200, description = "All movies, or those matching the genre filter", body = [Movie])
    )
)]
pub async fn list_movies_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Movie>> {
    // `?genre=` with an empty value lists everything.
    let query = ListMoviesQuery::from_pairs(pairs);
    let service = state.movie_service.read().await;
    Json(service.list(query.genre.as_deref()))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie id")
    ),
    responses(
        (status = 200, description = "The movie", body = Movie),
        (status = 404, description = "No movie with this id", body = MessageResponse)
    )
)]
pub async fn get_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let service = state.movie_service.read().await;
    Ok(Json(service.get(&id)?))
}

#[utoipa::path(
    post,
    path = "/movies",
    request_body = NewMovie,
    responses(
        (status = 201, description = "Movie created; body is the stored record with its id", body = Movie),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse)
    )
)]
pub async fn create_movie_handler(
    State(state): State<AppState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let Json(payload) = request?;
    let mut service = state.movie_service.write().await;
    let movie = service.create(&payload)?;
    tracing::info!(id = %movie.id, title = %movie.title, "created movie");
    Ok((StatusCode::CREATED, Json(movie)))
}

#[utoipa::path(
    patch,
    path = "/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie id")
    ),
    request_body = MoviePatch,
    responses(
        (status = 200, description = "Movie updated; body is the merged record", body = Movie),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 404, description = "No movie with this id", body = MessageResponse)
    )
)]
pub async fn update_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<Movie>, ApiError> {
    let Json(payload) = request?;
    let mut service = state.movie_service.write().await;
    let movie = service.update(&id, &payload)?;
    tracing::info!(id = %movie.id, "updated movie");
    Ok(Json(movie))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie id")
    ),
    responses(
        (status = 200, description = "Movie deleted", body = MessageResponse),
        (status = 404, description = "No movie with this id", body = MessageResponse)
    )
)]
pub async fn delete_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut service = state.movie_service.write().await;
    let movie = service.delete(&id)?;
    tracing::info!(id = %movie.id, "deleted movie");
    Ok(Json(MessageResponse::new(MOVIE_DELETED)))
}

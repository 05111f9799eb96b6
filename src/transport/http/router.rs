use crate::domain::movie::{Issue, IssueCode, Movie, MoviePatch, NewMovie};
use crate::transport::http::cors::{cors_gate, cors_layer};
use crate::transport::http::handlers::{health, movies};
use crate::transport::http::types::{
    AppState, HealthResponse, MessageResponse, ValidationErrorResponse,
};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        movies::list_movies_handler,
        movies::get_movie_handler,
        movies::create_movie_handler,
        movies::update_movie_handler,
        movies::delete_movie_handler
    ),
    components(schemas(
        Movie,
        NewMovie,
        MoviePatch,
        Issue,
        IssueCode,
        MessageResponse,
        ValidationErrorResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

/// Routes, docs and the CORS/tracing stack. Every request passes the CORS gate before routing.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/movies",
            get(movies::list_movies_handler).post(movies::create_movie_handler),
        )
        .route(
            "/movies/:id",
            get(movies::get_movie_handler)
                .patch(movies::update_movie_handler)
                .delete(movies::delete_movie_handler),
        )
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer())
        .layer(middleware::from_fn(cors_gate))
        .layer(TraceLayer::new_for_http())
}

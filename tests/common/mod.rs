use movies_api::storage::fixture;
use movies_api::infra::config::FixtureSource;
use movies_api::{transport, InMemoryMovieStore, Movie, MovieService};

/// Starts the full router on an ephemeral port and returns its base URL.
pub async fn spawn_server(movies: Vec<Movie>) -> Result<String, Box<dyn std::error::Error>> {
    let service = MovieService::new(InMemoryMovieStore::with_movies(movies));
    let router = transport::http::create_router(transport::http::AppState::new(service));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Ok(format!("http://127.0.0.1:{}", port))
}

#[allow(dead_code)]
pub fn bundled_movies() -> Vec<Movie> {
    fixture::load(&FixtureSource::Bundled).expect("bundled fixture loads")
}

// src/bin/api_server.rs

use movies_api::infra::{config, logging};
use movies_api::storage::fixture;
use movies_api::transport;
use movies_api::{InMemoryMovieStore, MovieService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    // --- Record Store Initialization ---
    let source = config::movies_fixture();
    let movies = fixture::load(&source)?;
    tracing::info!(?source, count = movies.len(), "seeded movie store");

    let service = MovieService::new(InMemoryMovieStore::with_movies(movies));
    let app_state = transport::http::AppState::new(service);

    // --- API Server Initialization ---
    let addr = config::listen_addr()?;
    let app = transport::http::create_router(app_state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!("server listening on http://localhost:{}", local.port());
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", local.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {}", e);
        // Never resolve: without a signal handler we just run until killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

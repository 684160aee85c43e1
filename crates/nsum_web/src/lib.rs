use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/api/summarize", post(handlers::summarize))
        .route(
            "/api/articles",
            get(handlers::list_articles).delete(handlers::clear_articles),
        )
        .route("/api/stats", get(handlers::stats))
        .route("/api/sources", get(handlers::sources))
        .layer(middleware)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> nsum_core::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use nsum_core::{Error, ProcessedArticle, Result};
}

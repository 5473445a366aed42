pub mod handlers;
pub mod routes;
pub mod session;

mod tests;

use axum::{middleware, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::repo::Repo;

#[derive(Clone)]
pub struct AppState {
    pub repo: Repo,
}

impl AppState {
    pub fn new(db: PgPool) -> Arc<Self> {
        Arc::new(Self {
            repo: Repo::new(db),
        })
    }
}

pub async fn serve(addr: String, state: Arc<AppState>) -> crate::Result<()> {
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(middleware::from_fn(crate::csrf::require_same_origin))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::Error::Internal(e.to_string()))?;

    Ok(())
}

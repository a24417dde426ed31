use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use careerstack_engine::{CompanyDirectory, PipelineCoordinator};
use tower_http::cors::CorsLayer;

use crate::routes;
use crate::telegram::TelegramNotifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<PipelineCoordinator>,
    pub directory: Arc<CompanyDirectory>,
    pub telegram: Option<Arc<TelegramNotifier>>,
}

/// Builds the API router. CORS is permissive; the frontend is served
/// from a different origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/fetch-latest", get(routes::fetch_latest))
        .route("/api/upload-csv", post(routes::upload_csv))
        .route("/api/send-telegram", post(routes::send_telegram))
        .route("/api/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

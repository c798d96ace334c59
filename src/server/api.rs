//! API route definitions

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{PredictionContext, handlers};

/// Create the application router. Static assets are read from `static_dir` on
/// each request, so a missing directory only makes `/static/*` return 404.
pub fn create_router(ctx: Arc<PredictionContext>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::handle_404)
        .method_not_allowed_fallback(handlers::handle_405)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

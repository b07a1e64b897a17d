use std::path::Path;

use axum::{
    extract::DefaultBodyLimit, http::Uri, middleware, response::Redirect, routing::get, Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{
    logging_middleware, metrics_middleware, security::MAX_BODY_SIZE, security_headers_middleware,
};
use super::state::AppState;
use super::types::ApiError;
use super::v1;

/// Create the full router: health probes, the v1 API and the static UI
/// served from `static_dir`
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    let ui = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Prediction API
        .nest("/v1", v1::create_v1_router())
        // Web form
        .nest_service("/ui", ui)
        .route("/", get(|| async { Redirect::temporary("/ui/") }))
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for '{}'", uri.path()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::prediction::mock::StubPredictor;
    use crate::domain::{ClassLabel, FeatureDef, FeatureSchema};
    use crate::infrastructure::services::PredictionService;

    fn app(static_dir: &Path) -> Router {
        let schema = FeatureSchema::new(vec![FeatureDef::numeric("Age", 18.0, 100.0)]);
        let classes = vec![ClassLabel::new("Benign"), ClassLabel::new("Malignant")];
        let service = PredictionService::new(Arc::new(StubPredictor::new(schema, classes)));

        create_router(AppState::new(Arc::new(service)), static_dir)
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_ui() {
        let dir = tempfile::tempdir().unwrap();
        let response = get(app(dir.path()), "/").await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"], "/ui/");
    }

    #[tokio::test]
    async fn test_ui_serves_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>form</h1>").unwrap();

        let response = get(app(dir.path()), "/ui/some/client/route").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let dir = tempfile::tempdir().unwrap();
        let response = get(app(dir.path()), "/v2/predict").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = get(app(dir.path()), "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}

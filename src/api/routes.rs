//! API Routes
//!
//! Configures the Axum router with all background remover endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{remove_background_handler, root_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Plain-text liveness banner
/// - `POST /remove-background` - Upload an image, get the removal artifact URL
/// - `POST /api/remove-background` - Same handler under the `/api` prefix
/// - `GET /outputs/<file>` - Static serving of produced artifacts
///
/// # Middleware
/// - Body limit: rejects multipart bodies over the configured size
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Artifacts are re-served straight off disk
    let outputs = ServeDir::new(state.store.output_dir());

    Router::new()
        .route("/", get(root_handler))
        .route("/remove-background", post(remove_background_handler))
        .route("/api/remove-background", post(remove_background_handler))
        .nest_service("/outputs", outputs)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::removal::{BackgroundRemover, RemovalError};
    use crate::storage::FileStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    struct StubRemover;
    impl BackgroundRemover for StubRemover {
        fn process(&self, image: &[u8]) -> Result<Vec<u8>, RemovalError> {
            Ok(image.to_vec())
        }
    }

    async fn create_test_app() -> (Router, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("uploads"), tmp.path().join("outputs"));
        store.ensure_dirs().await.unwrap();
        let state = AppState::new(store, Arc::new(StubRemover));
        (create_router(state), tmp)
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let (app, _tmp) = create_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_output_returns_not_found() {
        let (app, _tmp) = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/outputs/no-such-file.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_without_multipart_is_rejected() {
        let (app, _tmp) = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/remove-background")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}

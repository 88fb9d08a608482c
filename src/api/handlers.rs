//! API Handlers
//!
//! HTTP request handlers for the background remover endpoints.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{error, info};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::RemoveBackgroundResponse;
use crate::removal::{BackgroundRemover, CommandRemover};
use crate::storage::{self, FileStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Filesystem store for uploads and artifacts
    pub store: FileStore,
    /// The opaque background-removal capability
    pub remover: Arc<dyn BackgroundRemover>,
    /// Opt-in policy: delete all prior artifacts at the start of each request
    pub eager_clear: bool,
    /// Maximum accepted multipart body size in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Creates a new AppState with the given store and remover.
    pub fn new(store: FileStore, remover: Arc<dyn BackgroundRemover>) -> Self {
        Self {
            store,
            remover,
            eager_clear: false,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }

    /// Creates a new AppState from configuration, wiring in the external
    /// removal command.
    pub fn from_config(config: &Config) -> Self {
        let store = FileStore::new(&config.upload_dir, &config.output_dir);
        let remover = Arc::new(CommandRemover::new(&config.remover_command));
        Self {
            store,
            remover,
            eager_clear: config.eager_clear_outputs,
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Sets the eager-clear policy.
    pub fn with_eager_clear(mut self, eager_clear: bool) -> Self {
        self.eager_clear = eager_clear;
        self
    }
}

/// Handler for GET /
///
/// Plain-text liveness banner.
pub async fn root_handler() -> &'static str {
    "Background Remover API is running. POST an image to /api/remove-background"
}

/// Handler for POST /remove-background and POST /api/remove-background
///
/// Accepts a single multipart file field named `image`, validates its declared
/// media type, persists it, runs the external removal operation and responds
/// with the artifact's URL. On removal failure the stored upload is left in
/// place for the retention sweeper to reclaim.
pub async fn remove_background_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RemoveBackgroundResponse>> {
    // Intake: find the `image` field and buffer it. Validation happens before
    // anything touches the uploads directory.
    let mut upload: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let media_type = field.content_type().unwrap_or("").to_string();
        if !storage::is_allowed_media_type(&media_type) {
            return Err(ApiError::UnsupportedMediaType(media_type));
        }

        let original = field.file_name().unwrap_or("image").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?;
        upload = Some((original, media_type, data.to_vec()));
        break;
    }

    let (original, media_type, data) = upload.ok_or(ApiError::MissingFile)?;
    let upload_path = state.store.save_upload(&original, &media_type, &data).await?;

    if state.eager_clear {
        state.store.clear_outputs().await;
    }

    process_stored_upload(&state, &upload_path).await
}

/// Runs the removal pipeline for an already-stored upload: read, process,
/// write the artifact, delete the consumed upload, build the response.
pub async fn process_stored_upload(
    state: &AppState,
    upload_path: &Path,
) -> Result<Json<RemoveBackgroundResponse>> {
    let input = state.store.read_upload(upload_path).await?;

    info!("Running background removal on {}", upload_path.display());
    let remover = state.remover.clone();
    let removed = match tokio::task::spawn_blocking(move || remover.process(&input)).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            // Upload is intentionally retained; the sweeper reclaims it
            error!(
                "Background removal failed for {}: {}",
                upload_path.display(),
                e
            );
            return Err(ApiError::Processing);
        }
        Err(e) => {
            error!("Background removal task panicked: {}", e);
            return Err(ApiError::Processing);
        }
    };

    let upload_name = upload_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let output_name = storage::output_file_name(&upload_name);
    state.store.write_output(&output_name, &removed).await?;

    state.store.delete_upload(upload_path).await;

    let file_url = state.store.output_url(&output_name);
    Ok(Json(RemoveBackgroundResponse::new(file_url, output_name)))
}

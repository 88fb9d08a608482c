//! API Module
//!
//! HTTP handlers and routing for the background remover REST API.
//!
//! # Endpoints
//! - `GET /` - Plain-text liveness banner
//! - `POST /remove-background` - Remove the background of an uploaded image
//! - `POST /api/remove-background` - Same operation under the `/api` prefix
//! - `GET /outputs/<file>` - Static serving of produced artifacts

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

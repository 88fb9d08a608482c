//! Response models for the background remover API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing HTTP response bodies. The only request body is multipart,
//! consumed directly by the handler.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, RemoveBackgroundResponse};

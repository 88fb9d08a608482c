//! Storage Module
//!
//! Filesystem-backed storage for uploads and processed artifacts, plus the
//! naming scheme that keeps concurrent requests from colliding.

pub mod names;
mod store;

#[cfg(test)]
mod property_tests;

pub use names::{is_allowed_media_type, output_file_name, ALLOWED_MEDIA_TYPES};
pub use store::FileStore;

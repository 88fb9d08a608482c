//! Background Remover - an image background-removal HTTP service
//!
//! Accepts multipart image uploads, delegates the removal computation to an
//! external tool, serves the resulting artifacts statically and sweeps stale
//! files on a fixed cadence.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod removal;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;

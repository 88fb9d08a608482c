//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Retention sweep: removes stale uploads and artifacts on a wall-clock
//!   cadence

mod sweep;

pub use sweep::{delay_until_next_sweep, spawn_sweep_task, sweep_dir, RetentionPolicy};

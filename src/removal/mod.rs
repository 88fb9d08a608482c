//! Background Removal Module
//!
//! Narrow interface over the external background-removal computation. The
//! service never looks inside this operation: image bytes go in, PNG bytes
//! come out, or it fails. Handlers and tests can swap implementations freely.

mod command;

use thiserror::Error;

pub use command::CommandRemover;

// == Removal Error ==
/// Failure of the external removal operation.
#[derive(Error, Debug)]
pub enum RemovalError {
    /// The external tool could not be spawned or piped
    #[error("failed to run removal tool: {0}")]
    Io(#[from] std::io::Error),

    /// The external tool ran but reported failure
    #[error("removal tool failed: {0}")]
    Tool(String),
}

// == Remover Trait ==
/// The opaque background-removal capability.
///
/// Implementations are blocking; callers on the async runtime invoke them via
/// `tokio::task::spawn_blocking`.
pub trait BackgroundRemover: Send + Sync {
    /// Transforms an input image into a background-removed PNG.
    fn process(&self, image: &[u8]) -> Result<Vec<u8>, RemovalError>;
}

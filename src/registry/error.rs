//! Registry error types

use thiserror::Error;

/// Error type for registry operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry has been shut down and accepts no new subscribers
    #[error("topic registry is closed")]
    Closed,
}

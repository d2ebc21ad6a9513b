//! Error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::dispatcher::DispatcherPhase;
use crate::registry::RegistryError;

/// Crate-level error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Subscriptions are only accepted while ingestion is running
    #[error("dispatcher is not running (phase: {0})")]
    NotRunning(DispatcherPhase),

    #[error("dispatcher has already been started")]
    AlreadyStarted,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

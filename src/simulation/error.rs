//! Error types and handling
//!
//! This module contains the error type returned by the engine constructor and
//! the runner. Unknown tag or zone ids are never errors; they surface as `None`
//! or empty results.

use thiserror::Error;

use crate::transport::TransportError;
use crate::types::{ConfigError, ConfigValidationError};

/// Errors that can occur while setting up or driving a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(#[from] ConfigValidationError),

    /// Configuration could not be loaded
    #[error("Configuration loading failed: {0}")]
    ConfigLoadError(#[from] ConfigError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The publish boundary rejected a message
    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    /// The runner was driven out of order
    #[error("Runner state error: {0}")]
    StateError(String),
}

impl SimulationError {
    /// Create a runner state error
    pub fn state_error(msg: impl Into<String>) -> Self {
        Self::StateError(msg.into())
    }

    /// Check if the run can continue after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::ConfigLoadError(_) => false,
            SimulationError::IoError(_) => false,
            SimulationError::SerializationError(_) => true,
            SimulationError::TransportError(e) => e.is_recoverable(),
            SimulationError::StateError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::ConfigLoadError(_) => "Configuration",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
            SimulationError::TransportError(_) => "Transport",
            SimulationError::StateError(_) => "Runner",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

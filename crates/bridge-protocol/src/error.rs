//! Error types for the protocol

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable code carried in a `Failure` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCode {
    /// A required argument is absent, null, or has the wrong shape
    InvalidArgument,
    /// A host primitive reported an error
    HostFailure,
}

impl FailureCode {
    /// Wire rendering of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::InvalidArgument => "INVALID_ARGUMENT",
            FailureCode::HostFailure => "HOST_FAILURE",
        }
    }
}

impl std::fmt::Display for FailureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Protocol error
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Argument {name}: expected {expected}")]
    InvalidArgumentType {
        name: &'static str,
        expected: &'static str,
    },
}

/// Result type alias for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

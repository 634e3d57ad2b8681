//! Host error types

use thiserror::Error;

/// Failure reported by a host primitive.
///
/// The supported host contract treats flag-setting and visibility writes
/// as infallible; these variants exist for backends where the window can
/// go away or the platform call can be rejected.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Window handle unavailable")]
    WindowUnavailable,

    #[error("Platform error: {0}")]
    Platform(String),
}

pub type HostResult<T> = Result<T, HostError>;

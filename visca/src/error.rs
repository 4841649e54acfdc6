use crate::protocol::{CameraError, ErrorCode};
use std::io::Error as IoError;
use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[cfg(test)]
    #[error(transparent)]
    FromHexError(#[from] hex::FromHexError),

    #[error(transparent)]
    IoError(#[from] IoError),

    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    #[error(transparent)]
    Protocol(#[from] crate::protocol::Error),

    #[error("not connected")]
    NotConnected,

    #[error("timeout waiting for response")]
    Timeout,

    #[error("camera does not support this operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// Returns the camera's error if the camera rejected the command.
    pub const fn camera_error(&self) -> Option<CameraError> {
        match self {
            Self::Protocol(e) => e.camera_error(),
            _ => None,
        }
    }

    /// Returns `true` if the camera refused the command in its current state.
    pub fn is_not_executable(&self) -> bool {
        self.camera_error() == Some(CameraError::Known(ErrorCode::NotExecutable))
    }
}

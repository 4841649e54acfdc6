use num_traits::{FromPrimitive, ToPrimitive};
use std::fmt::Display;
use thiserror::Error;

/// Error types.
#[derive(Debug, Error)]
pub enum Error {
    #[cfg(test)]
    #[error(transparent)]
    FromHexError(#[from] hex::FromHexError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed response")]
    MalformedResponse,

    #[error("reply from incorrect socket: {0:#04x}")]
    IncorrectSocket(u8),

    #[error("camera reported error: {error}")]
    Camera { error: CameraError },

    #[error("data encode error: {0}")]
    BinRwError(#[from] binrw::Error),
}

impl Error {
    /// Returns the camera's error if this is an error reply.
    pub const fn camera_error(&self) -> Option<CameraError> {
        match self {
            Self::Camera { error } => Some(*error),
            _ => None,
        }
    }
}

/// Error codes carried in the second byte of a `60` error reply.
#[derive(Debug, FromPrimitive, ToPrimitive, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum ErrorCode {
    /// The message was longer than the camera accepts.
    MessageLength = 0x01,
    Syntax = 0x02,
    CommandBufferFull = 0x03,
    CommandCancelled = 0x04,
    NoSocket = 0x05,
    /// The camera understood the command, but refuses to run it in its
    /// current state.
    NotExecutable = 0x41,
}

impl ErrorCode {
    pub const fn description(&self) -> &'static str {
        match self {
            Self::MessageLength => "message length error",
            Self::Syntax => "syntax error",
            Self::CommandBufferFull => "command buffer full",
            Self::CommandCancelled => "command cancelled",
            Self::NoSocket => "no socket",
            Self::NotExecutable => "command not executable",
        }
    }
}

/// An error code reported by the camera, which may not be one we know.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CameraError {
    Known(ErrorCode),
    Unknown(u8),
}

impl CameraError {
    /// The raw error code byte.
    pub fn code(&self) -> u8 {
        match self {
            Self::Known(c) => c.to_u8().unwrap_or_default(),
            Self::Unknown(c) => *c,
        }
    }
}

impl From<u8> for CameraError {
    fn from(code: u8) -> Self {
        ErrorCode::from_u8(code).map_or(Self::Unknown(code), Self::Known)
    }
}

impl Display for CameraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(c) => f.write_str(c.description()),
            Self::Unknown(c) => write!(f, "unknown error code {c:#04x}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn camera_error_codes() {
        assert_eq!(CameraError::from(0x02), CameraError::Known(ErrorCode::Syntax));
        assert_eq!(
            CameraError::from(0x41),
            CameraError::Known(ErrorCode::NotExecutable)
        );
        assert_eq!(CameraError::from(0x07), CameraError::Unknown(0x07));
        assert_eq!(CameraError::from(0x41).code(), 0x41);
        assert_eq!(CameraError::Unknown(0x07).code(), 0x07);
    }

    #[test]
    fn camera_error_display() {
        assert_eq!(CameraError::from(0x03).to_string(), "command buffer full");
        assert_eq!(CameraError::from(0x99).to_string(), "unknown error code 0x99");

        let e = Error::Camera {
            error: CameraError::from(0x01),
        };
        assert_eq!(e.to_string(), "camera reported error: message length error");
        assert_eq!(e.camera_error(), Some(CameraError::Known(ErrorCode::MessageLength)));
        assert_eq!(Error::MalformedResponse.camera_error(), None);
    }
}

//! # Camera replies
//!
//! After stripping the address and terminator, a reply is one of:
//!
//! * `50 ...`: completion. Inquiry replies carry their data after the `50`.
//! * `60 ee`: error `ee`.
//!
//! Anything else, including completions or errors for other sockets,
//! means we're out of step with the camera.
//!
//! This module also contains decoders for the data part of inquiry replies.
use crate::{codec, CameraError, Error, Result};

/// Completion reply.
pub const COMPLETION: u8 = 0x50;

/// Error reply.
pub const ERROR: u8 = 0x60;

/// Classifies a stripped reply.
///
/// On success, returns the inquiry data (when `inquiry` is set), or an
/// empty `Vec` for commands.
pub fn interpret(reply: &[u8], inquiry: bool) -> Result<Vec<u8>> {
    let Some((&kind, rest)) = reply.split_first() else {
        error!("empty reply");
        return Err(Error::MalformedResponse);
    };

    match kind {
        COMPLETION => {
            if inquiry {
                Ok(rest.to_vec())
            } else {
                if !rest.is_empty() {
                    debug!("ignoring data in command completion: {}", hex::encode(rest));
                }
                Ok(Vec::new())
            }
        }

        ERROR => {
            let Some(&code) = rest.first() else {
                error!("error reply without an error code");
                return Err(Error::MalformedResponse);
            };
            Err(Error::Camera {
                error: CameraError::from(code),
            })
        }

        k => {
            error!("unexpected reply: {}", hex::encode(reply));
            Err(Error::IncorrectSocket(k))
        }
    }
}

/// Decodes a 4-nibble position reply (zoom or focus position, table values).
pub fn position(data: &[u8]) -> Result<u16> {
    if data.len() != codec::ENCODED_LENGTH {
        error!("expected 4 byte position, got {}", hex::encode(data));
        return Err(Error::MalformedResponse);
    }
    codec::decode_slice(data)
}

/// Decodes a pan/tilt position reply: `0w 0w 0w 0w 0z 0z 0z 0z`.
///
/// Returns `(pan, tilt)`.
pub fn pan_tilt_position(data: &[u8]) -> Result<(u16, u16)> {
    if data.len() != codec::ENCODED_LENGTH * 2 {
        error!("expected 8 byte pan/tilt position, got {}", hex::encode(data));
        return Err(Error::MalformedResponse);
    }
    let (pan, tilt) = data.split_at(codec::ENCODED_LENGTH);
    Ok((codec::decode_slice(pan)?, codec::decode_slice(tilt)?))
}

/// Decodes a single-byte `02` (on) / `03` (off) reply.
pub fn on_off(data: &[u8]) -> Result<bool> {
    match data {
        [0x02] => Ok(true),
        [0x03] => Ok(false),
        _ => {
            error!("expected on/off reply, got {}", hex::encode(data));
            Err(Error::MalformedResponse)
        }
    }
}

/// Decodes a single-byte mode or table reply.
pub fn single(data: &[u8]) -> Result<u8> {
    match data {
        [v] => Ok(*v),
        _ => {
            error!("expected single byte reply, got {}", hex::encode(data));
            Err(Error::MalformedResponse)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorCode;

    #[test]
    fn completion() -> Result<()> {
        assert!(interpret(&[0x50], false)?.is_empty());
        assert!(interpret(&[0x50], true)?.is_empty());
        // Stray data on a command completion is dropped
        assert!(interpret(&[0x50, 0x02], false)?.is_empty());
        Ok(())
    }

    #[test]
    fn inquiry_data() -> Result<()> {
        let reply = hex::decode("5000010203")?;
        assert_eq!(interpret(&reply, true)?, [0x00, 0x01, 0x02, 0x03]);
        Ok(())
    }

    #[test]
    fn camera_errors() {
        let Err(Error::Camera { error }) = interpret(&[0x60, 0x02], false) else {
            panic!("expected camera error");
        };
        assert_eq!(error, CameraError::Known(ErrorCode::Syntax));

        let Err(Error::Camera { error }) = interpret(&[0x60, 0x41], false) else {
            panic!("expected camera error");
        };
        assert_eq!(error, CameraError::Known(ErrorCode::NotExecutable));

        let Err(Error::Camera { error }) = interpret(&[0x60, 0x10], true) else {
            panic!("expected camera error");
        };
        assert_eq!(error, CameraError::Unknown(0x10));

        for (code, expected) in [
            (0x01, ErrorCode::MessageLength),
            (0x03, ErrorCode::CommandBufferFull),
            (0x04, ErrorCode::CommandCancelled),
            (0x05, ErrorCode::NoSocket),
        ] {
            let e = interpret(&[0x60, code], false).unwrap_err();
            assert_eq!(e.camera_error(), Some(CameraError::Known(expected)));
        }
    }

    #[test]
    fn incorrect_socket() {
        assert!(matches!(
            interpret(&[0x41], false),
            Err(Error::IncorrectSocket(0x41))
        ));
        assert!(matches!(
            interpret(&[0x51], false),
            Err(Error::IncorrectSocket(0x51))
        ));
        // Errors only count from socket 0
        assert!(matches!(
            interpret(&[0x61, 0x41], false),
            Err(Error::IncorrectSocket(0x61))
        ));
        assert!(matches!(
            interpret(&[0x6f, 0x02], true),
            Err(Error::IncorrectSocket(0x6f))
        ));
    }

    #[test]
    fn malformed() {
        assert!(matches!(interpret(&[], false), Err(Error::MalformedResponse)));
        assert!(matches!(interpret(&[0x60], false), Err(Error::MalformedResponse)));
    }

    #[test]
    fn positions() -> Result<()> {
        assert_eq!(position(&hex::decode("00000b02")?)?, 0xb2);
        assert!(matches!(position(&[0x00]), Err(Error::MalformedResponse)));

        let (pan, tilt) = pan_tilt_position(&hex::decode("0001090800000807")?)?;
        assert_eq!(pan, 408);
        assert_eq!(tilt, 135);
        assert!(matches!(
            pan_tilt_position(&hex::decode("00010908")?),
            Err(Error::MalformedResponse)
        ));
        Ok(())
    }

    #[test]
    fn switches() -> Result<()> {
        assert!(on_off(&[0x02])?);
        assert!(!on_off(&[0x03])?);
        assert!(matches!(on_off(&[0x00]), Err(Error::MalformedResponse)));
        assert_eq!(single(&[0x06])?, 0x06);
        assert!(matches!(single(&[]), Err(Error::MalformedResponse)));
        Ok(())
    }
}

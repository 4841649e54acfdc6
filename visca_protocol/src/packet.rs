//! # Framing
//!
//! Every VISCA message on the wire is:
//!
//! * `u8`: address. For messages from the controller (always device 0),
//!   this is `0x80 | camera`; replies from camera `n` start with
//!   `0x80 | (n << 4)`.
//! * payload
//! * `u8`: terminator, `0xff`
//!
//! Payload bytes are always below `0x80`, so a `0xff` can only ever be the
//! terminator.
use crate::{Error, Result};

/// Message terminator.
pub const TERMINATOR: u8 = 0xff;

/// Address of the first camera on the chain, as seen from the controller.
pub const DEFAULT_ADDRESS: u8 = 0x81;

/// Maximum frame length (including address and terminator) accepted by
/// cameras.
///
/// Longer frames are rejected by the camera with a message length error.
/// Nothing here enforces it.
pub const MAX_FRAME_LENGTH: usize = 16;

/// First payload byte of all inquiries.
pub const INQUIRY: u8 = 0x09;

/// Returns `true` if the payload is an inquiry (rather than a command).
pub fn is_inquiry(payload: &[u8]) -> bool {
    payload.first() == Some(&INQUIRY)
}

/// Returns the camera address byte for a VISCA device number (1 - 7).
pub fn camera_address(device: u8) -> Result<u8> {
    if !(1..=7).contains(&device) {
        error!("camera device number out of range: {device}");
        return Err(Error::InvalidArgument(format!(
            "camera number {device} not in 1..=7"
        )));
    }
    Ok(0x80 | device)
}

/// A framed VISCA message.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
    /// Frames a payload for the camera at `address`.
    pub fn new(address: u8, payload: &[u8]) -> Self {
        let mut b = Vec::with_capacity(payload.len() + 2);
        b.push(address);
        b.extend_from_slice(payload);
        b.push(TERMINATOR);
        let frame = Self(b);
        if frame.len() > MAX_FRAME_LENGTH {
            warn!(
                "frame is {} bytes, longer than the {MAX_FRAME_LENGTH} byte limit: {frame:?}",
                frame.len()
            );
        }
        frame
    }

    /// Validates a received frame, which must end with the terminator.
    pub fn from_bytes(b: Vec<u8>) -> Result<Self> {
        if b.len() < 2 || b.last() != Some(&TERMINATOR) {
            error!("truncated frame: {}", hex::encode(&b));
            return Err(Error::MalformedResponse);
        }
        Ok(Self(b))
    }

    /// The address byte.
    pub fn address(&self) -> u8 {
        self.0[0]
    }

    /// The frame with its address and terminator stripped.
    pub fn payload(&self) -> &[u8] {
        &self.0[1..self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Frame").field(&hex::encode(&self.0)).finish()
    }
}

//! # Nibble-packed numbers
//!
//! VISCA carries 16-bit parameters (positions, table indexes, gain...) as
//! four bytes, each holding one nibble in its low four bits:
//!
//! ```text
//! 0x1234 => 01 02 03 04
//! ```
//!
//! This keeps every payload byte below `0x80`, so it can never be confused
//! with an address byte or the `0xff` terminator.
//!
//! Range checks for individual fields belong to the commands that use them.
use crate::{Error, Result};

/// Number of bytes used by a nibble-packed `u16`.
pub const ENCODED_LENGTH: usize = 4;

/// Packs `value` into four bytes, most significant nibble first.
pub const fn encode(value: u16) -> [u8; ENCODED_LENGTH] {
    [
        ((value >> 12) & 0xf) as u8,
        ((value >> 8) & 0xf) as u8,
        ((value >> 4) & 0xf) as u8,
        (value & 0xf) as u8,
    ]
}

/// Reassembles a nibble-packed `u16`.
///
/// Returns [`Error::MalformedResponse`] if any byte uses its high nibble.
pub fn decode(b: [u8; ENCODED_LENGTH]) -> Result<u16> {
    if b.iter().any(|n| n & 0xf0 != 0) {
        error!("bad nibble-packed value: {}", hex::encode(b));
        return Err(Error::MalformedResponse);
    }
    Ok(b.iter().fold(0, |acc, n| (acc << 4) | u16::from(*n)))
}

/// Reassembles a nibble-packed `u16` from the start of a slice.
pub fn decode_slice(b: &[u8]) -> Result<u16> {
    let b = b
        .get(..ENCODED_LENGTH)
        .and_then(|b| <[u8; ENCODED_LENGTH]>::try_from(b).ok())
        .ok_or(Error::MalformedResponse)?;
    decode(b)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_nibbles() {
        assert_eq!(encode(0x1234), [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(encode(0), [0; 4]);
        assert_eq!(encode(0xffff), [0x0f; 4]);
        // Pan position limit on PrecisionHD cameras
        assert_eq!(encode(816), [0x00, 0x03, 0x03, 0x00]);
    }

    #[test]
    fn decode_reassembles_every_value() -> Result<()> {
        for v in 0..=u16::MAX {
            assert_eq!(decode(encode(v))?, v);
        }
        Ok(())
    }

    #[test]
    fn decode_rejects_high_nibbles() {
        assert!(matches!(
            decode([0x10, 0x00, 0x00, 0x00]),
            Err(Error::MalformedResponse)
        ));
        assert!(matches!(
            decode([0x00, 0x00, 0x00, 0xff]),
            Err(Error::MalformedResponse)
        ));
    }

    #[test]
    fn decode_slice_length() -> Result<()> {
        assert_eq!(decode_slice(&[0x00, 0x00, 0x0c, 0x08, 0x0f])?, 0xc8);
        assert!(matches!(
            decode_slice(&[0x00, 0x01]),
            Err(Error::MalformedResponse)
        ));
        Ok(())
    }
}

//! Picture and exposure commands
//!
//! Switching white balance, exposure or gamma to manual uses whatever table
//! or position was last set, so the matching `*Table` / `*Position` command
//! should be sent first.
use super::{check_range, Switch};
use crate::{codec, Result};
use binrw::BinWrite;
use std::ops::RangeInclusive;

/// Valid iris positions.
pub const IRIS_RANGE: RangeInclusive<u16> = 0..=50;

/// Valid gain positions, in dB.
pub const GAIN_RANGE: RangeInclusive<u16> = 12..=21;

/// Valid gamma and white balance table indexes.
pub const TABLE_RANGE: RangeInclusive<u16> = 0..=7;

/// `01 04 66`: vertical picture flip.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x66")]
pub struct Flip(pub Switch);

/// `01 04 61`: horizontal picture mirror.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x61")]
pub struct Mirror(pub Switch);

/// `01 04 33`: backlight compensation.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x33")]
pub struct Backlight(pub Switch);

/// `01 04 38`: autofocus.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x38")]
pub struct Autofocus(pub Switch);

/// `01 04 51`: automatic gamma. Switching it off uses the [GammaTable].
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x51")]
pub struct GammaAuto(pub Switch);

#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[bw(repr = u8)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum WhiteBalanceMode {
    Auto = 0x00,
    /// Use the [WhiteBalanceTable].
    Manual = 0x06,
}

/// `01 04 35`: white balance mode.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x35")]
pub struct WhiteBalanceModeSet(pub WhiteBalanceMode);

#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[bw(repr = u8)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ExposureMode {
    Auto = 0x00,
    /// Use the [IrisPosition] and [GainPosition].
    Manual = 0x03,
}

/// `01 04 39`: auto exposure mode.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x39")]
pub struct ExposureModeSet(pub ExposureMode);

/// `01 04 75`: manual white balance table.
///
/// ## Packet format
///
/// * nibble-packed `u16`: table index, see [TABLE_RANGE]
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x75")]
pub struct WhiteBalanceTable(#[bw(map = |v: &u16| codec::encode(*v))] u16);

impl WhiteBalanceTable {
    pub fn new(table: u16) -> Result<Self> {
        Ok(Self(check_range("white balance table", table, TABLE_RANGE)?))
    }
}

/// `01 04 4b`: manual iris position.
///
/// ## Packet format
///
/// * nibble-packed `u16`: iris position, see [IRIS_RANGE]
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x4b")]
pub struct IrisPosition(#[bw(map = |v: &u16| codec::encode(*v))] u16);

impl IrisPosition {
    pub fn new(iris: u16) -> Result<Self> {
        Ok(Self(check_range("iris", iris, IRIS_RANGE)?))
    }
}

/// `01 04 4c`: manual gain position.
///
/// ## Packet format
///
/// * nibble-packed `u16`: gain in dB, see [GAIN_RANGE]
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x4c")]
pub struct GainPosition(#[bw(map = |v: &u16| codec::encode(*v))] u16);

impl GainPosition {
    pub fn new(gain: u16) -> Result<Self> {
        Ok(Self(check_range("gain", gain, GAIN_RANGE)?))
    }
}

/// `01 04 52`: manual gamma table.
///
/// ## Packet format
///
/// * nibble-packed `u16`: table index, see [TABLE_RANGE]
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x52")]
pub struct GammaTable(#[bw(map = |v: &u16| codec::encode(*v))] u16);

impl GammaTable {
    pub fn new(table: u16) -> Result<Self> {
        Ok(Self(check_range("gamma table", table, TABLE_RANGE)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Command, Error};

    fn payload(c: impl Into<Command>) -> Result<String> {
        Ok(hex::encode(c.into().to_payload()?))
    }

    #[test]
    fn manual_setup_values() -> Result<()> {
        assert_eq!(payload(WhiteBalanceTable::new(4)?)?, "01047500000004");
        assert_eq!(payload(IrisPosition::new(50)?)?, "01044b00000302");
        assert_eq!(payload(GainPosition::new(12)?)?, "01044c0000000c");
        assert_eq!(payload(GammaTable::new(7)?)?, "01045200000007");
        Ok(())
    }

    #[test]
    fn manual_setup_ranges() {
        assert!(matches!(
            WhiteBalanceTable::new(8),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(IrisPosition::new(51), Err(Error::InvalidArgument(_))));
        assert!(matches!(GainPosition::new(11), Err(Error::InvalidArgument(_))));
        assert!(matches!(GainPosition::new(22), Err(Error::InvalidArgument(_))));
        assert!(matches!(GammaTable::new(8), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn modes() -> Result<()> {
        assert_eq!(payload(WhiteBalanceModeSet(WhiteBalanceMode::Manual))?, "01043506");
        assert_eq!(payload(ExposureModeSet(ExposureMode::Auto))?, "01043900");
        assert_eq!(payload(GammaAuto(Switch::Off))?, "01045103");
        Ok(())
    }
}

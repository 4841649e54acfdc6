//! System, interface and indicator commands
use super::{check_range, Switch};
use crate::{packet::camera_address, Error, Result};
use binrw::BinWrite;
use std::{fmt::Display, str::FromStr};

/// `01 00 01`: cancel all pending commands.
#[derive(BinWrite, Debug, Default, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x00\x01")]
pub struct Clear;

/// `01 42`: reboot the camera.
///
/// The camera comes back at 9600 baud.
#[derive(BinWrite, Debug, Default, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x42")]
pub struct Reboot;

/// `01 04 00`: motor power.
///
/// This does not power the camera on or off, it only releases or resets the
/// motors.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x04\x00")]
pub struct Power(pub Switch);

/// `30`: assign a new address to the camera.
///
/// ## Packet format
///
/// * `u8`: the camera's new device number, 1 - 7
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x30")]
pub struct AddressSet(u8);

impl AddressSet {
    pub fn new(device: u8) -> Result<Self> {
        camera_address(device)?;
        Ok(Self(device))
    }

    pub const fn device(&self) -> u8 {
        self.0
    }
}

/// Video output format.
///
/// Only honoured when the camera's video mode DIP switch is set to software
/// control.
#[derive(BinWrite, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq, Clone, Copy, Hash)]
#[bw(repr = u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VideoFormat {
    Fhd1080p25 = 0x00,
    Fhd1080p30 = 0x01,
    Fhd1080p50 = 0x02,
    Fhd1080p60 = 0x03,
    Hd720p25 = 0x04,
    Hd720p30 = 0x05,
    Hd720p50 = 0x06,
    Hd720p60 = 0x07,
}

impl VideoFormat {
    const ALL: [Self; 8] = [
        Self::Fhd1080p25,
        Self::Fhd1080p30,
        Self::Fhd1080p50,
        Self::Fhd1080p60,
        Self::Hd720p25,
        Self::Hd720p30,
        Self::Hd720p50,
        Self::Hd720p60,
    ];

    pub const fn lines(&self) -> u16 {
        match self {
            Self::Fhd1080p25 | Self::Fhd1080p30 | Self::Fhd1080p50 | Self::Fhd1080p60 => 1080,
            _ => 720,
        }
    }

    pub const fn rate(&self) -> u8 {
        match self {
            Self::Fhd1080p25 | Self::Hd720p25 => 25,
            Self::Fhd1080p30 | Self::Hd720p30 => 30,
            Self::Fhd1080p50 | Self::Hd720p50 => 50,
            Self::Fhd1080p60 | Self::Hd720p60 => 60,
        }
    }
}

impl Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}p{}", self.lines(), self.rate())
    }
}

impl FromStr for VideoFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.to_string() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown video format {s:?}")))
    }
}

/// `01 35 00`: video output format.
///
/// ## Packet format
///
/// * `u8`: [VideoFormat]
/// * 1 byte padding (used by PrecisionHD 720p cameras)
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x35\x00")]
pub struct SetVideoFormat(#[bw(pad_after = 1)] pub VideoFormat);

/// Serial interface speed.
#[derive(BinWrite, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq, Clone, Copy, Hash)]
#[bw(repr = u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BaudRate {
    B9600 = 0x00,
    B115200 = 0x01,
}

impl BaudRate {
    pub const fn bits_per_second(&self) -> u32 {
        match self {
            Self::B9600 => 9600,
            Self::B115200 => 115200,
        }
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        Self::B9600
    }
}

impl Display for BaudRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits_per_second())
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = Error;

    fn try_from(bps: u32) -> Result<Self> {
        match bps {
            9600 => Ok(Self::B9600),
            115200 => Ok(Self::B115200),
            _ => Err(Error::InvalidArgument(format!(
                "unsupported baud rate {bps}"
            ))),
        }
    }
}

impl FromStr for BaudRate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<u32>()
            .map_err(|_| Error::InvalidArgument(format!("unsupported baud rate {s:?}")))?
            .try_into()
    }
}

/// `01 34`: serial interface speed.
///
/// The camera needs about 20 seconds after acknowledging this before it
/// accepts commands at the new speed.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x34")]
pub struct SerialSpeed(pub BaudRate);

/// `01 50 60`: best view, automatic framing.
///
/// ## Packet format
///
/// * `u8`: tens of seconds
/// * `u8`: seconds
///
/// A duration of 0 stops the operation.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x50\x60")]
pub struct BestView {
    #[bw(map = |v: &u8| [v / 10, v % 10])]
    seconds: u8,
}

impl BestView {
    pub fn new(seconds: u8) -> Result<Self> {
        Ok(Self {
            seconds: check_range("best view time", seconds, 0..=99)?,
        })
    }
}

#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[bw(repr = u8)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LedMode {
    Off = 0x00,
    On = 0x01,
    Blink = 0x02,
}

impl FromStr for LedMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "off" => Ok(Self::Off),
            "on" => Ok(Self::On),
            "blink" => Ok(Self::Blink),
            _ => Err(Error::InvalidArgument(format!("unknown LED mode {s:?}"))),
        }
    }
}

/// `01 33 01`: call LED.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x33\x01")]
pub struct CallLed(pub LedMode);

/// `01 33 02`: power LED.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x33\x02")]
pub struct PowerLed(#[bw(map = |v: &bool| u8::from(*v))] pub bool);

/// `01 50 30`: motor moved detection.
///
/// When enabled, the camera recalibrates if it is moved by hand.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x50\x30")]
pub struct MotionDetect(#[bw(map = |v: &bool| u8::from(*v))] pub bool);

#[cfg(test)]
mod test {
    use super::*;
    use crate::Command;
    use num_traits::FromPrimitive;

    fn payload(c: impl Into<Command>) -> Result<String> {
        Ok(hex::encode(c.into().to_payload()?))
    }

    #[test]
    fn video_format() -> Result<()> {
        assert_eq!(payload(SetVideoFormat("720p50".parse()?))?, "0135000600");
        assert_eq!(payload(SetVideoFormat(VideoFormat::Fhd1080p25))?, "0135000000");
        for v in VideoFormat::ALL {
            assert_eq!(v.to_string().parse::<VideoFormat>()?, v);
        }
        assert_eq!(VideoFormat::from_u8(3), Some(VideoFormat::Fhd1080p60));
        assert!(matches!(
            "1080i50".parse::<VideoFormat>(),
            Err(Error::InvalidArgument(_))
        ));
        Ok(())
    }

    #[test]
    fn serial_speed() -> Result<()> {
        assert_eq!(payload(SerialSpeed(BaudRate::B9600))?, "013400");
        assert_eq!(payload(SerialSpeed("115200".parse()?))?, "013401");
        assert!(BaudRate::try_from(19200).is_err());
        assert!("fast".parse::<BaudRate>().is_err());
        Ok(())
    }

    #[test]
    fn best_view() -> Result<()> {
        assert_eq!(payload(BestView::new(30)?)?, "0150600300");
        assert_eq!(payload(BestView::new(99)?)?, "0150600909");
        assert_eq!(payload(BestView::new(0)?)?, "0150600000");
        assert!(matches!(BestView::new(100), Err(Error::InvalidArgument(_))));
        Ok(())
    }

    #[test]
    fn address_set() -> Result<()> {
        assert_eq!(payload(AddressSet::new(2)?)?, "3002");
        assert!(AddressSet::new(0).is_err());
        assert!(AddressSet::new(8).is_err());
        Ok(())
    }

    #[test]
    fn system() -> Result<()> {
        assert_eq!(payload(Clear)?, "010001");
        assert_eq!(payload(Reboot)?, "0142");
        assert_eq!(payload(Power(Switch::On))?, "01040002");
        Ok(())
    }

    #[test]
    fn indicators() -> Result<()> {
        assert_eq!(payload(CallLed("blink".parse()?))?, "01330102");
        assert_eq!(payload(PowerLed(false))?, "01330200");
        assert_eq!(payload(MotionDetect(true))?, "01503001");
        assert!("dim".parse::<LedMode>().is_err());
        Ok(())
    }
}

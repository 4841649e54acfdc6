//! # VISCA commands and inquiries
//!
//! Each command is a struct which writes its own opcode bytes (as `binrw`
//! magic) followed by its parameters. [Command] wraps all of them so they
//! can be passed around and serialised uniformly.
//!
//! Commands are grouped into modules by their functional area, and
//! re-exported here.
//!
//! Constructors which take parameters with a limited domain (positions,
//! speeds, table indexes) check them and return
//! [`Error::InvalidArgument`][crate::Error::InvalidArgument]. Parsing mode
//! names (`"upleft"`, `"1080p25"`...) with [FromStr][std::str::FromStr]
//! fails the same way.
//!
//! Parameters which are only documented for the Tandberg PrecisionHD 1080p
//! camera:
//!
//! Parameter | Range | Notes
//! --------- | ----- | -----
//! Pan | 0 - 816 | -90° to +90°, `deg * 4.533 + 408`
//! Tilt | 7 - 212 | -25° to +15°, `deg * 5.125 + 135.125`
//! Iris | 0 - 50 |
//! Gain | 12 - 21 | dB
//! Gamma / white balance table | 0 - 7 |

mod inquiry;
mod lens;
mod pan_tilt;
mod picture;
mod system;

use crate::{Error, Result};
use binrw::BinWrite;
use std::{fmt::Debug, io::Cursor};

pub use self::{
    inquiry::Inquiry,
    lens::{
        lens_position, FocusDirect, FocusDrive, LensDirection, LensSpeed, ZoomDirect,
        ZoomDrive, UNUSED_LENS_POSITION,
    },
    pan_tilt::{
        Direction, MotorReset, PanTiltAbsolute, PanTiltDrive, PanTiltSpeed, PanTiltZoomFocus,
        PAN_RANGE, TILT_RANGE,
    },
    picture::{
        Autofocus, Backlight, ExposureMode, ExposureModeSet, Flip, GainPosition, GammaAuto,
        GammaTable, IrisPosition, Mirror, WhiteBalanceMode, WhiteBalanceModeSet,
        WhiteBalanceTable, GAIN_RANGE, IRIS_RANGE, TABLE_RANGE,
    },
    system::{
        AddressSet, BaudRate, BestView, CallLed, Clear, LedMode, MotionDetect, Power, PowerLed,
        Reboot, SerialSpeed, SetVideoFormat, VideoFormat,
    },
};

/// `0x02` / `0x03` switch used by most on/off commands.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[bw(repr = u8)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Switch {
    On = 0x02,
    Off = 0x03,
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl From<Switch> for bool {
    fn from(s: Switch) -> Self {
        s == Switch::On
    }
}

impl std::str::FromStr for Switch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            _ => Err(Error::InvalidArgument(format!("expected on or off, got {s:?}"))),
        }
    }
}

/// Checks that `value` is in `range`, naming the parameter in the error.
pub(crate) fn check_range<T>(name: &str, value: T, range: std::ops::RangeInclusive<T>) -> Result<T>
where
    T: PartialOrd + Debug,
{
    if !range.contains(&value) {
        error!("{name} out of range: {value:?} not in {range:?}");
        return Err(Error::InvalidArgument(format!(
            "{name} {value:?} not in {range:?}"
        )));
    }
    Ok(value)
}

/// Any VISCA command (as opposed to an [Inquiry]).
#[derive(BinWrite, Clone, Copy, PartialEq, Eq)]
#[bw(big)]
pub enum Command {
    AddressSet(AddressSet),
    Autofocus(Autofocus),
    Backlight(Backlight),
    BestView(BestView),
    CallLed(CallLed),
    Clear(Clear),
    ExposureModeSet(ExposureModeSet),
    Flip(Flip),
    FocusDirect(FocusDirect),
    FocusDrive(FocusDrive),
    GainPosition(GainPosition),
    GammaAuto(GammaAuto),
    GammaTable(GammaTable),
    IrisPosition(IrisPosition),
    Mirror(Mirror),
    MotionDetect(MotionDetect),
    MotorReset(MotorReset),
    PanTiltAbsolute(PanTiltAbsolute),
    PanTiltDrive(PanTiltDrive),
    PanTiltZoomFocus(PanTiltZoomFocus),
    Power(Power),
    PowerLed(PowerLed),
    Reboot(Reboot),
    SerialSpeed(SerialSpeed),
    SetVideoFormat(SetVideoFormat),
    WhiteBalanceModeSet(WhiteBalanceModeSet),
    WhiteBalanceTable(WhiteBalanceTable),
    ZoomDirect(ZoomDirect),
    ZoomDrive(ZoomDrive),
}

macro_rules! command_payloads {
    (
        $($variant:ident,)*
    ) => {
        $(
            impl From<$variant> for Command {
                fn from(p: $variant) -> Command {
                    Command::$variant(p)
                }
            }
        )*

        impl Debug for Command {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant(v) => f
                            .debug_tuple(stringify!($variant))
                            .field(v)
                            .finish(),
                    )*
                }
            }
        }
    }
}

command_payloads!(
    AddressSet,
    Autofocus,
    Backlight,
    BestView,
    CallLed,
    Clear,
    ExposureModeSet,
    Flip,
    FocusDirect,
    FocusDrive,
    GainPosition,
    GammaAuto,
    GammaTable,
    IrisPosition,
    Mirror,
    MotionDetect,
    MotorReset,
    PanTiltAbsolute,
    PanTiltDrive,
    PanTiltZoomFocus,
    Power,
    PowerLed,
    Reboot,
    SerialSpeed,
    SetVideoFormat,
    WhiteBalanceModeSet,
    WhiteBalanceTable,
    ZoomDirect,
    ZoomDrive,
);

impl Command {
    /// Serialises the command to its payload bytes (without address or
    /// terminator).
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.write(&mut out)?;
        Ok(out.into_inner())
    }

    /// Returns `true` if the camera may refuse this command depending on its
    /// autofocus mode.
    pub const fn controls_focus(&self) -> bool {
        match self {
            Self::FocusDirect(_) | Self::FocusDrive(_) | Self::PanTiltZoomFocus(_) => true,
            Self::ZoomDirect(z) => z.focus().is_some(),
            _ => false,
        }
    }

    /// Returns `true` if a successful reply means the camera has changed its
    /// serial speed or will restart.
    pub const fn resets_link(&self) -> bool {
        matches!(self, Self::SerialSpeed(_) | Self::Reboot(_))
    }
}

/// A boolean camera feature that is switched with a fixed 4 byte command.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feature {
    Flip,
    Mirror,
    Backlight,
    Autofocus,
    GammaAuto,
    WhiteBalanceAuto,
    ExposureAuto,
    MotionDetect,
    PowerLed,
    CallLed,
    Power,
}

impl Feature {
    /// The command which switches this feature on or off.
    pub const fn command(&self, on: bool) -> Command {
        let s = if on { Switch::On } else { Switch::Off };
        match self {
            Self::Flip => Command::Flip(Flip(s)),
            Self::Mirror => Command::Mirror(Mirror(s)),
            Self::Backlight => Command::Backlight(Backlight(s)),
            Self::Autofocus => Command::Autofocus(Autofocus(s)),
            Self::GammaAuto => Command::GammaAuto(GammaAuto(s)),
            Self::WhiteBalanceAuto => Command::WhiteBalanceModeSet(WhiteBalanceModeSet(if on {
                WhiteBalanceMode::Auto
            } else {
                WhiteBalanceMode::Manual
            })),
            Self::ExposureAuto => Command::ExposureModeSet(ExposureModeSet(if on {
                ExposureMode::Auto
            } else {
                ExposureMode::Manual
            })),
            Self::MotionDetect => Command::MotionDetect(MotionDetect(on)),
            Self::PowerLed => Command::PowerLed(PowerLed(on)),
            Self::CallLed => Command::CallLed(CallLed(if on { LedMode::On } else { LedMode::Off })),
            Self::Power => Command::Power(Power(s)),
        }
    }
}

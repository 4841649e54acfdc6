//! Inquiries
//!
//! Inquiries read camera state without changing it. All start with `09`, and
//! the completion reply carries the requested data after its `50` byte. The
//! [reply][crate::reply] module has decoders for the common reply shapes.
use crate::{Error, Result};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inquiry {
    /// `09 04 22`
    CameraId,
    /// `09 04 47`: 4-nibble zoom position.
    ZoomPosition,
    /// `09 04 48`: 4-nibble focus position.
    FocusPosition,
    /// `09 04 38`: autofocus on / off.
    FocusMode,
    /// `09 06 12`: 4-nibble pan and tilt positions.
    PanTiltPosition,
    /// `09 04 00`: motor power on / off.
    Power,
    /// `09 04 35`
    WhiteBalanceMode,
    /// `09 04 75`
    WhiteBalanceTable,
    /// `09 04 39`
    ExposureMode,
    /// `09 04 33`: backlight compensation on / off.
    Backlight,
    /// `09 04 61`: mirror on / off.
    Mirror,
    /// `09 04 66`: flip on / off.
    Flip,
    /// `09 04 51`
    GammaMode,
    /// `09 04 52`
    GammaTable,
    /// `09 01 33 01`
    CallLed,
    /// `09 01 33 02`
    PowerLed,
    /// `09 06 24`: video format DIP switch.
    VideoSwitch,
    /// `09 50 50`: ambient light sensor red gain.
    AlsRedGain,
    /// `09 50 51`: ambient light sensor blue gain.
    AlsBlueGain,
    /// `09 50 52`: ambient light sensor green gain.
    AlsGreenGain,
    /// `09 50 53`: ambient light sensor white gain.
    AlsWhiteGain,
    /// `09 50 60`
    BestView,
    /// `09 50 70`: whether the camera is mounted upside down.
    UpsideDown,
}

impl Inquiry {
    pub const ALL: [Self; 23] = [
        Self::CameraId,
        Self::ZoomPosition,
        Self::FocusPosition,
        Self::FocusMode,
        Self::PanTiltPosition,
        Self::Power,
        Self::WhiteBalanceMode,
        Self::WhiteBalanceTable,
        Self::ExposureMode,
        Self::Backlight,
        Self::Mirror,
        Self::Flip,
        Self::GammaMode,
        Self::GammaTable,
        Self::CallLed,
        Self::PowerLed,
        Self::VideoSwitch,
        Self::AlsRedGain,
        Self::AlsBlueGain,
        Self::AlsGreenGain,
        Self::AlsWhiteGain,
        Self::BestView,
        Self::UpsideDown,
    ];

    /// The inquiry payload.
    pub const fn payload(&self) -> &'static [u8] {
        match self {
            Self::CameraId => &[0x09, 0x04, 0x22],
            Self::ZoomPosition => &[0x09, 0x04, 0x47],
            Self::FocusPosition => &[0x09, 0x04, 0x48],
            Self::FocusMode => &[0x09, 0x04, 0x38],
            Self::PanTiltPosition => &[0x09, 0x06, 0x12],
            Self::Power => &[0x09, 0x04, 0x00],
            Self::WhiteBalanceMode => &[0x09, 0x04, 0x35],
            Self::WhiteBalanceTable => &[0x09, 0x04, 0x75],
            Self::ExposureMode => &[0x09, 0x04, 0x39],
            Self::Backlight => &[0x09, 0x04, 0x33],
            Self::Mirror => &[0x09, 0x04, 0x61],
            Self::Flip => &[0x09, 0x04, 0x66],
            Self::GammaMode => &[0x09, 0x04, 0x51],
            Self::GammaTable => &[0x09, 0x04, 0x52],
            Self::CallLed => &[0x09, 0x01, 0x33, 0x01],
            Self::PowerLed => &[0x09, 0x01, 0x33, 0x02],
            Self::VideoSwitch => &[0x09, 0x06, 0x24],
            Self::AlsRedGain => &[0x09, 0x50, 0x50],
            Self::AlsBlueGain => &[0x09, 0x50, 0x51],
            Self::AlsGreenGain => &[0x09, 0x50, 0x52],
            Self::AlsWhiteGain => &[0x09, 0x50, 0x53],
            Self::BestView => &[0x09, 0x50, 0x60],
            Self::UpsideDown => &[0x09, 0x50, 0x70],
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::CameraId => "camera-id",
            Self::ZoomPosition => "zoom-position",
            Self::FocusPosition => "focus-position",
            Self::FocusMode => "focus-mode",
            Self::PanTiltPosition => "pan-tilt-position",
            Self::Power => "power",
            Self::WhiteBalanceMode => "white-balance-mode",
            Self::WhiteBalanceTable => "white-balance-table",
            Self::ExposureMode => "exposure-mode",
            Self::Backlight => "backlight",
            Self::Mirror => "mirror",
            Self::Flip => "flip",
            Self::GammaMode => "gamma-mode",
            Self::GammaTable => "gamma-table",
            Self::CallLed => "call-led",
            Self::PowerLed => "power-led",
            Self::VideoSwitch => "video-switch",
            Self::AlsRedGain => "als-red-gain",
            Self::AlsBlueGain => "als-blue-gain",
            Self::AlsGreenGain => "als-green-gain",
            Self::AlsWhiteGain => "als-white-gain",
            Self::BestView => "best-view",
            Self::UpsideDown => "upside-down",
        }
    }
}

impl Display for Inquiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Inquiry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown inquiry {s:?}")))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::packet::is_inquiry;
    use std::collections::HashSet;

    #[test]
    fn payloads() {
        let mut seen = HashSet::new();
        for q in Inquiry::ALL {
            let p = q.payload();
            assert!(is_inquiry(p), "{q:?} must start with 09");
            assert!((3..=4).contains(&p.len()), "{q:?} has bad length");
            assert!(seen.insert(p), "{q:?} has a duplicate payload");
        }
        assert_eq!(Inquiry::PanTiltPosition.payload(), [0x09, 0x06, 0x12]);
        assert_eq!(Inquiry::PowerLed.payload(), [0x09, 0x01, 0x33, 0x02]);
    }

    #[test]
    fn names() -> Result<()> {
        for q in Inquiry::ALL {
            assert_eq!(q.to_string().parse::<Inquiry>()?, q);
        }
        assert!(matches!(
            "q_camid".parse::<Inquiry>(),
            Err(Error::InvalidArgument(_))
        ));
        Ok(())
    }
}

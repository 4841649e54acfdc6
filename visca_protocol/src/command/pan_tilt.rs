//! Pan / tilt motion commands
use super::check_range;
use crate::{codec, Error, Result};
use binrw::BinWrite;
use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

/// Valid pan positions.
pub const PAN_RANGE: RangeInclusive<u16> = 0..=816;

/// Valid tilt positions.
pub const TILT_RANGE: RangeInclusive<u16> = 7..=212;

/// Steering direction for [PanTiltDrive].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[cfg_attr(feature = "clap", value(name = "upleft"))]
    UpLeft,
    #[cfg_attr(feature = "clap", value(name = "upright"))]
    UpRight,
    #[cfg_attr(feature = "clap", value(name = "downleft"))]
    DownLeft,
    #[cfg_attr(feature = "clap", value(name = "downright"))]
    DownRight,
    Stop,
}

impl Direction {
    const ALL: [Self; 9] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
        Self::Stop,
    ];

    /// Pan and tilt direction bytes.
    ///
    /// Pan: `01` left, `02` right, `03` hold. Tilt: `01` up, `02` down,
    /// `03` hold.
    pub const fn code(&self) -> [u8; 2] {
        match self {
            Self::Up => [0x03, 0x01],
            Self::Down => [0x03, 0x02],
            Self::Left => [0x01, 0x03],
            Self::Right => [0x02, 0x03],
            Self::UpLeft => [0x01, 0x01],
            Self::UpRight => [0x02, 0x01],
            Self::DownLeft => [0x01, 0x02],
            Self::DownRight => [0x02, 0x02],
            Self::Stop => [0x03, 0x03],
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::UpLeft => "upleft",
            Self::UpRight => "upright",
            Self::DownLeft => "downleft",
            Self::DownRight => "downright",
            Self::Stop => "stop",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown direction {s:?}")))
    }
}

/// Pan and tilt speed pair, each `0x01` (slowest) to `0x0f` (fastest).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanTiltSpeed {
    pan: u8,
    tilt: u8,
}

impl PanTiltSpeed {
    pub const MAX: Self = Self {
        pan: 0x0f,
        tilt: 0x0f,
    };

    /// Speed bytes sent with [Direction::Stop].
    pub const STOP: Self = Self {
        pan: 0x03,
        tilt: 0x03,
    };

    pub fn new(pan: u8, tilt: u8) -> Result<Self> {
        Ok(Self {
            pan: check_range("pan speed", pan, 0x01..=0x0f)?,
            tilt: check_range("tilt speed", tilt, 0x01..=0x0f)?,
        })
    }

    pub const fn pan(&self) -> u8 {
        self.pan
    }

    pub const fn tilt(&self) -> u8 {
        self.tilt
    }
}

impl Default for PanTiltSpeed {
    fn default() -> Self {
        Self::MAX
    }
}

/// `01 06 01`: steer in a direction until told to stop.
///
/// ## Packet format
///
/// * `u8`: pan speed
/// * `u8`: tilt speed
/// * `[u8; 2]`: [direction code][Direction::code]
///
/// Stopping ignores the requested speed, and always sends `03 03`.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x06\x01")]
pub struct PanTiltDrive {
    pan_speed: u8,
    tilt_speed: u8,
    #[bw(map = |d: &Direction| d.code())]
    direction: Direction,
}

impl PanTiltDrive {
    pub const fn new(direction: Direction, speed: PanTiltSpeed) -> Self {
        let speed = match direction {
            Direction::Stop => PanTiltSpeed::STOP,
            _ => speed,
        };
        Self {
            pan_speed: speed.pan,
            tilt_speed: speed.tilt,
            direction,
        }
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// `01 06 02`: move to an absolute pan / tilt position.
///
/// ## Packet format
///
/// * `u8`: pan speed
/// * `u8`: tilt speed
/// * nibble-packed `u16`: pan position, see [PAN_RANGE]
/// * nibble-packed `u16`: tilt position, see [TILT_RANGE]
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x06\x02")]
pub struct PanTiltAbsolute {
    pan_speed: u8,
    tilt_speed: u8,
    #[bw(map = |v: &u16| codec::encode(*v))]
    pan: u16,
    #[bw(map = |v: &u16| codec::encode(*v))]
    tilt: u16,
}

impl PanTiltAbsolute {
    pub fn new(pan: u16, tilt: u16, speed: PanTiltSpeed) -> Result<Self> {
        Ok(Self {
            pan_speed: speed.pan,
            tilt_speed: speed.tilt,
            pan: check_range("pan", pan, PAN_RANGE)?,
            tilt: check_range("tilt", tilt, TILT_RANGE)?,
        })
    }
}

/// `01 06 20`: move pan, tilt, zoom and focus in one operation.
///
/// ## Packet format
///
/// * nibble-packed `u16`: pan position
/// * nibble-packed `u16`: tilt position
/// * nibble-packed `u16`: zoom position
/// * nibble-packed `u16`: focus position
///
/// The camera refuses to move focus in some autofocus modes.
#[derive(BinWrite, Debug, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x06\x20")]
pub struct PanTiltZoomFocus {
    #[bw(map = |v: &u16| codec::encode(*v))]
    pan: u16,
    #[bw(map = |v: &u16| codec::encode(*v))]
    tilt: u16,
    #[bw(map = |v: &u16| codec::encode(*v))]
    zoom: u16,
    #[bw(map = |v: &u16| codec::encode(*v))]
    focus: u16,
}

impl PanTiltZoomFocus {
    pub fn new(pan: u16, tilt: u16, zoom: u16, focus: u16) -> Result<Self> {
        Ok(Self {
            pan: check_range("pan", pan, PAN_RANGE)?,
            tilt: check_range("tilt", tilt, TILT_RANGE)?,
            zoom,
            focus,
        })
    }
}

/// `01 06 05`: reset (recalibrate) the pan / tilt motors.
#[derive(BinWrite, Debug, Default, PartialEq, Eq, Clone, Copy)]
#[bw(big, magic = b"\x01\x06\x05")]
pub struct MotorReset;

#[cfg(test)]
mod test {
    use super::*;
    use crate::Command;

    fn payload(c: impl Into<Command>) -> Result<Vec<u8>> {
        c.into().to_payload()
    }

    #[test]
    fn steer() -> Result<()> {
        let cmd = PanTiltDrive::new(Direction::Up, PanTiltSpeed::new(0x0f, 0x0f)?);
        assert_eq!(
            payload(cmd)?,
            [0x01, 0x06, 0x01, 0x0f, 0x0f, 0x03, 0x01]
        );

        let cmd = PanTiltDrive::new(Direction::DownLeft, PanTiltSpeed::new(0x01, 0x08)?);
        assert_eq!(hex::encode(payload(cmd)?), "01060101080102");
        Ok(())
    }

    #[test]
    fn steer_stop_uses_fixed_speed() -> Result<()> {
        let cmd = PanTiltDrive::new(Direction::Stop, PanTiltSpeed::MAX);
        assert_eq!(hex::encode(payload(cmd)?), "01060103030303");
        Ok(())
    }

    #[test]
    fn direction_names() -> Result<()> {
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>()?, d);
        }
        assert_eq!("upright".parse::<Direction>()?.code(), [0x02, 0x01]);
        assert!(matches!(
            "north".parse::<Direction>(),
            Err(Error::InvalidArgument(_))
        ));
        Ok(())
    }

    #[test]
    fn speeds() {
        assert!(PanTiltSpeed::new(0, 1).is_err());
        assert!(PanTiltSpeed::new(1, 0x10).is_err());
        assert_eq!(PanTiltSpeed::default(), PanTiltSpeed::MAX);
    }

    #[test]
    fn absolute() -> Result<()> {
        let cmd = PanTiltAbsolute::new(408, 135, PanTiltSpeed::MAX)?;
        assert_eq!(hex::encode(payload(cmd)?), "0106020f0f0001090800000807");

        assert!(matches!(
            PanTiltAbsolute::new(817, 135, PanTiltSpeed::MAX),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            PanTiltAbsolute::new(0, 6, PanTiltSpeed::MAX),
            Err(Error::InvalidArgument(_))
        ));
        assert!(PanTiltAbsolute::new(816, 212, PanTiltSpeed::MAX).is_ok());
        Ok(())
    }

    #[test]
    fn ptzf() -> Result<()> {
        let cmd = PanTiltZoomFocus::new(408, 135, 0x0b22, 0x1000)?;
        assert_eq!(
            hex::encode(payload(cmd)?),
            "0106200001090800000807000b020201000000"
        );

        assert!(matches!(
            PanTiltZoomFocus::new(408, 213, 0, 0),
            Err(Error::InvalidArgument(_))
        ));
        Ok(())
    }

    #[test]
    fn motor_reset() -> Result<()> {
        assert_eq!(payload(MotorReset)?, [0x01, 0x06, 0x05]);
        Ok(())
    }
}

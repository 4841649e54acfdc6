//! Named operations, for driving a [ViscaController] from text.
//!
//! [Operation::from_args] parses an operation name and its arguments, as
//! typed on a command line:
//!
//! Operation | Arguments
//! --------- | ---------
//! `steer` | direction: `up`, `down`, `left`, `right`, `upleft`, `upright`, `downleft`, `downright`, `stop`
//! `stop` |
//! `pan-tilt` | pan, tilt
//! `ptzf` | pan, tilt, zoom, focus
//! `zoom` | `in`, `out`, `stop`
//! `focus` | `far`, `near`, `stop`
//! `zoom-focus` | zoom, focus; `-1` leaves an axis alone
//! `flip`, `mirror`, `backlight` | `on`, `off`, `toggle`
//! `autofocus`, `motion-detect`, `power-led`, `power` | `on`, `off`
//! `call-led` | `on`, `off`, `blink`
//! `white-balance` | `on`, or `off` table
//! `exposure` | `on`, or `off` iris gain
//! `gamma` | `on`, or `off` table
//! `video-format` | `1080p25`, `1080p30`, `1080p50`, `1080p60`, `720p25`, `720p30`, `720p50`, `720p60`
//! `serial-speed` | `9600`, `115200`
//! `address-set` | device number, 1 - 7
//! `reboot`, `clear`, `reset` |
//! `best-view` | seconds, 0 - 99
//! `zoom-speed`, `focus-speed` | `low`, `high`, or 1 - 11
//! `drive-speed`, `position-speed` | pan speed, tilt speed; 1 - 15
//! `query` | inquiry name, eg: `zoom-position`
//!
//! `on` for `white-balance`, `exposure` and `gamma` selects automatic mode.
//!
//! [ViscaController]: crate::ViscaController
use crate::{
    protocol::{
        command::{
            self, AddressSet, BaudRate, BestView, Direction, ExposureMode, Feature,
            GainPosition, GammaTable, IrisPosition, LedMode, LensDirection, LensSpeed,
            PanTiltSpeed, VideoFormat, WhiteBalanceMode, WhiteBalanceTable,
        },
        Error as ProtocolError, Inquiry,
    },
    state::ToggleMode,
    Error, Result,
};
use std::str::FromStr;

/// Continuous zoom or focus move.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LensMove {
    Zoom(LensDirection),
    Focus(LensDirection),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WhiteBalance {
    Auto,
    Manual(WhiteBalanceTable),
}

impl WhiteBalance {
    pub const fn mode(&self) -> WhiteBalanceMode {
        match self {
            Self::Auto => WhiteBalanceMode::Auto,
            Self::Manual(_) => WhiteBalanceMode::Manual,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Exposure {
    Auto,
    Manual {
        iris: IrisPosition,
        gain: GainPosition,
    },
}

impl Exposure {
    pub const fn mode(&self) -> ExposureMode {
        match self {
            Self::Auto => ExposureMode::Auto,
            Self::Manual { .. } => ExposureMode::Manual,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Gamma {
    Auto,
    Manual(GammaTable),
}

/// Feature and mode switches.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Toggle {
    Feature(Feature, ToggleMode),
    WhiteBalance(WhiteBalance),
    Exposure(Exposure),
    Gamma(Gamma),
    CallLed(LedMode),
}

/// Camera and controller settings.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Config {
    VideoFormat(VideoFormat),
    SerialSpeed(BaudRate),
    AddressSet(AddressSet),
    Reboot,
    BestView(BestView),
    Clear,
    ResetMotors,
    ZoomSpeed(LensSpeed),
    FocusSpeed(LensSpeed),
    DriveSpeed(PanTiltSpeed),
    PositionSpeed(PanTiltSpeed),
}

/// Anything a [ViscaController][crate::ViscaController] can do.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operation {
    /// Steer, or stop steering.
    Motion(Direction),
    /// Move to an absolute pan / tilt position, optionally setting zoom and
    /// focus positions at the same time.
    PositionDirect {
        pan: u16,
        tilt: u16,
        lens: Option<(u16, u16)>,
    },
    ZoomFocusRelative(LensMove),
    ZoomFocusDirect {
        zoom: Option<u16>,
        focus: Option<u16>,
    },
    Toggle(Toggle),
    Config(Config),
    Query(Inquiry),
}

impl Operation {
    /// Parses an operation from its name and arguments.
    ///
    /// Unknown names, the wrong number of arguments, or arguments out of
    /// range return [`InvalidArgument`][ProtocolError::InvalidArgument].
    pub fn from_args(name: &str, args: &[&str]) -> Result<Self> {
        let switch = |feature, allow_toggle: bool| -> Result<Self> {
            let mode: ToggleMode = one_arg(name, args)?.parse()?;
            if mode == ToggleMode::Toggle && !allow_toggle {
                return Err(invalid(format!("{name} can't be toggled")));
            }
            Ok(Self::Toggle(Toggle::Feature(feature, mode)))
        };

        let op = match name {
            "steer" => Self::Motion(one_arg(name, args)?.parse()?),
            "stop" => {
                no_args(name, args)?;
                Self::Motion(Direction::Stop)
            }
            "pan-tilt" => {
                let [pan, tilt] = n_args::<2>(name, args)?;
                Self::PositionDirect {
                    pan: number("pan", pan)?,
                    tilt: number("tilt", tilt)?,
                    lens: None,
                }
            }
            "ptzf" => {
                let [pan, tilt, zoom, focus] = n_args::<4>(name, args)?;
                Self::PositionDirect {
                    pan: number("pan", pan)?,
                    tilt: number("tilt", tilt)?,
                    lens: Some((number("zoom", zoom)?, number("focus", focus)?)),
                }
            }
            "zoom" => Self::ZoomFocusRelative(LensMove::Zoom(LensDirection::parse_zoom(
                one_arg(name, args)?,
            )?)),
            "focus" => Self::ZoomFocusRelative(LensMove::Focus(LensDirection::parse_focus(
                one_arg(name, args)?,
            )?)),
            "zoom-focus" => {
                let [zoom, focus] = n_args::<2>(name, args)?;
                Self::ZoomFocusDirect {
                    zoom: lens_position("zoom", zoom)?,
                    focus: lens_position("focus", focus)?,
                }
            }
            "flip" => switch(Feature::Flip, true)?,
            "mirror" => switch(Feature::Mirror, true)?,
            "backlight" => switch(Feature::Backlight, true)?,
            "autofocus" => switch(Feature::Autofocus, false)?,
            "motion-detect" => switch(Feature::MotionDetect, false)?,
            "power-led" => switch(Feature::PowerLed, false)?,
            "power" => switch(Feature::Power, false)?,
            "call-led" => Self::Toggle(Toggle::CallLed(one_arg(name, args)?.parse()?)),
            "white-balance" => Self::Toggle(Toggle::WhiteBalance(match args {
                ["on"] => WhiteBalance::Auto,
                ["off", table] => {
                    WhiteBalance::Manual(WhiteBalanceTable::new(number("table", table)?)?)
                }
                _ => return Err(usage(name, "on | off <table>")),
            })),
            "exposure" => Self::Toggle(Toggle::Exposure(match args {
                ["on"] => Exposure::Auto,
                ["off", iris, gain] => Exposure::Manual {
                    iris: IrisPosition::new(number("iris", iris)?)?,
                    gain: GainPosition::new(number("gain", gain)?)?,
                },
                _ => return Err(usage(name, "on | off <iris> <gain>")),
            })),
            "gamma" => Self::Toggle(Toggle::Gamma(match args {
                ["on"] => Gamma::Auto,
                ["off", table] => Gamma::Manual(GammaTable::new(number("table", table)?)?),
                _ => return Err(usage(name, "on | off <table>")),
            })),
            "video-format" => Self::Config(Config::VideoFormat(one_arg(name, args)?.parse()?)),
            "serial-speed" => Self::Config(Config::SerialSpeed(one_arg(name, args)?.parse()?)),
            "address-set" => Self::Config(Config::AddressSet(AddressSet::new(number(
                "device",
                one_arg(name, args)?,
            )?)?)),
            "reboot" => {
                no_args(name, args)?;
                Self::Config(Config::Reboot)
            }
            "clear" => {
                no_args(name, args)?;
                Self::Config(Config::Clear)
            }
            "reset" => {
                no_args(name, args)?;
                Self::Config(Config::ResetMotors)
            }
            "best-view" => Self::Config(Config::BestView(BestView::new(number(
                "seconds",
                one_arg(name, args)?,
            )?)?)),
            "zoom-speed" => Self::Config(Config::ZoomSpeed(lens_speed(one_arg(name, args)?)?)),
            "focus-speed" => Self::Config(Config::FocusSpeed(lens_speed(one_arg(name, args)?)?)),
            "drive-speed" => Self::Config(Config::DriveSpeed(pan_tilt_speed(name, args)?)),
            "position-speed" => Self::Config(Config::PositionSpeed(pan_tilt_speed(name, args)?)),
            "query" => Self::Query(one_arg(name, args)?.parse()?),
            _ => return Err(invalid(format!("unknown operation {name:?}"))),
        };
        Ok(op)
    }
}

fn invalid(msg: String) -> Error {
    error!("{msg}");
    ProtocolError::InvalidArgument(msg).into()
}

fn usage(name: &str, args: &str) -> Error {
    invalid(format!("usage: {name} {args}"))
}

fn n_args<'a, const N: usize>(name: &str, args: &[&'a str]) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args)
        .map_err(|_| invalid(format!("{name} needs {N} arguments, got {}", args.len())))
}

fn one_arg<'a>(name: &str, args: &[&'a str]) -> Result<&'a str> {
    let [a] = n_args::<1>(name, args)?;
    Ok(a)
}

fn no_args(name: &str, args: &[&str]) -> Result {
    n_args::<0>(name, args)?;
    Ok(())
}

fn number<T: FromStr>(what: &str, s: &str) -> Result<T> {
    s.parse()
        .map_err(|_| invalid(format!("{what}: expected a number, got {s:?}")))
}

/// Parses a direct lens position, where `-1` means unused.
fn lens_position(what: &str, s: &str) -> Result<Option<u16>> {
    Ok(command::lens_position(what, number(what, s)?)?)
}

fn lens_speed(s: &str) -> Result<LensSpeed> {
    Ok(match s {
        "low" => LensSpeed::LOW,
        "high" => LensSpeed::HIGH,
        _ => LensSpeed::new(number("lens speed", s)?)?,
    })
}

fn pan_tilt_speed(name: &str, args: &[&str]) -> Result<PanTiltSpeed> {
    let [pan, tilt] = n_args::<2>(name, args)?;
    Ok(PanTiltSpeed::new(
        number("pan speed", pan)?,
        number("tilt speed", tilt)?,
    )?)
}

#[cfg(test)]
mod test {
    use super::*;

    fn is_invalid(r: Result<Operation>) -> bool {
        matches!(
            r,
            Err(Error::Protocol(ProtocolError::InvalidArgument(_)))
        )
    }

    #[test]
    fn motion() -> Result {
        assert_eq!(
            Operation::from_args("steer", &["upleft"])?,
            Operation::Motion(Direction::UpLeft)
        );
        assert_eq!(
            Operation::from_args("stop", &[])?,
            Operation::Motion(Direction::Stop)
        );
        assert!(is_invalid(Operation::from_args("steer", &["north"])));
        assert!(is_invalid(Operation::from_args("steer", &[])));
        assert!(is_invalid(Operation::from_args("stop", &["now"])));
        Ok(())
    }

    #[test]
    fn positions() -> Result {
        assert_eq!(
            Operation::from_args("ptzf", &["408", "135", "2850", "4096"])?,
            Operation::PositionDirect {
                pan: 408,
                tilt: 135,
                lens: Some((2850, 4096)),
            }
        );
        assert_eq!(
            Operation::from_args("zoom-focus", &["-1", "4096"])?,
            Operation::ZoomFocusDirect {
                zoom: None,
                focus: Some(4096),
            }
        );
        assert!(is_invalid(Operation::from_args("pan-tilt", &["408"])));
        assert!(is_invalid(Operation::from_args("pan-tilt", &["left", "135"])));
        assert!(is_invalid(Operation::from_args("zoom-focus", &["-2", "0"])));
        Ok(())
    }

    #[test]
    fn lens() -> Result {
        assert_eq!(
            Operation::from_args("focus", &["near"])?,
            Operation::ZoomFocusRelative(LensMove::Focus(LensDirection::Out))
        );
        assert_eq!(
            Operation::from_args("zoom-speed", &["high"])?,
            Operation::Config(Config::ZoomSpeed(LensSpeed::HIGH))
        );
        assert_eq!(
            Operation::from_args("focus-speed", &["3"])?,
            Operation::Config(Config::FocusSpeed(LensSpeed::new(3)?))
        );
        assert!(is_invalid(Operation::from_args("zoom-speed", &["12"])));
        assert!(is_invalid(Operation::from_args("zoom", &["far"])));
        Ok(())
    }

    #[test]
    fn toggles() -> Result {
        assert_eq!(
            Operation::from_args("flip", &["toggle"])?,
            Operation::Toggle(Toggle::Feature(Feature::Flip, ToggleMode::Toggle))
        );
        assert_eq!(
            Operation::from_args("power", &["off"])?,
            Operation::Toggle(Toggle::Feature(Feature::Power, ToggleMode::Off))
        );
        assert!(is_invalid(Operation::from_args("power", &["toggle"])));
        assert_eq!(
            Operation::from_args("call-led", &["blink"])?,
            Operation::Toggle(Toggle::CallLed(LedMode::Blink))
        );
        Ok(())
    }

    #[test]
    fn manual_modes() -> Result {
        assert_eq!(
            Operation::from_args("exposure", &["off", "20", "15"])?,
            Operation::Toggle(Toggle::Exposure(Exposure::Manual {
                iris: IrisPosition::new(20)?,
                gain: GainPosition::new(15)?,
            }))
        );
        assert_eq!(
            Operation::from_args("white-balance", &["on"])?,
            Operation::Toggle(Toggle::WhiteBalance(WhiteBalance::Auto))
        );
        assert!(is_invalid(Operation::from_args("white-balance", &["off"])));
        assert!(is_invalid(Operation::from_args("gamma", &["off", "8"])));
        assert!(is_invalid(Operation::from_args(
            "exposure",
            &["off", "20", "30"]
        )));
        Ok(())
    }

    #[test]
    fn config() -> Result {
        assert_eq!(
            Operation::from_args("serial-speed", &["115200"])?,
            Operation::Config(Config::SerialSpeed(BaudRate::B115200))
        );
        assert_eq!(
            Operation::from_args("video-format", &["720p60"])?,
            Operation::Config(Config::VideoFormat(VideoFormat::Hd720p60))
        );
        assert_eq!(
            Operation::from_args("drive-speed", &["4", "8"])?,
            Operation::Config(Config::DriveSpeed(PanTiltSpeed::new(4, 8)?))
        );
        assert!(is_invalid(Operation::from_args("address-set", &["9"])));
        assert!(is_invalid(Operation::from_args("best-view", &["100"])));
        assert!(is_invalid(Operation::from_args("serial-speed", &["38400"])));
        Ok(())
    }

    #[test]
    fn query() -> Result {
        assert_eq!(
            Operation::from_args("query", &["pan-tilt-position"])?,
            Operation::Query(Inquiry::PanTiltPosition)
        );
        assert!(is_invalid(Operation::from_args("query", &["everything"])));
        assert!(is_invalid(Operation::from_args("dance", &[])));
        Ok(())
    }
}

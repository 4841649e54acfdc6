use crate::{
    protocol::command::{Feature, LensSpeed, PanTiltSpeed},
    protocol::Error as ProtocolError,
    Result,
};
use std::str::FromStr;

/// How to change an on / off feature.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ToggleMode {
    On,
    Off,
    /// Invert the last state set by this controller.
    Toggle,
}

impl FromStr for ToggleMode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "toggle" => Ok(Self::Toggle),
            _ => Err(ProtocolError::InvalidArgument(format!(
                "expected on, off or toggle, got {s:?}"
            ))),
        }
    }
}

/// [CameraState] stores what this controller has told the camera.
///
/// The camera can't be asked for most of these, so they only change after
/// the camera accepts a command. A fresh connection starts from
/// [CameraState::default], whatever the camera was doing before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraState {
    pub flip: bool,
    pub mirror: bool,
    pub backlight: bool,
    /// Speed for steering.
    pub drive_speed: PanTiltSpeed,
    /// Speed for moving to an absolute position.
    pub position_speed: PanTiltSpeed,
    pub zoom_speed: LensSpeed,
    pub focus_speed: LensSpeed,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            flip: false,
            mirror: false,
            backlight: false,
            drive_speed: PanTiltSpeed::MAX,
            position_speed: PanTiltSpeed::MAX,
            zoom_speed: LensSpeed::LOW,
            focus_speed: LensSpeed::HIGH,
        }
    }
}

impl CameraState {
    /// The remembered state of a feature, if it is tracked.
    pub fn feature(&self, feature: Feature) -> Option<bool> {
        match feature {
            Feature::Flip => Some(self.flip),
            Feature::Mirror => Some(self.mirror),
            Feature::Backlight => Some(self.backlight),
            _ => None,
        }
    }

    fn feature_mut(&mut self, feature: Feature) -> Option<&mut bool> {
        match feature {
            Feature::Flip => Some(&mut self.flip),
            Feature::Mirror => Some(&mut self.mirror),
            Feature::Backlight => Some(&mut self.backlight),
            _ => None,
        }
    }

    /// Works out whether `mode` switches `feature` on.
    ///
    /// [ToggleMode::Toggle] is only allowed for tracked features.
    pub fn resolve(&self, feature: Feature, mode: ToggleMode) -> Result<bool> {
        match mode {
            ToggleMode::On => Ok(true),
            ToggleMode::Off => Ok(false),
            ToggleMode::Toggle => self.feature(feature).map(|on| !on).ok_or_else(|| {
                error!("{feature:?} can't be toggled");
                ProtocolError::InvalidArgument(format!("{feature:?} can't be toggled")).into()
            }),
        }
    }

    /// Records that the camera accepted switching `feature`.
    pub fn commit(&mut self, feature: Feature, on: bool) {
        if let Some(v) = self.feature_mut(feature) {
            *v = on;
        }
    }
}

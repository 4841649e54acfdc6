use crate::{
    channel::{open_serial, ViscaChannel, ViscaLink, DEFAULT_RESPONSE_TIMEOUT},
    error::Error,
    operation::{Config, Exposure, Gamma, LensMove, Operation, Toggle, WhiteBalance},
    protocol::{
        command::{
            AddressSet, BaudRate, BestView, CallLed, Clear, Direction, ExposureModeSet, Feature,
            FocusDrive, GammaAuto, LedMode, LensDirection, LensSpeed, MotorReset, PanTiltAbsolute,
            PanTiltDrive, PanTiltSpeed, PanTiltZoomFocus, Reboot, SerialSpeed, SetVideoFormat,
            Switch, VideoFormat, WhiteBalanceModeSet, ZoomDirect, ZoomDrive,
        },
        packet::camera_address,
        reply, Command, Inquiry,
    },
    state::{CameraState, ToggleMode},
    Result,
};
use std::time::Duration;
use tokio_serial::SerialStream;

/// Time for the camera to switch serial speed after acknowledging the
/// change.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(20);

/// [ViscaController] settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Host baud rate used when opening a serial port.
    pub baud_rate: BaudRate,
    /// Time to wait for each reply.
    pub response_timeout: Duration,
    /// Time to wait after the camera acknowledges a serial speed change,
    /// before switching the host side of the link.
    pub settle_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            baud_rate: BaudRate::B9600,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// [ViscaController] controls a single VISCA camera, and keeps the state
/// that the camera can't report.
///
/// ## General design
///
/// Each method encodes a command from the current [CameraState], sends it
/// with [ViscaChannel::send] and waits for the camera's reply. Changes to
/// [CameraState] are only committed once the camera replies with completion,
/// so a failed command never leaves the state out of step with the camera.
///
/// All methods take `&mut self`: VISCA has no way to match replies to
/// requests, so only one request may be in flight.
///
/// Methods fail with [`Error::NotConnected`] without sending anything when
/// there is no link.
///
/// ## Example
///
/// ```no_run
/// use visca::{ToggleMode, ViscaController};
/// use visca::protocol::command::Direction;
///
/// # async fn run() -> visca::Result {
/// let mut camera: ViscaController = ViscaController::new();
/// camera.connect("/dev/ttyUSB0")?;
/// camera.steer(Direction::Left).await?;
/// camera.stop().await?;
/// camera.flip(ToggleMode::Toggle).await?;
/// # Ok(())
/// # }
/// ```
pub struct ViscaController<L = SerialStream> {
    channel: ViscaChannel<L>,
    state: CameraState,
    config: ControllerConfig,
}

impl<L: ViscaLink> Default for ViscaController<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl ViscaController<SerialStream> {
    /// Opens a serial port at the configured baud rate, and starts using it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn connect(&mut self, port: &str) -> Result {
        info!("opening {port} at {} baud", self.config.baud_rate);
        let link = open_serial(port, self.config.baud_rate)?;
        self.attach(link);
        Ok(())
    }
}

impl<L: ViscaLink> ViscaController<L> {
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        Self {
            channel: ViscaChannel::new(config.response_timeout),
            state: CameraState::default(),
            config,
        }
    }

    /// Starts using an already-open link.
    ///
    /// This resets [CameraState] and the camera address to defaults.
    pub fn attach(&mut self, link: L) {
        self.channel.attach(link);
        self.state = CameraState::default();
    }

    /// Closes the link, if any.
    pub fn disconnect(&mut self) -> Result {
        if self.channel.detach().is_some() {
            info!("disconnected");
        }
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The address byte currently used for the camera.
    pub fn address(&self) -> u8 {
        self.channel.address()
    }

    /// Sends a command to the camera, and waits for completion.
    async fn send(&mut self, cmd: impl Into<Command>) -> Result {
        let cmd = cmd.into();
        debug!("sending {cmd:?}");
        let payload = cmd.to_payload()?;
        match self.channel.send(&payload).await {
            Ok(_) => Ok(()),
            Err(e) if cmd.controls_focus() && e.is_not_executable() => {
                warn!("camera refused {cmd:?}, it may be in autofocus mode");
                Err(Error::UnsupportedOperation(format!("{cmd:?}")))
            }
            Err(e) => {
                error!("{cmd:?} failed: {e}");
                Err(e)
            }
        }
    }

    /// Sends a setup command for a manual mode.
    ///
    /// Failures are only logged, so that the mode switch is still attempted.
    async fn setup(&mut self, cmd: impl Into<Command>) {
        if let Err(e) = self.send(cmd).await {
            warn!("manual mode setup failed, continuing: {e}");
        }
    }

    /// Steers the camera in a direction at the drive speed, until told to
    /// stop.
    pub async fn steer(&mut self, direction: Direction) -> Result {
        self.send(PanTiltDrive::new(direction, self.state.drive_speed))
            .await
    }

    /// Stops steering.
    pub async fn stop(&mut self) -> Result {
        self.steer(Direction::Stop).await
    }

    /// Recalibrates the pan / tilt motors.
    pub async fn reset_motors(&mut self) -> Result {
        self.send(MotorReset).await
    }

    /// Moves to an absolute pan / tilt position at the position speed.
    pub async fn pan_tilt(&mut self, pan: u16, tilt: u16) -> Result {
        self.send(PanTiltAbsolute::new(pan, tilt, self.state.position_speed)?)
            .await
    }

    /// Moves pan, tilt, zoom and focus to absolute positions at once.
    pub async fn pan_tilt_zoom_focus(
        &mut self,
        pan: u16,
        tilt: u16,
        zoom: u16,
        focus: u16,
    ) -> Result {
        self.send(PanTiltZoomFocus::new(pan, tilt, zoom, focus)?)
            .await
    }

    /// Zooms continuously at the zoom speed.
    pub async fn zoom(&mut self, direction: LensDirection) -> Result {
        self.send(ZoomDrive::new(direction, self.state.zoom_speed))
            .await
    }

    /// Focuses continuously at the focus speed.
    ///
    /// Returns [`Error::UnsupportedOperation`] if the camera refuses, which
    /// it does in autofocus mode.
    pub async fn focus(&mut self, direction: LensDirection) -> Result {
        self.send(FocusDrive::new(direction, self.state.focus_speed))
            .await
    }

    /// Moves zoom and / or focus to absolute positions. `None` leaves that
    /// axis alone, but at least one must be set.
    pub async fn zoom_focus(&mut self, zoom: Option<u16>, focus: Option<u16>) -> Result {
        self.send(ZoomDirect::for_axes(zoom, focus)?).await
    }

    /// Switches a feature on or off, and returns its new state.
    ///
    /// [ToggleMode::Toggle] works for features in [CameraState].
    pub async fn set_feature(&mut self, feature: Feature, mode: ToggleMode) -> Result<bool> {
        let on = self.state.resolve(feature, mode)?;
        self.send(feature.command(on)).await?;
        self.state.commit(feature, on);
        info!("{feature:?} {}", if on { "on" } else { "off" });
        Ok(on)
    }

    pub async fn flip(&mut self, mode: ToggleMode) -> Result<bool> {
        self.set_feature(Feature::Flip, mode).await
    }

    pub async fn mirror(&mut self, mode: ToggleMode) -> Result<bool> {
        self.set_feature(Feature::Mirror, mode).await
    }

    /// Backlight compensation.
    pub async fn backlight(&mut self, mode: ToggleMode) -> Result<bool> {
        self.set_feature(Feature::Backlight, mode).await
    }

    pub async fn autofocus(&mut self, on: bool) -> Result {
        self.switch(Feature::Autofocus, on).await
    }

    /// Recalibrate when the camera is moved by hand.
    pub async fn motion_detect(&mut self, on: bool) -> Result {
        self.switch(Feature::MotionDetect, on).await
    }

    pub async fn power_led(&mut self, on: bool) -> Result {
        self.switch(Feature::PowerLed, on).await
    }

    /// Motor power.
    pub async fn power(&mut self, on: bool) -> Result {
        self.switch(Feature::Power, on).await
    }

    async fn switch(&mut self, feature: Feature, on: bool) -> Result {
        let mode = if on { ToggleMode::On } else { ToggleMode::Off };
        self.set_feature(feature, mode).await?;
        Ok(())
    }

    pub async fn call_led(&mut self, mode: LedMode) -> Result {
        self.send(CallLed(mode)).await
    }

    /// Selects automatic or manual white balance.
    ///
    /// Manual mode sets the table first. If that fails, the camera is still
    /// switched to manual mode, using its previous table.
    pub async fn white_balance(&mut self, wb: WhiteBalance) -> Result {
        if let WhiteBalance::Manual(table) = wb {
            self.setup(table).await;
        }
        self.send(WhiteBalanceModeSet(wb.mode())).await
    }

    /// Selects automatic or manual exposure.
    ///
    /// Manual mode sets iris and gain first. If either fails, the camera is
    /// still switched to manual mode.
    pub async fn exposure(&mut self, exposure: Exposure) -> Result {
        if let Exposure::Manual { iris, gain } = exposure {
            self.setup(iris).await;
            self.setup(gain).await;
        }
        self.send(ExposureModeSet(exposure.mode())).await
    }

    /// Selects automatic gamma, or a manual gamma table.
    pub async fn gamma(&mut self, gamma: Gamma) -> Result {
        let auto = match gamma {
            Gamma::Auto => true,
            Gamma::Manual(table) => {
                self.setup(table).await;
                false
            }
        };
        self.send(GammaAuto(Switch::from(auto))).await
    }

    pub async fn video_format(&mut self, format: VideoFormat) -> Result {
        self.send(SetVideoFormat(format)).await
    }

    /// Changes the camera's serial speed, then the host's.
    ///
    /// After the camera acknowledges, this waits for
    /// [ControllerConfig::settle_delay] before switching the host side.
    pub async fn serial_speed(&mut self, baud_rate: BaudRate) -> Result {
        self.send(SerialSpeed(baud_rate)).await?;
        info!(
            "camera switching to {baud_rate} baud, waiting {:?}",
            self.config.settle_delay
        );
        tokio::time::sleep(self.config.settle_delay).await;
        self.channel.set_baud_rate(baud_rate)
    }

    /// Gives the camera a new device number (1 - 7), and addresses it by
    /// that from now on.
    pub async fn address_set(&mut self, device: u8) -> Result {
        self.apply_address(AddressSet::new(device)?).await
    }

    async fn apply_address(&mut self, cmd: AddressSet) -> Result {
        let address = camera_address(cmd.device())?;
        self.send(cmd).await?;
        self.channel.set_address(address);
        Ok(())
    }

    /// Reboots the camera, which comes back at 9600 baud.
    pub async fn reboot(&mut self) -> Result {
        self.send(Reboot).await?;
        self.channel.set_baud_rate(BaudRate::B9600)
    }

    /// Starts automatic framing for `seconds` (0 - 99); 0 stops it.
    pub async fn best_view(&mut self, seconds: u8) -> Result {
        self.send(BestView::new(seconds)?).await
    }

    /// Cancels the camera's pending commands.
    pub async fn clear(&mut self) -> Result {
        self.send(Clear).await
    }

    pub fn set_zoom_speed(&mut self, speed: LensSpeed) {
        debug!("zoom speed {speed}");
        self.state.zoom_speed = speed;
    }

    pub fn set_focus_speed(&mut self, speed: LensSpeed) {
        debug!("focus speed {speed}");
        self.state.focus_speed = speed;
    }

    /// Sets the speed for [steer][Self::steer].
    pub fn set_drive_speed(&mut self, speed: PanTiltSpeed) {
        debug!("drive speed {speed:?}");
        self.state.drive_speed = speed;
    }

    /// Sets the speed for [pan_tilt][Self::pan_tilt].
    pub fn set_position_speed(&mut self, speed: PanTiltSpeed) {
        debug!("position speed {speed:?}");
        self.state.position_speed = speed;
    }

    /// Sends an inquiry, and returns the reply data.
    ///
    /// The [reply][crate::protocol::reply] module has decoders for the data.
    pub async fn inquire(&mut self, inquiry: Inquiry) -> Result<Vec<u8>> {
        let data = self.channel.send(inquiry.payload()).await?;
        debug!("{inquiry}: {}", hex::encode(&data));
        Ok(data)
    }

    pub async fn zoom_position(&mut self) -> Result<u16> {
        let data = self.inquire(Inquiry::ZoomPosition).await?;
        Ok(reply::position(&data)?)
    }

    pub async fn focus_position(&mut self) -> Result<u16> {
        let data = self.inquire(Inquiry::FocusPosition).await?;
        Ok(reply::position(&data)?)
    }

    /// Returns the current `(pan, tilt)` position.
    pub async fn pan_tilt_position(&mut self) -> Result<(u16, u16)> {
        let data = self.inquire(Inquiry::PanTiltPosition).await?;
        Ok(reply::pan_tilt_position(&data)?)
    }

    pub async fn autofocus_enabled(&mut self) -> Result<bool> {
        let data = self.inquire(Inquiry::FocusMode).await?;
        Ok(reply::on_off(&data)?)
    }

    /// Whether the motors are powered.
    pub async fn power_enabled(&mut self) -> Result<bool> {
        let data = self.inquire(Inquiry::Power).await?;
        Ok(reply::on_off(&data)?)
    }

    /// Runs an [Operation].
    ///
    /// Returns the reply data for [Operation::Query], or `None` otherwise.
    pub async fn execute(&mut self, op: Operation) -> Result<Option<Vec<u8>>> {
        match op {
            Operation::Motion(direction) => self.steer(direction).await?,
            Operation::PositionDirect {
                pan,
                tilt,
                lens: None,
            } => self.pan_tilt(pan, tilt).await?,
            Operation::PositionDirect {
                pan,
                tilt,
                lens: Some((zoom, focus)),
            } => self.pan_tilt_zoom_focus(pan, tilt, zoom, focus).await?,
            Operation::ZoomFocusRelative(LensMove::Zoom(d)) => self.zoom(d).await?,
            Operation::ZoomFocusRelative(LensMove::Focus(d)) => self.focus(d).await?,
            Operation::ZoomFocusDirect { zoom, focus } => self.zoom_focus(zoom, focus).await?,
            Operation::Toggle(Toggle::Feature(feature, mode)) => {
                self.set_feature(feature, mode).await?;
            }
            Operation::Toggle(Toggle::WhiteBalance(wb)) => self.white_balance(wb).await?,
            Operation::Toggle(Toggle::Exposure(e)) => self.exposure(e).await?,
            Operation::Toggle(Toggle::Gamma(g)) => self.gamma(g).await?,
            Operation::Toggle(Toggle::CallLed(mode)) => self.call_led(mode).await?,
            Operation::Config(Config::VideoFormat(f)) => self.video_format(f).await?,
            Operation::Config(Config::SerialSpeed(b)) => self.serial_speed(b).await?,
            Operation::Config(Config::AddressSet(a)) => self.apply_address(a).await?,
            Operation::Config(Config::Reboot) => self.reboot().await?,
            Operation::Config(Config::BestView(b)) => self.send(b).await?,
            Operation::Config(Config::Clear) => self.clear().await?,
            Operation::Config(Config::ResetMotors) => self.reset_motors().await?,
            Operation::Config(Config::ZoomSpeed(s)) => self.set_zoom_speed(s),
            Operation::Config(Config::FocusSpeed(s)) => self.set_focus_speed(s),
            Operation::Config(Config::DriveSpeed(s)) => self.set_drive_speed(s),
            Operation::Config(Config::PositionSpeed(s)) => self.set_position_speed(s),
            Operation::Query(q) => return Ok(Some(self.inquire(q).await?)),
        }
        Ok(None)
    }
}

//! Camera commands.
//!
//! [`CameraCore`] holds what every camera tool shares: the validated flags,
//! the command runner, the background process and the last captured output.
//! [`CameraControls`] exposes the shared fluent setters on top of it, so
//! [`Raspistill`] and [`Raspivid`] only add their own options and capture
//! operations.
//!
//! Setters validate immediately. A rejected value returns an error and
//! leaves the previous configuration untouched:
//!
//! ```rust,no_run
//! use raspicam::{CameraControls, ExposureMode, Raspistill};
//!
//! # fn main() -> raspicam::Result<()> {
//! let mut camera = Raspistill::new();
//! camera
//!     .flip(true)
//!     .exposure(ExposureMode::Backlight)
//!     .iso(600)?
//!     .quality(50)?;
//! camera.take_picture("garden.jpg")?;
//! # Ok(())
//! # }
//! ```

pub mod still;
pub mod video;

pub use still::Raspistill;
pub use video::Raspivid;

use crate::error::{CameraError, Result};
use crate::options::{
    config::CameraOptions, validate, CameraCommand, CameraSettings, DynamicRangeCompression,
    ExposureMode, ImageEffect, MeteringMode, TimeUnit, WhiteBalance,
};
use crate::process::{CommandRunner, ExecRunner, ProcessState, ProcessSupervisor, StopPolicy};
use tracing::debug;

/// Rotations supported by the camera tools, in degrees.
pub const SUPPORTED_ROTATIONS: [u32; 4] = [0, 90, 180, 270];

/// Per-tool capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Executable invoked for this camera
    pub executable: &'static str,
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

/// State shared by every camera command.
#[derive(Debug)]
pub struct CameraCore {
    capabilities: Capabilities,
    settings: CameraSettings,
    runner: Box<dyn CommandRunner>,
    supervisor: ProcessSupervisor,
    last_output: Option<String>,
}

impl CameraCore {
    /// Create a core that runs real processes.
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            settings: CameraSettings::new(),
            runner: Box::new(ExecRunner::new()),
            supervisor: ProcessSupervisor::default(),
            last_output: None,
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut CameraSettings {
        &mut self.settings
    }

    pub fn set_runner(&mut self, runner: Box<dyn CommandRunner>) {
        self.runner = runner;
    }

    pub fn set_stop_policy(&mut self, policy: StopPolicy) {
        self.supervisor.set_policy(policy);
    }

    /// Executable plus the current argument list.
    pub fn command(&self) -> CameraCommand {
        self.settings.to_command(self.capabilities.executable)
    }

    /// Run the current command to completion.
    ///
    /// The captured standard output is kept even when the exit code is
    /// non-zero, which then becomes [`CameraError::CommandFailed`].
    pub fn execute(&mut self) -> Result<()> {
        self.execute_with(|_| {})
    }

    /// Run once with per-call flags layered over a copy of the settings.
    ///
    /// The stored settings are left untouched, so flags that only belong to
    /// one capture (output, timelapse length) never leak into the next one.
    pub fn execute_with(&mut self, per_call: impl FnOnce(&mut CameraSettings)) -> Result<()> {
        let mut settings = self.settings.clone();
        per_call(&mut settings);

        let command = settings.to_command(self.capabilities.executable);
        debug!("Executing {}", command);

        let output = self.runner.run(&command)?;
        self.last_output = Some(output.stdout);

        if output.exit_code != crate::process::exit_code::SUCCESS {
            return Err(CameraError::command_failed(output.exit_code));
        }
        Ok(())
    }

    pub fn last_output(&self) -> Option<&str> {
        self.last_output.as_deref()
    }

    pub fn start(&mut self) -> Result<bool> {
        let command = self.command();
        self.supervisor.start(self.runner.as_mut(), &command)
    }

    pub fn is_running(&mut self) -> bool {
        self.supervisor.is_running()
    }

    pub fn state(&mut self) -> ProcessState {
        self.supervisor.state()
    }

    pub fn stop(&mut self) -> Result<()> {
        self.supervisor.stop()
    }
}

/// Options and process control shared by `raspistill` and `raspivid`.
///
/// Boolean setters cannot fail and return `&mut Self`; every other setter
/// returns `Result<&mut Self>` so chains read `camera.flip(true).iso(400)?`.
pub trait CameraControls: Sized {
    fn core(&self) -> &CameraCore;

    fn core_mut(&mut self) -> &mut CameraCore;

    /// Flip the image both vertically and horizontally.
    fn flip(&mut self, enabled: bool) -> &mut Self {
        let settings = self.core_mut().settings_mut();
        settings.set_flag("vflip", enabled);
        settings.set_flag("hflip", enabled);
        self
    }

    fn vertical_flip(&mut self, enabled: bool) -> &mut Self {
        self.core_mut().settings_mut().set_flag("vflip", enabled);
        self
    }

    fn horizontal_flip(&mut self, enabled: bool) -> &mut Self {
        self.core_mut().settings_mut().set_flag("hflip", enabled);
        self
    }

    /// Disable the preview window, useful on headless systems.
    fn no_preview(&mut self, enabled: bool) -> &mut Self {
        self.core_mut().settings_mut().set_flag("nopreview", enabled);
        self
    }

    /// Image sharpness, -100 to 100. 0 is the default.
    fn sharpness(&mut self, value: i32) -> Result<&mut Self> {
        self.set_int("sharpness", value, -100, 100)
    }

    /// Image contrast, -100 to 100. 0 is the default.
    fn contrast(&mut self, value: i32) -> Result<&mut Self> {
        self.set_int("contrast", value, -100, 100)
    }

    /// Image brightness, 0 (black) to 100 (white). 50 is the default.
    fn brightness(&mut self, value: i32) -> Result<&mut Self> {
        self.set_int("brightness", value, 0, 100)
    }

    /// Colour saturation, -100 to 100. 0 is the default.
    fn saturation(&mut self, value: i32) -> Result<&mut Self> {
        self.set_int("saturation", value, -100, 100)
    }

    /// Capture ISO, 100 to 800.
    fn iso(&mut self, value: i32) -> Result<&mut Self> {
        self.set_int("ISO", value, 100, 800)
    }

    /// Exposure (EV) compensation, -10 to 10. 0 is the default.
    fn exposure_compensation(&mut self, value: i32) -> Result<&mut Self> {
        self.set_int("ev", value, -10, 10)
    }

    fn exposure(&mut self, mode: ExposureMode) -> &mut Self {
        self.core_mut().settings_mut().set_value("exposure", mode);
        self
    }

    fn white_balance(&mut self, mode: WhiteBalance) -> &mut Self {
        self.core_mut().settings_mut().set_value("awb", mode);
        self
    }

    fn effect(&mut self, effect: ImageEffect) -> &mut Self {
        self.core_mut().settings_mut().set_value("imxfx", effect);
        self
    }

    fn metering(&mut self, mode: MeteringMode) -> &mut Self {
        self.core_mut().settings_mut().set_value("metering", mode);
        self
    }

    fn dynamic_range_compression(&mut self, mode: DynamicRangeCompression) -> &mut Self {
        self.core_mut().settings_mut().set_value("drc", mode);
        self
    }

    /// Image rotation. Only 0, 90, 180 and 270 degrees are supported.
    fn rotate(&mut self, degrees: u32) -> Result<&mut Self> {
        let degrees = validate::one_of("rotation", degrees, &SUPPORTED_ROTATIONS)?;
        self.core_mut().settings_mut().set_value("rotation", degrees);
        Ok(self)
    }

    /// Shutter speed, passed to the camera in microseconds.
    ///
    /// Operation is undefined past roughly 6 seconds.
    fn shutter_speed(&mut self, value: f64, unit: TimeUnit) -> Result<&mut Self> {
        self.set_time("shutter", "shutter speed", value, unit, TimeUnit::Microsecond)
    }

    /// Time before the capture ends, passed to the camera in milliseconds.
    fn timeout(&mut self, value: f64, unit: TimeUnit) -> Result<&mut Self> {
        self.set_time("timeout", "timeout", value, unit, TimeUnit::Millisecond)
    }

    /// Fixed sensor mode, disabling automatic selection. 0 (automatic) to 7.
    ///
    /// | Mode | Size      | Aspect | Frame rates | FOV     | Binning       |
    /// |------|-----------|--------|-------------|---------|---------------|
    /// | 1    | 1920x1080 | 16:9   | 1-30fps     | Partial | None          |
    /// | 2    | 2592x1944 | 4:3    | 1-15fps     | Full    | None          |
    /// | 3    | 2592x1944 | 4:3    | 0.1666-1fps | Full    | None          |
    /// | 4    | 1296x972  | 4:3    | 1-42fps     | Full    | 2x2           |
    /// | 5    | 1296x730  | 16:9   | 1-49fps     | Full    | 2x2           |
    /// | 6    | 640x480   | 4:3    | 42.1-60fps  | Full    | 2x2 plus skip |
    /// | 7    | 640x480   | 4:3    | 60.1-90fps  | Full    | 2x2 plus skip |
    fn sensor_mode(&mut self, mode: i32) -> Result<&mut Self> {
        self.set_int("mode", mode, 0, 7)
    }

    /// Output width in pixels, bounded by the tool's capabilities.
    fn width(&mut self, value: i32) -> Result<&mut Self> {
        let caps = *self.core().capabilities();
        self.set_int("width", value, caps.min_width, caps.max_width)
    }

    /// Output height in pixels, bounded by the tool's capabilities.
    fn height(&mut self, value: i32) -> Result<&mut Self> {
        let caps = *self.core().capabilities();
        self.set_int("height", value, caps.min_height, caps.max_height)
    }

    /// Destination file, for captures started with [`start`](Self::start).
    fn output_file(&mut self, path: &str) -> Result<&mut Self> {
        validate::non_empty("Filename", path)?;
        self.core_mut().settings_mut().set_value("output", path);
        Ok(self)
    }

    /// Replace the command runner, e.g. with a [`MockRunner`](crate::process::MockRunner).
    fn set_runner(&mut self, runner: impl CommandRunner + 'static) -> &mut Self {
        self.core_mut().set_runner(Box::new(runner));
        self
    }

    fn set_stop_policy(&mut self, policy: StopPolicy) -> &mut Self {
        self.core_mut().set_stop_policy(policy);
        self
    }

    /// Apply every option present in `options`, failing on the first invalid one.
    fn apply_options(&mut self, options: &CameraOptions) -> Result<&mut Self> {
        if let Some(enabled) = options.flip {
            self.flip(enabled);
        }
        if let Some(enabled) = options.vertical_flip {
            self.vertical_flip(enabled);
        }
        if let Some(enabled) = options.horizontal_flip {
            self.horizontal_flip(enabled);
        }
        if let Some(value) = options.sharpness {
            self.sharpness(value)?;
        }
        if let Some(value) = options.contrast {
            self.contrast(value)?;
        }
        if let Some(value) = options.brightness {
            self.brightness(value)?;
        }
        if let Some(value) = options.saturation {
            self.saturation(value)?;
        }
        if let Some(value) = options.iso {
            self.iso(value)?;
        }
        if let Some(value) = options.exposure_compensation {
            self.exposure_compensation(value)?;
        }
        if let Some(mode) = options.exposure {
            self.exposure(mode);
        }
        if let Some(mode) = options.white_balance {
            self.white_balance(mode);
        }
        if let Some(effect) = options.effect {
            self.effect(effect);
        }
        if let Some(mode) = options.metering {
            self.metering(mode);
        }
        if let Some(mode) = options.dynamic_range_compression {
            self.dynamic_range_compression(mode);
        }
        if let Some(degrees) = options.rotate {
            self.rotate(degrees)?;
        }
        if let Some(shutter) = options.shutter_speed {
            self.shutter_speed(shutter.value, shutter.unit)?;
        }
        if let Some(mode) = options.sensor_mode {
            self.sensor_mode(mode)?;
        }
        if let Some(value) = options.width {
            self.width(value)?;
        }
        if let Some(value) = options.height {
            self.height(value)?;
        }
        if let Some(enabled) = options.no_preview {
            self.no_preview(enabled);
        }
        if let Some(timeout) = options.timeout {
            self.timeout(timeout.value, timeout.unit)?;
        }
        Ok(self)
    }

    /// Executable plus the current argument list.
    fn command(&self) -> CameraCommand {
        self.core().command()
    }

    /// The current argument list, without the executable.
    fn arguments(&self) -> Vec<String> {
        self.core().settings().to_args()
    }

    /// Standard output of the most recent synchronous capture.
    fn last_output(&self) -> Option<&str> {
        self.core().last_output()
    }

    /// Start the configured command in the background.
    ///
    /// Fails with [`CameraError::AlreadyRunning`] while a previous start is
    /// still alive. Returns whether the new process is running.
    fn start(&mut self) -> Result<bool> {
        self.core_mut().start()
    }

    fn is_running(&mut self) -> bool {
        self.core_mut().is_running()
    }

    fn process_state(&mut self) -> ProcessState {
        self.core_mut().state()
    }

    /// Stop the background process. See [`ProcessSupervisor::stop`].
    fn stop(&mut self) -> Result<()> {
        self.core_mut().stop()
    }

    #[doc(hidden)]
    fn set_int(&mut self, flag: &'static str, value: i32, min: i32, max: i32) -> Result<&mut Self> {
        let value = validate::int_between(flag, value, min, max)?;
        self.core_mut().settings_mut().set_value(flag, value);
        Ok(self)
    }

    #[doc(hidden)]
    fn set_time(
        &mut self,
        flag: &'static str,
        label: &str,
        value: f64,
        unit: TimeUnit,
        target: TimeUnit,
    ) -> Result<&mut Self> {
        validate::positive_number(label, value)?;
        let converted = crate::options::convert_time_unit(value, unit, target)?;
        self.core_mut().settings_mut().set_value(flag, converted);
        Ok(self)
    }
}

//! `raspivid`: video recording.

use crate::camera::{CameraControls, CameraCore, Capabilities};
use crate::error::Result;
use crate::options::{convert_time_unit, validate, TimeUnit, VideoOptions};
use crate::process::CommandRunner;
use tracing::info;

/// Capability table for `raspivid`.
pub const RASPIVID: Capabilities = Capabilities {
    executable: "raspivid",
    min_width: 64,
    max_width: 1920,
    min_height: 64,
    max_height: 1080,
};

/// Video camera driven through `raspivid`.
#[derive(Debug)]
pub struct Raspivid {
    core: CameraCore,
}

impl Default for Raspivid {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraControls for Raspivid {
    fn core(&self) -> &CameraCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CameraCore {
        &mut self.core
    }
}

impl Raspivid {
    pub const COMMAND: &'static str = RASPIVID.executable;

    pub fn new() -> Self {
        Self {
            core: CameraCore::new(RASPIVID),
        }
    }

    /// Create a camera from construct-time options.
    ///
    /// ```rust
    /// use raspicam::{CameraControls, Raspivid, VideoOptions};
    ///
    /// let mut options = VideoOptions::default();
    /// options.camera.width = Some(640);
    /// options.camera.height = Some(480);
    /// options.framerate = Some(24);
    ///
    /// let camera = Raspivid::with_options(&options).unwrap();
    /// assert!(camera.arguments().contains(&"640".to_owned()));
    /// ```
    pub fn with_options(options: &VideoOptions) -> Result<Self> {
        let mut camera = Self::new();
        camera.apply_video_options(options)?;
        Ok(camera)
    }

    /// Use `runner` instead of spawning real processes.
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.set_runner(runner);
        self
    }

    /// Apply shared options, then the video-specific ones.
    pub fn apply_video_options(&mut self, options: &VideoOptions) -> Result<&mut Self> {
        self.apply_options(&options.camera)?;

        if let Some(value) = options.framerate {
            self.framerate(value)?;
        }
        if let Some(value) = options.bitrate {
            self.bitrate(value)?;
        }
        Ok(self)
    }

    /// Frames per second, 2 to 90.
    pub fn framerate(&mut self, value: i32) -> Result<&mut Self> {
        self.set_int("framerate", value, 2, 90)
    }

    /// Bits per second, up to 25 Mbit/s. 0 lets the encoder choose.
    pub fn bitrate(&mut self, value: i32) -> Result<&mut Self> {
        self.set_int("bitrate", value, 0, 25_000_000)
    }

    /// Record a clip of `length` in `unit` to `filename`. Blocks until done.
    ///
    /// With default settings this records 1080p30 H.264.
    ///
    /// Output and length apply to this clip only.
    pub fn record_video(&mut self, filename: &str, length: f64, unit: TimeUnit) -> Result<()> {
        validate::non_empty("Filename", filename)?;
        validate::positive_number("video length", length)?;
        let timeout = convert_time_unit(length, unit, TimeUnit::Millisecond)?;

        self.core.execute_with(|settings| {
            settings.set_value("output", filename);
            settings.set_value("timeout", timeout);
        })?;
        info!("Recorded video to {}", filename);
        Ok(())
    }
}

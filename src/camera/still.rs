//! `raspistill`: still pictures, timelapse and burst capture.

use crate::camera::{CameraControls, CameraCore, Capabilities};
use crate::error::Result;
use crate::options::{
    convert_time_unit, validate, CameraSettings, Encoding, ExifTags, StillOptions, TimeUnit,
};
use crate::process::CommandRunner;
use tracing::info;

/// Capability table for `raspistill`.
pub const RASPISTILL: Capabilities = Capabilities {
    executable: "raspistill",
    min_width: 64,
    max_width: 3280,
    min_height: 64,
    max_height: 2464,
};

/// Still camera driven through `raspistill`.
#[derive(Debug)]
pub struct Raspistill {
    core: CameraCore,
    exif: ExifTags,
}

impl Default for Raspistill {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraControls for Raspistill {
    fn core(&self) -> &CameraCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CameraCore {
        &mut self.core
    }
}

impl Raspistill {
    pub const COMMAND: &'static str = RASPISTILL.executable;

    pub fn new() -> Self {
        Self {
            core: CameraCore::new(RASPISTILL),
            exif: ExifTags::new(),
        }
    }

    /// Create a camera from construct-time options.
    pub fn with_options(options: &StillOptions) -> Result<Self> {
        let mut camera = Self::new();
        camera.apply_still_options(options)?;
        Ok(camera)
    }

    /// Use `runner` instead of spawning real processes.
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.set_runner(runner);
        self
    }

    /// Apply shared options, then the still-specific ones.
    pub fn apply_still_options(&mut self, options: &StillOptions) -> Result<&mut Self> {
        self.apply_options(&options.camera)?;

        if let Some(value) = options.quality {
            self.quality(value)?;
        }
        if let Some(enabled) = options.raw {
            self.raw(enabled);
        }
        if let Some(encoding) = options.encoding {
            self.encoding(encoding);
        }
        for tag in &options.exif {
            self.add_exif(&tag.name, &tag.value)?;
        }
        if options.disable_exif {
            self.disable_exif();
        }
        Ok(self)
    }

    /// JPEG quality, 0 to 100.
    pub fn quality(&mut self, value: i32) -> Result<&mut Self> {
        self.set_int("quality", value, 0, 100)
    }

    /// Add raw Bayer data to the JPEG metadata.
    pub fn raw(&mut self, enabled: bool) -> &mut Self {
        self.core.settings_mut().set_flag("raw", enabled);
        self
    }

    pub fn encoding(&mut self, encoding: Encoding) -> &mut Self {
        self.core.settings_mut().set_value("encoding", encoding);
        self
    }

    /// Add an EXIF tag, e.g. `add_exif("EXIF.MakerNote", "garden cam")`.
    ///
    /// At most [`MAX_EXIF_TAGS`](crate::options::MAX_EXIF_TAGS) tags fit;
    /// one more is an [`ExifOverflow`](crate::CameraError::ExifOverflow).
    pub fn add_exif(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        self.exif.add(name, value)?;
        self.sync_exif();
        Ok(self)
    }

    /// Write no EXIF data, discarding tags added so far.
    pub fn disable_exif(&mut self) -> &mut Self {
        self.exif.disable();
        self.sync_exif();
        self
    }

    pub fn exif_tags(&self) -> &ExifTags {
        &self.exif
    }

    fn sync_exif(&mut self) {
        let values = self.exif.to_values();
        self.core.settings_mut().set_repeated("exif", values);
    }

    /// Capture repeatedly every `interval` for as long as the timeout runs.
    ///
    /// An interval of zero captures as fast as possible (burst mode).
    pub fn timelapse(&mut self, interval: f64, unit: TimeUnit) -> Result<&mut Self> {
        let millis = interval_millis(interval, unit)?;
        write_timelapse(self.core.settings_mut(), millis);
        Ok(self)
    }

    /// Take a single picture and save it to `filename`. Blocks until done.
    ///
    /// A timelapse set with [`timelapse`](Self::timelapse) is ignored for
    /// this capture.
    pub fn take_picture(&mut self, filename: &str) -> Result<()> {
        validate::non_empty("Filename", filename)?;

        self.core.execute_with(|settings| {
            settings.set_value("output", filename);
            settings.remove_value("timelapse");
            settings.set_flag("burst", false);
        })?;
        info!("Saved picture to {}", filename);
        Ok(())
    }

    /// Take a picture every `interval` for `length`, both in `unit`. Blocks until done.
    ///
    /// Put a `%04d` pattern in `filename` where the frame number should go,
    /// e.g. `image%04d.jpg` gives `image0001.jpg`, `image0002.jpg`, ...
    /// Output, interval and length apply to this capture only.
    pub fn start_timelapse(
        &mut self,
        filename: &str,
        interval: f64,
        length: f64,
        unit: TimeUnit,
    ) -> Result<()> {
        validate::non_empty("Filename", filename)?;
        let interval = interval_millis(interval, unit)?;
        validate::positive_number("timelapse length", length)?;
        let timeout = convert_time_unit(length, unit, TimeUnit::Millisecond)?;

        self.core.execute_with(|settings| {
            settings.set_value("output", filename);
            write_timelapse(settings, interval);
            settings.set_value("timeout", timeout);
        })?;
        info!("Timelapse to {} finished", filename);
        Ok(())
    }
}

/// Timelapse interval in milliseconds, `None` for burst mode.
fn interval_millis(interval: f64, unit: TimeUnit) -> Result<Option<u64>> {
    if interval == 0.0 {
        return Ok(None);
    }
    validate::positive_number("timelapse interval", interval)?;
    convert_time_unit(interval, unit, TimeUnit::Millisecond).map(Some)
}

fn write_timelapse(settings: &mut CameraSettings, interval: Option<u64>) {
    match interval {
        Some(millis) => {
            settings.set_flag("burst", false);
            settings.set_value("timelapse", millis);
        }
        None => {
            settings.set_flag("burst", true);
            settings.set_value("timelapse", 0);
        }
    }
}

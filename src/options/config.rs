//! Construct-time camera options.
//!
//! These structs stand in for a name-to-setter map: struct literals get
//! compile-time checking of option names, and the same structs load from
//! JSON for configuration files. Values are validated when they are applied
//! to a camera, through the same setters as fluent calls.

use crate::error::{CameraError, Result};
use crate::options::modes::{
    DynamicRangeCompression, Encoding, ExposureMode, ImageEffect, MeteringMode, WhiteBalance,
};
use crate::options::time::TimeValue;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Options shared by `raspistill` and `raspivid`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Flip both vertically and horizontally
    pub flip: Option<bool>,
    pub vertical_flip: Option<bool>,
    pub horizontal_flip: Option<bool>,
    /// -100 to 100
    pub sharpness: Option<i32>,
    /// -100 to 100
    pub contrast: Option<i32>,
    /// 0 to 100
    pub brightness: Option<i32>,
    /// -100 to 100
    pub saturation: Option<i32>,
    /// 100 to 800
    #[serde(alias = "ISO")]
    pub iso: Option<i32>,
    /// -10 to 10
    pub exposure_compensation: Option<i32>,
    pub exposure: Option<ExposureMode>,
    pub white_balance: Option<WhiteBalance>,
    pub effect: Option<ImageEffect>,
    pub metering: Option<MeteringMode>,
    pub dynamic_range_compression: Option<DynamicRangeCompression>,
    /// 0, 90, 180 or 270
    pub rotate: Option<u32>,
    pub shutter_speed: Option<TimeValue>,
    /// 0 to 7
    pub sensor_mode: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub no_preview: Option<bool>,
    pub timeout: Option<TimeValue>,
}

/// One EXIF tag in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExifEntry {
    pub name: String,
    pub value: String,
}

/// Options for `raspistill`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StillOptions {
    #[serde(flatten)]
    pub camera: CameraOptions,
    /// 0 to 100
    pub quality: Option<i32>,
    pub raw: Option<bool>,
    pub encoding: Option<Encoding>,
    pub exif: Vec<ExifEntry>,
    pub disable_exif: bool,
}

/// Options for `raspivid`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VideoOptions {
    #[serde(flatten)]
    pub camera: CameraOptions,
    /// 2 to 90 frames per second
    pub framerate: Option<i32>,
    /// Bits per second, up to 25 Mbit/s
    pub bitrate: Option<i32>,
}

/// JSON loading shared by the option structs.
pub trait LoadOptions: DeserializeOwned {
    fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            CameraError::config_error(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}

impl LoadOptions for CameraOptions {}
impl LoadOptions for StillOptions {}
impl LoadOptions for VideoOptions {}

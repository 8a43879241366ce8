//! Option validation and translation into command-line flags.
//!
//! This module holds everything that happens before a process is touched:
//! domain checks, enumerated modes, time-unit conversion, EXIF accumulation,
//! construct-time option structs and the ordered flag store that becomes the
//! argument list.

pub mod arguments;
pub mod config;
pub mod exif;
pub mod modes;
pub mod time;
pub mod validate;

// Re-export commonly used items
pub use arguments::{ArgValue, CameraCommand, CameraSettings};
pub use config::{CameraOptions, ExifEntry, LoadOptions, StillOptions, VideoOptions};
pub use exif::{ExifTags, MAX_EXIF_TAGS};
pub use modes::{
    DynamicRangeCompression, Encoding, ExposureMode, ImageEffect, MeteringMode, WhiteBalance,
};
pub use time::{convert_time_unit, TimeUnit, TimeValue};

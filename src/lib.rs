//! # raspicam - Raspberry Pi camera control
//!
//! A fluent, validated interface to the Raspberry Pi camera tools
//! `raspistill` and `raspivid`. Options are checked as they are set, turned
//! into a command line and run as a subprocess, either to completion
//! (pictures, timelapses, clips) or in the background with a supervised
//! stop.
//!
//! ## Features
//!
//! - **Validated options**: ranges, enumerated modes and time units are
//!   checked before any process is started
//! - **Timelapse and burst**: numbered frame output through `%04d` patterns
//! - **Background capture**: start, poll and stop with terminate-then-kill
//!   escalation
//! - **Configuration files**: the same options load from JSON
//! - **Dry runs**: a recording runner shows what would be executed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use raspicam::{CameraControls, Raspistill, TimeUnit};
//!
//! fn main() -> raspicam::Result<()> {
//!     let mut camera = Raspistill::new();
//!     camera.contrast(50)?.iso(500)?;
//!
//!     camera.take_picture("pic.jpg")?;
//!
//!     // A picture every ten seconds for two minutes
//!     camera.start_timelapse("image%04d.jpg", 10.0, 120.0, TimeUnit::Second)?;
//!     Ok(())
//! }
//! ```

pub mod camera;
pub mod error;
pub mod options;
pub mod process;

// Re-export public API
pub use camera::{CameraControls, CameraCore, Capabilities, Raspistill, Raspivid};
pub use error::{CameraError, Result};
pub use options::{
    CameraCommand, CameraOptions, DynamicRangeCompression, Encoding, ExposureMode, ImageEffect,
    LoadOptions, MeteringMode, StillOptions, TimeUnit, TimeValue, VideoOptions, WhiteBalance,
};
pub use process::{
    CommandRunner, ExecRunner, MockRunner, ProcessState, Shutdown, StopPolicy,
};

/// Number of status polls after SIGTERM before a background capture is killed
pub const DEFAULT_STOP_RETRIES: u32 = process::supervisor::DEFAULT_STOP_RETRIES;

/// Sleep between status polls in milliseconds
pub const DEFAULT_STOP_INTERVAL_MS: u64 = process::supervisor::DEFAULT_STOP_INTERVAL_MS;

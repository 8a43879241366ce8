//! Error handling for the raspicam crate.

/// A specialized `Result` type for camera operations.
pub type Result<T> = std::result::Result<T, CameraError>;

/// The main error type for camera configuration and process control.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// An option value fell outside its documented domain
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// More EXIF tags were added than the camera tool accepts
    #[error("Too many EXIF tags: at most {max} tags are supported")]
    ExifOverflow { max: usize },

    /// The camera tool exited with a non-zero exit code
    #[error("{description} (exit code {code})")]
    CommandFailed { code: i32, description: String },

    /// A background capture is already in flight for this camera
    #[error("Camera process is already running (pid {pid})")]
    AlreadyRunning { pid: u32 },

    /// The camera process survived both terminate and kill.
    ///
    /// This is fatal for the camera hardware; a supervising watchdog is
    /// expected to recover, usually by rebooting.
    #[error("Failed to kill camera process {pid}")]
    KillFailed { pid: u32 },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CameraError {
    /// Create a new validation error
    pub fn validation_error(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a command failure from an exit code, using its shell description
    pub fn command_failed(code: i32) -> Self {
        Self::CommandFailed {
            code,
            description: crate::process::exit_code::describe(code).into_owned(),
        }
    }

    /// Whether the error leaves the camera in a state only a restart can fix.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::KillFailed { .. })
    }
}

impl From<serde_json::Error> for CameraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

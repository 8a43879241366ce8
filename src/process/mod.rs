//! Running the camera tools.
//!
//! Synchronous captures go through a [`CommandRunner`]; long-running
//! captures are owned by a [`ProcessSupervisor`], which handles the
//! start/poll/stop lifecycle and the terminate-then-kill escalation.

pub mod exit_code;
pub mod mock;
pub mod runner;
pub mod supervisor;

// Re-export commonly used items
pub use mock::{MockRunner, Shutdown};
pub use runner::{ChildProcess, CommandOutput, CommandRunner, ExecRunner, ProcessHandle};
pub use supervisor::{ProcessState, ProcessSupervisor, StopPolicy};

//! Running camera tool processes.

use crate::error::{CameraError, Result};
use crate::options::CameraCommand;
use crate::process::exit_code;
use std::fmt::Debug;
use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use sysinfo::{Pid, ProcessesToUpdate, Signal, System};
use tracing::{debug, warn};

/// Result of a process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == exit_code::SUCCESS
    }
}

/// Executes camera commands.
pub trait CommandRunner: Debug {
    /// Run to completion, capturing output. A non-zero exit is not an error here.
    fn run(&mut self, command: &CameraCommand) -> Result<CommandOutput>;

    /// Start the command and return without waiting for it.
    fn spawn(&mut self, command: &CameraCommand) -> Result<Box<dyn ProcessHandle>>;
}

/// A background process started by [`CommandRunner::spawn`].
pub trait ProcessHandle: Debug {
    fn id(&self) -> u32;

    /// Non-blocking check whether the process is still in the process table.
    fn is_running(&mut self) -> bool;

    /// Ask the process to exit (SIGTERM).
    fn terminate(&mut self) -> Result<()>;

    /// Kill the process unconditionally (SIGKILL).
    fn kill(&mut self) -> Result<()>;
}

/// Runs commands with `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecRunner;

impl ExecRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ExecRunner {
    fn run(&mut self, command: &CameraCommand) -> Result<CommandOutput> {
        debug!("Running {}", command);

        let output = match Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            // Report launch failures the way a shell would
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(launch_failure(exit_code::COMMAND_NOT_FOUND, &e));
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Ok(launch_failure(exit_code::CANNOT_EXECUTE, &e));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(CommandOutput {
            exit_code: status_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn spawn(&mut self, command: &CameraCommand) -> Result<Box<dyn ProcessHandle>> {
        debug!("Spawning {}", command);

        let child = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .spawn()?;

        Ok(Box::new(ChildProcess { child }))
    }
}

fn launch_failure(code: i32, err: &io::Error) -> CommandOutput {
    CommandOutput {
        exit_code: code,
        stdout: String::new(),
        stderr: err.to_string(),
    }
}

#[cfg(unix)]
fn status_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| exit_code::INVALID_EXIT_ARGUMENT + signal))
        .unwrap_or(exit_code::GENERAL_ERROR)
}

#[cfg(not(unix))]
fn status_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(exit_code::GENERAL_ERROR)
}

/// A child process spawned by [`ExecRunner`].
#[derive(Debug)]
pub struct ChildProcess {
    child: Child,
}

impl ProcessHandle for ChildProcess {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn is_running(&mut self) -> bool {
        // try_wait also reaps the child, so an exited process leaves the table
        match self.child.try_wait() {
            Ok(None) => true,
            Ok(Some(_)) => false,
            Err(e) => {
                warn!("Failed to poll process {}: {}", self.child.id(), e);
                false
            }
        }
    }

    fn terminate(&mut self) -> Result<()> {
        let pid = Pid::from_u32(self.child.id());
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        let Some(process) = system.process(pid) else {
            // Already gone
            return Ok(());
        };

        match process.kill_with(Signal::Term) {
            Some(true) => Ok(()),
            Some(false) => Err(CameraError::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("failed to send SIGTERM to process {pid}"),
            ))),
            None => Err(CameraError::Io(io::Error::new(
                io::ErrorKind::Unsupported,
                "SIGTERM is not supported on this platform",
            ))),
        }
    }

    fn kill(&mut self) -> Result<()> {
        self.child.kill()?;
        Ok(())
    }
}

//! Lifecycle of a background camera process.
//!
//! ```text
//! Idle --start--> Running --exit / stop--> Terminated --start--> Running
//! ```
//!
//! Stopping is a fixed escalation: SIGTERM, a bounded number of polls with a
//! fixed sleep between them, then SIGKILL. A process that survives SIGKILL is
//! reported as [`CameraError::KillFailed`] and left for the watchdog.

use crate::error::{CameraError, Result};
use crate::options::CameraCommand;
use crate::process::runner::{CommandRunner, ProcessHandle};
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

/// Default number of polls after SIGTERM before escalating.
pub const DEFAULT_STOP_RETRIES: u32 = 10;

/// Default sleep between polls in milliseconds.
pub const DEFAULT_STOP_INTERVAL_MS: u64 = 500;

/// Retry budget for [`ProcessSupervisor::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopPolicy {
    /// Polls after SIGTERM before sending SIGKILL
    pub retries: u32,
    /// Sleep between polls
    pub interval: Duration,
}

impl Default for StopPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_STOP_RETRIES,
            interval: Duration::from_millis(DEFAULT_STOP_INTERVAL_MS),
        }
    }
}

impl StopPolicy {
    pub fn new(retries: u32, interval: Duration) -> Self {
        Self { retries, interval }
    }
}

/// Where the background process is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Idle,
    Running,
    Terminated,
}

/// Owns at most one background process.
#[derive(Debug)]
pub struct ProcessSupervisor {
    handle: Option<Box<dyn ProcessHandle>>,
    policy: StopPolicy,
}

impl Default for ProcessSupervisor {
    fn default() -> Self {
        Self::new(StopPolicy::default())
    }
}

impl ProcessSupervisor {
    pub fn new(policy: StopPolicy) -> Self {
        Self {
            handle: None,
            policy,
        }
    }

    pub fn policy(&self) -> StopPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: StopPolicy) {
        self.policy = policy;
    }

    /// Current state, polling the process if one was started.
    pub fn state(&mut self) -> ProcessState {
        match self.handle.as_mut() {
            None => ProcessState::Idle,
            Some(handle) => {
                if handle.is_running() {
                    ProcessState::Running
                } else {
                    ProcessState::Terminated
                }
            }
        }
    }

    /// Process id of the most recently started process.
    pub fn pid(&self) -> Option<u32> {
        self.handle.as_ref().map(|handle| handle.id())
    }

    pub fn is_running(&mut self) -> bool {
        self.state() == ProcessState::Running
    }

    /// Spawn `command` in the background. Returns whether it is running.
    pub fn start(
        &mut self,
        runner: &mut dyn CommandRunner,
        command: &CameraCommand,
    ) -> Result<bool> {
        if let Some(handle) = self.handle.as_mut() {
            if handle.is_running() {
                return Err(CameraError::AlreadyRunning { pid: handle.id() });
            }
        }

        let mut handle = runner.spawn(command)?;
        let running = handle.is_running();
        info!("Started {} (pid {})", command.program(), handle.id());

        self.handle = Some(handle);
        Ok(running)
    }

    /// Stop the background process, escalating to SIGKILL if needed.
    ///
    /// Returns immediately when nothing is running.
    pub fn stop(&mut self) -> Result<()> {
        let Some(handle) = self.handle.as_mut() else {
            return Ok(());
        };
        if !handle.is_running() {
            return Ok(());
        }

        let pid = handle.id();
        info!("Stopping camera process {}", pid);
        if let Err(e) = handle.terminate() {
            warn!("Failed to terminate process {}: {}", pid, e);
        }

        for _ in 0..self.policy.retries {
            if !handle.is_running() {
                info!("Camera process {} stopped", pid);
                return Ok(());
            }
            thread::sleep(self.policy.interval);
        }

        warn!(
            "Camera process {} still running after {} checks, killing",
            pid, self.policy.retries
        );
        if let Err(e) = handle.kill() {
            warn!("Failed to kill process {}: {}", pid, e);
        }

        thread::sleep(self.policy.interval);
        if handle.is_running() {
            error!("Camera process {} could not be killed", pid);
            return Err(CameraError::KillFailed { pid });
        }

        info!("Camera process {} killed", pid);
        Ok(())
    }
}

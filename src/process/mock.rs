//! Recording runner for dry runs and for systems without a camera.
//!
//! `MockRunner` never starts a real process. It records every command it is
//! given and answers with a configured exit code and output. Clones share
//! their state, so a test can keep one clone while the camera owns another.

use crate::error::Result;
use crate::options::CameraCommand;
use crate::process::runner::{CommandOutput, CommandRunner, ProcessHandle};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// How a mock background process reacts to stop requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shutdown {
    /// Exits on SIGTERM.
    #[default]
    Graceful,
    /// Ignores SIGTERM, exits on SIGKILL.
    IgnoresTerminate,
    /// Survives both signals.
    Unkillable,
}

#[derive(Debug)]
struct MockState {
    exit_code: i32,
    stdout: String,
    shutdown: Shutdown,
    commands: Vec<CameraCommand>,
    running: bool,
    next_pid: u32,
    terminate_calls: usize,
    kill_calls: usize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            exit_code: 0,
            stdout: String::new(),
            shutdown: Shutdown::default(),
            commands: Vec::new(),
            running: false,
            next_pid: 1000,
            terminate_calls: 0,
            kill_calls: 0,
        }
    }
}

/// Command runner that records commands instead of executing them.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    state: Arc<Mutex<MockState>>,
}

impl MockRunner {
    /// Create a runner whose commands all succeed with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit code reported by every synchronous run.
    pub fn with_exit_code(self, code: i32) -> Self {
        self.state().exit_code = code;
        self
    }

    /// Standard output reported by every synchronous run.
    pub fn with_stdout(self, stdout: impl Into<String>) -> Self {
        self.state().stdout = stdout.into();
        self
    }

    /// Stop behaviour of background processes.
    pub fn with_shutdown(self, shutdown: Shutdown) -> Self {
        self.state().shutdown = shutdown;
        self
    }

    /// Every command seen so far, synchronous and background.
    pub fn commands(&self) -> Vec<CameraCommand> {
        self.state().commands.clone()
    }

    pub fn last_command(&self) -> Option<CameraCommand> {
        self.state().commands.last().cloned()
    }

    pub fn terminate_calls(&self) -> usize {
        self.state().terminate_calls
    }

    pub fn kill_calls(&self) -> usize {
        self.state().kill_calls
    }

    /// Make the current background process exit on its own.
    pub fn finish(&self) {
        self.state().running = false;
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CommandRunner for MockRunner {
    fn run(&mut self, command: &CameraCommand) -> Result<CommandOutput> {
        let mut state = self.state();
        state.commands.push(command.clone());

        Ok(CommandOutput {
            exit_code: state.exit_code,
            stdout: state.stdout.clone(),
            stderr: String::new(),
        })
    }

    fn spawn(&mut self, command: &CameraCommand) -> Result<Box<dyn ProcessHandle>> {
        let mut state = self.state();
        state.commands.push(command.clone());
        state.running = true;

        let pid = state.next_pid;
        state.next_pid += 1;

        Ok(Box::new(MockProcess {
            pid,
            runner: self.clone(),
        }))
    }
}

/// Background process handed out by [`MockRunner::spawn`].
#[derive(Debug)]
pub struct MockProcess {
    pid: u32,
    runner: MockRunner,
}

impl ProcessHandle for MockProcess {
    fn id(&self) -> u32 {
        self.pid
    }

    fn is_running(&mut self) -> bool {
        self.runner.state().running
    }

    fn terminate(&mut self) -> Result<()> {
        let mut state = self.runner.state();
        state.terminate_calls += 1;
        if state.shutdown == Shutdown::Graceful {
            state.running = false;
        }
        Ok(())
    }

    fn kill(&mut self) -> Result<()> {
        let mut state = self.runner.state();
        state.kill_calls += 1;
        if state.shutdown != Shutdown::Unkillable {
            state.running = false;
        }
        Ok(())
    }
}

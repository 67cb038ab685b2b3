//! Background audio
//!
//! The quiz screen holds a looping track for as long as it is visible.
//! [`AudioLoop`] ties that lifetime to a scoped guard: whatever happens to
//! the screen, an acquired backend is stopped and then released.

use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

use crate::{QuizError, Result};

/// Audio output the quiz screen drives
pub trait AudioBackend: Send {
    /// Start playing the background track in a loop
    fn start_loop(&mut self) -> Result<()>;
    /// Stop playback; must tolerate a backend that never started
    fn stop(&mut self);
    /// Free any resources held by the backend
    fn release(&mut self);
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn start_loop(&mut self) -> Result<()> {
        debug!("silent audio: loop start");
        Ok(())
    }

    fn stop(&mut self) {
        debug!("silent audio: stop");
    }

    fn release(&mut self) {
        debug!("silent audio: release");
    }
}

/// Backend that runs an external player, e.g. `mpv --loop=inf track.ogg`
#[derive(Debug)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl CommandBackend {
    /// Build from a command line; the first element is the program
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| QuizError::AudioError("empty player command".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            child: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }
}

impl AudioBackend for CommandBackend {
    fn start_loop(&mut self) -> Result<()> {
        if self.child.is_some() {
            return Ok(());
        }
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                QuizError::AudioError(format!("failed to spawn {}: {}", self.program, e))
            })?;
        debug!(program = %self.program, pid = child.id(), "audio player started");
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            // Already exited is fine
            if let Err(e) = child.kill() {
                debug!(error = %e, "audio player kill failed");
            }
        }
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.wait() {
                warn!(error = %e, "failed to reap audio player");
            }
        }
    }
}

/// Scoped acquisition of the background loop
pub struct AudioLoop {
    backend: Box<dyn AudioBackend>,
    acquired: bool,
}

impl AudioLoop {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            acquired: false,
        }
    }

    /// Start the loop when the quiz screen becomes active
    ///
    /// A start failure is returned, but the backend still counts as
    /// acquired so the next deactivation stops and releases it.
    pub fn activate(&mut self) -> Result<()> {
        if self.acquired {
            return Ok(());
        }
        self.acquired = true;
        self.backend.start_loop()
    }

    /// Stop then release, on every exit path
    pub fn deactivate(&mut self) {
        if !self.acquired {
            return;
        }
        self.acquired = false;
        self.backend.stop();
        self.backend.release();
    }

    pub fn is_active(&self) -> bool {
        self.acquired
    }
}

impl Drop for AudioLoop {
    fn drop(&mut self) {
        self.deactivate();
    }
}

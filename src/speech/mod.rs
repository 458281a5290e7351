//! Speech output
//!
//! `Speaker` is the single entry point for spoken output. It wraps an
//! optional platform backend; with no backend every call is a silent no-op.

use crate::config::SpeechConfig;
use crate::{ExamError, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

/// Platform text-to-speech capability
pub trait SpeechBackend: Send {
    /// Stop whatever is playing or queued
    fn cancel_all(&mut self);
    /// Start playing `text` once; returns without waiting for playback
    fn speak_once(&mut self, text: &str) -> Result<()>;
}

/// Speech output adapter
pub struct Speaker {
    backend: Option<Box<dyn SpeechBackend>>,
}

impl Speaker {
    pub fn new(backend: Box<dyn SpeechBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Speaker with no backend
    pub fn silent() -> Self {
        Self { backend: None }
    }

    /// Build the speaker described by the configuration.
    /// Falls back to a silent speaker when the program cannot be found.
    pub fn from_config(config: &SpeechConfig) -> Self {
        if !config.enabled {
            log::info!("speech output disabled by configuration");
            return Self::silent();
        }

        let backend = CommandBackend::detect(
            &config.program,
            config.args.clone(),
            config.cancel_command.clone(),
        );
        match backend {
            Some(backend) => {
                log::info!("speech output via {}", backend.program.display());
                Self::new(Box::new(backend))
            }
            None => {
                log::info!("speech program '{}' not found, speech disabled", config.program);
                Self::silent()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Cancel any current utterance, then speak `text`. Never fails.
    pub fn speak(&mut self, text: &str) {
        if let Some(backend) = self.backend.as_mut() {
            backend.cancel_all();
            if let Err(e) = backend.speak_once(text) {
                log::warn!("speech output failed: {}", e);
            }
        }
    }

    /// Silence any current utterance
    pub fn cancel(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.cancel_all();
        }
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Backend that runs an external TTS program (espeak, spd-say, say, ...)
/// with the text as its last argument.
///
/// Cancelling kills the running program. Clients of a speech server
/// (spd-say) exit straight away while the server keeps talking; for those
/// a cancel command is run as well.
#[derive(Debug)]
pub struct CommandBackend {
    program: PathBuf,
    args: Vec<String>,
    cancel_command: Vec<String>,
    child: Option<Child>,
}

impl CommandBackend {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            cancel_command: Vec::new(),
            child: None,
        }
    }

    /// Run `command` (program then arguments) on every cancel
    pub fn with_cancel_command(mut self, command: Vec<String>) -> Self {
        self.cancel_command = command;
        self
    }

    /// Locate `program` (a path, or a name looked up on PATH).
    /// `spd-say` without a cancel command gets `spd-say -C`.
    pub fn detect(
        program: &str,
        args: Vec<String>,
        cancel_command: Vec<String>,
    ) -> Option<Self> {
        let path = find_program(program)?;
        let cancel_command = if cancel_command.is_empty() && is_speech_dispatcher(&path) {
            vec![path.to_string_lossy().into_owned(), "-C".to_string()]
        } else {
            cancel_command
        };
        Some(Self::new(path, args).with_cancel_command(cancel_command))
    }

    fn run_cancel_command(&self) {
        let Some((program, args)) = self.cancel_command.split_first() else {
            return;
        };
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if !status.success() => {
                log::warn!("speech cancel command {} exited with {}", program, status)
            }
            Ok(_) => {}
            Err(e) => log::warn!("speech cancel command {} failed: {}", program, e),
        }
    }
}

fn is_speech_dispatcher(program: &Path) -> bool {
    program.file_name().map_or(false, |name| name == "spd-say")
}

impl SpeechBackend for CommandBackend {
    fn cancel_all(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
        self.run_cancel_command();
    }

    fn speak_once(&mut self, text: &str) -> Result<()> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                ExamError::SpeechError(format!(
                    "Failed to start {}: {}",
                    self.program.display(),
                    e
                ))
            })?;
        self.child = Some(child);
        Ok(())
    }
}

fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}

/// What a backend was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Cancel,
    Speak(String),
}

/// In-memory backend that records calls; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    events: Arc<Mutex<Vec<SpeechEvent>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far
    pub fn events(&self) -> Vec<SpeechEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Texts passed to `speak_once`, in order
    pub fn spoken(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SpeechEvent::Speak(text) => Some(text),
                SpeechEvent::Cancel => None,
            })
            .collect()
    }

    /// Utterances that would be audible right now
    pub fn audible(&self) -> Vec<String> {
        let mut playing = Vec::new();
        for event in self.events() {
            match event {
                SpeechEvent::Cancel => playing.clear(),
                SpeechEvent::Speak(text) => playing.push(text),
            }
        }
        playing
    }

    fn record(&self, event: SpeechEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl SpeechBackend for RecordingBackend {
    fn cancel_all(&mut self) {
        self.record(SpeechEvent::Cancel);
    }

    fn speak_once(&mut self, text: &str) -> Result<()> {
        self.record(SpeechEvent::Speak(text.to_string()));
        Ok(())
    }
}

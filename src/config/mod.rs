//! Configuration management module
//!
//! Handles loading, saving, and validation of the exam configuration:
//! exam length, timing of the simulated submission and focus request,
//! speech output and an optional external question list.

use crate::exam::{ExamPaper, QuestionSet};
use crate::{
    ExamError, Result, APP_NAME, CONFIG_FILE, EXAM_DURATION_SECS, FOCUS_DELAY_MS, LOG_FILE,
    SUBMIT_DELAY_MS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Exam configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamConfig {
    /// Total time allowed for the exam
    #[serde(with = "human_duration")]
    pub exam_duration: Duration,
    /// Artificial delay spent on the loading screen after submit
    #[serde(with = "human_duration")]
    pub submit_delay: Duration,
    /// Delay between starting dictation and focusing the answer field
    #[serde(with = "human_duration")]
    pub focus_delay: Duration,
    /// Terminal input poll period
    #[serde(with = "human_duration")]
    pub tick_rate: Duration,
    /// JSON file with an array of question strings; built-in questions when unset
    pub questions_file: Option<PathBuf>,
    /// Speech output settings
    pub speech: SpeechConfig,
}

/// Speech output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether to speak at all
    pub enabled: bool,
    /// TTS program, by name on PATH or by path
    pub program: String,
    /// Extra arguments placed before the text
    pub args: Vec<String>,
    /// Command run to silence speech, e.g. `["spd-say", "-C"]`. When empty,
    /// the running TTS process is killed instead, which only works for
    /// programs that play the audio themselves (espeak, say). `spd-say`
    /// gets `spd-say -C` when nothing is configured.
    pub cancel_command: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "espeak".to_string(),
            args: Vec::new(),
            cancel_command: Vec::new(),
        }
    }
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            exam_duration: Duration::from_secs(EXAM_DURATION_SECS as u64),
            submit_delay: Duration::from_millis(SUBMIT_DELAY_MS),
            focus_delay: Duration::from_millis(FOCUS_DELAY_MS),
            tick_rate: Duration::from_millis(250),
            questions_file: None,
            speech: SpeechConfig::default(),
        }
    }
}

impl ExamConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        const MAX_EXAM_DURATION: Duration = Duration::from_secs(24 * 60 * 60);
        if self.exam_duration < Duration::from_secs(1) {
            return Err(ExamError::ConfigError(
                "Exam duration must be at least 1 second".to_string(),
            ));
        }
        if self.exam_duration > MAX_EXAM_DURATION {
            return Err(ExamError::ConfigError(format!(
                "Exam duration too long: {}s (max: {}s)",
                self.exam_duration.as_secs(),
                MAX_EXAM_DURATION.as_secs()
            )));
        }

        const MAX_SUBMIT_DELAY: Duration = Duration::from_secs(60);
        if self.submit_delay > MAX_SUBMIT_DELAY {
            return Err(ExamError::ConfigError(format!(
                "Submit delay too long: {}ms (max: {}ms)",
                self.submit_delay.as_millis(),
                MAX_SUBMIT_DELAY.as_millis()
            )));
        }

        const MAX_FOCUS_DELAY: Duration = Duration::from_secs(5);
        if self.focus_delay > MAX_FOCUS_DELAY {
            return Err(ExamError::ConfigError(format!(
                "Focus delay too long: {}ms (max: {}ms)",
                self.focus_delay.as_millis(),
                MAX_FOCUS_DELAY.as_millis()
            )));
        }

        const MIN_TICK_RATE: Duration = Duration::from_millis(10);
        const MAX_TICK_RATE: Duration = Duration::from_secs(1);
        if self.tick_rate < MIN_TICK_RATE || self.tick_rate > MAX_TICK_RATE {
            return Err(ExamError::ConfigError(format!(
                "Tick rate must be between {}ms and {}ms",
                MIN_TICK_RATE.as_millis(),
                MAX_TICK_RATE.as_millis()
            )));
        }

        if self.speech.enabled && self.speech.program.trim().is_empty() {
            return Err(ExamError::ConfigError(
                "Speech program must not be empty when speech is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// Exam length in whole seconds
    pub fn duration_secs(&self) -> u32 {
        u32::try_from(self.exam_duration.as_secs()).unwrap_or(u32::MAX)
    }

    /// Build the exam paper: configured questions and duration
    pub fn exam_paper(&self) -> Result<ExamPaper> {
        let questions = match &self.questions_file {
            Some(path) => QuestionSet::load_json(path)?,
            None => QuestionSet::builtin(),
        };
        Ok(ExamPaper::new(questions, self.duration_secs()))
    }

    /// Set the exam duration
    pub fn with_exam_duration(mut self, duration: Duration) -> Self {
        self.exam_duration = duration;
        self
    }

    /// Set the submission delay
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    /// Set the questions file
    pub fn with_questions_file(mut self, path: PathBuf) -> Self {
        self.questions_file = Some(path);
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            log::info!("no config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ExamError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ExamError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;
        log::info!("loaded config from {}", config_path.display());

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ExamError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            ExamError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/exam-ivr/exam.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ExamError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Get the log file path
    /// Uses $CACHE_HOME/exam-ivr/exam-ivr.log
    pub fn log_file_path() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir().ok_or_else(|| {
            ExamError::ConfigError("Unable to determine cache directory".to_string())
        })?;

        Ok(cache_dir.join(APP_NAME).join(LOG_FILE))
    }
}

/// Durations as human-readable strings ("5m", "2s", "100ms")
mod human_duration {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(de::Error::custom)
    }
}

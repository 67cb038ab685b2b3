//! Configuration management module
//!
//! Handles loading and validation of quiz settings: reveal delay,
//! question source, score band thresholds and background audio.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::{AudioBackend, CommandBackend, SilentBackend};
use crate::quiz::{QuestionBank, ScoreBands, DEFAULT_ADVANCE_DELAY};
use crate::{QuizError, Result, APP_NAME, CONFIG_FILE};

/// Quiz configuration loaded from `quizterm.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Pause between revealing an answer and the next question
    #[serde(with = "humantime_duration")]
    pub advance_delay: Duration,
    /// JSON question file; the builtin bank is used when absent.
    /// Relative paths are taken from the config file's directory.
    pub questions_path: Option<PathBuf>,
    /// Score band threshold overrides
    pub bands: BandOverrides,
    /// Background audio settings
    pub audio: AudioConfig,
}

/// Optional explicit band thresholds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandOverrides {
    pub high_from: Option<usize>,
    pub perfect_from: Option<usize>,
}

/// Background audio settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Play a looping track while questions are on screen
    pub enabled: bool,
    /// Player command line, e.g. `["mpv", "--no-video", "--loop=inf", "theme.ogg"]`
    pub command: Vec<String>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            advance_delay: DEFAULT_ADVANCE_DELAY,
            questions_path: None,
            bands: BandOverrides::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl QuizConfig {
    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.advance_delay.is_zero() {
            return Err(QuizError::ConfigError(
                "Advance delay must be greater than 0".to_string(),
            ));
        }

        const MAX_DELAY: Duration = Duration::from_secs(60);
        if self.advance_delay > MAX_DELAY {
            return Err(QuizError::ConfigError(format!(
                "Advance delay too long: {} (max: {})",
                humantime::format_duration(self.advance_delay),
                humantime::format_duration(MAX_DELAY)
            )));
        }

        if self.audio.enabled && self.audio.command.is_empty() {
            return Err(QuizError::ConfigError(
                "Audio is enabled but no player command is configured".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the advance delay
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    /// Set the question file
    pub fn with_questions_path(mut self, path: PathBuf) -> Self {
        self.questions_path = Some(path);
        self
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, defaulting when the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content).map_err(|e| match e {
            QuizError::ConfigError(msg) => {
                QuizError::ConfigError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Anchor a relative `questions_path` at `base`, the config file's directory
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(questions) = self.questions_path.as_mut() {
            if questions.is_relative() {
                *questions = base.join(&*questions);
            }
        }
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/quizterm/quizterm.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Question bank from the configured file, or the builtin one
    pub fn load_question_bank(&self) -> Result<QuestionBank> {
        match &self.questions_path {
            Some(path) => QuestionBank::load(path),
            None => Ok(QuestionBank::builtin()),
        }
    }

    /// Band thresholds for a bank of `total` questions
    pub fn score_bands(&self, total: usize) -> Result<ScoreBands> {
        let scaled = ScoreBands::for_total(total);
        match (self.bands.high_from, self.bands.perfect_from) {
            (None, None) => Ok(scaled),
            (high, perfect) => ScoreBands::new(
                high.unwrap_or(scaled.high_from()),
                perfect.unwrap_or(scaled.perfect_from()),
                total,
            ),
        }
    }

    /// Audio backend matching the audio settings
    pub fn audio_backend(&self) -> Result<Box<dyn AudioBackend>> {
        if self.audio.enabled {
            Ok(Box::new(CommandBackend::new(&self.audio.command)?))
        } else {
            Ok(Box::new(SilentBackend))
        }
    }
}

/// Durations as humantime strings such as `"1500ms"` or `"2s"`
mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = QuizConfig::default();
        assert_eq!(config.advance_delay, Duration::from_millis(1500));
        assert!(config.questions_path.is_none());
        assert!(!config.audio.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_parsing() {
        let config = QuizConfig::from_toml_str(
            r#"
            advance_delay = "2s"
            questions_path = "/tmp/questions.json"

            [bands]
            high_from = 4

            [audio]
            enabled = true
            command = ["mpv", "--loop=inf", "theme.ogg"]
            "#,
        )
        .unwrap();

        assert_eq!(config.advance_delay, Duration::from_secs(2));
        assert_eq!(config.questions_path, Some(PathBuf::from("/tmp/questions.json")));
        assert_eq!(config.bands.high_from, Some(4));
        assert_eq!(config.bands.perfect_from, None);
        assert_eq!(config.audio.command.len(), 3);
    }

    #[test]
    fn test_toml_roundtrip_keeps_delay_readable() {
        let config = QuizConfig::default().with_advance_delay(Duration::from_millis(750));
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("advance_delay = \"750ms\""));
        assert_eq!(QuizConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validation_errors() {
        let zero = QuizConfig::default().with_advance_delay(Duration::ZERO);
        assert!(matches!(zero.validate(), Err(QuizError::ConfigError(_))));

        let long = QuizConfig::default().with_advance_delay(Duration::from_secs(120));
        assert!(long.validate().is_err());

        let mut audio = QuizConfig::default();
        audio.audio.enabled = true;
        assert!(audio.validate().is_err());
    }

    #[test]
    fn test_bad_delay_string_rejected() {
        let err = QuizConfig::from_toml_str("advance_delay = \"soon\"").unwrap_err();
        assert!(matches!(err, QuizError::ConfigError(_)));
    }

    #[test]
    fn test_load_from_missing_file_defaults() {
        let dir = TempDir::new().unwrap();
        let config = QuizConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, QuizConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "advance_delay = \"500ms\"\n").unwrap();
        let config = QuizConfig::load_from(&path).unwrap();
        assert_eq!(config.advance_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_relative_questions_path_follows_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "questions_path = \"banks/potions.json\"\n",
        )
        .unwrap();
        let config = QuizConfig::load_from(&path).unwrap();
        assert_eq!(
            config.questions_path,
            Some(dir.path().join("banks").join("potions.json"))
        );
    }

    #[test]
    fn test_absolute_questions_path_untouched() {
        let mut config =
            QuizConfig::default().with_questions_path(PathBuf::from("/srv/quiz/questions.json"));
        config.resolve_paths(Path::new("/home/user/.config/quizterm"));
        assert_eq!(
            config.questions_path,
            Some(PathBuf::from("/srv/quiz/questions.json"))
        );
    }

    #[test]
    fn test_score_bands_scaled_and_overridden() {
        let config = QuizConfig::default();
        let bands = config.score_bands(10).unwrap();
        assert_eq!((bands.high_from(), bands.perfect_from()), (5, 10));

        let mut config = QuizConfig::default();
        config.bands.high_from = Some(3);
        let bands = config.score_bands(10).unwrap();
        assert_eq!((bands.high_from(), bands.perfect_from()), (3, 10));

        config.bands.perfect_from = Some(12);
        assert!(config.score_bands(10).is_err());
    }

    #[test]
    fn test_builtin_bank_when_no_path() {
        let bank = QuizConfig::default().load_question_bank().unwrap();
        assert_eq!(bank.len(), 10);
    }

    #[test]
    fn test_config_file_path() {
        let path = QuizConfig::config_file_path().unwrap();
        assert!(path.to_string_lossy().contains("quizterm"));
        assert!(path.to_string_lossy().ends_with("quizterm.toml"));
    }
}

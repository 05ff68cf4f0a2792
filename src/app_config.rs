use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::karaoke::events::DEFAULT_KARAOKE_EFFECT;
use crate::karaoke::model::Centiseconds;
use crate::karaoke::parity::DEFAULT_TOLERANCE_CS;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Event selection and parity settings
    #[serde(default)]
    pub karaoke: KaraokeConfig,

    /// Where documents are read from
    #[serde(default)]
    pub input: InputConfig,

    /// Where corpora are written to
    #[serde(default)]
    pub output: OutputConfig,

    /// Number of documents processed in parallel
    #[serde(default = "default_concurrent_documents")]
    pub concurrent_documents: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings the karaoke pipeline itself reads
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct KaraokeConfig {
    /// Effect names whose events take precedence over untagged events
    #[serde(default = "default_effects")]
    pub effects: Vec<String>,

    /// Allowed drift between summed syllable durations and the line span
    #[serde(default = "default_tolerance_cs")]
    pub tolerance_cs: Centiseconds,
}

impl Default for KaraokeConfig {
    fn default() -> Self {
        Self {
            effects: default_effects(),
            tolerance_cs: default_tolerance_cs(),
        }
    }
}

/// Document discovery settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InputConfig {
    /// Extension of subtitle documents, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

/// File names of the serialized corpora
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_syllable_text_file")]
    pub syllable_text_file: String,

    #[serde(default = "default_syllable_record_file")]
    pub syllable_record_file: String,

    #[serde(default = "default_line_text_file")]
    pub line_text_file: String,

    #[serde(default = "default_line_record_file")]
    pub line_record_file: String,

    /// Names of documents that failed validation
    #[serde(default = "default_discard_file")]
    pub discard_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            syllable_text_file: default_syllable_text_file(),
            syllable_record_file: default_syllable_record_file(),
            line_text_file: default_line_text_file(),
            line_record_file: default_line_record_file(),
            discard_file: default_discard_file(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_effects() -> Vec<String> {
    vec![DEFAULT_KARAOKE_EFFECT.to_string()]
}

fn default_tolerance_cs() -> Centiseconds {
    DEFAULT_TOLERANCE_CS
}

fn default_extension() -> String {
    "ass".to_string()
}

fn default_concurrent_documents() -> usize {
    4
}

fn default_syllable_text_file() -> String {
    "syllable_x.json".to_string()
}

fn default_syllable_record_file() -> String {
    "syllable_y.json".to_string()
}

fn default_line_text_file() -> String {
    "line_x.json".to_string()
}

fn default_line_record_file() -> String {
    "line_y.json".to_string()
}

fn default_discard_file() -> String {
    "discarded.json".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.karaoke.tolerance_cs < 0 {
            return Err(AppError::Config(format!(
                "Parity tolerance must not be negative, got {}",
                self.karaoke.tolerance_cs
            )));
        }

        // The empty effect is the fallback channel, not a name to prefer
        if self.karaoke.effects.iter().any(|e| e.is_empty()) {
            return Err(AppError::Config("Effect names must not be empty".to_string()));
        }

        if self.input.extension.trim_start_matches('.').is_empty() {
            return Err(AppError::Config("Input extension must not be empty".to_string()));
        }

        if self.concurrent_documents == 0 {
            return Err(AppError::Config("concurrent_documents must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Load a configuration file, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .map_err(|e| AppError::Config(format!("Failed to open config file {:?}: {}", path, e)))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)?;
        std::fs::write(path, config_json)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            karaoke: KaraokeConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            concurrent_documents: default_concurrent_documents(),
            log_level: LogLevel::default(),
        }
    }
}

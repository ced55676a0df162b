//! Global tutorbook configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use ::config::{Config, File};
use serde::Deserialize;

use crate::error::{TutorError, TutorResult};
use crate::lesson::{parse_time, LessonTemplate};

static DEFAULT_DATA_PATH: &str = "~/tutorbook";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_time() -> String {
    "16:00".to_string()
}

fn default_duration() -> u32 {
    60
}

fn default_price() -> f64 {
    60.0
}

/// Configuration at ~/.config/tutorbook/config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct TutorbookConfig {
    /// Directory holding the snapshot file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Start time for new lessons when none is given
    #[serde(default = "default_time")]
    pub default_time: String,

    /// Minutes
    #[serde(default = "default_duration")]
    pub default_duration: u32,

    #[serde(default = "default_price")]
    pub default_price: f64,
}

impl Default for TutorbookConfig {
    fn default() -> Self {
        TutorbookConfig {
            data_dir: default_data_dir(),
            default_time: default_time(),
            default_duration: default_duration(),
            default_price: default_price(),
        }
    }
}

impl TutorbookConfig {
    pub fn config_path() -> TutorResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TutorError::Config("Could not determine config directory".into()))?
            .join("tutorbook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> TutorResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> TutorResult<Self> {
        let config: TutorbookConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| TutorError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TutorError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), data_dir = %config.data_dir.display(), "loaded config");
        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn lesson_time(&self) -> TutorResult<NaiveTime> {
        parse_time(&self.default_time)
            .map_err(|e| TutorError::Config(format!("default_time: {e}")))
    }

    /// Template pre-filled with the configured defaults for `student_id`.
    pub fn lesson_template(&self, student_id: &str) -> TutorResult<LessonTemplate> {
        Ok(LessonTemplate::new(
            student_id,
            self.lesson_time()?,
            self.default_duration,
            self.default_price,
        ))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TutorResult<()> {
        let contents = format!(
            "\
# tutorbook configuration

# Where the snapshot file lives:
# data_dir = \"{}\"

# Defaults for new lessons:
# default_time = \"16:00\"
# default_duration = 60
# default_price = 60
",
            DEFAULT_DATA_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TutorError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TutorError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

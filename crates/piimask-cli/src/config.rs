use anyhow::Context;
use piimask_pii::{DetectorConfig, RecognizerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub detector: DetectorConfig,

    #[serde(default)]
    pub recognizer: RecognizerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PIIMASK_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("PIIMASK_GAZETTEER") {
            self.use_gazetteer(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("PIIMASK_MIN_CONFIDENCE") {
            match val.parse::<f32>() {
                Ok(min_confidence) => self.detector.min_confidence = min_confidence,
                Err(_) => eprintln!(
                    "Warning: Invalid PIIMASK_MIN_CONFIDENCE '{}', keeping {}",
                    val, self.detector.min_confidence
                ),
            }
        }
    }

    /// Recognize names from a gazetteer file instead of the configured recognizer
    pub fn use_gazetteer(&mut self, path: PathBuf) {
        let case_insensitive = match &self.recognizer {
            RecognizerConfig::Gazetteer {
                case_insensitive, ..
            } => *case_insensitive,
            _ => false,
        };

        self.recognizer = RecognizerConfig::Gazetteer {
            path: Some(path),
            names: Vec::new(),
            case_insensitive,
        };
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

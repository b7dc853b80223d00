use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Longest side of the working image; 0 keeps the input size.
    #[serde(default)]
    pub max_dimension: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            max_dimension: 0,
        }
    }
}

/// One entry of the `[[filters]]` array, applied in file order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterConfig {
    Exposure {
        value: f64,
    },
    Contrast {
        value: f64,
    },
    Saturation {
        value: f64,
    },
    GaussianBlur {
        value: f64,
    },
    Sharpen {
        #[serde(default = "default_sharpness")]
        sharpness: f64,
        #[serde(default = "default_sharpen_radius")]
        radius: f64,
    },
    Vignette {
        value: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
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

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadFile(String, std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

// Default value functions
fn default_jpeg_quality() -> u8 {
    90
}
fn default_sharpness() -> f64 {
    0.4
}
fn default_sharpen_radius() -> f64 {
    1.69
}
fn default_log_level() -> String {
    "info".into()
}

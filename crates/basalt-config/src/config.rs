use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug)]
pub struct AnalyzeConfig {
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
    #[serde(default = "defaults::window_hours")]
    pub window_hours: f64,
    #[serde(default = "defaults::top_count")]
    pub top_count: usize,
    #[serde(default)]
    pub blocker: BlockerConfig,
}

#[derive(Deserialize, Debug)]
pub struct BlockerConfig {
    #[serde(default = "defaults::watch_seconds")]
    pub watch_seconds: i64,
    #[serde(default = "defaults::block_seconds")]
    pub block_seconds: i64,
    #[serde(default = "defaults::chances")]
    pub chances: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

mod defaults {
    pub fn output_dir() -> String {
        "output".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }

    pub fn window_hours() -> f64 {
        1.0
    }

    pub fn top_count() -> usize {
        10
    }

    pub fn watch_seconds() -> i64 {
        20
    }

    pub fn block_seconds() -> i64 {
        300
    }

    pub fn chances() -> i64 {
        3
    }
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            log_level: defaults::log_level(),
            window_hours: defaults::window_hours(),
            top_count: defaults::top_count(),
            blocker: BlockerConfig::default(),
        }
    }
}

impl Default for BlockerConfig {
    fn default() -> Self {
        Self {
            watch_seconds: defaults::watch_seconds(),
            block_seconds: defaults::block_seconds(),
            chances: defaults::chances(),
        }
    }
}

impl AnalyzeConfig {
    pub fn load(path: impl AsRef<Path> + ToString) -> Result<Self, ConfigError> {
        let toml_to_str = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let analyze_config: AnalyzeConfig = toml::from_str(&toml_to_str)?;
        Ok(analyze_config)
    }
}

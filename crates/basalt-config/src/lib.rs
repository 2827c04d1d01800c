pub mod config;

pub use config::{AnalyzeConfig, BlockerConfig, ConfigError};

//! Application configuration.
//!
//! Parser connection, scene and camera defaults, and the look of the
//! generated geometry.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use miller_core::MapperStyle;
use miller_renderer::SceneConfig;
use serde::{Deserialize, Serialize};

/// Where index notation is parsed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ParserMode {
    /// POST to the parsing service.
    #[default]
    Http,
    /// Parse in-process.
    Local,
}

impl ParserMode {
    pub fn label(self) -> &'static str {
        match self {
            ParserMode::Http => "HTTP",
            ParserMode::Local => "Local",
        }
    }
}

/// Parsing service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParserConfig {
    pub mode: ParserMode,
    pub endpoint: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mode: ParserMode::Http,
            endpoint: "http://localhost:8081/api/parse".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub style: MapperStyle,
}

impl AppConfig {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}

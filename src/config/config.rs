use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the greeting server; HELLO_API_URL overrides it
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for status icons
    pub use_glyphs: bool,

    /// Icons for the status line (can be overridden)
    pub icons: IconConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub api: String,
    pub success: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Name sent when the input is empty
    pub default_name: String,

    /// Persist submitted names for Up/Down recall
    pub enable_history: bool,

    /// Maximum history entries to keep
    pub max_history_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Output region color for a successful response
    pub success_color: String,

    /// Output region color for a failed request
    pub error_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            display: DisplayConfig::default(),
            behavior: BehaviorConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            icons: IconConfig::default(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            api: "🌐".to_string(),
            success: "✅".to_string(),
            error: "❌".to_string(),
        }
    }
}

impl IconConfig {
    /// ASCII alternatives for terminals without glyph support
    pub fn simple() -> Self {
        Self {
            api: "[API]".to_string(),
            success: "[OK]".to_string(),
            error: "[X]".to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            default_name: "World".to_string(),
            enable_history: true,
            max_history_entries: 100,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            success_color: "green".to_string(),
            error_color: "red".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if !config.display.use_glyphs {
            config.display.icons = IconConfig::simple();
        }

        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("hello-cli").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Hello CLI Configuration File
# Location: ~/.config/hello-cli/config.toml (Linux/macOS)
#           %APPDATA%\hello-cli\config.toml (Windows)

[server]
# Base URL of the greeting server.
# The HELLO_API_URL environment variable overrides this value.
base_url = "http://localhost:5000"

[display]
# Use Unicode glyphs for status icons
# Set to false for ASCII-only mode (better compatibility)
use_glyphs = true

# Icon configuration
# These are automatically set to ASCII when use_glyphs = false
[display.icons]
api = "🌐"
success = "✅"
error = "❌"

[behavior]
# Name sent to the server when the input is left empty
default_name = "World"

# Persist submitted names for Up/Down recall
enable_history = true

# Maximum number of history entries to keep
max_history_entries = 100

[theme]
# Colors: "black", "red", "green", "yellow", "blue", "magenta", "cyan",
# "gray", "white"
success_color = "green"
error_color = "red"
"#
        .to_string()
    }
}

//src/config.rs
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write as _;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_CONFIG_DIR: &str = "didifit";
const CONFIG_ENV_VAR: &str = "DIDIFIT_CONFIG_DIR"; // Environment variable name

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid color name: {0}")]
    InvalidColor(String),
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
}

// Define standard colors using strum for easy iteration/parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGrey,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    Grey,
}

// Helper to parse a string into our StandardColor enum
pub fn parse_color(color_str: &str) -> Result<StandardColor, ConfigError> {
    StandardColor::iter()
        .find(|color| format!("{:?}", color).eq_ignore_ascii_case(color_str.trim()))
        .ok_or_else(|| ConfigError::InvalidColor(color_str.to_string()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Colors {
    pub accent: String,
    pub highlight: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            accent: "Yellow".to_string(),
            highlight: "DarkGrey".to_string(),
        }
    }
}

impl Colors {
    pub fn accent_color(&self) -> Result<StandardColor, ConfigError> {
        parse_color(&self.accent)
    }

    pub fn highlight_color(&self) -> Result<StandardColor, ConfigError> {
        parse_color(&self.highlight)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Config {
    /// Ask before deleting planned exercises and measurement entries.
    pub confirm_deletes: bool,
    /// strftime pattern for dates shown in the UI.
    pub date_format: String,
    pub colors: Colors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confirm_deletes: true,
            date_format: "%d/%m/%Y".to_string(),
            colors: Colors::default(),
        }
    }
}

impl Config {
    /// Rejects values the front end could not use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_date_format(&self.date_format)?;
        self.colors.accent_color()?;
        self.colors.highlight_color()?;
        Ok(())
    }
}

/// Formats `date` with `pattern`, or `None` when the pattern cannot render a
/// plain date (unknown specifiers, or time fields such as `%H`).
pub fn try_format_date(date: NaiveDate, pattern: &str) -> Option<String> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

/// chrono fails while formatting an unusable pattern, so check it up front
/// against a sample date.
pub fn validate_date_format(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() || try_format_date(NaiveDate::default(), pattern).is_none() {
        return Err(ConfigError::InvalidDateFormat(pattern.to_string()));
    }
    Ok(())
}

/// Determines the path to the configuration file: an explicit directory,
/// then `DIDIFIT_CONFIG_DIR`, then the platform config directory.
pub fn get_config_path(dir_override: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let config_dir_override = dir_override
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

    let config_dir_path = if let Some(path) = config_dir_override {
        if !path.is_dir() {
            warn!(
                path = %path.display(),
                "Configuration directory override is not a directory. Trying to create it."
            );
            fs::create_dir_all(&path)?;
        }
        path
    } else {
        let base_config_dir = dirs::config_dir().ok_or(ConfigError::CannotDetermineConfigDir)?;
        base_config_dir.join(APP_CONFIG_DIR)
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from the TOML file at the given path, writing the
/// defaults there first when the file does not exist yet.
pub fn load(config_path: &Path) -> Result<Config, ConfigError> {
    if config_path.exists() {
        let config_content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_content).map_err(ConfigError::TomlParse)?;
        config.validate()?;
        Ok(config)
    } else {
        let default_config = Config::default();
        save(config_path, &default_config)?;
        info!(path = %config_path.display(), "Wrote default configuration");
        Ok(default_config)
    }
}

/// Saves the configuration to the TOML file.
pub fn save(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config).map_err(ConfigError::TomlSerialize)?;
    fs::write(config_path, config_content)?;
    Ok(())
}

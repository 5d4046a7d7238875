//! User settings.
//!
//! Stored in `settings.toml` under the data directory. Commands only see the
//! `SettingsStore` trait, so tests can swap in a memory-backed store.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unknown setting '{0}'. Known settings: theme, avatar_style, dialer_layout")]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}. Expected one of: {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarStyle {
    #[default]
    Initials,
    Icon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialerLayout {
    #[default]
    Standard,
    Compact,
}

macro_rules! keyword_enum {
    ($ty:ident, $key:literal, $expected:literal, { $($word:literal => $variant:ident),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = SettingsError;

            fn from_str(s: &str) -> SettingsResult<Self> {
                match s.trim().to_lowercase().as_str() {
                    $($word => Ok($ty::$variant),)+
                    _ => Err(SettingsError::InvalidValue {
                        key: $key,
                        value: s.to_string(),
                        expected: $expected,
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let word = match self {
                    $($ty::$variant => $word,)+
                };
                f.write_str(word)
            }
        }
    };
}

keyword_enum!(Theme, "theme", "system, light, dark", {
    "system" => System,
    "light" => Light,
    "dark" => Dark,
});

keyword_enum!(AvatarStyle, "avatar_style", "initials, icon", {
    "initials" => Initials,
    "icon" => Icon,
});

keyword_enum!(DialerLayout, "dialer_layout", "standard, compact", {
    "standard" => Standard,
    "compact" => Compact,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub avatar_style: AvatarStyle,
    pub dialer_layout: DialerLayout,
}

impl Settings {
    /// Set one field from its textual key and value.
    pub fn set(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        match key.trim().to_lowercase().replace('-', "_").as_str() {
            "theme" => self.theme = value.parse()?,
            "avatar_style" => self.avatar_style = value.parse()?,
            "dialer_layout" => self.dialer_layout = value.parse()?,
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("theme", self.theme.to_string()),
            ("avatar_style", self.avatar_style.to_string()),
            ("dialer_layout", self.dialer_layout.to_string()),
        ]
    }
}

/// Read/write access to persisted settings.
pub trait SettingsStore {
    fn load(&self) -> SettingsResult<Settings>;
    fn save(&self, settings: &Settings) -> SettingsResult<()>;

    /// Like `load`, but an unreadable store falls back to the defaults.
    fn load_or_default(&self) -> Settings {
        self.load().unwrap_or_else(|e| {
            warn!("Using default settings: {}", e);
            Settings::default()
        })
    }
}

/// Settings kept in a TOML file. A missing file reads as the defaults.
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data dir>/settings.toml`.
    pub fn default_location() -> SettingsResult<Self> {
        let dir = crate::platform::data_dir().map_err(|e| SettingsError::Config(e.to_string()))?;
        Ok(Self::new(dir.join("settings.toml")))
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> SettingsResult<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content)
            .map_err(|e| SettingsError::Config(format!("parse {}: {}", self.path.display(), e)))
    }

    fn save(&self, settings: &Settings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(settings)
            .map_err(|e| SettingsError::Config(format!("serialize: {}", e)))?;

        // Write to temp file first for atomic operation
        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
pub struct MemorySettingsStore(pub std::cell::RefCell<Settings>);

#[cfg(test)]
impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> SettingsResult<Settings> {
        Ok(*self.0.borrow())
    }

    fn save(&self, settings: &Settings) -> SettingsResult<()> {
        *self.0.borrow_mut() = *settings;
        Ok(())
    }
}

// Network Switcher - Application Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Application configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Language of the netsh output to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputLocale {
    /// Recognise both English and Chinese output.
    #[default]
    Auto,
    /// English Windows.
    English,
    /// Simplified Chinese Windows.
    Chinese,
}

impl OutputLocale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::English => "english",
            Self::Chinese => "chinese",
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Profile document location. Defaults to the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles_file: Option<PathBuf>,

    /// Disable other profiles' interfaces when applying a profile.
    #[serde(default = "default_true")]
    pub disable_others: bool,

    /// Locale of the netsh output.
    #[serde(default)]
    pub locale: OutputLocale,

    /// Path of the netsh executable.
    #[serde(default = "default_netsh_path")]
    pub netsh_path: String,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_netsh_path() -> String {
    if cfg!(target_os = "windows") {
        r"C:\Windows\System32\netsh.exe".to_string()
    } else {
        "netsh".to_string()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profiles_file: None,
            disable_others: true,
            locale: OutputLocale::Auto,
            netsh_path: default_netsh_path(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, super::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), super::Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

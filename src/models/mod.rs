// Network Switcher - Shared Models
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Network Switcher Models
//!
//! Shared types used by the store, the netsh layer and the CLI:
//!
//! - **Profile**: Named interface binding plus DHCP or static settings
//! - **Actions**: Individual netsh invocations
//! - **Config**: Application settings
//! - **Result**: Per-command outcomes of applying a profile
//! - **Error**: Shared error types

pub mod actions;
pub mod config;
pub mod error;
pub mod profile;
pub mod result;
pub mod validation;

// Re-export main types for convenience
pub use actions::NetshCommand;
pub use config::{AppConfig, OutputLocale};
pub use error::{Error, Result};
pub use profile::{IpSettings, NetworkProfile, StaticConfig};
pub use result::{ApplyReport, CommandResult, StepStatus};

/// Configuration directory name (under the platform config dir).
pub const CONFIG_DIR_NAME: &str = "network-switcher";

/// Default profile document name.
pub const PROFILES_FILE_NAME: &str = "network_config.json";

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

// Network Switcher - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for the Network Switcher application.

use thiserror::Error;

/// Result type alias for Network Switcher operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Network Switcher operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Privilege Errors
    // ========================================
    #[error("Administrator privileges required: {0}")]
    PermissionDenied(String),

    // ========================================
    // Profile Errors
    // ========================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Profile '{0}' is not bound to a network interface")]
    Unbound(String),

    #[error("Profile '{0}' has no saved IP configuration")]
    NotConfigured(String),

    #[error("Name '{0}' is already used by another profile")]
    DuplicateName(String),

    // ========================================
    // Validation Errors
    // ========================================
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    // ========================================
    // Storage Errors
    // ========================================
    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to write configuration: {0}")]
    ConfigWriteFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    // ========================================
    // Command Errors
    // ========================================
    #[error("Failed to run {program}: {reason}")]
    CommandFailed { program: String, reason: String },

    // ========================================
    // System Errors
    // ========================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new command failed error.
    pub fn command_failed(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandFailed {
            program: program.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error stems from reading or writing the profile document.
    pub fn is_persistence_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigReadFailed(_) | Self::ConfigWriteFailed(_) | Self::ConfigParseFailed(_)
        )
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWriteFailed(err.to_string())
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_classification() {
        assert!(Error::ConfigWriteFailed("disk full".into()).is_persistence_error());
        assert!(Error::ConfigParseFailed("eof".into()).is_persistence_error());
        assert!(!Error::Unbound("intranet".into()).is_persistence_error());
    }

    #[test]
    fn test_messages() {
        let err = Error::DuplicateName("Extranet".into());
        assert_eq!(err.to_string(), "Name 'Extranet' is already used by another profile");
        let err = Error::command_failed("netsh", "not found");
        assert_eq!(err.to_string(), "Failed to run netsh: not found");
    }
}

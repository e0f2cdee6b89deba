// Network Switcher - Validation Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Input validation utilities for profiles.

use std::net::Ipv4Addr;
use std::str::FromStr;

use super::error::{Error, Result};
use super::profile::{IpSettings, StaticConfig};

/// Validate an IPv4 address string.
pub fn validate_ipv4(s: &str) -> Result<Ipv4Addr> {
    Ipv4Addr::from_str(s.trim())
        .map_err(|_| Error::ValidationFailed(format!("Invalid IPv4 address: {}", s)))
}

/// Validate that every static field is filled in.
///
/// Only emptiness is enforced; netsh is the authority on address syntax.
pub fn validate_static_config(config: &StaticConfig) -> Result<()> {
    let fields = [
        ("IP address", config.ip.as_str()),
        ("subnet mask", config.mask.as_str()),
        ("default gateway", config.gateway.as_str()),
    ];

    for (label, value) in fields {
        if value.trim().is_empty() {
            return Err(Error::ValidationFailed(format!("{} cannot be empty", label)));
        }
    }

    if config.dns_servers.iter().all(|d| d.trim().is_empty()) {
        return Err(Error::ValidationFailed(
            "DNS servers cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate IP settings before they are saved to a profile.
pub fn validate_ip_settings(settings: &IpSettings) -> Result<()> {
    match settings {
        IpSettings::Dhcp => Ok(()),
        IpSettings::Static(config) => validate_static_config(config),
    }
}

/// Collect fields of a static config that do not parse as IPv4 addresses.
pub fn non_ipv4_fields(config: &StaticConfig) -> Vec<String> {
    std::iter::once(&config.ip)
        .chain(std::iter::once(&config.mask))
        .chain(std::iter::once(&config.gateway))
        .chain(config.dns_servers.iter())
        .filter(|v| validate_ipv4(v).is_err())
        .cloned()
        .collect()
}

/// Validate a profile name.
pub fn validate_profile_name(s: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::ValidationFailed(
            "Profile name cannot be empty".to_string(),
        ));
    }
    if s.chars().count() > 100 {
        return Err(Error::ValidationFailed(
            "Profile name must be 100 characters or less".to_string(),
        ));
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> StaticConfig {
        StaticConfig::new("10.0.0.5", "255.0.0.0", "10.0.0.1", vec!["10.0.0.1".into()])
    }

    #[test]
    fn test_validate_ipv4() {
        assert!(validate_ipv4("192.168.1.1").is_ok());
        assert!(validate_ipv4(" 192.168.1.1 ").is_ok());
        assert!(validate_ipv4("256.1.1.1").is_err());
        assert!(validate_ipv4("not-an-ip").is_err());
    }

    #[test]
    fn test_static_config_requires_all_fields() {
        assert!(validate_static_config(&full_config()).is_ok());

        let mut config = full_config();
        config.gateway = String::new();
        assert!(matches!(
            validate_static_config(&config),
            Err(Error::ValidationFailed(_))
        ));

        let mut config = full_config();
        config.dns_servers.clear();
        assert!(validate_static_config(&config).is_err());

        let mut config = full_config();
        config.mask = "   ".into();
        assert!(validate_static_config(&config).is_err());
    }

    #[test]
    fn test_dhcp_always_valid() {
        assert!(validate_ip_settings(&IpSettings::Dhcp).is_ok());
    }

    #[test]
    fn test_non_ipv4_fields() {
        let mut config = full_config();
        assert!(non_ipv4_fields(&config).is_empty());
        config.gateway = "gateway".into();
        assert_eq!(non_ipv4_fields(&config), vec!["gateway".to_string()]);
    }

    #[test]
    fn test_validate_profile_name() {
        assert_eq!(validate_profile_name("  Office ").unwrap(), "Office");
        assert!(validate_profile_name("   ").is_err());
        assert!(validate_profile_name(&"x".repeat(101)).is_err());
    }
}

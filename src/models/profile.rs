// Network Switcher - Profile Data Model
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Profile data model.
//!
//! A profile binds a user-visible name to one network interface and the IPv4
//! settings that should be pushed onto it when the profile is applied:
//! - Display name (renameable, independent of the store key)
//! - Bound interface (absent until the user binds one)
//! - IP settings (absent until the profile is saved once)

/// Static IPv4 configuration for an interface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StaticConfig {
    /// Interface address.
    pub ip: String,
    /// Subnet mask in dotted form.
    pub mask: String,
    /// Default gateway.
    pub gateway: String,
    /// DNS servers, primary first.
    pub dns_servers: Vec<String>,
}

impl StaticConfig {
    pub fn new(
        ip: impl Into<String>,
        mask: impl Into<String>,
        gateway: impl Into<String>,
        dns_servers: Vec<String>,
    ) -> Self {
        Self {
            ip: ip.into(),
            mask: mask.into(),
            gateway: gateway.into(),
            dns_servers,
        }
    }

    /// DNS servers rendered the way they are persisted and displayed.
    pub fn dns_joined(&self) -> String {
        self.dns_servers.join(", ")
    }
}

/// Split a comma separated DNS list, dropping empty entries.
pub fn split_dns_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect()
}

/// How a profile configures its interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpSettings {
    /// Obtain address and DNS via DHCP.
    Dhcp,
    /// Manual configuration.
    Static(StaticConfig),
}

impl IpSettings {
    pub fn is_dhcp(&self) -> bool {
        matches!(self, Self::Dhcp)
    }

    /// Get the static configuration, if any.
    pub fn static_config(&self) -> Option<&StaticConfig> {
        match self {
            Self::Dhcp => None,
            Self::Static(config) => Some(config),
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> String {
        match self {
            Self::Dhcp => "DHCP".to_string(),
            Self::Static(c) => {
                let mut s = format!("static {} mask {} gw {}", c.ip, c.mask, c.gateway);
                if !c.dns_servers.is_empty() {
                    s.push_str(&format!(" dns {}", c.dns_joined()));
                }
                s
            }
        }
    }
}

/// A switchable network profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    /// Profile name (user-visible).
    pub name: String,
    /// Interface this profile controls.
    pub bound_interface: Option<String>,
    /// Saved IP settings.
    pub ip: Option<IpSettings>,
}

impl NetworkProfile {
    /// Create a new unbound, unconfigured profile with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound_interface: None,
            ip: None,
        }
    }

    /// Get the profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the bound interface.
    pub fn bound_interface(&self) -> Option<&str> {
        self.bound_interface.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.bound_interface.is_some()
    }

    pub fn is_configured(&self) -> bool {
        self.ip.is_some()
    }

    /// Whether the saved settings use DHCP. Unconfigured profiles report false.
    pub fn use_dhcp(&self) -> bool {
        self.ip.as_ref().map(IpSettings::is_dhcp).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_creation() {
        let profile = NetworkProfile::new("Intranet");
        assert_eq!(profile.name(), "Intranet");
        assert!(!profile.is_bound());
        assert!(!profile.is_configured());
        assert!(!profile.use_dhcp());
    }

    #[test]
    fn test_split_dns_list() {
        assert_eq!(
            split_dns_list("10.0.0.1, 10.0.0.2,,  "),
            vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()]
        );
        assert!(split_dns_list("").is_empty());
    }

    #[test]
    fn test_static_description() {
        let settings = IpSettings::Static(StaticConfig::new(
            "10.0.0.5",
            "255.0.0.0",
            "10.0.0.1",
            vec!["10.0.0.1".into(), "8.8.8.8".into()],
        ));
        assert_eq!(
            settings.description(),
            "static 10.0.0.5 mask 255.0.0.0 gw 10.0.0.1 dns 10.0.0.1, 8.8.8.8"
        );
        assert!(settings.static_config().is_some());
        assert!(IpSettings::Dhcp.static_config().is_none());
    }
}

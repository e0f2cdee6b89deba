// Network Switcher - netsh Output Parser
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Parsing of `netsh interface ip show config name="X"` output.
//!
//! netsh prints localized free text, so every field is located by a marker
//! substring from [`LocaleMarkers`]. The parser sits behind [`ConfigParser`]
//! so a different data source can replace it without touching the applier
//! or the store.

pub mod markers;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{IpSettings, OutputLocale, StaticConfig};
use markers::{contains_any, find_after, value_after_colon, LocaleMarkers};

/// Dotted-quad IPv4 token.
static IPV4_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("IPv4 token regex is valid")
});

/// Structured view of one interface's IP configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceConfig {
    pub dhcp: bool,
    pub ip: String,
    pub mask: String,
    pub gateway: String,
    /// DNS servers in discovery order, duplicates kept.
    pub dns_servers: Vec<String>,
}

impl InterfaceConfig {
    /// DNS servers joined with ", ".
    pub fn dns_joined(&self) -> String {
        self.dns_servers.join(", ")
    }

    /// Convert to settings that can be saved on a profile.
    pub fn to_ip_settings(&self) -> IpSettings {
        if self.dhcp {
            IpSettings::Dhcp
        } else {
            IpSettings::Static(StaticConfig::new(
                self.ip.clone(),
                self.mask.clone(),
                self.gateway.clone(),
                self.dns_servers.clone(),
            ))
        }
    }
}

/// Turns raw per-interface query output into an [`InterfaceConfig`].
pub trait ConfigParser {
    fn parse_interface_config(&self, text: &str) -> InterfaceConfig;
}

/// Marker driven parser for localized netsh text.
#[derive(Debug, Clone, Copy)]
pub struct MarkerParser {
    markers: &'static LocaleMarkers,
}

impl MarkerParser {
    pub fn new(markers: &'static LocaleMarkers) -> Self {
        Self { markers }
    }

    pub fn for_locale(locale: OutputLocale) -> Self {
        Self::new(LocaleMarkers::for_locale(locale))
    }

    pub fn markers(&self) -> &'static LocaleMarkers {
        self.markers
    }
}

impl Default for MarkerParser {
    fn default() -> Self {
        Self::for_locale(OutputLocale::Auto)
    }
}

/// All dotted-quad tokens in `text`.
pub fn ipv4_tokens(text: &str) -> Vec<String> {
    IPV4_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

impl ConfigParser for MarkerParser {
    fn parse_interface_config(&self, text: &str) -> InterfaceConfig {
        let m = self.markers;
        let lines: Vec<&str> = text.lines().collect();
        let mut config = InterfaceConfig::default();
        let mut gateway_seen = false;
        let mut dns_seen = false;

        for (i, line) in lines.iter().enumerate() {
            if contains_any(line, m.dhcp_enabled) {
                let value = value_after_colon(line);
                if m.yes.iter().any(|y| *y == value) {
                    config.dhcp = true;
                }
            }

            if contains_any(line, m.ip_address) {
                if config.ip.is_empty() {
                    config.ip = value_after_colon(line).to_string();
                }
            } else if contains_any(line, m.subnet_prefix) {
                // A subnet line without the mask marker leaves the mask empty
                if config.mask.is_empty() {
                    if let Some(idx) = find_after(line, m.mask) {
                        config.mask = line[idx..].replace(')', "").trim().to_string();
                    }
                }
            } else if contains_any(line, m.default_gateway) {
                if !gateway_seen {
                    config.gateway = value_after_colon(line).to_string();
                    gateway_seen = true;
                }
            } else if contains_any(line, m.dns_servers) && !dns_seen {
                dns_seen = true;
                config.dns_servers.extend(ipv4_tokens(value_after_colon(line)));

                for next in &lines[i + 1..] {
                    let next = next.trim();
                    if next.is_empty() {
                        break;
                    }
                    let tokens = ipv4_tokens(next);
                    if tokens.is_empty() {
                        break;
                    }
                    config.dns_servers.extend(tokens);
                }
            }
        }

        config
    }
}

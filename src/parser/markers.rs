// Network Switcher - Output Markers
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Locale specific substrings that identify lines in netsh output.

use crate::models::OutputLocale;

/// Marker strings for one output language (or a union of several).
#[derive(Debug, Clone, Copy)]
pub struct LocaleMarkers {
    /// Connect-state tokens for connected interfaces.
    pub connected: &'static [&'static str],
    /// Connect-state tokens for disconnected interfaces.
    pub disconnected: &'static [&'static str],
    /// Header that opens one interface section of `show config`.
    pub interface_header: &'static [&'static str],
    pub ip_address: &'static [&'static str],
    pub subnet_prefix: &'static [&'static str],
    /// Marker inside the subnet line that precedes the dotted mask.
    pub mask: &'static [&'static str],
    pub default_gateway: &'static [&'static str],
    pub dns_servers: &'static [&'static str],
    pub dhcp_enabled: &'static [&'static str],
    /// Value of the DHCP line when DHCP is on.
    pub yes: &'static [&'static str],
}

pub const ENGLISH: LocaleMarkers = LocaleMarkers {
    connected: &["Connected"],
    disconnected: &["Disconnected"],
    interface_header: &["Configuration for interface"],
    ip_address: &["IP Address"],
    subnet_prefix: &["Subnet Prefix"],
    mask: &["mask"],
    default_gateway: &["Default Gateway"],
    dns_servers: &["DNS Servers", "DNS servers"],
    dhcp_enabled: &["DHCP enabled"],
    yes: &["Yes"],
};

pub const CHINESE: LocaleMarkers = LocaleMarkers {
    connected: &["已连接"],
    disconnected: &["已断开"],
    interface_header: &["配置接口", "的配置"],
    ip_address: &["IP 地址"],
    subnet_prefix: &["子网前缀"],
    mask: &["掩码"],
    default_gateway: &["默认网关"],
    dns_servers: &["DNS 服务器"],
    dhcp_enabled: &["DHCP 已启用"],
    yes: &["是"],
};

pub const AUTO: LocaleMarkers = LocaleMarkers {
    connected: &["Connected", "已连接"],
    disconnected: &["Disconnected", "已断开"],
    interface_header: &["Configuration for interface", "配置接口", "的配置"],
    ip_address: &["IP Address", "IP 地址"],
    subnet_prefix: &["Subnet Prefix", "子网前缀"],
    mask: &["mask", "掩码"],
    default_gateway: &["Default Gateway", "默认网关"],
    dns_servers: &["DNS Servers", "DNS servers", "DNS 服务器"],
    dhcp_enabled: &["DHCP enabled", "DHCP 已启用"],
    yes: &["Yes", "是"],
};

impl LocaleMarkers {
    /// Markers for the configured output locale.
    pub fn for_locale(locale: OutputLocale) -> &'static LocaleMarkers {
        match locale {
            OutputLocale::Auto => &AUTO,
            OutputLocale::English => &ENGLISH,
            OutputLocale::Chinese => &CHINESE,
        }
    }

    /// Whether `token` is a connected or disconnected state.
    pub fn is_link_state(&self, token: &str) -> bool {
        contains_any(token, self.connected) || contains_any(token, self.disconnected)
    }
}

/// Whether `line` contains any of `markers`.
pub fn contains_any(line: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| line.contains(m))
}

/// Byte offset just past the first of `markers` found in `line`.
pub fn find_after(line: &str, markers: &[&str]) -> Option<usize> {
    markers
        .iter()
        .find_map(|m| line.find(m).map(|idx| idx + m.len()))
}

/// Text after the first colon (ASCII or full-width), trimmed.
pub fn value_after_colon(line: &str) -> &str {
    match line.find(|c: char| c == ':' || c == '：') {
        Some(idx) => {
            let rest = &line[idx..];
            let colon_len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
            rest[colon_len..].trim()
        }
        None => line.trim(),
    }
}

// Network Switcher - Network Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Network interface detection and utilities.
//!
//! This module lists interfaces and their IP configuration by scraping the
//! text output of netsh.

use tracing::debug;

use crate::models::{NetshCommand, Result};
use crate::parser::markers::{contains_any, LocaleMarkers};
use crate::parser::{ConfigParser, InterfaceConfig};
use crate::services::CommandRunner;

/// Extract interface names from `netsh interface show interface` output.
///
/// Only rows whose state is connected or disconnected are kept. The first
/// three columns are states and type; the rest of the row is the name.
pub fn parse_interface_list(text: &str, markers: &LocaleMarkers) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return None;
            }
            if !parts[..3].iter().any(|t| markers.is_link_state(t)) {
                return None;
            }
            Some(parts[3..].join(" "))
        })
        .collect()
}

/// Extract interfaces that currently hold an IP address from
/// `netsh interface ip show config` output.
///
/// A section header names a pending interface; the next IP address line
/// confirms it. Address lines without a pending header are ignored.
pub fn parse_active_interfaces(text: &str, markers: &LocaleMarkers) -> Vec<String> {
    let mut interfaces = Vec::new();
    let mut current_name: Option<String> = None;

    for line in text.lines() {
        if contains_any(line, markers.interface_header) {
            current_name = line.split('"').nth(1).map(str::to_string);
        } else if contains_any(line, markers.ip_address) {
            if let Some(name) = current_name.take() {
                interfaces.push(name);
            }
        }
    }

    interfaces
}

/// List connected and disconnected interfaces.
pub fn list_interfaces(runner: &dyn CommandRunner, markers: &LocaleMarkers) -> Result<Vec<String>> {
    let output = runner.run(&NetshCommand::ShowInterfaces)?;
    let interfaces = parse_interface_list(&output.stdout, markers);
    debug!("Detected {} interfaces", interfaces.len());
    Ok(interfaces)
}

/// List interfaces with an active IP configuration.
pub fn list_active_interfaces(
    runner: &dyn CommandRunner,
    markers: &LocaleMarkers,
) -> Result<Vec<String>> {
    let output = runner.run(&NetshCommand::ShowIpConfig { interface: None })?;
    let interfaces = parse_active_interfaces(&output.stdout, markers);
    debug!("Detected {} active interfaces", interfaces.len());
    Ok(interfaces)
}

/// Query and parse the IP configuration of one interface.
pub fn interface_config(
    runner: &dyn CommandRunner,
    parser: &dyn ConfigParser,
    interface: &str,
) -> Result<InterfaceConfig> {
    let output = runner.run(&NetshCommand::ShowIpConfig {
        interface: Some(interface.to_string()),
    })?;
    Ok(parser.parse_interface_config(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::markers::{AUTO, CHINESE, ENGLISH};
    use crate::parser::MarkerParser;
    use crate::services::RecordingRunner;

    const SHOW_INTERFACE: &str = "
Admin State    State          Type             Interface Name
-------------------------------------------------------------------------
Enabled        Connected      Dedicated        Ethernet
Disabled       Disconnected   Dedicated        Ethernet 2
Enabled        Not Present    Dedicated        Old   Adapter
Enabled        Connected      Dedicated        Wi-Fi
";

    const SHOW_CONFIG: &str = "
    IP Address:                           10.9.9.9

Configuration for interface \"Ethernet\"
    DHCP enabled:                         Yes
    IP Address:                           192.168.1.20
    Subnet Prefix:                        192.168.1.0/24 (mask 255.255.255.0)

Configuration for interface \"Ethernet 2\"
    DHCP enabled:                         Yes
    InterfaceMetric:                      5

Configuration for interface \"Loopback Pseudo-Interface 1\"
    DHCP enabled:                         No
    IP Address:                           127.0.0.1
    IP Address:                           127.0.0.2
";

    #[test]
    fn test_parse_interface_list() {
        let interfaces = parse_interface_list(SHOW_INTERFACE, &ENGLISH);
        assert_eq!(interfaces, vec!["Ethernet", "Ethernet 2", "Wi-Fi"]);
    }

    #[test]
    fn test_parse_interface_list_joins_name_tokens() {
        let text = "Enabled   Connected   Dedicated   VPN   Tunnel   Adapter";
        assert_eq!(parse_interface_list(text, &ENGLISH), vec!["VPN Tunnel Adapter"]);
    }

    #[test]
    fn test_parse_interface_list_chinese() {
        let text = "已启用            已连接            专用               以太网\n已禁用            已断开连接        专用               WLAN\n";
        assert_eq!(parse_interface_list(text, &CHINESE), vec!["以太网", "WLAN"]);
        assert_eq!(parse_interface_list(text, &AUTO), vec!["以太网", "WLAN"]);
        assert!(parse_interface_list(text, &ENGLISH).is_empty());
    }

    #[test]
    fn test_parse_interface_list_from_gbk_console() {
        let text = "管理员状态     状态           类型             接口名称\n\
                    已启用         已连接         专用             以太网\n\
                    已启用         已断开连接     专用             WLAN 2\n";
        let (bytes, _, _) = encoding_rs::GBK.encode(text);
        let decoded = crate::services::decode_output(&bytes);
        assert_eq!(parse_interface_list(&decoded, &AUTO), vec!["以太网", "WLAN 2"]);
    }

    #[test]
    fn test_parse_active_interfaces() {
        let active = parse_active_interfaces(SHOW_CONFIG, &ENGLISH);
        // The stray address before any header and the header without an
        // address line are not attributed to any interface.
        assert_eq!(active, vec!["Ethernet", "Loopback Pseudo-Interface 1"]);
    }

    #[test]
    fn test_parse_active_interfaces_header_without_quotes() {
        let text = "Configuration for interface Ethernet\n    IP Address: 10.0.0.1\n";
        assert!(parse_active_interfaces(text, &ENGLISH).is_empty());
    }

    #[test]
    fn test_list_through_runner() {
        let runner = RecordingRunner::new()
            .respond(NetshCommand::ShowInterfaces, SHOW_INTERFACE)
            .respond(NetshCommand::ShowIpConfig { interface: None }, SHOW_CONFIG);

        assert_eq!(list_interfaces(&runner, &AUTO).unwrap().len(), 3);
        assert_eq!(
            list_active_interfaces(&runner, &AUTO).unwrap(),
            vec!["Ethernet", "Loopback Pseudo-Interface 1"]
        );
        assert!(runner.mutations().is_empty());
    }

    #[test]
    fn test_interface_config_through_runner() {
        let query = NetshCommand::ShowIpConfig {
            interface: Some("Ethernet".into()),
        };
        let runner = RecordingRunner::new().respond(
            query.clone(),
            "DHCP enabled: No\nIP Address: 10.0.0.5\nDefault Gateway: 10.0.0.1\n",
        );

        let config = interface_config(&runner, &MarkerParser::default(), "Ethernet").unwrap();
        assert_eq!(config.ip, "10.0.0.5");
        assert_eq!(config.gateway, "10.0.0.1");
        assert_eq!(runner.issued(), vec![query]);
    }
}

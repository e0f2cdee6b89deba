// Network Switcher - netsh Actions
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Declarative netsh invocations.
//!
//! Each variant maps to exactly one `netsh` process. Queries return text for
//! the inventory and parser; the rest change interface state.

use serde::Serialize;

/// A single netsh invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NetshCommand {
    /// List interfaces with admin and connect state.
    ShowInterfaces,

    /// Show the IP configuration of one interface, or all when `None`.
    ShowIpConfig {
        #[serde(skip_serializing_if = "Option::is_none")]
        interface: Option<String>,
    },

    /// Enable or disable an interface.
    SetInterfaceAdmin { interface: String, enabled: bool },

    /// Set a static address, mask and gateway.
    SetStaticAddress {
        interface: String,
        ip: String,
        mask: String,
        gateway: String,
    },

    /// Obtain the address via DHCP.
    SetDhcpAddress { interface: String },

    /// Obtain DNS servers via DHCP.
    SetDhcpDns { interface: String },

    /// Drop all statically configured DNS servers.
    ClearStaticDns { interface: String },

    /// Append a DNS server, as primary when `primary` is set.
    AddDns {
        interface: String,
        address: String,
        primary: bool,
    },
}

fn name_arg(interface: &str) -> String {
    format!("name=\"{}\"", interface)
}

impl NetshCommand {
    pub fn enable(interface: impl Into<String>) -> Self {
        Self::SetInterfaceAdmin {
            interface: interface.into(),
            enabled: true,
        }
    }

    pub fn disable(interface: impl Into<String>) -> Self {
        Self::SetInterfaceAdmin {
            interface: interface.into(),
            enabled: false,
        }
    }

    /// Arguments passed to netsh.
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = match self {
            Self::ShowInterfaces => vec!["interface", "show", "interface"],
            Self::ShowIpConfig { .. } => vec!["interface", "ip", "show", "config"],
            Self::SetInterfaceAdmin { .. } => vec!["interface", "set", "interface"],
            Self::SetStaticAddress { .. } | Self::SetDhcpAddress { .. } => {
                vec!["interface", "ip", "set", "address"]
            }
            Self::SetDhcpDns { .. } => vec!["interface", "ip", "set", "dnsservers"],
            Self::ClearStaticDns { .. } => vec!["interface", "ip", "set", "dns"],
            Self::AddDns { .. } => vec!["interface", "ip", "add", "dns"],
        }
        .into_iter()
        .map(String::from)
        .collect();

        match self {
            Self::ShowInterfaces => {}
            Self::ShowIpConfig { interface } => {
                if let Some(interface) = interface {
                    args.push(name_arg(interface));
                }
            }
            Self::SetInterfaceAdmin { interface, enabled } => {
                args.push(name_arg(interface));
                args.push(if *enabled { "admin=enable" } else { "admin=disable" }.to_string());
            }
            Self::SetStaticAddress {
                interface,
                ip,
                mask,
                gateway,
            } => {
                args.push(name_arg(interface));
                args.push("static".to_string());
                args.push(ip.clone());
                args.push(mask.clone());
                args.push(gateway.clone());
            }
            Self::SetDhcpAddress { interface } | Self::SetDhcpDns { interface } => {
                args.push(name_arg(interface));
                args.push("source=dhcp".to_string());
            }
            Self::ClearStaticDns { interface } => {
                args.push(name_arg(interface));
                args.push("source=static".to_string());
                args.push("addr=none".to_string());
                args.push("register=none".to_string());
            }
            Self::AddDns {
                interface,
                address,
                primary,
            } => {
                args.push(name_arg(interface));
                args.push(format!("addr={}", address));
                if *primary {
                    args.push("index=1".to_string());
                }
            }
        }

        args
    }

    /// The interface this command targets, if any.
    pub fn interface(&self) -> Option<&str> {
        match self {
            Self::ShowInterfaces => None,
            Self::ShowIpConfig { interface } => interface.as_deref(),
            Self::SetInterfaceAdmin { interface, .. }
            | Self::SetStaticAddress { interface, .. }
            | Self::SetDhcpAddress { interface }
            | Self::SetDhcpDns { interface }
            | Self::ClearStaticDns { interface }
            | Self::AddDns { interface, .. } => Some(interface),
        }
    }

    /// Whether the command only reads state.
    pub fn is_query(&self) -> bool {
        matches!(self, Self::ShowInterfaces | Self::ShowIpConfig { .. })
    }

    /// Get a human-readable description.
    pub fn description(&self) -> String {
        match self {
            Self::ShowInterfaces => "List interfaces".to_string(),
            Self::ShowIpConfig { interface } => format!(
                "Show IP config of {}",
                interface.as_deref().unwrap_or("all interfaces")
            ),
            Self::SetInterfaceAdmin { interface, enabled } => format!(
                "{} interface {}",
                if *enabled { "Enable" } else { "Disable" },
                interface
            ),
            Self::SetStaticAddress {
                interface,
                ip,
                mask,
                gateway,
            } => format!("Static {} mask {} gw {} on {}", ip, mask, gateway, interface),
            Self::SetDhcpAddress { interface } => format!("DHCP address on {}", interface),
            Self::SetDhcpDns { interface } => format!("DHCP DNS on {}", interface),
            Self::ClearStaticDns { interface } => format!("Clear static DNS on {}", interface),
            Self::AddDns {
                interface,
                address,
                primary,
            } => format!(
                "Add {}DNS {} on {}",
                if *primary { "primary " } else { "" },
                address,
                interface
            ),
        }
    }
}

impl std::fmt::Display for NetshCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "netsh {}", self.args().join(" "))
    }
}

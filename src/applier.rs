// Network Switcher - Profile Applier
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Pushes a stored profile onto its interface.
//!
//! Commands are issued strictly in order: disable the other profiles'
//! interfaces, enable the target, then address and DNS settings. A failing
//! command never stops the sequence; its outcome is recorded in the
//! [`ApplyReport`].

use tracing::{info, warn};

use crate::models::{ApplyReport, Error, IpSettings, NetshCommand, Result, StaticConfig};
use crate::network_utils;
use crate::parser::markers::LocaleMarkers;
use crate::parser::{ConfigParser, InterfaceConfig};
use crate::services::CommandRunner;
use crate::storage::ProfileStore;

/// Commands that switch `interface` to DHCP for address and DNS.
pub fn dhcp_commands(interface: &str) -> Vec<NetshCommand> {
    vec![
        NetshCommand::SetDhcpAddress {
            interface: interface.to_string(),
        },
        NetshCommand::SetDhcpDns {
            interface: interface.to_string(),
        },
    ]
}

/// Commands that push a static configuration onto `interface`.
pub fn static_commands(interface: &str, config: &StaticConfig) -> Vec<NetshCommand> {
    let mut commands = vec![
        NetshCommand::SetStaticAddress {
            interface: interface.to_string(),
            ip: config.ip.clone(),
            mask: config.mask.clone(),
            gateway: config.gateway.clone(),
        },
        NetshCommand::ClearStaticDns {
            interface: interface.to_string(),
        },
    ];

    commands.extend(
        config
            .dns_servers
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .enumerate()
            .map(|(i, address)| NetshCommand::AddDns {
                interface: interface.to_string(),
                address: address.to_string(),
                primary: i == 0,
            }),
    );

    commands
}

/// Ordered command list for applying the profile `key`.
///
/// Fails with [`Error::Unbound`] or [`Error::NotConfigured`] before any
/// command is produced.
pub fn plan(store: &ProfileStore, key: &str, disable_others: bool) -> Result<Vec<NetshCommand>> {
    let profile = store.profile(key)?;
    let interface = profile
        .bound_interface()
        .ok_or_else(|| Error::Unbound(profile.name.clone()))?;
    let settings = profile
        .ip
        .as_ref()
        .ok_or_else(|| Error::NotConfigured(profile.name.clone()))?;

    let mut commands = Vec::new();

    if disable_others {
        // An interface shared with the target is disabled too; the enable
        // below brings it back.
        commands.extend(
            store
                .other_bound_interfaces(key)
                .into_iter()
                .map(NetshCommand::disable),
        );
    }

    commands.push(NetshCommand::enable(interface));

    match settings {
        IpSettings::Dhcp => commands.extend(dhcp_commands(interface)),
        IpSettings::Static(config) => commands.extend(static_commands(interface, config)),
    }

    Ok(commands)
}

/// Runs profile changes through a [`CommandRunner`].
pub struct ProfileApplier<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> ProfileApplier<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn run_all(&self, report: &mut ApplyReport, commands: &[NetshCommand]) {
        for command in commands {
            report.add(self.runner.execute(command));
        }
        report.finalize();

        if report.is_clean() {
            info!("{}", report.summary());
        } else {
            warn!("{}", report.summary());
        }
    }

    /// Apply the profile `key`.
    pub fn apply(&self, store: &ProfileStore, key: &str, disable_others: bool) -> Result<ApplyReport> {
        let commands = plan(store, key, disable_others)?;
        let profile = store.profile(key)?;
        info!(
            "Applying profile '{}' ({} commands, disable others: {})",
            profile.name,
            commands.len(),
            disable_others
        );

        let mut report = ApplyReport::new(key, profile.name.clone());
        self.run_all(&mut report, &commands);
        Ok(report)
    }

    /// Enable every listed interface and switch it to DHCP.
    pub fn reset_all_to_dhcp(&self, markers: &LocaleMarkers) -> Result<ApplyReport> {
        let interfaces = network_utils::list_interfaces(self.runner, markers)?;
        info!("Switching {} interfaces to DHCP", interfaces.len());

        let commands: Vec<NetshCommand> = interfaces
            .iter()
            .flat_map(|i| std::iter::once(NetshCommand::enable(i.as_str())).chain(dhcp_commands(i)))
            .collect();

        let mut report = ApplyReport::new("*", "all interfaces");
        self.run_all(&mut report, &commands);
        Ok(report)
    }

    /// Read the live configuration of the profile's bound interface.
    pub fn read_current_config(
        &self,
        store: &ProfileStore,
        key: &str,
        parser: &dyn ConfigParser,
    ) -> Result<InterfaceConfig> {
        let profile = store.profile(key)?;
        let interface = profile
            .bound_interface()
            .ok_or_else(|| Error::Unbound(profile.name.clone()))?;
        network_utils::interface_config(self.runner, parser, interface)
    }

    /// Key of the first profile whose interface currently has an address.
    pub fn detect_active_profile(
        &self,
        store: &ProfileStore,
        markers: &LocaleMarkers,
    ) -> Result<Option<String>> {
        let active = network_utils::list_active_interfaces(self.runner, markers)?;
        Ok(store.detect_active_profile(&active).map(str::to_string))
    }
}

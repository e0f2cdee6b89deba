// Network Switcher - Application
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Application root object wiring storage, netsh and the parser together.
//!
//! Every mutating action writes the whole profile document back to disk.

use tracing::{debug, info, warn};

use crate::models::validation::non_ipv4_fields;
use crate::models::{ApplyReport, Error, IpSettings, Result, StaticConfig};
use crate::network_utils;
use crate::parser::markers::LocaleMarkers;
use crate::parser::{InterfaceConfig, MarkerParser};
use crate::applier::{self, ProfileApplier};
use crate::services::{CommandRunner, NetshRunner};
use crate::storage::{DataStore, ProfileStore};

/// Application state for one invocation.
pub struct Application {
    data: DataStore,
    profiles: ProfileStore,
    runner: Box<dyn CommandRunner>,
    parser: MarkerParser,
}

impl Application {
    /// Load settings and profiles from `data` and talk to the configured netsh.
    pub fn new(data: DataStore) -> Self {
        let runner = NetshRunner::new(data.settings().netsh_path.clone());
        debug!("Using netsh at {}", runner.program());
        Self::with_runner(data, Box::new(runner))
    }

    /// Same as [`Application::new`] with an explicit command runner.
    pub fn with_runner(data: DataStore, runner: Box<dyn CommandRunner>) -> Self {
        let profiles = data.load_profiles();
        let parser = MarkerParser::for_locale(data.settings().locale);
        Self {
            data,
            profiles,
            runner,
            parser,
        }
    }

    pub fn data(&self) -> &DataStore {
        &self.data
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    fn markers(&self) -> &'static LocaleMarkers {
        self.parser.markers()
    }

    fn applier(&self) -> ProfileApplier<'_> {
        ProfileApplier::new(self.runner.as_ref())
    }

    /// Persist the profile store after a mutation.
    fn persist(&self) -> Result<()> {
        self.data.save_profiles(&self.profiles).map_err(|e| {
            warn!("Failed to save profiles: {}", e);
            e
        })
    }

    /// Resolve a profile key or display name.
    pub fn resolve(&self, profile: &str) -> Result<String> {
        self.profiles.resolve(profile)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn interfaces(&self) -> Result<Vec<String>> {
        network_utils::list_interfaces(self.runner.as_ref(), self.markers())
    }

    pub fn active_interfaces(&self) -> Result<Vec<String>> {
        network_utils::list_active_interfaces(self.runner.as_ref(), self.markers())
    }

    /// Key of the profile whose interface is currently active.
    pub fn active_profile(&self) -> Result<Option<String>> {
        self.applier()
            .detect_active_profile(&self.profiles, self.markers())
    }

    /// Live configuration of a profile's bound interface.
    pub fn current_config(&self, profile: &str) -> Result<InterfaceConfig> {
        let key = self.resolve(profile)?;
        self.applier()
            .read_current_config(&self.profiles, &key, &self.parser)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn bind(&mut self, profile: &str, interface: &str) -> Result<()> {
        let key = self.resolve(profile)?;
        match self.interfaces() {
            Ok(known) if !known.iter().any(|i| i == interface) => {
                warn!("Interface '{}' is not in the current interface list", interface);
            }
            Ok(_) => {}
            Err(e) => warn!("Could not list interfaces, binding anyway: {}", e),
        }
        self.profiles.bind(&key, interface)?;
        self.persist()
    }

    pub fn unbind(&mut self, profile: &str) -> Result<Option<String>> {
        let key = self.resolve(profile)?;
        let old = self.profiles.unbind(&key)?;
        self.persist()?;
        Ok(old)
    }

    /// Returns whether the profile ends up bound.
    pub fn toggle_binding(&mut self, profile: &str, interface: &str) -> Result<bool> {
        let key = self.resolve(profile)?;
        let bound = self.profiles.toggle_binding(&key, interface)?;
        self.persist()?;
        Ok(bound)
    }

    pub fn save_static(&mut self, profile: &str, config: StaticConfig) -> Result<()> {
        let key = self.resolve(profile)?;
        for field in non_ipv4_fields(&config) {
            warn!("'{}' does not look like an IPv4 address", field);
        }
        self.profiles.save_profile(&key, IpSettings::Static(config))?;
        self.persist()
    }

    pub fn save_dhcp(&mut self, profile: &str) -> Result<()> {
        let key = self.resolve(profile)?;
        self.profiles.save_profile(&key, IpSettings::Dhcp)?;
        self.persist()
    }

    /// Read the live configuration and save it on the profile.
    pub fn capture(&mut self, profile: &str) -> Result<InterfaceConfig> {
        let config = self.current_config(profile)?;
        let key = self.resolve(profile)?;
        self.profiles.save_profile(&key, config.to_ip_settings())?;
        self.persist()?;
        Ok(config)
    }

    /// Returns false when the name was unchanged.
    pub fn rename(&mut self, profile: &str, new_name: &str) -> Result<bool> {
        let key = self.resolve(profile)?;
        let changed = self.profiles.rename(&key, new_name)?;
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    // ========================================================================
    // Applying
    // ========================================================================

    /// Apply a profile. `disable_others` defaults to the configured setting.
    pub fn apply(&self, profile: &str, disable_others: Option<bool>) -> Result<ApplyReport> {
        let key = self.resolve(profile)?;
        let disable_others = disable_others.unwrap_or(self.data.settings().disable_others);
        self.applier().apply(&self.profiles, &key, disable_others)
    }

    /// Print-only variant of [`Application::apply`].
    pub fn plan(&self, profile: &str, disable_others: Option<bool>) -> Result<Vec<String>> {
        let key = self.resolve(profile)?;
        let disable_others = disable_others.unwrap_or(self.data.settings().disable_others);
        Ok(applier::plan(&self.profiles, &key, disable_others)?
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    pub fn reset_all_to_dhcp(&self) -> Result<ApplyReport> {
        let report = self.applier().reset_all_to_dhcp(self.markers())?;
        info!("{}", report.summary());
        Ok(report)
    }
}

/// Human-readable text for an error shown to the user.
pub fn user_message(err: &Error) -> String {
    match err {
        Error::Unbound(_) => format!("{}. Bind an interface first.", err),
        Error::NotConfigured(_) => format!("{}. Save a static or DHCP configuration first.", err),
        e if e.is_persistence_error() => format!("{}. Check the profile file and its permissions.", err),
        _ => err.to_string(),
    }
}

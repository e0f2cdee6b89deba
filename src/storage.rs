// Network Switcher - Local Storage
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Local data storage.
//!
//! Handles:
//! - Application settings (`settings.toml`)
//! - The profile document (`network_config.json`)
//!
//! The profile document keeps the interface binding twice, once in
//! `bindings` and once inside each `configs` entry. In memory the profile's
//! `bound_interface` is the only copy; both document fields are derived from
//! it on save, and `bindings` wins on load.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::models::profile::split_dns_list;
use crate::models::validation::{validate_ip_settings, validate_profile_name};
use crate::models::{
    AppConfig, Error, IpSettings, NetworkProfile, Result, StaticConfig, CONFIG_DIR_NAME,
    PROFILES_FILE_NAME, SETTINGS_FILE_NAME,
};

/// Profiles created on first run: (key, display name).
pub const DEFAULT_PROFILES: [(&str, &str); 3] = [
    ("intranet", "Intranet"),
    ("extranet", "Extranet"),
    ("private", "Private Network"),
];

// ============================================================================
// Persisted document
// ============================================================================

/// One `configs` entry of the profile document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interface: Option<String>,
    #[serde(default)]
    dhcp: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gateway: Option<String>,
    /// Comma separated DNS servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dns: Option<String>,
}

impl StoredConfig {
    fn from_profile(profile: &NetworkProfile, settings: &IpSettings) -> Self {
        let interface = profile.bound_interface.clone();
        match settings {
            IpSettings::Dhcp => Self {
                interface,
                dhcp: true,
                ..Self::default()
            },
            IpSettings::Static(c) => Self {
                interface,
                dhcp: false,
                ip: Some(c.ip.clone()),
                mask: Some(c.mask.clone()),
                gateway: Some(c.gateway.clone()),
                dns: Some(c.dns_joined()),
            },
        }
    }

    /// Convert back to settings; `None` if a static entry is missing fields.
    fn to_ip_settings(&self) -> Option<IpSettings> {
        if self.dhcp {
            return Some(IpSettings::Dhcp);
        }
        Some(IpSettings::Static(StaticConfig::new(
            self.ip.clone()?,
            self.mask.clone()?,
            self.gateway.clone()?,
            split_dns_list(self.dns.as_deref()?),
        )))
    }
}

/// On-disk layout of the profile document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileDocument {
    #[serde(default)]
    configs: IndexMap<String, StoredConfig>,
    #[serde(default)]
    bindings: IndexMap<String, String>,
    #[serde(default)]
    profile_names: Option<IndexMap<String, String>>,
}

// ============================================================================
// Profile store
// ============================================================================

/// In-memory profile collection keyed by a stable profile key, in document
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStore {
    profiles: IndexMap<String, NetworkProfile>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ProfileStore {
    /// The three built-in profiles, unbound and unconfigured.
    pub fn defaults() -> Self {
        let profiles = DEFAULT_PROFILES
            .iter()
            .map(|(key, name)| (key.to_string(), NetworkProfile::new(*name)))
            .collect();
        Self { profiles }
    }

    fn from_document(doc: ProfileDocument) -> Self {
        let mut profiles: IndexMap<String, NetworkProfile> = match doc.profile_names {
            Some(names) => names
                .into_iter()
                .map(|(key, name)| (key, NetworkProfile::new(name)))
                .collect(),
            None => Self::defaults().profiles,
        };

        // The interface copy inside `configs` only counts when the document
        // carries no `bindings` at all.
        let legacy_bindings = doc.bindings.is_empty();

        for (key, stored) in &doc.configs {
            let profile = profiles
                .entry(key.clone())
                .or_insert_with(|| NetworkProfile::new(key.clone()));
            profile.ip = stored.to_ip_settings();
            if profile.ip.is_none() {
                warn!("Ignoring incomplete static configuration of profile '{}'", key);
            }
            if legacy_bindings {
                profile.bound_interface = stored.interface.clone();
            }
        }

        for (key, interface) in doc.bindings {
            profiles
                .entry(key.clone())
                .or_insert_with(|| NetworkProfile::new(key))
                .bound_interface = Some(interface);
        }

        Self { profiles }
    }

    fn to_document(&self) -> ProfileDocument {
        let mut doc = ProfileDocument {
            profile_names: Some(IndexMap::new()),
            ..ProfileDocument::default()
        };

        for (key, profile) in &self.profiles {
            if let Some(names) = doc.profile_names.as_mut() {
                names.insert(key.clone(), profile.name.clone());
            }
            if let Some(interface) = &profile.bound_interface {
                doc.bindings.insert(key.clone(), interface.clone());
            }
            if let Some(settings) = &profile.ip {
                doc.configs
                    .insert(key.clone(), StoredConfig::from_profile(profile, settings));
            }
        }

        doc
    }

    /// Parse a profile document.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: ProfileDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(doc))
    }

    /// Render the profile document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_document())
            .map_err(|e| Error::ConfigWriteFailed(e.to_string()))
    }

    /// Read the document at `path`. `Ok(None)` if the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::ConfigReadFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content).map(Some)
    }

    /// Read the document at `path`, falling back to the defaults.
    ///
    /// A missing file is the first-run case. An unreadable or malformed file
    /// is reported and otherwise treated the same way.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(store)) => {
                info!("Loaded {} profiles from {:?}", store.len(), path);
                store
            }
            Ok(None) => {
                debug!("No profile document at {:?}, using defaults", path);
                Self::defaults()
            }
            Err(e) => {
                warn!("Failed to load profiles, using defaults: {}", e);
                Self::defaults()
            }
        }
    }

    /// Overwrite the document at `path` with the whole store.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::ConfigWriteFailed(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(path, json)
            .map_err(|e| Error::ConfigWriteFailed(format!("{}: {}", path.display(), e)))?;
        debug!("Saved {} profiles to {:?}", self.len(), path);
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Get a profile by key.
    pub fn get(&self, key: &str) -> Option<&NetworkProfile> {
        self.profiles.get(key)
    }

    /// Get a profile by key or fail with [`Error::ProfileNotFound`].
    pub fn profile(&self, key: &str) -> Result<&NetworkProfile> {
        self.profiles
            .get(key)
            .ok_or_else(|| Error::ProfileNotFound(key.to_string()))
    }

    fn profile_mut(&mut self, key: &str) -> Result<&mut NetworkProfile> {
        self.profiles
            .get_mut(key)
            .ok_or_else(|| Error::ProfileNotFound(key.to_string()))
    }

    /// Iterate over (key, profile) pairs in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NetworkProfile)> {
        self.profiles.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// Find the key for a profile key or display name.
    pub fn resolve(&self, key_or_name: &str) -> Result<String> {
        if self.profiles.contains_key(key_or_name) {
            return Ok(key_or_name.to_string());
        }
        self.profiles
            .iter()
            .find(|(_, p)| p.name == key_or_name)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| Error::ProfileNotFound(key_or_name.to_string()))
    }

    /// Interfaces bound to profiles other than `key`.
    pub fn other_bound_interfaces(&self, key: &str) -> Vec<String> {
        self.profiles
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .filter_map(|(_, p)| p.bound_interface.clone())
            .collect()
    }

    /// First profile (in store order) whose interface is currently active.
    pub fn detect_active_profile(&self, active_interfaces: &[String]) -> Option<&str> {
        self.profiles
            .iter()
            .find(|(_, p)| {
                p.bound_interface
                    .as_ref()
                    .map(|i| active_interfaces.contains(i))
                    .unwrap_or(false)
            })
            .map(|(k, _)| k.as_str())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Change a profile's display name. Returns false if nothing changed.
    pub fn rename(&mut self, key: &str, new_name: &str) -> Result<bool> {
        let new_name = validate_profile_name(new_name)?;
        if self.profile(key)?.name == new_name {
            return Ok(false);
        }
        if self
            .profiles
            .iter()
            .any(|(k, p)| k != key && p.name == new_name)
        {
            return Err(Error::DuplicateName(new_name));
        }

        let profile = self.profile_mut(key)?;
        info!("Renamed profile '{}' from '{}' to '{}'", key, profile.name, new_name);
        profile.name = new_name;
        Ok(true)
    }

    /// Bind a profile to an interface.
    pub fn bind(&mut self, key: &str, interface: &str) -> Result<()> {
        self.profile_mut(key)?.bound_interface = Some(interface.to_string());
        info!("Bound profile '{}' to '{}'", key, interface);
        Ok(())
    }

    /// Remove a profile's binding, returning the old interface.
    pub fn unbind(&mut self, key: &str) -> Result<Option<String>> {
        let old = self.profile_mut(key)?.bound_interface.take();
        if let Some(interface) = &old {
            info!("Unbound profile '{}' from '{}'", key, interface);
        }
        Ok(old)
    }

    /// Unbind if already bound to `interface`, otherwise bind to it.
    /// Returns whether the profile ends up bound.
    pub fn toggle_binding(&mut self, key: &str, interface: &str) -> Result<bool> {
        if self.profile(key)?.bound_interface() == Some(interface) {
            self.unbind(key)?;
            Ok(false)
        } else {
            self.bind(key, interface)?;
            Ok(true)
        }
    }

    /// Save IP settings on a bound profile.
    ///
    /// Validation happens before anything is touched, so a rejected save
    /// leaves the store unchanged.
    pub fn save_profile(&mut self, key: &str, settings: IpSettings) -> Result<()> {
        let profile = self.profile(key)?;
        if !profile.is_bound() {
            return Err(Error::Unbound(profile.name.clone()));
        }
        validate_ip_settings(&settings)?;

        let profile = self.profile_mut(key)?;
        info!("Saved profile '{}': {}", key, settings.description());
        profile.ip = Some(settings);
        Ok(())
    }
}

// ============================================================================
// Data store (paths and settings)
// ============================================================================

/// Locations of the settings file and the profile document.
#[derive(Debug)]
pub struct DataStore {
    /// Configuration directory path.
    config_dir: PathBuf,
    /// Settings file path.
    settings_file: PathBuf,
    /// Application settings.
    settings: AppConfig,
}

impl DataStore {
    /// Create a new data store with default config directory.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME);
        Self::with_config_dir(config_dir)
    }

    /// Create a new data store with a specific config directory.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&config_dir) {
            error!("Failed to create config directory: {}", e);
        }

        let mut store = Self {
            settings_file: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
            settings: AppConfig::default(),
        };
        store.load_settings();
        store
    }

    /// Load settings from disk.
    fn load_settings(&mut self) {
        if self.settings_file.exists() {
            match AppConfig::load_from_file(&self.settings_file) {
                Ok(config) => {
                    self.settings = config;
                    info!("Loaded settings from {:?}", self.settings_file);
                }
                Err(e) => {
                    error!("Failed to load settings: {}", e);
                }
            }
        }
    }

    /// Get the current settings.
    pub fn settings(&self) -> &AppConfig {
        &self.settings
    }

    /// Write the current settings to disk.
    pub fn save_settings(&self) -> Result<()> {
        self.settings.save_to_file(&self.settings_file)
    }

    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }

    /// Get the config directory path.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Profile document path. Relative overrides resolve against the config
    /// directory.
    pub fn profiles_file(&self) -> PathBuf {
        match &self.settings.profiles_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.config_dir.join(path),
            None => self.config_dir.join(PROFILES_FILE_NAME),
        }
    }

    /// Load the profile store, falling back to defaults.
    pub fn load_profiles(&self) -> ProfileStore {
        ProfileStore::load(&self.profiles_file())
    }

    /// Persist the profile store.
    pub fn save_profiles(&self, profiles: &ProfileStore) -> Result<()> {
        profiles.save(&self.profiles_file())
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_settings() -> IpSettings {
        IpSettings::Static(StaticConfig::new(
            "10.0.0.5",
            "255.0.0.0",
            "10.0.0.1",
            vec!["10.0.0.1".into(), "10.0.0.2".into()],
        ))
    }

    fn configured_store() -> ProfileStore {
        let mut store = ProfileStore::defaults();
        store.bind("intranet", "Ethernet").unwrap();
        store.save_profile("intranet", static_settings()).unwrap();
        store.bind("extranet", "Wi-Fi").unwrap();
        store.save_profile("extranet", IpSettings::Dhcp).unwrap();
        store.rename("private", "Lab").unwrap();
        store
    }

    #[test]
    fn test_defaults() {
        let store = ProfileStore::defaults();
        assert_eq!(store.len(), 3);
        assert_eq!(store.profile("intranet").unwrap().name(), "Intranet");
        assert_eq!(store.profile("private").unwrap().name(), "Private Network");
        assert!(store.iter().all(|(_, p)| !p.is_bound() && !p.is_configured()));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PROFILES_FILE_NAME);
        let store = configured_store();

        store.save(&path).unwrap();
        let restored = ProfileStore::try_load(&path).unwrap().unwrap();
        assert_eq!(restored, store);
        assert_eq!(restored.profile("private").unwrap().name(), "Lab");
    }

    #[test]
    fn test_document_layout() {
        let json = configured_store().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["bindings"]["intranet"], "Ethernet");
        assert_eq!(value["profile_names"]["private"], "Lab");
        assert_eq!(value["configs"]["intranet"]["interface"], "Ethernet");
        assert_eq!(value["configs"]["intranet"]["dhcp"], false);
        assert_eq!(value["configs"]["intranet"]["dns"], "10.0.0.1, 10.0.0.2");
        assert_eq!(value["configs"]["extranet"]["dhcp"], true);
        assert!(value["configs"]["extranet"].get("ip").is_none());
        assert!(value["configs"].get("private").is_none());
    }

    #[test]
    fn test_load_legacy_document() {
        let json = r#"{
            "configs": {
                "内网": {"interface": "以太网", "dhcp": false, "ip": "10.0.0.5",
                         "mask": "255.0.0.0", "gateway": "10.0.0.1", "dns": "10.0.0.1,8.8.8.8"},
                "外网": {"interface": "WLAN", "dhcp": true}
            },
            "bindings": {"内网": "以太网", "外网": "WLAN 2"},
            "profile_names": {"内网": "办公网", "外网": "外网", "专网": "专网"}
        }"#;
        let store = ProfileStore::from_json(json).unwrap();

        assert_eq!(store.len(), 3);
        let office = store.profile("内网").unwrap();
        assert_eq!(office.name(), "办公网");
        assert_eq!(
            office.ip.as_ref().and_then(|s| s.static_config()).map(|c| c.dns_servers.clone()),
            Some(vec!["10.0.0.1".to_string(), "8.8.8.8".to_string()])
        );
        // bindings wins over the copy inside configs
        assert_eq!(store.profile("外网").unwrap().bound_interface(), Some("WLAN 2"));
        assert!(store.profile("外网").unwrap().use_dhcp());
        assert_eq!(store.resolve("办公网").unwrap(), "内网");
    }

    #[test]
    fn test_missing_profile_names_uses_defaults() {
        let store = ProfileStore::from_json(r#"{"bindings": {"intranet": "Ethernet"}}"#).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.profile("intranet").unwrap().bound_interface(), Some("Ethernet"));
    }

    #[test]
    fn test_incomplete_static_entry_is_unconfigured() {
        let json = r#"{"configs": {"intranet": {"interface": "Ethernet", "dhcp": false, "ip": "10.0.0.5"}}}"#;
        let store = ProfileStore::from_json(json).unwrap();
        let profile = store.profile("intranet").unwrap();
        assert!(!profile.is_configured());
        assert_eq!(profile.bound_interface(), Some("Ethernet"));
    }

    #[test]
    fn test_load_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROFILES_FILE_NAME);
        assert!(ProfileStore::try_load(&path).unwrap().is_none());
        assert_eq!(ProfileStore::load(&path), ProfileStore::defaults());

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ProfileStore::try_load(&path),
            Err(Error::ConfigParseFailed(_))
        ));
        assert_eq!(ProfileStore::load(&path), ProfileStore::defaults());
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = ProfileStore::defaults()
            .save(&blocker.join("profiles.json"))
            .unwrap_err();
        assert!(err.is_persistence_error());
    }

    #[test]
    fn test_rename_duplicate_rejected() {
        let mut store = ProfileStore::defaults();
        let err = store.rename("intranet", "Extranet").unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
        assert_eq!(store.profile("intranet").unwrap().name(), "Intranet");
        assert_eq!(store.profile("extranet").unwrap().name(), "Extranet");
    }

    #[test]
    fn test_rename_keeps_key_and_fields() {
        let mut store = configured_store();
        let before = store.profile("intranet").unwrap().clone();
        assert!(store.rename("intranet", "Office").unwrap());
        let after = store.profile("intranet").unwrap();
        assert_eq!(after.name(), "Office");
        assert_eq!(after.bound_interface, before.bound_interface);
        assert_eq!(after.ip, before.ip);
        assert!(!store.rename("intranet", "Office").unwrap());
        assert!(matches!(store.rename("nope", "X"), Err(Error::ProfileNotFound(_))));
    }

    #[test]
    fn test_save_profile_validation_does_not_mutate() {
        let mut store = ProfileStore::defaults();
        store.bind("intranet", "Ethernet").unwrap();
        let before = store.clone();

        let settings = IpSettings::Static(StaticConfig::new(
            "10.0.0.5",
            "255.0.0.0",
            "",
            vec!["10.0.0.1".into()],
        ));
        let err = store.save_profile("intranet", settings).unwrap_err();
        assert!(matches!(err, Error::ValidationFailed(_)));
        assert_eq!(store, before);
    }

    #[test]
    fn test_save_profile_requires_binding() {
        let mut store = ProfileStore::defaults();
        let err = store.save_profile("intranet", IpSettings::Dhcp).unwrap_err();
        assert!(matches!(err, Error::Unbound(_)));
        assert!(!store.profile("intranet").unwrap().is_configured());
    }

    #[test]
    fn test_toggle_binding() {
        let mut store = ProfileStore::defaults();
        assert!(store.toggle_binding("intranet", "Ethernet").unwrap());
        assert!(store.toggle_binding("intranet", "Wi-Fi").unwrap());
        assert_eq!(store.profile("intranet").unwrap().bound_interface(), Some("Wi-Fi"));
        assert!(!store.toggle_binding("intranet", "Wi-Fi").unwrap());
        assert!(!store.profile("intranet").unwrap().is_bound());
        assert_eq!(store.unbind("intranet").unwrap(), None);
    }

    #[test]
    fn test_detect_active_profile() {
        let store = configured_store();
        let active = vec!["Wi-Fi".to_string()];
        assert_eq!(store.detect_active_profile(&active), Some("extranet"));
        assert_eq!(store.detect_active_profile(&[]), None);
    }

    #[test]
    fn test_detect_active_profile_follows_store_order() {
        let store = configured_store();
        let active = vec!["Wi-Fi".to_string(), "Ethernet".to_string()];
        assert_eq!(store.detect_active_profile(&active), Some("intranet"));

        let json = r#"{
            "bindings": {"外网": "WLAN", "内网": "以太网"},
            "profile_names": {"外网": "外网", "内网": "内网"}
        }"#;
        let store = ProfileStore::from_json(json).unwrap();
        let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["外网", "内网"]);
        let active = vec!["以太网".to_string(), "WLAN".to_string()];
        assert_eq!(store.detect_active_profile(&active), Some("外网"));

        let reloaded = ProfileStore::from_json(&store.to_json().unwrap()).unwrap();
        let keys: Vec<&str> = reloaded.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["外网", "内网"]);
    }

    #[test]
    fn test_other_bound_interfaces() {
        let store = configured_store();
        assert_eq!(store.other_bound_interfaces("intranet"), vec!["Wi-Fi".to_string()]);
    }

    #[test]
    fn test_data_store_paths() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataStore::with_config_dir(dir.path().to_path_buf());
        assert_eq!(data.profiles_file(), dir.path().join(PROFILES_FILE_NAME));

        let store = configured_store();
        data.save_profiles(&store).unwrap();
        assert_eq!(data.load_profiles(), store);

        fs::write(data.settings_file(), "profiles_file = \"custom.json\"\n").unwrap();
        let data = DataStore::with_config_dir(dir.path().to_path_buf());
        assert_eq!(data.profiles_file(), dir.path().join("custom.json"));
        assert_eq!(data.load_profiles(), ProfileStore::defaults());
    }
}

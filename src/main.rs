// Network Switcher - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Network Switcher
//!
//! Save and switch between named network interface profiles on Windows.
//!
//! Each profile binds a name such as "Intranet" to one interface and a
//! static or DHCP IPv4 configuration. Applying a profile drives `netsh`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod applier;
mod application;
mod models;
mod network_utils;
mod parser;
mod services;
mod storage;

use application::{user_message, Application};
use models::profile::split_dns_list;
use models::{ApplyReport, Result, StaticConfig};
use storage::DataStore;

/// Human-readable application name.
pub const APP_NAME: &str = "Network Switcher";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "network-switcher")]
#[command(about = "Save and switch between named network interface profiles", long_about = None)]
#[command(version)]
struct Cli {
    /// Use this directory for settings and profiles
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List profiles with their bindings and settings
    List,

    /// List network interfaces
    Interfaces {
        /// Only interfaces that currently have an IP address
        #[arg(long)]
        active: bool,
    },

    /// Show which profile is currently active
    Status,

    /// Show the live IP configuration of a profile's interface
    Show { profile: String },

    /// Save the live IP configuration of a profile's interface on the profile
    Capture { profile: String },

    /// Bind a profile to an interface
    Bind { profile: String, interface: String },

    /// Remove a profile's interface binding
    Unbind { profile: String },

    /// Unbind if bound to the interface, otherwise bind to it
    ToggleBind { profile: String, interface: String },

    /// Save a static configuration on a profile
    SetStatic(StaticArgs),

    /// Save a DHCP configuration on a profile
    SetDhcp { profile: String },

    /// Change a profile's display name
    Rename { profile: String, new_name: String },

    /// Apply a profile to its interface
    Apply(ApplyArgs),

    /// Enable every interface and switch it to DHCP
    DhcpAll {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective settings
    Settings {
        /// Write the effective settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Args)]
struct StaticArgs {
    profile: String,
    #[arg(long)]
    ip: String,
    #[arg(long)]
    mask: String,
    #[arg(long)]
    gateway: String,
    /// Comma separated, primary first
    #[arg(long)]
    dns: String,
}

#[derive(Args)]
struct ApplyArgs {
    profile: String,

    /// Disable the interfaces of the other profiles
    #[arg(long, conflicts_with = "keep_others")]
    disable_others: bool,

    /// Leave the interfaces of the other profiles alone
    #[arg(long)]
    keep_others: bool,

    /// Print the netsh commands without running them
    #[arg(long, conflicts_with = "json")]
    dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl ApplyArgs {
    fn disable_others(&self) -> Option<bool> {
        match (self.disable_others, self.keep_others) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn print_report(report: &ApplyReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("{} in {} ms", report.summary(), report.total_duration_ms);
    for failure in report.failures() {
        eprintln!(
            "  warning: [{}] {} ({}): {}",
            failure.command.interface().unwrap_or("-"),
            failure.command.description(),
            failure.status.as_str(),
            failure.detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn print_profiles(app: &Application) {
    if app.profiles().is_empty() {
        println!("No profiles");
        return;
    }
    for (key, profile) in app.profiles().iter() {
        let binding = profile.bound_interface().unwrap_or("(unbound)");
        let settings = profile
            .ip
            .as_ref()
            .map(|s| s.description())
            .unwrap_or_else(|| "(not configured)".to_string());
        println!("{:<12} {:<20} {:<24} {}", key, profile.name(), binding, settings);
    }
}

fn run(cli: Cli, data: DataStore) -> Result<()> {
    let mut app = Application::new(data);

    match cli.command {
        Command::List => print_profiles(&app),
        Command::Interfaces { active } => {
            let interfaces = if active {
                app.active_interfaces()?
            } else {
                app.interfaces()?
            };
            for interface in interfaces {
                println!("{}", interface);
            }
        }
        Command::Status => match app.active_profile()? {
            Some(key) => {
                let name = app.profiles().get(&key).map(|p| p.name()).unwrap_or(key.as_str());
                println!("Active profile: {} ({})", name, key);
            }
            None => println!("No profile is active"),
        },
        Command::Show { profile } => {
            let config = app.current_config(&profile)?;
            println!("DHCP:    {}", if config.dhcp { "yes" } else { "no" });
            println!("IP:      {}", config.ip);
            println!("Mask:    {}", config.mask);
            println!("Gateway: {}", config.gateway);
            println!("DNS:     {}", config.dns_joined());
        }
        Command::Capture { profile } => {
            let config = app.capture(&profile)?;
            println!("Saved {}", config.to_ip_settings().description());
        }
        Command::Bind { profile, interface } => {
            app.bind(&profile, &interface)?;
            println!("{} is bound to {}", profile, interface);
        }
        Command::Unbind { profile } => match app.unbind(&profile)? {
            Some(old) => println!("{} is no longer bound to {}", profile, old),
            None => println!("{} was not bound", profile),
        },
        Command::ToggleBind { profile, interface } => {
            if app.toggle_binding(&profile, &interface)? {
                println!("{} is bound to {}", profile, interface);
            } else {
                println!("{} is no longer bound to {}", profile, interface);
            }
        }
        Command::SetStatic(args) => {
            let config = StaticConfig::new(args.ip, args.mask, args.gateway, split_dns_list(&args.dns));
            app.save_static(&args.profile, config)?;
            println!("Saved static configuration for {}", args.profile);
        }
        Command::SetDhcp { profile } => {
            app.save_dhcp(&profile)?;
            println!("Saved DHCP configuration for {}", profile);
        }
        Command::Rename { profile, new_name } => {
            if app.rename(&profile, &new_name)? {
                println!("Renamed {} to {}", profile, new_name);
            }
        }
        Command::Apply(args) => {
            if args.dry_run {
                for line in app.plan(&args.profile, args.disable_others())? {
                    println!("{}", line);
                }
            } else {
                let report = app.apply(&args.profile, args.disable_others())?;
                print_report(&report, args.json)?;
            }
        }
        Command::DhcpAll { json } => {
            let report = app.reset_all_to_dhcp()?;
            print_report(&report, json)?;
        }
        Command::Settings { save } => {
            let data = app.data();
            println!("# {}", data.settings_file().display());
            println!("# config dir: {}", data.config_dir().display());
            println!("# profiles: {}", data.profiles_file().display());
            println!("# netsh output locale: {}", data.settings().locale.as_str());
            let settings = toml::to_string_pretty(data.settings())?;
            print!("{}", settings);
            if save {
                data.save_settings()?;
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let data = match &cli.config_dir {
        Some(dir) => DataStore::with_config_dir(dir.clone()),
        None => DataStore::new(),
    };

    // Initialize logging with appropriate level
    let log_level = if cli.debug {
        "debug".to_string()
    } else {
        data.settings().log_level.clone()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);

    if let Err(e) = services::privilege::ensure_admin() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(cli, data) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

// Network Switcher - Execution Results
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Execution result types for profile application.
//!
//! Individual netsh failures never abort an apply; they are recorded here so
//! the caller can report them after the whole sequence has run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::actions::NetshCommand;
use super::error::{Error, Result};

/// Status of a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// netsh exited with status 0.
    Success,
    /// netsh exited non-zero.
    Failed,
    /// netsh could not be started.
    Error,
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }
}

/// Outcome of one netsh invocation.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    /// The command that was executed.
    pub command: NetshCommand,
    /// Execution status.
    pub status: StepStatus,
    /// Process exit code, when the process ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Trimmed stdout/stderr text for failed commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CommandResult {
    pub fn success(command: NetshCommand) -> Self {
        Self {
            command,
            status: StepStatus::Success,
            exit_code: Some(0),
            detail: None,
        }
    }

    pub fn failed(command: NetshCommand, exit_code: Option<i32>, detail: impl Into<String>) -> Self {
        Self {
            command,
            status: StepStatus::Failed,
            exit_code,
            detail: Some(detail.into()),
        }
    }

    pub fn error(command: NetshCommand, detail: impl Into<String>) -> Self {
        Self {
            command,
            status: StepStatus::Error,
            exit_code: None,
            detail: Some(detail.into()),
        }
    }
}

/// Overall result of applying a profile.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    /// Profile key.
    pub profile_key: String,
    /// Profile display name.
    pub profile_name: String,
    /// Individual command results, in issue order.
    pub commands: Vec<CommandResult>,
    /// Total execution duration in milliseconds.
    pub total_duration_ms: u64,
    /// Execution start timestamp.
    pub started_at: DateTime<Utc>,
    /// Execution end timestamp.
    pub completed_at: DateTime<Utc>,
}

impl ApplyReport {
    pub fn new(profile_key: impl Into<String>, profile_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            profile_key: profile_key.into(),
            profile_name: profile_name.into(),
            commands: Vec::new(),
            total_duration_ms: 0,
            started_at: now,
            completed_at: now,
        }
    }

    pub fn add(&mut self, result: CommandResult) {
        self.commands.push(result);
    }

    /// Stamp the completion time.
    pub fn finalize(&mut self) {
        self.completed_at = Utc::now();
        self.total_duration_ms = (self.completed_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64;
    }

    /// Commands that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &CommandResult> {
        self.commands.iter().filter(|c| !c.status.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    /// Machine-readable rendering of the whole report.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::ConfigWriteFailed(e.to_string()))
    }

    /// Summary line for the user.
    pub fn summary(&self) -> String {
        let failed = self.failure_count();
        if failed == 0 {
            format!("Applied {} ({} commands)", self.profile_name, self.commands.len())
        } else {
            format!(
                "Applied {} ({} commands, {} reported errors)",
                self.profile_name,
                self.commands.len(),
                failed
            )
        }
    }
}

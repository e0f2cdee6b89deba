// Network Switcher - netsh Runner
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Process execution for netsh commands.
//!
//! Every call blocks until netsh exits. No timeout is applied.

use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::models::{CommandResult, Error, NetshCommand, Result};

/// Captured output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output carrying `stdout`.
    #[cfg(test)]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Best diagnostic text for a failed command.
    pub fn detail(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Executes netsh commands.
pub trait CommandRunner {
    /// Run one command and capture its output.
    ///
    /// Errors only when the process cannot be started; a non-zero exit code
    /// is reported through [`CommandOutput`].
    fn run(&self, command: &NetshCommand) -> Result<CommandOutput>;

    /// Run a state-changing command and record its outcome without failing.
    fn execute(&self, command: &NetshCommand) -> CommandResult {
        match self.run(command) {
            Ok(output) if output.success() => CommandResult::success(command.clone()),
            Ok(output) => {
                warn!("{} exited with {:?}: {}", command, output.exit_code, output.detail());
                CommandResult::failed(command.clone(), output.exit_code, output.detail())
            }
            Err(e) => {
                warn!("{} could not be started: {}", command, e);
                CommandResult::error(command.clone(), e.to_string())
            }
        }
    }
}

/// Runner that spawns the real netsh executable.
#[derive(Debug, Clone)]
pub struct NetshRunner {
    program: String,
}

impl NetshRunner {
    /// Create a runner for the netsh executable at `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl CommandRunner for NetshRunner {
    fn run(&self, command: &NetshCommand) -> Result<CommandOutput> {
        debug!("Running {}", command);

        let mut cmd = Command::new(&self.program);
        push_args(&mut cmd, &command.args());

        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::command_failed(&self.program, e.to_string()))?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: decode_output(&output.stdout),
            stderr: decode_output(&output.stderr),
        })
    }
}

/// Decode console output. netsh writes in the OEM code page, which is GBK
/// on Simplified Chinese Windows; anything that is not valid UTF-8 is read
/// as GBK. GBK is ASCII compatible, so English output is unaffected.
pub fn decode_output(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, had_errors) = encoding_rs::GBK.decode(bytes);
            if had_errors {
                debug!("Output is neither UTF-8 nor GBK, decoded lossily");
            }
            text.into_owned()
        }
    }
}

/// netsh parses `name="Ethernet 2"` itself, so arguments go through verbatim
/// instead of being re-quoted by the standard library.
#[cfg(target_os = "windows")]
fn push_args(cmd: &mut Command, args: &[String]) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x08000000;

    cmd.creation_flags(CREATE_NO_WINDOW);
    for arg in args {
        cmd.raw_arg(arg);
    }
}

#[cfg(not(target_os = "windows"))]
fn push_args(cmd: &mut Command, args: &[String]) {
    cmd.args(args);
}

/// Runner that records commands and replays canned output.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingRunner {
    issued: std::cell::RefCell<Vec<NetshCommand>>,
    responses: std::collections::HashMap<NetshCommand, CommandOutput>,
}

#[cfg(test)]
impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `stdout` and exit code 0.
    pub fn respond(mut self, command: NetshCommand, stdout: &str) -> Self {
        self.responses.insert(command, CommandOutput::ok(stdout));
        self
    }

    /// Answer `command` with a non-zero exit code.
    pub fn fail(mut self, command: NetshCommand, message: &str) -> Self {
        self.responses.insert(
            command,
            CommandOutput {
                exit_code: Some(1),
                stdout: message.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    /// Commands issued so far, in order.
    pub fn issued(&self) -> Vec<NetshCommand> {
        self.issued.borrow().clone()
    }

    /// Issued commands that change interface state.
    pub fn mutations(&self) -> Vec<NetshCommand> {
        self.issued().into_iter().filter(|c| !c.is_query()).collect()
    }

    pub fn clear(&self) {
        self.issued.borrow_mut().clear();
    }
}

#[cfg(test)]
impl CommandRunner for RecordingRunner {
    fn run(&self, command: &NetshCommand) -> Result<CommandOutput> {
        self.issued.borrow_mut().push(command.clone());
        Ok(self
            .responses
            .get(command)
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok("Ok.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StepStatus;

    #[test]
    fn test_execute_records_failure_without_error() {
        let runner = RecordingRunner::new().fail(
            NetshCommand::enable("Ethernet"),
            "The interface is already enabled.",
        );

        let result = runner.execute(&NetshCommand::enable("Ethernet"));
        assert_eq!(result.status, StepStatus::Failed);
        assert_eq!(result.exit_code, Some(1));
        assert_eq!(result.detail.as_deref(), Some("The interface is already enabled."));

        let result = runner.execute(&NetshCommand::disable("Wi-Fi"));
        assert_eq!(result.status, StepStatus::Success);
        assert_eq!(runner.issued().len(), 2);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let runner = NetshRunner::new("/nonexistent/netsh-binary");
        let err = runner.run(&NetshCommand::ShowInterfaces).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));

        let result = runner.execute(&NetshCommand::enable("Ethernet"));
        assert_eq!(result.status, StepStatus::Error);
        assert!(result.exit_code.is_none());
    }

    #[test]
    fn test_decode_output_gbk() {
        let (bytes, _, _) = encoding_rs::GBK.encode("Enabled   已连接   Dedicated   以太网\n");
        assert!(std::str::from_utf8(&bytes).is_err());
        assert_eq!(decode_output(&bytes), "Enabled   已连接   Dedicated   以太网\n");
    }

    #[test]
    fn test_decode_output_utf8_and_ascii() {
        assert_eq!(decode_output("IP 地址: 10.0.0.5".as_bytes()), "IP 地址: 10.0.0.5");
        assert_eq!(decode_output(b"Connected"), "Connected");
        assert_eq!(decode_output(b""), "");
    }

    #[test]
    fn test_output_detail_prefers_stderr() {
        let output = CommandOutput {
            exit_code: Some(1),
            stdout: "  stdout text \n".into(),
            stderr: String::new(),
        };
        assert_eq!(output.detail(), "stdout text");
        let output = CommandOutput {
            stderr: "boom".into(),
            ..output
        };
        assert_eq!(output.detail(), "boom");
    }
}

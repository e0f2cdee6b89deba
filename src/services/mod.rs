// Network Switcher - System Services
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Services that talk to the operating system:
//! - Runner: Executes netsh commands and captures their output
//! - Privilege: Administrator check at startup

pub mod privilege;
pub mod runner;

pub use runner::{decode_output, CommandOutput, CommandRunner, NetshRunner};

#[cfg(test)]
pub use runner::RecordingRunner;

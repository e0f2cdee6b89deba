// Network Switcher - Privilege Check
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Administrator check performed before any netsh command is issued.

use std::process::{Command, Stdio};
use tracing::debug;

use crate::models::{Error, Result};

/// Check whether the current process runs with administrative rights.
///
/// On Windows `net session` only succeeds from an elevated token. Elsewhere
/// the effective uid must be 0.
pub fn is_admin() -> bool {
    #[cfg(target_os = "windows")]
    let probe = Command::new("net")
        .arg("session")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success());

    #[cfg(not(target_os = "windows"))]
    let probe = Command::new("id")
        .arg("-u")
        .stderr(Stdio::null())
        .output()
        .map(|o| o.status.success() && String::from_utf8_lossy(&o.stdout).trim() == "0");

    match probe {
        Ok(admin) => admin,
        Err(e) => {
            debug!("Privilege probe failed: {}", e);
            false
        }
    }
}

/// Fail with [`Error::PermissionDenied`] unless running as administrator.
pub fn ensure_admin() -> Result<()> {
    require_admin(is_admin())
}

fn require_admin(admin: bool) -> Result<()> {
    if admin {
        Ok(())
    } else {
        Err(Error::PermissionDenied(
            "please run this program as administrator".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        assert!(require_admin(true).is_ok());
        assert!(matches!(require_admin(false), Err(Error::PermissionDenied(_))));
    }

    #[test]
    fn test_is_admin_does_not_panic() {
        // Result varies by environment
        let _ = is_admin();
    }
}

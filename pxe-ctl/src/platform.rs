//! Host capabilities used by the orchestration code.
//!
//! Everything that changes or inspects OS state outside of plain files goes
//! through [`Platform`]: running `launchctl` and querying interfaces. The
//! daemon managers only ever see the trait, so they can be driven against a
//! recording fake in tests.

use std::process::Command;

use log::debug;

use crate::error::{PxeError, Result};
use crate::interface::{query_system_interface, InterfaceInfo};

/// Captured output of a successful `launchctl` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
}

pub trait Platform {
    /// Run `launchctl` with `args`. A non-zero exit is a [`PxeError::Control`].
    fn launchctl(&self, args: &[&str]) -> Result<ExecOutput>;

    /// Current IPv4 address and netmask of `name`.
    fn query_interface(&self, name: &str) -> Result<InterfaceInfo>;
}

/// The real host: spawns the configured `launchctl` command line and reads
/// interfaces with `getifaddrs`.
#[derive(Debug, Clone)]
pub struct SystemPlatform {
    launchctl: Vec<String>,
}

impl SystemPlatform {
    /// `launchctl` is the program and leading arguments, e.g.
    /// `["/usr/bin/env", "launchctl"]`.
    pub fn new(launchctl: &[String]) -> Result<Self> {
        if launchctl.is_empty() {
            return Err(PxeError::Config(
                "launchctl command must not be empty".to_string(),
            ));
        }
        Ok(Self {
            launchctl: launchctl.to_vec(),
        })
    }
}

impl Platform for SystemPlatform {
    fn launchctl(&self, args: &[&str]) -> Result<ExecOutput> {
        let (program, prefix) = self
            .launchctl
            .split_first()
            .ok_or_else(|| PxeError::Config("launchctl command must not be empty".to_string()))?;
        debug!("exec {} {}", self.launchctl.join(" "), args.join(" "));

        let output = Command::new(program)
            .args(prefix)
            .args(args)
            .output()
            .map_err(|source| PxeError::io(program, source))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(PxeError::Control {
                command: args.join(" "),
                code: output.status.code().unwrap_or(-1),
                stdout,
                stderr,
            });
        }
        Ok(ExecOutput { stdout, stderr })
    }

    fn query_interface(&self, name: &str) -> Result<InterfaceInfo> {
        query_system_interface(name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Platform, SystemPlatform};
    use crate::error::PxeError;

    fn shell(script: &str) -> SystemPlatform {
        let command = ["/bin/sh", "-c", script, "sh"].map(String::from);
        SystemPlatform::new(&command).expect("platform")
    }

    #[test]
    fn captures_stdout_on_success() {
        let out = shell("echo \"$@\"").launchctl(&["list"]).expect("exec");
        assert_eq!(out.stdout.trim(), "list");
    }

    #[test]
    fn non_zero_exit_carries_both_streams() {
        let err = shell("echo out; echo nope >&2; exit 3")
            .launchctl(&["start", "com.apple.tftpd"])
            .expect_err("must fail");
        match err {
            PxeError::Control { command, code, stdout, stderr } => {
                assert_eq!(command, "start com.apple.tftpd");
                assert_eq!(code, 3);
                assert_eq!(stdout.trim(), "out");
                assert_eq!(stderr.trim(), "nope");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_is_io_error() {
        let platform =
            SystemPlatform::new(&["/nonexistent/launchctl".to_string()]).expect("platform");
        let err = platform.launchctl(&["list"]).expect_err("must fail");
        assert!(matches!(err, PxeError::Io { .. }));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(SystemPlatform::new(&[]), Err(PxeError::Config(_))));
    }
}

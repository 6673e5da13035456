//! Well-known paths and labels, with an optional TOML override file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PxeError, Result};

/// Host layout the PXE workflow operates on. Defaults match stock macOS.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// bootpd configuration file.
    pub bootpd_plist: PathBuf,
    /// Directory tftpd serves files from.
    pub tftp_root: PathBuf,
    /// Directory scanned for launchd job descriptors.
    pub launch_daemons_dir: PathBuf,
    /// Program and leading arguments used to run launchctl.
    pub launchctl: Vec<String>,
    /// Advisory lock held while enabling or disabling.
    pub lock_file: PathBuf,
    pub bootpd_label: String,
    pub tftpd_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bootpd_plist: PathBuf::from("/etc/bootpd.plist"),
            tftp_root: PathBuf::from("/private/tftpboot/"),
            launch_daemons_dir: PathBuf::from("/System/Library/LaunchDaemons/"),
            launchctl: vec!["/usr/bin/env".to_string(), "launchctl".to_string()],
            lock_file: PathBuf::from("/var/run/pxe-ctl.lock"),
            bootpd_label: "com.apple.bootpd".to_string(),
            tftpd_label: "com.apple.tftpd".to_string(),
        }
    }
}

/// Load settings from a TOML file. Keys left out keep their defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path).map_err(|err| PxeError::io(path, err))?;
    parse_settings(&raw).map_err(|err| match err {
        PxeError::Config(msg) => PxeError::Config(format!("{}: {msg}", path.display())),
        other => other,
    })
}

pub fn parse_settings(raw: &str) -> Result<Settings> {
    let settings: Settings =
        toml::from_str(raw).map_err(|err| PxeError::Config(err.to_string()))?;
    if settings.launchctl.is_empty() {
        return Err(PxeError::Config(
            "launchctl must name a program".to_string(),
        ));
    }
    Ok(settings)
}

//! launchd services addressed by label.
//!
//! A [`ServiceRegistry`] indexes the descriptor plists of a LaunchDaemons
//! directory by their `Label` key. [`Service`] handles wrap the
//! `launchctl` subcommands the PXE workflow needs.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use plist_core::{parse_file, Value};
use serde::Serialize;

use crate::error::{PxeError, Result};
use crate::platform::Platform;

/// Row of `launchctl list` for one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    /// `None` when launchd reports `-` (not running).
    pub pid: Option<u32>,
    /// Last exit status.
    pub status: i32,
}

/// Handle for one launchd service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    path: PathBuf,
    label: String,
}

impl Service {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }

    /// Descriptor plist this service was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// `launchctl load -w <path>`
    pub fn load(&self, platform: &dyn Platform) -> Result<()> {
        let path = self.path.to_string_lossy();
        platform.launchctl(&["load", "-w", &path])?;
        self.confirm("loaded");
        Ok(())
    }

    /// `launchctl unload -w <path>`
    pub fn unload(&self, platform: &dyn Platform) -> Result<()> {
        let path = self.path.to_string_lossy();
        platform.launchctl(&["unload", "-w", &path])?;
        self.confirm("unloaded");
        Ok(())
    }

    /// `launchctl start <label>`
    pub fn start(&self, platform: &dyn Platform) -> Result<()> {
        platform.launchctl(&["start", &self.label])?;
        self.confirm("started");
        Ok(())
    }

    /// `launchctl stop <label>`. launchd may restart the job on its own
    /// depending on its KeepAlive settings.
    pub fn stop(&self, platform: &dyn Platform) -> Result<()> {
        platform.launchctl(&["stop", &self.label])?;
        self.confirm("stopped");
        Ok(())
    }

    /// Unload during pre-cleanup, where an already-unloaded job is expected.
    pub fn unload_if_loaded(&self, platform: &dyn Platform) {
        if let Err(err) = self.unload(platform) {
            warn!("ignoring unload failure for {}: {err}", self.label);
        }
    }

    /// Current status from `launchctl list`, or `None` if the job is not listed.
    pub fn status(&self, platform: &dyn Platform) -> Result<Option<ServiceStatus>> {
        let out = platform.launchctl(&["list"])?;
        Ok(parse_list_status(&out.stdout, &self.label))
    }

    fn confirm(&self, action: &str) {
        debug!("{} {action} ({})", self.label, self.path.display());
        println!("Service {} {action}.", self.label);
    }
}

/// Find `label` in `launchctl list` output.
///
/// Each row is `PID Status Label`, with `-` standing in for an absent PID.
/// Rows whose first two columns do not parse are ignored, which also skips
/// the header row.
pub fn parse_list_status(output: &str, label: &str) -> Option<ServiceStatus> {
    output.lines().find_map(|line| {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 3 || words[words.len() - 1] != label {
            return None;
        }
        let pid = match words[0] {
            "-" => None,
            raw => Some(raw.parse::<u32>().ok()?),
        };
        let status = words[1].parse::<i32>().ok()?;
        Some(ServiceStatus { pid, status })
    })
}

/// Label-indexed view of a LaunchDaemons directory.
///
/// The directory is scanned at most once, on first use, and the result is
/// kept for the life of the registry.
#[derive(Debug)]
pub struct ServiceRegistry {
    dir: PathBuf,
    services: OnceCell<BTreeMap<String, Service>>,
}

impl ServiceRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            services: OnceCell::new(),
        }
    }

    /// Registry that never touches the filesystem.
    pub fn with_services(services: impl IntoIterator<Item = Service>) -> Self {
        let index: BTreeMap<String, Service> = services
            .into_iter()
            .map(|service| (service.label.clone(), service))
            .collect();
        Self {
            dir: PathBuf::new(),
            services: OnceCell::from(index),
        }
    }

    /// Build the index if it has not been built yet and return it.
    pub fn ensure_loaded(&self) -> &BTreeMap<String, Service> {
        self.services.get_or_init(|| scan_descriptors(&self.dir))
    }

    pub fn lookup(&self, label: &str) -> Option<&Service> {
        self.ensure_loaded().get(label)
    }

    pub fn from_label(&self, label: &str) -> Result<&Service> {
        self.lookup(label)
            .ok_or_else(|| PxeError::ServiceNotFound(label.to_string()))
    }
}

fn scan_descriptors(dir: &Path) -> BTreeMap<String, Service> {
    let mut index = BTreeMap::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("cannot read launchd descriptors in {}: {err}", dir.display());
            return index;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("plist") {
            continue;
        }
        let descriptor = match parse_file(&path) {
            Ok(value) => value,
            Err(err) => {
                debug!("skipping {}: {err}", path.display());
                continue;
            }
        };
        let Some(label) = descriptor.get("Label").and_then(Value::as_str) else {
            debug!("skipping {}: no Label", path.display());
            continue;
        };
        index.insert(label.to_string(), Service::new(path.clone(), label));
    }

    debug!("indexed {} launchd services from {}", index.len(), dir.display());
    index
}

//! TFTP side of the PXE service: which files are served, and the
//! `com.apple.tftpd` lifecycle.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path};

use crate::error::{PxeError, Result};
use crate::launchctl::{Service, ServiceRegistry};
use crate::platform::Platform;

/// True when `sub_path`, taken relative to the served `root`, names a regular
/// file tftpd will hand out.
///
/// Absolute paths and paths climbing out with `..` are never published and
/// are answered without touching the filesystem.
pub fn is_file_published(root: &Path, sub_path: &str) -> Result<bool> {
    let relative = Path::new(sub_path);
    if sub_path.is_empty()
        || relative.is_absolute()
        || relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return Ok(false);
    }

    let full = root.join(relative);
    match fs::metadata(&full) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(PxeError::io(full, err)),
    }
}

/// Lifecycle of the `com.apple.tftpd` launchd job.
pub struct Tftpd<'a> {
    platform: &'a dyn Platform,
    service: &'a Service,
}

impl<'a> Tftpd<'a> {
    pub fn new(
        platform: &'a dyn Platform,
        registry: &'a ServiceRegistry,
        label: &str,
    ) -> Result<Self> {
        Ok(Self {
            platform,
            service: registry.from_label(label)?,
        })
    }

    /// Reload and start tftpd.
    pub fn enable(&self) -> Result<()> {
        self.service.unload_if_loaded(self.platform);
        self.service.load(self.platform)?;
        self.service.start(self.platform)?;
        Ok(())
    }

    pub fn disable(&self) -> Result<()> {
        self.service.stop(self.platform)?;
        self.service.unload(self.platform)?;
        Ok(())
    }
}

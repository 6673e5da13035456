//! Enable and disable the PXE service as a whole.
//!
//! Enable validates everything it can before touching a daemon: the boot
//! file must already be published by tftpd, the interface must resolve, and
//! the range must sit on the interface's subnet. Only then are tftpd and
//! bootpd reconfigured, tftpd first because bootpd advertises a file tftpd
//! has to be able to serve.
//!
//! Disable reads the active bootpd configuration back and refuses to tear it
//! down unless its first subnet carries the caller's configuration name.

use log::{info, warn};

use crate::bootpd::{read_config, Bootpd, BootpdConfig, Subnet};
use crate::error::{PxeError, Result};
use crate::interface::InterfaceInfo;
use crate::launchctl::ServiceRegistry;
use crate::lock;
use crate::platform::Platform;
use crate::settings::Settings;
use crate::tftpd::{is_file_published, Tftpd};

/// Configuration name used when the caller does not supply one.
pub const DEFAULT_CONFIG_NAME: &str = "pxetgree.config";

/// What the operator asked for on enable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableRequest {
    pub config_name: String,
    pub interface: String,
    pub first_ip: String,
    pub last_ip: String,
    pub bootfile: String,
}

pub struct Pxe<'a> {
    platform: &'a dyn Platform,
    registry: &'a ServiceRegistry,
    settings: &'a Settings,
}

impl<'a> Pxe<'a> {
    pub fn new(
        platform: &'a dyn Platform,
        registry: &'a ServiceRegistry,
        settings: &'a Settings,
    ) -> Self {
        Self {
            platform,
            registry,
            settings,
        }
    }

    /// Validate `request` and build the bootpd configuration it would install.
    /// Nothing on the host is changed.
    pub fn plan(&self, request: &EnableRequest) -> Result<BootpdConfig> {
        if !is_file_published(&self.settings.tftp_root, &request.bootfile)? {
            return Err(PxeError::Pxe {
                file: request.bootfile.clone(),
                root: self.settings.tftp_root.clone(),
            });
        }

        let intf = InterfaceInfo::from_name(self.platform, &request.interface)?;
        let subnet = Subnet::new(
            request.config_name.as_str(),
            &intf,
            &request.first_ip,
            &request.last_ip,
            intf.address_text(),
            request.bootfile.as_str(),
        )?;
        Ok(BootpdConfig::new(&[intf.name()], &[subnet]))
    }

    /// Serve `request.bootfile` over TFTP and hand out leases in the range.
    ///
    /// The lock is taken after validation; a rejected request creates no
    /// lock file. If bootpd fails after tftpd came up, tftpd is left running
    /// and the bootpd error is returned.
    pub fn enable(&self, request: &EnableRequest) -> Result<BootpdConfig> {
        let config = self.plan(request)?;
        let xml = config.to_xml()?;
        let tftpd = Tftpd::new(self.platform, self.registry, &self.settings.tftpd_label)?;
        let bootpd = Bootpd::new(
            self.platform,
            self.registry,
            &self.settings.bootpd_label,
            &self.settings.bootpd_plist,
        )?;

        let _lock = lock::acquire(&self.settings.lock_file)?;
        tftpd.enable()?;
        if let Err(err) = bootpd.enable(&xml) {
            warn!(
                "{} remains enabled after {} failed to start",
                self.settings.tftpd_label, self.settings.bootpd_label
            );
            return Err(err);
        }
        info!(
            "PXE configuration {} enabled on {}",
            request.config_name, request.interface
        );
        Ok(config)
    }

    /// Tear down the PXE service if the active configuration is `config_name`.
    pub fn disable(&self, config_name: &str) -> Result<()> {
        let _lock = lock::acquire(&self.settings.lock_file)?;

        let active = read_config(&self.settings.bootpd_plist)?;
        match active.owner() {
            Some(owner) if owner == config_name => {}
            other => {
                return Err(PxeError::Ownership {
                    expected: config_name.to_string(),
                    found: other.unwrap_or("<none>").to_string(),
                })
            }
        }

        let bootpd = Bootpd::new(
            self.platform,
            self.registry,
            &self.settings.bootpd_label,
            &self.settings.bootpd_plist,
        )?;
        let tftpd = Tftpd::new(self.platform, self.registry, &self.settings.tftpd_label)?;

        bootpd.disable()?;
        tftpd.disable()?;
        info!("PXE configuration {config_name} disabled");
        Ok(())
    }
}

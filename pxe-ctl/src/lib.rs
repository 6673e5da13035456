//! PXE boot provisioning for macOS hosts.
//!
//! macOS ships two launchd jobs that together make a PXE server:
//! `com.apple.tftpd` serves files out of `/private/tftpboot/`, and
//! `com.apple.bootpd` answers DHCP requests according to
//! `/etc/bootpd.plist`. This library validates a requested boot setup,
//! writes the bootpd configuration, and drives both jobs through
//! `launchctl`.
//!
//! # Architecture
//!
//! ## Addressing
//!
//! - [`address`]: Dotted-quad conversion and subnet membership
//! - [`interface`]: IPv4 address and netmask of a network interface
//!
//! ## Host control
//!
//! - [`platform`]: The seam to the host: `launchctl` and interface queries
//! - [`launchctl`]: launchd services indexed by label
//! - [`lock`]: Advisory lock serializing enable/disable
//! - [`settings`]: Well-known paths and labels, overridable from TOML
//!
//! ## PXE
//!
//! - [`tftpd`]: Published boot files and the tftpd job
//! - [`bootpd`]: The bootpd configuration model and the bootpd job
//! - [`pxe`]: Enable and disable the whole service
//! - [`report`]: Terminal rendering of status and configuration
//!
//! # Examples
//!
//! ```ignore
//! use pxe_ctl::launchctl::ServiceRegistry;
//! use pxe_ctl::platform::SystemPlatform;
//! use pxe_ctl::pxe::{EnableRequest, Pxe};
//! use pxe_ctl::settings::Settings;
//!
//! let settings = Settings::default();
//! let platform = SystemPlatform::new(&settings.launchctl)?;
//! let registry = ServiceRegistry::new(&settings.launch_daemons_dir);
//! let pxe = Pxe::new(&platform, &registry, &settings);
//!
//! pxe.enable(&EnableRequest {
//!     config_name: "pxetgree.config".to_string(),
//!     interface: "en0".to_string(),
//!     first_ip: "192.168.1.100".to_string(),
//!     last_ip: "192.168.1.200".to_string(),
//!     bootfile: "boot/image.efi".to_string(),
//! })?;
//! ```

pub mod address;
pub mod bootpd;
pub mod error;
pub mod interface;
pub mod launchctl;
pub mod lock;
pub mod platform;
pub mod pxe;
pub mod report;
pub mod settings;
pub mod tftpd;

#[cfg(test)]
mod fake;

pub use error::{PxeError, Result};

//! DHCP side of the PXE service: the `/etc/bootpd.plist` model and the
//! `com.apple.bootpd` lifecycle.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::info;
use plist_core::{parse_file, Dict, Value};
use serde::Serialize;

use crate::address::ipv4_to_int;
use crate::error::{PxeError, Result};
use crate::interface::InterfaceInfo;
use crate::launchctl::{Service, ServiceRegistry};
use crate::platform::Platform;

/// One validated DHCP subnet offering a TFTP boot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    name: String,
    intf: InterfaceInfo,
    range_low: String,
    range_high: String,
    tftp_server: String,
    boot_file: String,
}

impl Subnet {
    /// Validate a range on `intf`. Both endpoints must be on the interface's
    /// subnet and `range_high` must not sort below `range_low`.
    pub fn new(
        name: impl Into<String>,
        intf: &InterfaceInfo,
        range_low: &str,
        range_high: &str,
        tftp_server: impl Into<String>,
        boot_file: impl Into<String>,
    ) -> Result<Self> {
        let low = ipv4_to_int(range_low)?;
        let high = ipv4_to_int(range_high)?;

        for endpoint in [range_low, range_high] {
            if !intf.is_link_local(endpoint)? {
                return Err(PxeError::Validation(format!(
                    "{endpoint} is not on {} ({}/{})",
                    intf.name(),
                    intf.network_text(),
                    intf.netmask_text()
                )));
            }
        }
        if high < low {
            return Err(PxeError::Validation(format!(
                "range end {range_high} is below range start {range_low}"
            )));
        }

        Ok(Self {
            name: name.into(),
            intf: intf.clone(),
            range_low: range_low.to_string(),
            range_high: range_high.to_string(),
            tftp_server: tftp_server.into(),
            boot_file: boot_file.into(),
        })
    }

    /// Persisted form of this subnet.
    ///
    /// Options 66 and 67 are written as plain `<string>` values rather than
    /// base64 `<data>`; PXE clients pick the boot file name up correctly
    /// from the string form.
    pub fn to_record(&self) -> SubnetRecord {
        SubnetRecord {
            name: self.name.clone(),
            net_mask: self.intf.netmask_text(),
            net_address: self.intf.network_text(),
            net_range: (self.range_low.clone(), self.range_high.clone()),
            allocate: true,
            tftp_server: Some(self.tftp_server.clone()),
            boot_file: Some(self.boot_file.clone()),
        }
    }
}

/// A `Subnets` entry as stored in the bootpd configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetRecord {
    pub name: String,
    pub net_mask: String,
    pub net_address: String,
    pub net_range: (String, String),
    pub allocate: bool,
    /// `dhcp_option_66`, the TFTP server address.
    pub tftp_server: Option<String>,
    /// `dhcp_option_67`, the boot file name.
    pub boot_file: Option<String>,
}

impl SubnetRecord {
    pub fn to_value(&self) -> Value {
        let mut dict = Dict::new();
        dict.insert("name".to_string(), Value::from(self.name.as_str()));
        dict.insert("net_mask".to_string(), Value::from(self.net_mask.as_str()));
        dict.insert(
            "net_address".to_string(),
            Value::from(self.net_address.as_str()),
        );
        dict.insert(
            "net_range".to_string(),
            Value::from(vec![
                Value::from(self.net_range.0.as_str()),
                Value::from(self.net_range.1.as_str()),
            ]),
        );
        dict.insert("allocate".to_string(), Value::from(self.allocate));
        if let Some(server) = &self.tftp_server {
            dict.insert("dhcp_option_66".to_string(), Value::from(server.as_str()));
        }
        if let Some(file) = &self.boot_file {
            dict.insert("dhcp_option_67".to_string(), Value::from(file.as_str()));
        }
        Value::from(dict)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let text = |key: &str| -> Result<String> {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| PxeError::Schema(format!("subnet is missing string '{key}'")))
        };
        let optional = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        let range = value
            .get("net_range")
            .and_then(Value::as_array)
            .ok_or_else(|| PxeError::Schema("subnet is missing array 'net_range'".to_string()))?;
        let net_range = match range {
            [low, high] => match (low.as_str(), high.as_str()) {
                (Some(low), Some(high)) => (low.to_string(), high.to_string()),
                _ => {
                    return Err(PxeError::Schema(
                        "net_range must hold two strings".to_string(),
                    ))
                }
            },
            _ => {
                return Err(PxeError::Schema(format!(
                    "net_range must hold two addresses, found {}",
                    range.len()
                )))
            }
        };

        Ok(Self {
            name: text("name")?,
            net_mask: text("net_mask")?,
            net_address: text("net_address")?,
            net_range,
            allocate: value
                .get("allocate")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            tftp_server: optional("dhcp_option_66"),
            boot_file: optional("dhcp_option_67"),
        })
    }
}

/// Contents of the bootpd configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootpdConfig {
    pub dhcp_enabled: Vec<String>,
    pub subnets: Vec<SubnetRecord>,
}

impl BootpdConfig {
    pub fn new(interfaces: &[&str], subnets: &[Subnet]) -> Self {
        Self {
            dhcp_enabled: interfaces.iter().map(|name| name.to_string()).collect(),
            subnets: subnets.iter().map(Subnet::to_record).collect(),
        }
    }

    /// Name of the first subnet, which tags who wrote this configuration.
    pub fn owner(&self) -> Option<&str> {
        self.subnets.first().map(|subnet| subnet.name.as_str())
    }

    pub fn to_plist(&self) -> Value {
        let mut dict = Dict::new();
        dict.insert(
            "dhcp_enabled".to_string(),
            Value::from(
                self.dhcp_enabled
                    .iter()
                    .map(|name| Value::from(name.as_str()))
                    .collect::<Vec<_>>(),
            ),
        );
        dict.insert(
            "Subnets".to_string(),
            Value::from(
                self.subnets
                    .iter()
                    .map(SubnetRecord::to_value)
                    .collect::<Vec<_>>(),
            ),
        );
        Value::from(dict)
    }

    /// Interpret a parsed plist. Keys other than `dhcp_enabled` and `Subnets`
    /// are ignored; missing lists are treated as empty.
    pub fn from_plist(value: &Value) -> Result<Self> {
        if value.as_dict().is_none() {
            return Err(PxeError::Schema(format!(
                "root is <{}>, expected <dict>",
                value.type_name()
            )));
        }

        let dhcp_enabled = match value.get("dhcp_enabled") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        PxeError::Schema("dhcp_enabled must hold strings".to_string())
                    })
                })
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(PxeError::Schema(format!(
                    "dhcp_enabled is <{}>, expected <array>",
                    other.type_name()
                )))
            }
        };

        let subnets = match value.get("Subnets") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(SubnetRecord::from_value)
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(PxeError::Schema(format!(
                    "Subnets is <{}>, expected <array>",
                    other.type_name()
                )))
            }
        };

        Ok(Self {
            dhcp_enabled,
            subnets,
        })
    }

    /// XML property list text for this configuration.
    pub fn to_xml(&self) -> Result<String> {
        let bytes = plist_core::write(&self.to_plist())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Read and interpret the configuration file at `path`.
pub fn read_config(path: &Path) -> Result<BootpdConfig> {
    let value = parse_file(path).map_err(|source| match source {
        plist_core::ParseError::Io(err) => PxeError::io(path, err),
        source => PxeError::PlistParse {
            path: path.to_path_buf(),
            source,
        },
    })?;
    BootpdConfig::from_plist(&value)
}

/// Lifecycle of the `com.apple.bootpd` launchd job and its config file.
pub struct Bootpd<'a> {
    platform: &'a dyn Platform,
    service: &'a Service,
    config_path: PathBuf,
}

impl<'a> Bootpd<'a> {
    pub fn new(
        platform: &'a dyn Platform,
        registry: &'a ServiceRegistry,
        label: &str,
        config_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            platform,
            service: registry.from_label(label)?,
            config_path: config_path.into(),
        })
    }

    /// Replace the configuration with `xml` and (re)start bootpd.
    ///
    /// The job is unloaded first so it cannot read the file mid-replacement,
    /// and the new file is fully in place before the job is loaded again.
    pub fn enable(&self, xml: &str) -> Result<()> {
        self.service.unload_if_loaded(self.platform);
        remove_if_present(&self.config_path)?;
        write_atomically(&self.config_path, xml.as_bytes())?;
        info!("wrote {}", self.config_path.display());
        self.service.load(self.platform)?;
        self.service.start(self.platform)?;
        Ok(())
    }

    /// Stop bootpd and remove its configuration. The file must exist.
    pub fn disable(&self) -> Result<()> {
        self.service.stop(self.platform)?;
        self.service.unload(self.platform)?;
        fs::remove_file(&self.config_path).map_err(|err| PxeError::io(&self.config_path, err))?;
        info!("removed {}", self.config_path.display());
        Ok(())
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(PxeError::io(path, err)),
    }
}

/// Write and sync a sibling temp file, then rename it over `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".pxe-ctl.tmp");
    let tmp = path.with_file_name(tmp_name);

    let mut file = File::create(&tmp).map_err(|err| PxeError::io(&tmp, err))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .map_err(|err| {
            let _ = fs::remove_file(&tmp);
            PxeError::io(&tmp, err)
        })?;
    drop(file);
    fs::rename(&tmp, path).map_err(|err| {
        let _ = fs::remove_file(&tmp);
        PxeError::io(path, err)
    })
}

use nix::ifaddrs::getifaddrs;
use serde::Serialize;

use crate::address::{int_to_ipv4, is_link_local};
use crate::error::{PxeError, Result};
use crate::platform::Platform;

/// IPv4 identity of one network interface, captured from live OS state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    name: String,
    address: u32,
    netmask: u32,
    network_address: u32,
}

impl InterfaceInfo {
    /// Build from a known address and netmask; the network address is derived.
    pub fn new(name: impl Into<String>, address: u32, netmask: u32) -> Self {
        Self {
            name: name.into(),
            address,
            netmask,
            network_address: address & netmask,
        }
    }

    /// Resolve `ifname` through the platform's interface query.
    pub fn from_name(platform: &dyn Platform, ifname: &str) -> Result<Self> {
        platform.query_interface(ifname)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn network_address(&self) -> u32 {
        self.network_address
    }

    pub fn address_text(&self) -> String {
        int_to_ipv4(self.address)
    }

    pub fn netmask_text(&self) -> String {
        int_to_ipv4(self.netmask)
    }

    pub fn network_text(&self) -> String {
        int_to_ipv4(self.network_address)
    }

    /// True when `candidate` is on this interface's subnet.
    pub fn is_link_local(&self, candidate: &str) -> Result<bool> {
        is_link_local(candidate, self.network_address, self.netmask)
    }
}

/// Look up the first IPv4 address and netmask the kernel reports for `name`.
pub fn query_system_interface(name: &str) -> Result<InterfaceInfo> {
    let addrs = getifaddrs().map_err(|errno| PxeError::Interface {
        name: name.to_string(),
        reason: format!("getifaddrs failed: {errno}"),
    })?;

    let mut seen = false;
    for ifa in addrs {
        if ifa.interface_name != name {
            continue;
        }
        seen = true;

        let Some(address) = ifa.address.as_ref().and_then(|a| a.as_sockaddr_in()) else {
            continue;
        };
        let Some(netmask) = ifa.netmask.as_ref().and_then(|a| a.as_sockaddr_in()) else {
            continue;
        };
        return Ok(InterfaceInfo::new(
            name,
            u32::from(address.ip()),
            u32::from(netmask.ip()),
        ));
    }

    let reason = if seen {
        "no IPv4 address assigned"
    } else {
        "no such interface"
    };
    Err(PxeError::Interface {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

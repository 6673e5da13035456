//! Dotted-quad IPv4 text and 32-bit integer conversions.

use std::net::Ipv4Addr;

use crate::error::{PxeError, Result};

/// Convert dotted-quad text into its 32-bit value.
///
/// Exactly four dot-separated decimal octets are accepted, each in `0..=255`
/// and written without sign or leading zeros, so every accepted text is the
/// canonical form of its value.
pub fn ipv4_to_int(text: &str) -> Result<u32> {
    let octets: Vec<&str> = text.split('.').collect();
    if octets.len() != 4 {
        return Err(PxeError::Format(text.to_string()));
    }

    octets.iter().try_fold(0u32, |acc, octet| {
        let canonical = !octet.is_empty()
            && octet.bytes().all(|b| b.is_ascii_digit())
            && !(octet.len() > 1 && octet.starts_with('0'));
        if !canonical {
            return Err(PxeError::Format(text.to_string()));
        }
        let value: u8 = octet
            .parse()
            .map_err(|_| PxeError::Format(text.to_string()))?;
        Ok((acc << 8) | u32::from(value))
    })
}

/// Render a 32-bit value as dotted-quad text.
pub fn int_to_ipv4(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

/// True when `candidate` lies inside the network `network_address/netmask`.
pub fn is_link_local(candidate: &str, network_address: u32, netmask: u32) -> Result<bool> {
    Ok((ipv4_to_int(candidate)? & netmask) == network_address)
}

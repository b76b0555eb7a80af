//! CIDR network descriptors and membership tests.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use tracing::debug;

use super::ipv4::{parse_ipv4, parse_prefix_token};
use super::netmask::netmask_addr;
use super::NetError;

/// A `base/prefix` pair such as `192.168.128.0/22`.
///
/// The base is kept exactly as written; host bits are not masked off.  The
/// membership range of the partial octet therefore starts at the base octet
/// itself (see [`NetworkDescriptor::contains`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkDescriptor {
    base: Ipv4Addr,
    prefix: u8,
}

impl NetworkDescriptor {
    /// Creates a descriptor from a base address and a prefix length.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::InvalidPrefix`] when `prefix > 32`.
    pub fn new(base: Ipv4Addr, prefix: u8) -> Result<Self, NetError> {
        if prefix > 32 {
            return Err(NetError::InvalidPrefix(prefix.to_string()));
        }
        Ok(Self { base, prefix })
    }

    /// The base address as written.
    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    /// The prefix length in `0..=32`.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The dotted-quad netmask for this prefix.
    pub fn netmask(&self) -> Ipv4Addr {
        netmask_addr(self.prefix)
    }

    /// Returns `true` if `ip` belongs to this network.
    ///
    /// The first `prefix / 8` octets must be equal.  When the prefix ends
    /// mid-octet, the IP's octet at that position must lie in
    /// `[base_octet, base_octet + 2^(8 - prefix % 8) - 1]`.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        let full = usize::from(self.prefix / 8);
        let partial = u32::from(self.prefix % 8);
        let base = self.base.octets();
        let ip = ip.octets();

        if base[..full] != ip[..full] {
            return false;
        }
        if partial == 0 {
            return true;
        }

        let start = u16::from(base[full]);
        let end = start + (1u16 << (8 - partial)) - 1;
        (start..=end).contains(&u16::from(ip[full]))
    }
}

impl FromStr for NetworkDescriptor {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetError::InvalidNetwork(s.to_string());

        let (base, prefix) = s.split_once('/').ok_or_else(invalid)?;
        let base = parse_ipv4(base).map_err(|_| invalid())?;
        let prefix = parse_prefix_token(prefix).ok_or_else(invalid)?;
        Ok(Self { base, prefix })
    }
}

impl fmt::Display for NetworkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

/// Returns `true` if `input` is exactly `<ipv4>/<prefix>`.
pub fn is_ipv4_with_prefix(input: &str) -> bool {
    input.parse::<NetworkDescriptor>().is_ok()
}

/// String-level membership test: is `ip` inside `network` (`base/prefix`)?
///
/// Malformed input on either side yields `false`.
///
/// ```rust
/// use termkit_core::is_ip_in_network;
///
/// assert!(is_ip_in_network("192.168.128.0/22", "192.168.131.1"));
/// assert!(!is_ip_in_network("192.168.128.0/22", "192.168.132.1"));
/// ```
pub fn is_ip_in_network(network: &str, ip: &str) -> bool {
    let network = match network.parse::<NetworkDescriptor>() {
        Ok(network) => network,
        Err(e) => {
            debug!("membership test on malformed network: {e}");
            return false;
        }
    };
    match parse_ipv4(ip) {
        Ok(ip) => network.contains(ip),
        Err(e) => {
            debug!("membership test on malformed address: {e}");
            false
        }
    }
}

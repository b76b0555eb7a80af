//! Table-driven conversion between prefix lengths and dotted-quad netmasks.
//!
//! A netmask octet can only ever take one of nine values.  The index of a value
//! in [`MASK_OCTETS`] is the number of leading one-bits it contributes, so both
//! directions of the conversion are plain table lookups.

use std::net::Ipv4Addr;

use tracing::{debug, error};

use super::ipv4::parse_octet;
use super::NetError;

/// Legal netmask octets, indexed by the number of leading one-bits.
pub const MASK_OCTETS: [u8; 9] = [0, 128, 192, 224, 240, 248, 252, 254, 255];

/// Converts a prefix length to its dotted-quad netmask.
///
/// The first `prefix / 8` octets are 255, the next octet (if any) is
/// `MASK_OCTETS[prefix % 8]` and the rest are 0.
///
/// ```rust
/// use termkit_core::prefix_to_netmask;
///
/// assert_eq!(prefix_to_netmask(20).unwrap(), "255.255.240.0");
/// ```
///
/// # Errors
///
/// Returns [`NetError::InvalidPrefix`] when `prefix > 32`.  Callers treat this
/// as a programming error rather than bad user input.
pub fn prefix_to_netmask(prefix: u8) -> Result<String, NetError> {
    if prefix > 32 {
        return Err(NetError::InvalidPrefix(prefix.to_string()));
    }
    Ok(netmask_addr(prefix).to_string())
}

/// Converts a dotted-quad netmask to its prefix length.
///
/// Returns `None` unless `netmask` matches the netmask grammar: any number of
/// leading `255` octets, then one octet from [`MASK_OCTETS`], then only `0`
/// octets.  Non-contiguous masks such as `255.0.255.0` are rejected rather than
/// approximated.
pub fn netmask_to_prefix(netmask: &str) -> Option<u8> {
    let tokens: Vec<&str> = netmask.split('.').collect();
    if tokens.len() != 4 || !has_netmask_shape(&tokens) {
        debug!("rejecting malformed netmask {netmask:?}");
        return None;
    }

    let mut prefix = 0u8;
    for token in tokens {
        match mask_bits(token) {
            Some(bits) => prefix += bits,
            None => {
                error!("netmask octet {token:?} passed the grammar but is not in the mask table");
                return None;
            }
        }
    }
    Some(prefix)
}

/// Netmask for a prefix already known to be in `0..=32`.
///
/// Larger values saturate to `/32`.
pub(crate) fn netmask_addr(prefix: u8) -> Ipv4Addr {
    let prefix = prefix.min(32);
    let full = usize::from(prefix / 8);
    let partial = usize::from(prefix % 8);

    let mut octets = [0u8; 4];
    for octet in octets.iter_mut().take(full) {
        *octet = 255;
    }
    if let Some(octet) = octets.get_mut(full) {
        *octet = MASK_OCTETS[partial];
    }
    Ipv4Addr::from(octets)
}

/// Number of one-bits a canonical netmask octet contributes.
fn mask_bits(token: &str) -> Option<u8> {
    let value = parse_octet(token)?;
    MASK_OCTETS
        .iter()
        .position(|octet| *octet == value)
        .map(|bits| bits as u8)
}

fn has_netmask_shape(tokens: &[&str]) -> bool {
    // The boundary is the first octet that is not 255; an all-255 mask puts it
    // on the last octet.
    let boundary = tokens
        .iter()
        .position(|token| *token != "255")
        .unwrap_or(tokens.len() - 1);

    mask_bits(tokens[boundary]).is_some() && tokens[boundary + 1..].iter().all(|token| *token == "0")
}

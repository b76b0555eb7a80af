//! Dotted-quad and prefix-length parsing.

use std::net::Ipv4Addr;

use super::NetError;

/// Parses a dotted-quad address using the strict octet grammar.
///
/// Unlike [`Ipv4Addr::from_str`], the accepted language is pinned down here so
/// that it cannot drift with the standard library: each octet is 1-3 digits,
/// has no leading zero and is at most 255.
///
/// # Errors
///
/// Returns [`NetError::InvalidIpv4`] for anything outside the grammar.
///
/// [`Ipv4Addr::from_str`]: std::str::FromStr::from_str
pub fn parse_ipv4(input: &str) -> Result<Ipv4Addr, NetError> {
    let invalid = || NetError::InvalidIpv4(input.to_string());

    let mut octets = [0u8; 4];
    let mut tokens = input.split('.');
    for octet in &mut octets {
        *octet = tokens.next().and_then(parse_octet).ok_or_else(invalid)?;
    }
    if tokens.next().is_some() {
        return Err(invalid());
    }
    Ok(Ipv4Addr::from(octets))
}

/// Returns `true` if `input` is exactly one dotted-quad IPv4 address.
pub fn is_ipv4(input: &str) -> bool {
    parse_ipv4(input).is_ok()
}

/// Parses a free-standing prefix length such as a command-line argument.
///
/// One or two ASCII digits are accepted (so `"08"` is 8); the value must be
/// in `0..=32`.  The stricter CIDR grammar used after a `/` is applied by
/// [`NetworkDescriptor`](super::NetworkDescriptor).
///
/// # Errors
///
/// Returns [`NetError::InvalidPrefix`] for non-numeric or out-of-range input.
pub fn parse_prefix(input: &str) -> Result<u8, NetError> {
    let bytes = input.as_bytes();
    if bytes.is_empty() || bytes.len() > 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(NetError::InvalidPrefix(input.to_string()));
    }
    match input.parse::<u8>() {
        Ok(prefix) if prefix <= 32 => Ok(prefix),
        _ => Err(NetError::InvalidPrefix(input.to_string())),
    }
}

/// One octet of the `ipv4` rule.
pub(crate) fn parse_octet(token: &str) -> Option<u8> {
    let bytes = token.as_bytes();
    if bytes.is_empty() || bytes.len() > 3 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    // u8 parsing rejects 256..=999.
    token.parse().ok()
}

/// The `prefix` rule that follows a `/` in CIDR notation.
pub(crate) fn parse_prefix_token(token: &str) -> Option<u8> {
    let bytes = token.as_bytes();
    if bytes.is_empty() || bytes.len() > 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    token.parse().ok().filter(|prefix| *prefix <= 32)
}

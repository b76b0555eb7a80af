//! IPv4 addressing: dotted quads, CIDR prefixes, netmasks and routes.
//!
//! Everything in this module is a pure function over strings and integers.
//! Validation follows a fixed grammar rather than a regular-expression engine:
//!
//! ```text
//! octet      ::= "25" [0-5] | "2" [0-4] DIGIT | "1" DIGIT DIGIT | [1-9] DIGIT | DIGIT
//! ipv4       ::= octet "." octet "." octet "." octet
//! prefix     ::= "3" [0-2] | [12] DIGIT | DIGIT
//! ipv4_pfx   ::= ipv4 "/" prefix
//! route      ::= ipv4_pfx " via " ipv4
//! route_list ::= route ("\n" route)* ["\n"]
//! mask_octet ::= "255" | "254" | "252" | "248" | "240" | "224" | "192" | "128" | "0"
//! netmask    ::= "255.255.255." mask_octet
//!              | "255.255." mask_octet ".0"
//!              | "255." mask_octet ".0.0"
//!              | mask_octet ".0.0.0"
//! ```
//!
//! Every rule is a full-string match: trailing whitespace, leading zeros and
//! extra dots are rejected.

use thiserror::Error;

pub mod ipv4;
pub mod netmask;
pub mod network;
pub mod route;

pub use ipv4::{is_ipv4, parse_ipv4, parse_prefix};
pub use netmask::{netmask_to_prefix, prefix_to_netmask, MASK_OCTETS};
pub use network::{is_ip_in_network, is_ipv4_with_prefix, NetworkDescriptor};
pub use route::{is_ipv4_route, is_ipv4_route_list, parse_route_list, Route};

/// Validation failures produced by the addressing helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetError {
    /// The input is not a dotted-quad IPv4 address.
    #[error("invalid IPv4 address: {0:?}")]
    InvalidIpv4(String),

    /// The prefix is non-numeric or outside `0..=32`.
    #[error("invalid prefix: {0:?} (expected 0-32)")]
    InvalidPrefix(String),

    /// The input is not of the form `<ipv4>/<prefix>`.
    #[error("invalid network (expected <ipv4>/<prefix>): {0:?}")]
    InvalidNetwork(String),

    /// A route line is not of the form `<ipv4>/<prefix> via <ipv4>`.
    ///
    /// `line` is 1-based.
    #[error("invalid route on line {line}: {input:?}")]
    InvalidRoute { line: usize, input: String },
}

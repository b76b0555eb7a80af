//! # termkit-core
//!
//! Shared library for termkit containing the IPv4 addressing helpers and the
//! time-window advisory lock.
//!
//! The `net` module has zero dependencies on OS APIs.  The `lock` module talks
//! to the file system only through the [`lock::LockStore`] trait, so tests can
//! substitute an in-memory or mocked directory.
//!
//! # Architecture overview
//!
//! - **`net`** – Validation and conversion between dotted-quad addresses,
//!   CIDR prefixes and netmasks.  Netmask conversion is table-driven: every
//!   legal netmask octet is one of nine values, so the prefix contribution of
//!   an octet is simply its index in [`net::MASK_OCTETS`].
//!
//! - **`lock`** – Advisory locks represented by empty marker files named
//!   `<header>_<YYYYMMDD>_<HHMMSS>`.  Checking a lock also sweeps expired
//!   markers for the same header.

pub mod lock;
pub mod net;

pub use lock::{
    create_lock, is_locked, FsLockStore, LockError, LockMarker, LockStore, TimeWindowLock,
    DEFAULT_WINDOW,
};
pub use net::{
    is_ip_in_network, is_ipv4, is_ipv4_route, is_ipv4_route_list, is_ipv4_with_prefix,
    netmask_to_prefix, parse_ipv4, parse_prefix, parse_route_list, prefix_to_netmask, NetError,
    NetworkDescriptor, Route, MASK_OCTETS,
};

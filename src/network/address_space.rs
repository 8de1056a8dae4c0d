//! RFC 1918 address space model
//!
//! Classification of addresses and prefixes against the three private ranges,
//! plus last-address computation. Everything here is pure and IPv4-only.

use ipnet::{IpNet, Ipv4Net};
use std::net::{IpAddr, Ipv4Addr};

use super::prefix::NetworkPrefix;
use crate::types::AddressClass;

impl AddressClass {
    /// The RFC 1918 block this class covers
    pub fn range(self) -> NetworkPrefix {
        let (addr, bits) = match self {
            AddressClass::A => (Ipv4Addr::new(10, 0, 0, 0), 8),
            AddressClass::B => (Ipv4Addr::new(172, 16, 0, 0), 12),
            AddressClass::C => (Ipv4Addr::new(192, 168, 0, 0), 16),
        };
        NetworkPrefix::from(Ipv4Net::new_assert(addr, bits))
    }
}

/// Which private class `addr` belongs to, if any
pub fn classify(addr: Ipv4Addr) -> Option<AddressClass> {
    AddressClass::ALL.into_iter().find(|class| class.range().contains(addr))
}

/// Whether `addr` falls inside one of the three private ranges
pub fn is_private_address(addr: Ipv4Addr) -> bool {
    classify(addr).is_some()
}

/// Class of a prefix whose network and last address both sit in the same class
pub fn classify_prefix(prefix: &NetworkPrefix) -> Option<AddressClass> {
    let first = classify(prefix.network())?;
    let last = classify(last_address(prefix))?;
    (first == last).then_some(first)
}

/// Whether both ends of the (masked) prefix are private addresses
pub fn is_private_prefix(prefix: &NetworkPrefix) -> bool {
    is_private_address(prefix.network()) && is_private_address(last_address(prefix))
}

/// Same check for an arbitrary `ipnet` value; IPv6 is never private here
pub fn is_private_net(net: &IpNet) -> bool {
    match NetworkPrefix::try_from(*net) {
        Ok(prefix) => is_private_prefix(&prefix),
        Err(_) => false,
    }
}

/// Highest address of `prefix`: every bit from `bits` to 31 set, MSB first
pub fn last_address(prefix: &NetworkPrefix) -> Ipv4Addr {
    let host_mask = u32::MAX.checked_shr(u32::from(prefix.bits())).unwrap_or(0);
    Ipv4Addr::from(u32::from(prefix.network()) | host_mask)
}

/// Last address of an arbitrary network.
///
/// # Panics
///
/// Panics on an IPv6 network; callers must only hand IPv4 input to the
/// address space model.
pub fn last_address_of(net: &IpNet) -> IpAddr {
    match NetworkPrefix::try_from(*net) {
        Ok(prefix) => IpAddr::V4(last_address(&prefix)),
        Err(err) => panic!("last_address_of called with non-IPv4 input: {}", err),
    }
}

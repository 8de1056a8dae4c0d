//! Canonical IPv4 network prefixes
//!
//! [`NetworkPrefix`] is always held in masked form: host bits of the stored
//! address are zero, so two prefixes compare equal exactly when they describe
//! the same network.

use ipnet::{IpNet, Ipv4Net};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when building or parsing a [`NetworkPrefix`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefixError {
    /// Text could not be parsed as a prefix
    #[error("invalid network prefix '{0}'")]
    Parse(String),

    /// Prefix length above 32
    #[error("invalid prefix length /{0}, expected 0-32")]
    InvalidLength(u8),

    /// An IPv6 network was supplied where IPv4 is required
    #[error("not an IPv4 network: {0}")]
    NotIpv4(String),
}

/// An IPv4 network address plus prefix length, held in canonical form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkPrefix(Ipv4Net);

impl NetworkPrefix {
    /// Length used for every generated VLAN network
    pub const VLAN_PREFIX_LEN: u8 = 24;

    /// Create a prefix, masking away any host bits in `addr`
    pub fn new(addr: Ipv4Addr, bits: u8) -> Result<Self, PrefixError> {
        let net = Ipv4Net::new(addr, bits).map_err(|_| PrefixError::InvalidLength(bits))?;
        Ok(Self(net.trunc()))
    }

    /// Build the /24 network `a.b.c.0/24`
    pub fn slash24(a: u8, b: u8, c: u8) -> Self {
        Self(Ipv4Net::new_assert(Ipv4Addr::new(a, b, c, 0), Self::VLAN_PREFIX_LEN))
    }

    /// Network (first) address
    pub fn network(&self) -> Ipv4Addr {
        self.0.network()
    }

    /// Prefix length in bits
    pub fn bits(&self) -> u8 {
        self.0.prefix_len()
    }

    /// Highest address of the prefix (all host bits set)
    pub fn last_address(&self) -> Ipv4Addr {
        super::address_space::last_address(self)
    }

    /// Netmask, e.g. `255.255.255.0` for a /24
    pub fn netmask(&self) -> Ipv4Addr {
        self.0.netmask()
    }

    /// Address at host offset `n` inside the prefix, `None` when it would leave it
    pub fn host(&self, n: u32) -> Option<Ipv4Addr> {
        let base = u32::from(self.network());
        let addr = Ipv4Addr::from(base.checked_add(n)?);
        self.contains(addr).then_some(addr)
    }

    /// Whether `addr` lies inside this prefix
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.0.contains(&addr)
    }

    /// Legacy `a.b.c.x` notation used by older fixture files (/24 only)
    pub fn legacy_notation(&self) -> String {
        let [a, b, c, _] = self.network().octets();
        format!("{}.{}.{}.x", a, b, c)
    }

    /// Underlying `ipnet` value
    pub fn as_ipv4_net(&self) -> Ipv4Net {
        self.0
    }
}

impl From<Ipv4Net> for NetworkPrefix {
    fn from(net: Ipv4Net) -> Self {
        Self(net.trunc())
    }
}

impl TryFrom<IpNet> for NetworkPrefix {
    type Error = PrefixError;

    fn try_from(net: IpNet) -> Result<Self, Self::Error> {
        match net {
            IpNet::V4(v4) => Ok(v4.into()),
            IpNet::V6(v6) => Err(PrefixError::NotIpv4(v6.to_string())),
        }
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.bits())
    }
}

impl FromStr for NetworkPrefix {
    type Err = PrefixError;

    /// Accepts CIDR (`10.1.2.0/24`, host bits are masked) or legacy `10.1.2.x`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(stem) = s.strip_suffix(".x") {
            let addr: Ipv4Addr = format!("{}.0", stem)
                .parse()
                .map_err(|_| PrefixError::Parse(s.to_string()))?;
            return Self::new(addr, Self::VLAN_PREFIX_LEN);
        }

        let (addr, bits) = s.split_once('/').ok_or_else(|| PrefixError::Parse(s.to_string()))?;
        let addr: Ipv4Addr = addr.parse().map_err(|_| PrefixError::Parse(s.to_string()))?;
        let bits: u8 = bits.parse().map_err(|_| PrefixError::Parse(s.to_string()))?;
        Self::new(addr, bits)
    }
}

impl Serialize for NetworkPrefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkPrefix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//! VLAN records and their derived addressing data

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;

use crate::catalog::Department;
use crate::generation::error::{VlanError, VlanErrorKind};
use crate::network::{address_space, NetworkPrefix};
use crate::types::AddressClass;

/// Lowest IEEE 802.1Q VLAN ID
pub const VLAN_ID_MIN: u16 = 1;
/// Highest IEEE 802.1Q VLAN ID
pub const VLAN_ID_MAX: u16 = 4094;
/// Default lower bound; IDs below 10 are usually reserved on real switches
pub const DEFAULT_VLAN_ID_MIN: u16 = 10;
/// Lowest WAN uplink index
pub const WAN_MIN: u8 = 1;
/// Highest WAN uplink index
pub const WAN_MAX: u8 = 3;

/// Host offset of the gateway inside a /24
pub const GATEWAY_HOST: u32 = 1;
/// First DHCP pool host offset
pub const DHCP_RANGE_START: u32 = 100;
/// Last DHCP pool host offset
pub const DHCP_RANGE_END: u32 = 200;

/// One generated VLAN fixture
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VlanRecord {
    /// 802.1Q VLAN ID
    pub vlan_id: u16,
    /// Canonical /24 network
    pub network: NetworkPrefix,
    /// Owning department
    pub department: Department,
    /// WAN uplink index (1-3)
    pub wan_assignment: u8,
}

impl VlanRecord {
    /// Create a record, checking every single-record invariant
    pub fn new(
        vlan_id: u16,
        network: NetworkPrefix,
        department: Department,
        wan_assignment: u8,
    ) -> Result<Self, VlanError> {
        if !(VLAN_ID_MIN..=VLAN_ID_MAX).contains(&vlan_id) {
            return Err(VlanError::out_of_range(
                vlan_id,
                "vlan_id",
                format!("must be within {}-{}", VLAN_ID_MIN, VLAN_ID_MAX),
            ));
        }
        check_network(vlan_id, &network)?;
        if !(WAN_MIN..=WAN_MAX).contains(&wan_assignment) {
            return Err(VlanError::out_of_range(
                vlan_id,
                "wan_assignment",
                format!("expected {}-{}, got {}", WAN_MIN, WAN_MAX, wan_assignment),
            ));
        }
        Ok(Self { vlan_id, network, department, wan_assignment })
    }

    /// Human-readable description, e.g. "Engineering VLAN 42"
    pub fn description(&self) -> String {
        format!("{} VLAN {}", self.department.name, self.vlan_id)
    }

    /// RFC 1918 class of the network
    pub fn address_class(&self) -> Option<AddressClass> {
        address_space::classify_prefix(&self.network)
    }

    /// Gateway address (`.1`)
    pub fn gateway(&self) -> Option<Ipv4Addr> {
        self.network.host(GATEWAY_HOST)
    }

    /// DHCP pool (`.100` to `.200`)
    pub fn dhcp_range(&self) -> Option<RangeInclusive<Ipv4Addr>> {
        let start = self.network.host(DHCP_RANGE_START)?;
        let end = self.network.host(DHCP_RANGE_END)?;
        Some(start..=end)
    }

    /// Subnet mask of the network
    pub fn subnet_mask(&self) -> Ipv4Addr {
        self.network.netmask()
    }

    /// Network in legacy `a.b.c.x` notation
    pub fn legacy_network(&self) -> String {
        self.network.legacy_notation()
    }

    /// DHCP default lease in seconds
    pub fn lease_seconds(&self) -> u32 {
        self.department.dhcp_lease_time.seconds()
    }

    /// DHCP maximum lease in seconds
    pub fn max_lease_seconds(&self) -> u32 {
        self.department.dhcp_lease_time.max_lease_seconds()
    }
}

/// Network rules shared by record construction and batch validation:
/// one private /24 per VLAN
pub(crate) fn check_network(vlan_id: u16, network: &NetworkPrefix) -> Result<(), VlanError> {
    if network.bits() != NetworkPrefix::VLAN_PREFIX_LEN {
        return Err(VlanError::new(
            Some(vlan_id),
            "network",
            VlanErrorKind::Invalid,
            format!("{} is not a /{} network", network, NetworkPrefix::VLAN_PREFIX_LEN),
        ));
    }
    if !address_space::is_private_prefix(network) {
        return Err(VlanError::new(
            Some(vlan_id),
            "network",
            VlanErrorKind::NotPrivate,
            format!("{} is not inside an RFC 1918 range", network),
        ));
    }
    Ok(())
}

impl fmt::Display for VlanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VLAN {} {} {} WAN{}", self.vlan_id, self.network, self.department, self.wan_assignment)
    }
}

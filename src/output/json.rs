//! JSON and JSON-lines writers
//!
//! Each record is expanded with its derived addressing data so downstream
//! config templates do not need to recompute gateways or DHCP pools.

use serde::Serialize;
use std::io::Write;
use std::net::Ipv4Addr;

use crate::generation::error::{GeneratorError, GeneratorResult};
use crate::generation::record::VlanRecord;

/// Serialized shape of one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    /// 802.1Q VLAN ID
    pub vlan_id: u16,
    /// Network in CIDR notation
    pub network: String,
    /// Network in legacy `a.b.c.x` notation
    pub ip_range: String,
    /// RFC 1918 class label
    pub address_class: Option<String>,
    /// `"<Department> VLAN <id>"`
    pub description: String,
    /// Department name
    pub department: String,
    /// Gateway address
    pub gateway: Option<Ipv4Addr>,
    /// Subnet mask
    pub subnet_mask: Ipv4Addr,
    /// First DHCP pool address
    pub dhcp_range_start: Option<Ipv4Addr>,
    /// Last DHCP pool address
    pub dhcp_range_end: Option<Ipv4Addr>,
    /// Default lease in seconds
    pub dhcp_lease_seconds: u32,
    /// Maximum lease in seconds
    pub dhcp_max_lease_seconds: u32,
    /// WAN uplink index
    pub wan_assignment: u8,
}

impl From<&VlanRecord> for RecordView {
    fn from(record: &VlanRecord) -> Self {
        let dhcp = record.dhcp_range();
        Self {
            vlan_id: record.vlan_id,
            network: record.network.to_string(),
            ip_range: record.legacy_network(),
            address_class: record.address_class().map(|c| c.to_string()),
            description: record.description(),
            department: record.department.name.clone(),
            gateway: record.gateway(),
            subnet_mask: record.subnet_mask(),
            dhcp_range_start: dhcp.as_ref().map(|r| *r.start()),
            dhcp_range_end: dhcp.as_ref().map(|r| *r.end()),
            dhcp_lease_seconds: record.lease_seconds(),
            dhcp_max_lease_seconds: record.max_lease_seconds(),
            wan_assignment: record.wan_assignment,
        }
    }
}

/// Write records as one pretty-printed JSON array
pub fn write_json<W: Write>(records: &[VlanRecord], mut writer: W) -> GeneratorResult<()> {
    let views: Vec<RecordView> = records.iter().map(RecordView::from).collect();
    serde_json::to_writer_pretty(&mut writer, &views)
        .map_err(|e| GeneratorError::config("write JSON output", e))?;
    writeln!(writer).map_err(|e| GeneratorError::config("write JSON output", e))?;
    Ok(())
}

/// Write one JSON object per line
pub fn write_json_lines<W: Write>(records: &[VlanRecord], mut writer: W) -> GeneratorResult<()> {
    for record in records {
        serde_json::to_writer(&mut writer, &RecordView::from(record))
            .map_err(|e| GeneratorError::config("write JSON lines output", e))?;
        writeln!(writer).map_err(|e| GeneratorError::config("write JSON lines output", e))?;
    }
    Ok(())
}

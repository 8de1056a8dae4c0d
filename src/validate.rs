//! Batch validation
//!
//! Re-checks the batch invariants on any list of records, whether generated
//! here or read back from a fixture file: VLAN IDs distinct and in range,
//! networks distinct private /24s (so distinct means non-overlapping), WAN
//! index in 1-3.

use std::collections::HashMap;
use tracing::debug;

use crate::generation::error::VlanError;
use crate::generation::record::{
    check_network, VlanRecord, DEFAULT_VLAN_ID_MIN, VLAN_ID_MAX, WAN_MAX, WAN_MIN,
};
use crate::network::NetworkPrefix;

/// Checks records against a permitted VLAN range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchValidator {
    vlan_min: u16,
    vlan_max: u16,
}

impl Default for BatchValidator {
    fn default() -> Self {
        Self::new(DEFAULT_VLAN_ID_MIN, VLAN_ID_MAX)
    }
}

impl BatchValidator {
    /// Validator accepting VLAN IDs in `vlan_min..=vlan_max`
    pub fn new(vlan_min: u16, vlan_max: u16) -> Self {
        Self { vlan_min, vlan_max }
    }

    /// Check a single record in isolation
    pub fn check(&self, record: &VlanRecord) -> Result<(), VlanError> {
        if !(self.vlan_min..=self.vlan_max).contains(&record.vlan_id) {
            return Err(VlanError::out_of_range(
                record.vlan_id,
                "vlan_id",
                format!("outside permitted range {}-{}", self.vlan_min, self.vlan_max),
            ));
        }
        check_network(record.vlan_id, &record.network)?;
        if !(WAN_MIN..=WAN_MAX).contains(&record.wan_assignment) {
            return Err(VlanError::out_of_range(
                record.vlan_id,
                "wan_assignment",
                format!("expected {}-{}, got {}", WAN_MIN, WAN_MAX, record.wan_assignment),
            ));
        }
        Ok(())
    }

    /// Check every record and the batch-wide uniqueness rules; first violation wins
    pub fn check_all(&self, records: &[VlanRecord]) -> Result<(), VlanError> {
        let mut seen_ids: HashMap<u16, usize> = HashMap::with_capacity(records.len());
        let mut seen_networks: HashMap<NetworkPrefix, u16> = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            self.check(record)?;

            if let Some(first) = seen_ids.insert(record.vlan_id, position) {
                return Err(VlanError::duplicate(
                    record.vlan_id,
                    "vlan_id",
                    format!("also used by record {}", first),
                ));
            }
            if let Some(owner) = seen_networks.insert(record.network, record.vlan_id) {
                return Err(VlanError::duplicate(
                    record.vlan_id,
                    "network",
                    format!("{} already assigned to VLAN {}", record.network, owner),
                ));
            }
        }

        debug!("Validated {} records", records.len());
        Ok(())
    }
}

/// Check records with the default VLAN range (10-4094)
pub fn validate_records(records: &[VlanRecord]) -> Result<(), VlanError> {
    BatchValidator::default().check_all(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DepartmentCatalog;
    use crate::generation::error::VlanErrorKind;

    fn record(vlan_id: u16, net: NetworkPrefix, wan: u8) -> VlanRecord {
        let department = DepartmentCatalog::standard().find("HR").unwrap().clone();
        VlanRecord { vlan_id, network: net, department, wan_assignment: wan }
    }

    #[test]
    fn test_valid_batch_passes() {
        let records = vec![
            record(10, NetworkPrefix::slash24(10, 1, 1), 1),
            record(11, NetworkPrefix::slash24(10, 1, 2), 2),
            record(4094, NetworkPrefix::slash24(192, 168, 1), 3),
        ];
        assert!(validate_records(&records).is_ok());
        assert!(validate_records(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_vlan_id() {
        let records = vec![
            record(20, NetworkPrefix::slash24(10, 1, 1), 1),
            record(20, NetworkPrefix::slash24(10, 1, 2), 1),
        ];
        let err = validate_records(&records).unwrap_err();
        assert_eq!(err.kind, VlanErrorKind::Duplicate);
        assert_eq!(err.field, "vlan_id");
        assert_eq!(err.vlan_id, Some(20));
    }

    #[test]
    fn test_duplicate_network() {
        let records = vec![
            record(20, NetworkPrefix::slash24(172, 16, 1), 1),
            record(21, NetworkPrefix::slash24(172, 16, 1), 1),
        ];
        let err = validate_records(&records).unwrap_err();
        assert_eq!(err.field, "network");
        assert_eq!(err.to_string(), "vlan 21 [network]: 172.16.1.0/24 already assigned to VLAN 20");
    }

    #[test]
    fn test_single_record_violations() {
        let validator = BatchValidator::new(100, 200);

        let err = validator.check(&record(99, NetworkPrefix::slash24(10, 0, 1), 1)).unwrap_err();
        assert_eq!(err.kind, VlanErrorKind::OutOfRange);

        let err = validator.check(&record(150, NetworkPrefix::slash24(11, 0, 1), 1)).unwrap_err();
        assert_eq!(err.kind, VlanErrorKind::NotPrivate);

        let err = validator.check(&record(150, NetworkPrefix::slash24(10, 0, 1), 0)).unwrap_err();
        assert_eq!(err.field, "wan_assignment");
    }

    #[test]
    fn test_overlapping_wide_network_rejected() {
        let wide: NetworkPrefix = "10.0.0.0/8".parse().unwrap();
        let records = vec![record(10, wide, 1), record(11, NetworkPrefix::slash24(10, 1, 2), 1)];

        let err = validate_records(&records).unwrap_err();
        assert_eq!(err.vlan_id, Some(10));
        assert_eq!(err.field, "network");
        assert_eq!(err.kind, VlanErrorKind::Invalid);
    }
}

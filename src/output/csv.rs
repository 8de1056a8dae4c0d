//! CSV fixture writer and reader
//!
//! The CSV layout is the legacy fixture format consumed by existing firewall
//! tests: `VLAN,IP Range,Beschreibung,WAN`, with the network in `a.b.c.x`
//! notation and the description `"<Department> VLAN <id>"`.

use csv::{ReaderBuilder, StringRecord, Writer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::catalog::DepartmentCatalog;
use crate::generation::error::{GeneratorError, GeneratorResult, SeedError};
use crate::generation::record::VlanRecord;
use crate::network::NetworkPrefix;

/// Column holding the VLAN ID
pub const COLUMN_VLAN: &str = "VLAN";
/// Column holding the network in `a.b.c.x` notation
pub const COLUMN_IP_RANGE: &str = "IP Range";
/// Column holding the description
pub const COLUMN_DESCRIPTION: &str = "Beschreibung";
/// Column holding the WAN uplink index
pub const COLUMN_WAN: &str = "WAN";
/// Pseudo column used for row-level failures
pub const COLUMN_ROW: &str = "*";

/// Header row in column order
pub const HEADER: [&str; 4] = [COLUMN_VLAN, COLUMN_IP_RANGE, COLUMN_DESCRIPTION, COLUMN_WAN];

/// Write records as CSV, header first
pub fn write_csv<W: Write>(records: &[VlanRecord], writer: W) -> GeneratorResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(HEADER).map_err(|e| GeneratorError::config("write CSV header", e))?;

    for record in records {
        wtr.write_record([
            record.vlan_id.to_string(),
            record.legacy_network(),
            record.description(),
            record.wan_assignment.to_string(),
        ])
        .map_err(|e| GeneratorError::config("write CSV record", e))?;
    }

    wtr.flush().map_err(|e| GeneratorError::config("flush CSV output", e))?;
    Ok(())
}

/// Parse CSV fixtures back into records.
///
/// `source` names the input in errors. Rows are numbered from 0, header
/// excluded.
pub fn read_csv<R: Read>(
    reader: R,
    source: &str,
    catalog: &DepartmentCatalog,
) -> Result<Vec<VlanRecord>, SeedError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| SeedError::new(source, 0, COLUMN_ROW, format!("unreadable header: {}", e)))?
        .clone();
    let columns = ColumnIndex::resolve(&headers, source)?;

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let raw = result.map_err(|e| SeedError::new(source, row, COLUMN_ROW, e.to_string()))?;
        records.push(columns.parse_row(&raw, row, source, catalog)?);
    }
    Ok(records)
}

/// Read a CSV fixture file
pub fn read_csv_file<P: AsRef<Path>>(
    path: P,
    catalog: &DepartmentCatalog,
) -> GeneratorResult<Vec<VlanRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GeneratorError::config("open seed file", e))?;
    Ok(read_csv(file, &path.display().to_string(), catalog)?)
}

/// Positions of the required columns in the header
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    vlan: usize,
    ip_range: usize,
    description: usize,
    wan: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, source: &str) -> Result<Self, SeedError> {
        let find = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                SeedError::new(source, 0, name, "missing column in header")
            })
        };
        Ok(Self {
            vlan: find(COLUMN_VLAN)?,
            ip_range: find(COLUMN_IP_RANGE)?,
            description: find(COLUMN_DESCRIPTION)?,
            wan: find(COLUMN_WAN)?,
        })
    }

    fn parse_row(
        &self,
        raw: &StringRecord,
        row: usize,
        source: &str,
        catalog: &DepartmentCatalog,
    ) -> Result<VlanRecord, SeedError> {
        let cell = |idx: usize, column: &str| {
            raw.get(idx).ok_or_else(|| SeedError::new(source, row, column, "missing value"))
        };
        let fail = |column: &str, message: String| SeedError::new(source, row, column, message);

        let vlan_text = cell(self.vlan, COLUMN_VLAN)?;
        let vlan_id: u16 = vlan_text
            .parse()
            .map_err(|_| fail(COLUMN_VLAN, format!("'{}' is not a VLAN ID", vlan_text)))?;

        let network_text = cell(self.ip_range, COLUMN_IP_RANGE)?;
        let network: NetworkPrefix = network_text
            .parse()
            .map_err(|e| fail(COLUMN_IP_RANGE, format!("{}", e)))?;

        let description = cell(self.description, COLUMN_DESCRIPTION)?;
        let (department_name, described_id) = description.rsplit_once(" VLAN ").ok_or_else(|| {
            fail(COLUMN_DESCRIPTION, format!("'{}' is not '<Department> VLAN <id>'", description))
        })?;
        if described_id.trim() != vlan_text {
            return Err(fail(
                COLUMN_DESCRIPTION,
                format!("describes VLAN {} but the row is VLAN {}", described_id, vlan_id),
            ));
        }
        let department = catalog
            .find(department_name)
            .ok_or_else(|| fail(COLUMN_DESCRIPTION, format!("unknown department '{}'", department_name)))?
            .clone();

        let wan_text = cell(self.wan, COLUMN_WAN)?;
        let wan_assignment: u8 = wan_text
            .parse()
            .map_err(|_| fail(COLUMN_WAN, format!("'{}' is not a WAN index", wan_text)))?;

        VlanRecord::new(vlan_id, network, department, wan_assignment).map_err(|err| {
            let column = match err.field.as_str() {
                "network" => COLUMN_IP_RANGE,
                "wan_assignment" => COLUMN_WAN,
                _ => COLUMN_VLAN,
            };
            fail(column, err.message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Department, LeaseTime};

    fn record(vlan_id: u16, net: (u8, u8, u8), dept: &str, wan: u8) -> VlanRecord {
        let catalog = DepartmentCatalog::standard();
        VlanRecord::new(
            vlan_id,
            NetworkPrefix::slash24(net.0, net.1, net.2),
            catalog.find(dept).unwrap().clone(),
            wan,
        )
        .unwrap()
    }

    #[test]
    fn test_csv_export_layout() {
        let records = vec![record(42, (10, 1, 2), "IT", 1), record(100, (192, 168, 7), "Sales", 3)];
        let mut buffer = Vec::new();
        write_csv(&records, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "VLAN,IP Range,Beschreibung,WAN");
        assert_eq!(lines[1], "42,10.1.2.x,IT VLAN 42,1");
        assert_eq!(lines[2], "100,192.168.7.x,Sales VLAN 100,3");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_export_empty() {
        let mut buffer = Vec::new();
        write_csv(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "VLAN,IP Range,Beschreibung,WAN\n");
    }

    #[test]
    fn test_read_back_written_records() {
        let records = vec![
            record(11, (172, 16, 9), "Customer Service", 2),
            record(4094, (10, 254, 254), "QA", 3),
        ];
        let mut buffer = Vec::new();
        write_csv(&records, &mut buffer).unwrap();

        let parsed = read_csv(buffer.as_slice(), "memory", &DepartmentCatalog::standard()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_reader_reports_row_and_column() {
        let data = "VLAN,IP Range,Beschreibung,WAN\n\
                    20,10.0.1.x,IT VLAN 20,1\n\
                    21,10.0.2.x,IT VLAN 21,7\n";
        let err = read_csv(data.as_bytes(), "fixtures.csv", &DepartmentCatalog::standard())
            .unwrap_err();
        assert_eq!(err.file, "fixtures.csv");
        assert_eq!(err.row, 1);
        assert_eq!(err.column, "WAN");
    }

    #[test]
    fn test_reader_rejects_bad_cells() {
        let catalog = DepartmentCatalog::standard();
        let cases = [
            ("abc,10.0.1.x,IT VLAN abc,1", "VLAN"),
            ("5000,10.0.1.x,IT VLAN 5000,1", "VLAN"),
            ("20,10.0.1,IT VLAN 20,1", "IP Range"),
            ("20,8.8.8.x,IT VLAN 20,1", "IP Range"),
            ("20,10.0.0.0/8,IT VLAN 20,1", "IP Range"),
            ("20,192.168.1.0/25,IT VLAN 20,1", "IP Range"),
            ("20,10.0.1.x,Kitchen VLAN 20,1", "Beschreibung"),
            ("20,10.0.1.x,IT VLAN 21,1", "Beschreibung"),
            ("20,10.0.1.x,IT network,1", "Beschreibung"),
            ("20,10.0.1.x,IT VLAN 20,x", "WAN"),
        ];
        for (row, column) in cases {
            let data = format!("VLAN,IP Range,Beschreibung,WAN\n{}\n", row);
            let err = read_csv(data.as_bytes(), "t.csv", &catalog).unwrap_err();
            assert_eq!(err.column, column, "row {:?}", row);
            assert_eq!(err.row, 0);
        }
    }

    #[test]
    fn test_reader_requires_header_columns() {
        let data = "VLAN,Network,Beschreibung,WAN\n20,10.0.1.x,IT VLAN 20,1\n";
        let err = read_csv(data.as_bytes(), "t.csv", &DepartmentCatalog::standard()).unwrap_err();
        assert_eq!(err.column, "IP Range");
    }

    #[test]
    fn test_reader_uses_supplied_catalog() {
        let catalog =
            DepartmentCatalog::new(vec![Department::new("Lab", LeaseTime::Hours12)]).unwrap();
        let data = "VLAN,IP Range,Beschreibung,WAN\n30,192.168.3.x,Lab VLAN 30,2\n";
        let records = read_csv(data.as_bytes(), "t.csv", &catalog).unwrap();
        assert_eq!(records[0].department.name, "Lab");
        assert_eq!(records[0].lease_seconds(), 12 * 3600);
    }
}

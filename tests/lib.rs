// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use vlan_config_faker::*;

// Address model and generators
mod address_space_tests;

// Allocation, I/O and command line
mod allocator_tests;

#[test]
fn test_crate_root_reexports() {
    let prefix: NetworkPrefix = "192.168.1.0/24".parse().unwrap();
    assert!(is_private_prefix(&prefix));
    assert_eq!(last_address(&prefix).to_string(), "192.168.1.255");

    let catalog = DepartmentCatalog::standard();
    assert_eq!(catalog.len(), 20);

    let config = GeneratorConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.class_policy, ClassPolicy::default());
}

#[test]
fn test_enum_types() {
    for class in AddressClass::ALL {
        assert!(!class.to_string().is_empty());
        assert!(class.range().bits() <= 16);
    }

    for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::JsonLines] {
        assert!(!format.to_string().is_empty());
    }
}

#[test]
fn test_generate_write_validate_roundtrip() {
    let mut allocator = RecordAllocator::new(64, 2024);
    let records = allocator.generate().unwrap();
    validate_records(&records).unwrap();

    let mut buffer = Vec::new();
    write_records(&records, OutputFormat::Csv, &mut buffer).unwrap();
    let parsed = read_csv(buffer.as_slice(), "memory", &DepartmentCatalog::standard()).unwrap();
    assert_eq!(parsed, records);
}

//! End-to-end tests for the record allocator
//!
//! Covers the batch invariants at realistic sizes, the exhaustion path and
//! reproducibility from a seed.

use proptest::prelude::*;
use std::collections::HashSet;
use vlan_config_faker::generation::{GeneratorError, RecordAllocator, VlanErrorKind, VlanRecord};
use vlan_config_faker::network::is_private_prefix;
use vlan_config_faker::output::write_csv;
use vlan_config_faker::types::{AddressClass, ClassPolicy};
use vlan_config_faker::validate::validate_records;

fn csv_bytes(records: &[VlanRecord]) -> Vec<u8> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer).unwrap();
    buffer
}

fn assert_batch_invariants(records: &[VlanRecord], vlan_min: u16, vlan_max: u16) {
    let mut ids = HashSet::new();
    let mut networks = HashSet::new();
    for record in records {
        assert!((vlan_min..=vlan_max).contains(&record.vlan_id), "{}", record);
        assert!(is_private_prefix(&record.network), "{}", record);
        assert_eq!(record.network.bits(), 24);
        assert!((1..=3).contains(&record.wan_assignment));
        assert!(ids.insert(record.vlan_id), "duplicate VLAN {}", record.vlan_id);
        assert!(networks.insert(record.network), "duplicate network {}", record.network);
    }
}

#[test]
fn test_thousand_records_default_range() {
    let mut allocator = RecordAllocator::new(1000, 42);
    let records = allocator.generate().unwrap();

    assert_eq!(records.len(), 1000);
    assert_batch_invariants(&records, 10, 4094);
    validate_records(&records).unwrap();

    let stats = allocator.statistics();
    assert_eq!(stats.accepted, 1000);
    assert!(stats.attempts >= 1000);
    let per_class: usize = AddressClass::ALL.iter().map(|c| stats.class_count(*c)).sum();
    assert_eq!(per_class, 1000);
}

#[test]
fn test_more_records_than_vlan_ids() {
    let mut allocator = RecordAllocator::new(5000, 42);
    match allocator.generate() {
        Err(GeneratorError::Vlan(err)) => {
            assert_eq!(err.kind, VlanErrorKind::Exhausted);
            assert_eq!(err.field, "vlan_id");
            assert!(err.message.contains("5000"));
        }
        other => panic!("expected exhaustion, got {:?}", other),
    }
    assert_eq!(allocator.statistics().attempts, 0);
}

#[test]
fn test_same_seed_same_bytes() {
    let first = RecordAllocator::new(50, 7).generate().unwrap();
    let second = RecordAllocator::new(50, 7).generate().unwrap();
    assert_eq!(csv_bytes(&first), csv_bytes(&second));

    let other = RecordAllocator::new(50, 8).generate().unwrap();
    assert_ne!(csv_bytes(&first), csv_bytes(&other));
}

#[test]
fn test_whole_vlan_range_consumed() {
    let mut allocator = RecordAllocator::new(50, 99).with_vlan_range(200, 249);
    let records = allocator.generate().unwrap();

    let ids: HashSet<u16> = records.iter().map(|r| r.vlan_id).collect();
    assert_eq!(ids, (200..=249).collect::<HashSet<u16>>());
}

#[test]
fn test_only_class_c_fills_its_space() {
    let mut allocator =
        RecordAllocator::new(254, 3).with_class_policy(ClassPolicy::Only { class: AddressClass::C });
    let records = allocator.generate().unwrap();

    assert_eq!(records.len(), 254);
    assert!(records.iter().all(|r| r.address_class() == Some(AddressClass::C)));
    assert_eq!(allocator.statistics().class_count(AddressClass::C), 254);
}

#[test]
fn test_both_fields_tight_still_fill() {
    for seed in 0..10 {
        let records = RecordAllocator::new(200, seed)
            .with_vlan_range(1000, 1199)
            .with_class_policy(ClassPolicy::Only { class: AddressClass::C })
            .generate()
            .unwrap();
        assert_batch_invariants(&records, 1000, 1199);
        assert_eq!(records.len(), 200);
    }
}

#[test]
fn test_parallel_batches_with_independent_seeds() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| std::thread::spawn(move || RecordAllocator::new(100, seed).generate().unwrap()))
        .collect();

    for (seed, handle) in handles.into_iter().enumerate() {
        let from_thread = handle.join().unwrap();
        let local = RecordAllocator::new(100, seed as u64).generate().unwrap();
        assert_eq!(from_thread, local);
        assert_batch_invariants(&from_thread, 10, 4094);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_batch_invariants_hold(seed in any::<u64>(), count in 1usize..300) {
        let records = RecordAllocator::new(count, seed).generate().unwrap();
        prop_assert_eq!(records.len(), count);
        assert_batch_invariants(&records, 10, 4094);
    }

    #[test]
    fn prop_narrow_range_never_leaks(seed in any::<u64>(), min in 1u16..4000, width in 0u16..64) {
        let max = min + width;
        let count = usize::from(width) + 1;
        let records = RecordAllocator::new(count, seed)
            .with_vlan_range(min, max)
            .with_class_policy(ClassPolicy::RoundRobin)
            .generate()
            .unwrap();
        assert_batch_invariants(&records, min, max);
    }

    #[test]
    fn prop_overfull_request_is_rejected(seed in any::<u64>(), extra in 1usize..10) {
        let result = RecordAllocator::new(16 + extra, seed).with_vlan_range(100, 115).generate();
        let exhausted = matches!(
            result,
            Err(GeneratorError::Vlan(ref err)) if err.kind == VlanErrorKind::Exhausted
        );
        prop_assert!(exhausted);
    }
}

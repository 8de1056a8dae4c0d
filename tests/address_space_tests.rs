//! Tests for the RFC 1918 address space model
//!
//! Known boundary cases plus property tests over arbitrary IPv4 prefixes.

use proptest::prelude::*;
use std::net::Ipv4Addr;
use vlan_config_faker::network::{
    classify, classify_prefix, is_private_address, is_private_prefix, last_address, NetworkPrefix,
};
use vlan_config_faker::types::AddressClass;

fn prefix(s: &str) -> NetworkPrefix {
    s.parse().unwrap()
}

// Strategy for arbitrary prefixes, host bits included before masking
fn ipv4_prefix_strategy() -> impl Strategy<Value = NetworkPrefix> {
    (any::<u32>(), 0u8..=32u8)
        .prop_map(|(addr_bits, length)| NetworkPrefix::new(Ipv4Addr::from(addr_bits), length).unwrap())
}

#[test]
fn test_last_address_known_values() {
    assert_eq!(last_address(&prefix("10.1.2.0/24")), Ipv4Addr::new(10, 1, 2, 255));
    assert_eq!(last_address(&prefix("172.16.0.0/12")), Ipv4Addr::new(172, 31, 255, 255));
    assert_eq!(last_address(&prefix("192.168.0.0/16")), Ipv4Addr::new(192, 168, 255, 255));
}

#[test]
fn test_is_private_prefix_known_values() {
    assert!(!is_private_prefix(&prefix("8.8.8.0/24")));
    assert!(!is_private_prefix(&prefix("172.15.0.0/24")));
    assert!(is_private_prefix(&prefix("192.168.1.0/24")));
}

#[test]
fn test_class_boundaries() {
    let cases = [
        (Ipv4Addr::new(9, 255, 255, 255), None),
        (Ipv4Addr::new(10, 0, 0, 0), Some(AddressClass::A)),
        (Ipv4Addr::new(10, 255, 255, 255), Some(AddressClass::A)),
        (Ipv4Addr::new(11, 0, 0, 0), None),
        (Ipv4Addr::new(172, 15, 255, 255), None),
        (Ipv4Addr::new(172, 16, 0, 0), Some(AddressClass::B)),
        (Ipv4Addr::new(172, 31, 255, 255), Some(AddressClass::B)),
        (Ipv4Addr::new(172, 32, 0, 0), None),
        (Ipv4Addr::new(192, 167, 255, 255), None),
        (Ipv4Addr::new(192, 168, 0, 0), Some(AddressClass::C)),
        (Ipv4Addr::new(192, 168, 255, 255), Some(AddressClass::C)),
        (Ipv4Addr::new(192, 169, 0, 0), None),
    ];
    for (addr, expected) in cases {
        assert_eq!(classify(addr), expected, "{}", addr);
    }
}

proptest! {
    /// Stored prefixes never carry host bits
    #[test]
    fn prop_prefix_is_canonical(p in ipv4_prefix_strategy()) {
        let reparsed = NetworkPrefix::new(p.network(), p.bits()).unwrap();
        prop_assert_eq!(reparsed, p);
        prop_assert!(p.contains(p.network()));
        prop_assert!(p.contains(last_address(&p)));
    }

    /// The last address is the network with every host bit set
    #[test]
    fn prop_last_address_sets_host_bits(p in ipv4_prefix_strategy()) {
        let network = u32::from(p.network());
        let last = u32::from(last_address(&p));
        let host_bits = 32 - u32::from(p.bits());
        prop_assert!(last >= network);
        prop_assert_eq!(u64::from(last - network) + 1, 1u64 << host_bits);
    }

    /// A private prefix has both ends inside the same class
    #[test]
    fn prop_private_prefix_ends_are_private(p in ipv4_prefix_strategy()) {
        if is_private_prefix(&p) {
            prop_assert!(is_private_address(p.network()));
            prop_assert!(is_private_address(last_address(&p)));
            prop_assert!(classify_prefix(&p).is_some());
        } else {
            prop_assert!(
                !is_private_address(p.network()) || !is_private_address(last_address(&p))
            );
        }
    }

    /// Every /24 inside 10.0.0.0/8 is private, class A
    #[test]
    fn prop_class_a_slash24s(b in any::<u8>(), c in any::<u8>()) {
        let p = NetworkPrefix::slash24(10, b, c);
        prop_assert!(is_private_prefix(&p));
        prop_assert_eq!(classify_prefix(&p), Some(AddressClass::A));
    }
}

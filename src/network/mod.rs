//! IPv4 network model
//!
//! This module contains the RFC 1918 address space model and the random
//! prefix generators built on top of it.
//!
//! # Overview
//!
//! - **NetworkPrefix**: canonical (masked) IPv4 prefix
//! - **address_space**: private-range classification and last-address math
//! - **prefix_generator**: seeded /24 draws per class and the class selector
//!
//! # Usage Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use vlan_config_faker::network::*;
//! use vlan_config_faker::types::AddressClass;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let prefix = random_prefix(AddressClass::B, &mut rng);
//!
//! assert!(is_private_prefix(&prefix));
//! assert_eq!(prefix.bits(), 24);
//! ```

pub mod address_space;
pub mod prefix;
pub mod prefix_generator;

// Re-export all public types for convenience
pub use address_space::*;
pub use prefix::*;
pub use prefix_generator::*;

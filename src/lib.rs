//! VLAN Config Faker
//!
//! A generator of synthetic, internally-consistent VLAN network fixtures for
//! testing firewall and router configuration tooling.
//!
//! # Overview
//!
//! Each generated record carries a VLAN ID, a private /24 network, a
//! department and a WAN uplink index. Records are individually valid (RFC 1918
//! addressing, 802.1Q VLAN range) and collectively consistent (no duplicate
//! VLAN IDs or networks within one batch), and a batch is exactly reproducible
//! from its seed.
//!
//! ## Key Features
//!
//! - **RFC 1918 Address Model**: class membership and last-address math for any IPv4 prefix
//! - **Seeded Prefix Generation**: /24 draws per class from a portable ChaCha stream
//! - **Unique Allocation**: bounded draw/collide loop with a deterministic exhaustion error
//! - **Pluggable Catalog**: the department table is injected, not hard-wired
//! - **Fixture I/O**: legacy CSV, JSON and JSON-lines output plus CSV re-validation
//!
//! ## Quick Start
//!
//! ```rust
//! use vlan_config_faker::*;
//!
//! let mut allocator = RecordAllocator::new(100, 42)
//!     .with_vlan_range(100, 999)
//!     .with_class_policy(ClassPolicy::RoundRobin);
//! let records = allocator.generate()?;
//!
//! assert_eq!(records.len(), 100);
//! validate_records(&records)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`network`]: NetworkPrefix, RFC 1918 classification, prefix generators
//! - [`catalog`]: departments and DHCP lease times
//! - [`generation`]: record allocator, records, progress, statistics, errors, logging
//! - [`output`]: CSV/JSON writers and the CSV fixture reader
//! - [`validate`]: batch invariant checks
//! - [`types`]: enums and configuration
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Network   │    │   Catalog   │    │    Types    │
//! │             │    │             │    │             │
//! │ Prefix      │    │ Departments │    │ Enums       │
//! │ AddressSpace│    │ Lease times │    │ Config      │
//! │ Generators  │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌──────┴───────────────────┴───────────────────┴──────┐
//! │                     Generation                      │
//! │  RecordAllocator ─ GenerationSession ─ Statistics   │
//! └─────────────────────────────────────────────────────┘
//!        ▲                                       ▲
//!        │                                       │
//! ┌─────────────┐                        ┌─────────────┐
//! │   Output    │                        │  Validate   │
//! └─────────────┘                        └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod catalog;
pub mod generation;
pub mod network;
pub mod output;
pub mod types;
pub mod validate;

// Core types and configuration
pub use types::{
    AddressClass, ClassPolicy, ConfigError, ConfigValidationError, GeneratorConfig, OutputFormat,
};

// Network model
pub use network::{
    is_private_address, is_private_prefix, last_address, random_class_a, random_class_b,
    random_class_c, random_prefix, ClassSelector, NetworkPrefix, PrefixError,
};

// Department catalog
pub use catalog::{Department, DepartmentCatalog, LeaseTime};

// Generation
pub use generation::{
    BarProgress, GenerationStatistics, GeneratorError, GeneratorResult, LoggingConfig,
    NoopProgress, ProgressSink, RecordAllocator, SeedError, VlanError, VlanErrorKind, VlanRecord,
};

// Output and validation
pub use output::{read_csv, read_csv_file, write_records, write_to_path};
pub use validate::{validate_records, BatchValidator};

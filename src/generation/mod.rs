//! Record generation and control
//!
//! This module contains the record allocator, the VLAN record type, progress
//! hooks, statistics collection, error handling and logging setup.
//!
//! # Overview
//!
//! - **RecordAllocator**: seeded draw/accept/collide loop producing unique records
//! - **VlanRecord**: one generated fixture plus derived addressing data
//! - **ProgressSink**: progress callbacks, no-op by default
//! - **GenerationStatistics**: attempts, collisions and per-class counts
//! - **GeneratorError**: the failure taxonomy surfaced to callers
//!
//! # Usage Example
//!
//! ```rust
//! use vlan_config_faker::generation::*;
//!
//! let mut allocator = RecordAllocator::new(25, 7);
//! let records = allocator.generate().unwrap();
//!
//! assert_eq!(records.len(), 25);
//! assert_eq!(allocator.statistics().accepted, 25);
//! ```

pub mod allocator;
pub mod error;
pub mod logging;
pub mod progress;
pub mod record;
pub mod statistics;

// Re-export all public types for convenience
pub use allocator::*;
pub use error::*;
pub use logging::*;
pub use progress::*;
pub use record::*;
pub use statistics::*;

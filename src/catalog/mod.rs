//! Department catalog
//!
//! The fixed department/lease-time table, modelled as an injected read-only
//! sequence so tests can substitute their own catalog.

pub mod department;

// Re-export all public types for convenience
pub use department::*;

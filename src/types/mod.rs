//! Core types and configuration for the VLAN fixture generator
//!
//! This module contains the enumerations and configuration structures used
//! throughout the generator.
//!
//! # Overview
//!
//! - **Enums**: address classes, class selection policy, output formats
//! - **Configuration**: CLI arguments, JSON config file, validated generator config
//!
//! # Usage Example
//!
//! ```rust
//! use vlan_config_faker::types::*;
//!
//! let policy: ClassPolicy = "round-robin".parse().unwrap();
//!
//! let config = GeneratorConfig {
//!     count: 100,
//!     seed: Some(42),
//!     class_policy: policy,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;

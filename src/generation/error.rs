//! Error types and handling
//!
//! This module contains the single failure taxonomy surfaced by generation,
//! seed-file ingestion and configuration loading. Nothing in the core retries
//! on these errors except the allocator's bounded collision loop.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

use crate::types::config::{ConfigError, ConfigValidationError};

/// Boxed underlying cause carried by configuration and I/O failures
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Classification of a VLAN-specific failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VlanErrorKind {
    /// A value lies outside its permitted range
    OutOfRange,
    /// A network is not entirely inside RFC 1918 space
    NotPrivate,
    /// A value repeats one already present in the batch
    Duplicate,
    /// The unique VLAN ID or network space could not satisfy the request
    Exhausted,
    /// Any other malformed value
    Invalid,
}

impl fmt::Display for VlanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VlanErrorKind::OutOfRange => write!(f, "out of range"),
            VlanErrorKind::NotPrivate => write!(f, "not RFC 1918"),
            VlanErrorKind::Duplicate => write!(f, "duplicate"),
            VlanErrorKind::Exhausted => write!(f, "exhausted"),
            VlanErrorKind::Invalid => write!(f, "invalid"),
        }
    }
}

/// Failure tied to a specific VLAN record, or to the VLAN space as a whole
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} [{field}]: {message}", vlan_subject(.vlan_id))]
pub struct VlanError {
    /// Offending VLAN ID, `None` when no single VLAN is responsible
    pub vlan_id: Option<u16>,
    /// Name of the field that caused the failure
    pub field: String,
    /// Failure classification
    pub kind: VlanErrorKind,
    /// Human-readable message
    pub message: String,
}

impl VlanError {
    /// Create a new VLAN error
    pub fn new(
        vlan_id: Option<u16>,
        field: impl Into<String>,
        kind: VlanErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self { vlan_id, field: field.into(), kind, message: message.into() }
    }

    /// Create an out-of-range error for a specific VLAN
    pub fn out_of_range(vlan_id: u16, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Some(vlan_id), field, VlanErrorKind::OutOfRange, message)
    }

    /// Create a duplicate-value error for a specific VLAN
    pub fn duplicate(vlan_id: u16, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Some(vlan_id), field, VlanErrorKind::Duplicate, message)
    }

    /// Create an exhaustion error; exhaustion is never attributable to one VLAN
    pub fn exhausted(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(None, field, VlanErrorKind::Exhausted, message)
    }
}

fn vlan_subject(vlan_id: &Option<u16>) -> String {
    match vlan_id {
        Some(id) => format!("vlan {}", id),
        None => "vlan error".to_string(),
    }
}

/// Failure while ingesting tabular seed data (CSV fixtures)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("seed error in {file} row {row} col {column:?}: {message}")]
pub struct SeedError {
    /// Source file identifier
    pub file: String,
    /// Zero-based data row index (header excluded)
    pub row: usize,
    /// Column name
    pub column: String,
    /// Human-readable message
    pub message: String,
}

impl SeedError {
    /// Create a new seed ingestion error
    pub fn new(
        file: impl Into<String>,
        row: usize,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self { file: file.into(), row, column: column.into(), message: message.into() }
    }
}

/// Errors that can occur while generating, reading or validating fixtures
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Configuration or I/O failure wrapping an underlying cause
    #[error("{operation}: {source}")]
    Config {
        /// Name of the operation that failed
        operation: String,
        /// Underlying cause
        #[source]
        source: BoxedCause,
    },

    /// VLAN-specific domain failure
    #[error(transparent)]
    Vlan(#[from] VlanError),

    /// Tabular ingestion failure
    #[error(transparent)]
    Seed(#[from] SeedError),
}

impl GeneratorError {
    /// Wrap an underlying cause with the name of the failed operation
    pub fn config(operation: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::Config { operation: operation.into(), source: source.into() }
    }

    /// Whether the caller can reasonably retry with different parameters
    pub fn is_recoverable(&self) -> bool {
        self.is_exhausted()
    }

    /// Whether this is the allocator's terminal exhaustion error
    pub fn is_exhausted(&self) -> bool {
        matches!(self, GeneratorError::Vlan(e) if e.kind == VlanErrorKind::Exhausted)
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            GeneratorError::Config { .. } => "Configuration",
            GeneratorError::Vlan(_) => "VLAN",
            GeneratorError::Seed(_) => "Seed Data",
        }
    }

    /// Process exit code used by the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            GeneratorError::Config { .. } => 2,
            GeneratorError::Vlan(_) => 3,
            GeneratorError::Seed(_) => 4,
        }
    }
}

impl From<ConfigError> for GeneratorError {
    fn from(error: ConfigError) -> Self {
        GeneratorError::config("load configuration", error)
    }
}

impl From<ConfigValidationError> for GeneratorError {
    fn from(error: ConfigValidationError) -> Self {
        GeneratorError::config("validate configuration", error)
    }
}

/// Result type for generation operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

//! Enumeration types for the VLAN fixture generator
//!
//! This module contains the enumerations used throughout the generator:
//! RFC 1918 address classes, the class selection policy and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three RFC 1918 private address classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AddressClass {
    /// 10.0.0.0/8
    A,
    /// 172.16.0.0/12
    B,
    /// 192.168.0.0/16
    C,
}

impl AddressClass {
    /// All classes in canonical order
    pub const ALL: [AddressClass; 3] = [AddressClass::A, AddressClass::B, AddressClass::C];

    /// Position of the class in [`AddressClass::ALL`]
    pub fn index(self) -> usize {
        match self {
            AddressClass::A => 0,
            AddressClass::B => 1,
            AddressClass::C => 2,
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressClass::A => write!(f, "Class A"),
            AddressClass::B => write!(f, "Class B"),
            AddressClass::C => write!(f, "Class C"),
        }
    }
}

impl FromStr for AddressClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "class a" | "class-a" | "classa" => Ok(AddressClass::A),
            "b" | "class b" | "class-b" | "classb" => Ok(AddressClass::B),
            "c" | "class c" | "class-c" | "classc" => Ok(AddressClass::C),
            _ => Err(format!("Unknown address class: {}", s)),
        }
    }
}

/// Policy deciding which RFC 1918 class each record's network is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClassPolicy {
    /// Weighted random choice; a class with weight 0 is never drawn
    Weighted {
        /// Relative weight of class A
        a: u32,
        /// Relative weight of class B
        b: u32,
        /// Relative weight of class C
        c: u32,
    },
    /// Record `k` uses class `ALL[k % 3]`
    RoundRobin,
    /// Every record uses the same class
    Only {
        /// The single class to draw from
        class: AddressClass,
    },
}

impl ClassPolicy {
    /// Default weights: mostly class A, which has by far the largest /24 space
    pub const DEFAULT_WEIGHTS: (u32, u32, u32) = (80, 12, 8);

    /// Weight assigned to a class under this policy (0 means never drawn)
    pub fn weight(&self, class: AddressClass) -> u32 {
        match *self {
            ClassPolicy::Weighted { a, b, c } => match class {
                AddressClass::A => a,
                AddressClass::B => b,
                AddressClass::C => c,
            },
            ClassPolicy::RoundRobin => 1,
            ClassPolicy::Only { class: only } => u32::from(only == class),
        }
    }

    /// Sum of all class weights
    pub fn total_weight(&self) -> u64 {
        AddressClass::ALL.iter().map(|class| u64::from(self.weight(*class))).sum()
    }
}

impl Default for ClassPolicy {
    fn default() -> Self {
        let (a, b, c) = Self::DEFAULT_WEIGHTS;
        ClassPolicy::Weighted { a, b, c }
    }
}

impl fmt::Display for ClassPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassPolicy::Weighted { a, b, c } => write!(f, "weighted:{},{},{}", a, b, c),
            ClassPolicy::RoundRobin => write!(f, "round-robin"),
            ClassPolicy::Only { class } => match class {
                AddressClass::A => write!(f, "class-a"),
                AddressClass::B => write!(f, "class-b"),
                AddressClass::C => write!(f, "class-c"),
            },
        }
    }
}

impl FromStr for ClassPolicy {
    type Err = String;

    /// Accepts `weighted`, `weighted:A,B,C`, `round-robin` or a single class name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if lowered == "weighted" {
            return Ok(ClassPolicy::default());
        }
        if let Some(weights) = lowered.strip_prefix("weighted:") {
            let parsed: Vec<u32> = weights
                .split(',')
                .map(|w| w.trim().parse::<u32>())
                .collect::<Result<_, _>>()
                .map_err(|e| format!("Invalid class weights '{}': {}", weights, e))?;
            return match parsed.as_slice() {
                [a, b, c] => Ok(ClassPolicy::Weighted { a: *a, b: *b, c: *c }),
                _ => Err(format!("Expected three class weights, got '{}'", weights)),
            };
        }
        match lowered.as_str() {
            "round-robin" | "roundrobin" | "round_robin" => Ok(ClassPolicy::RoundRobin),
            other => other
                .parse::<AddressClass>()
                .map(|class| ClassPolicy::Only { class })
                .map_err(|_| format!("Unknown class policy: {}", s)),
        }
    }
}

/// Output format options for generated records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// CSV with the legacy `VLAN,IP Range,Beschreibung,WAN` header
    Csv,
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    JsonLines,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::JsonLines => write!(f, "JSON Lines"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "json-lines" | "jsonlines" | "ndjson" => Ok(OutputFormat::JsonLines),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

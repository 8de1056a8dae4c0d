//! Department catalog and DHCP lease times
//!
//! This module contains the Department type, the enumerated lease durations
//! and the read-only DepartmentCatalog the allocator selects from.

use chrono::Duration;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::generation::error::{VlanError, VlanErrorKind};

/// DHCP default lease durations used by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeaseTime {
    /// Four hours
    Hours4,
    /// Eight hours
    Hours8,
    /// Twelve hours
    Hours12,
    /// Sixteen hours
    Hours16,
    /// Twenty hours
    Hours20,
    /// Twenty-four hours
    Hours24,
}

impl LeaseTime {
    /// All lease times in ascending order
    pub const ALL: [LeaseTime; 6] = [
        LeaseTime::Hours4,
        LeaseTime::Hours8,
        LeaseTime::Hours12,
        LeaseTime::Hours16,
        LeaseTime::Hours20,
        LeaseTime::Hours24,
    ];

    /// Lease length in hours
    pub fn hours(self) -> u32 {
        match self {
            LeaseTime::Hours4 => 4,
            LeaseTime::Hours8 => 8,
            LeaseTime::Hours12 => 12,
            LeaseTime::Hours16 => 16,
            LeaseTime::Hours20 => 20,
            LeaseTime::Hours24 => 24,
        }
    }

    /// Lease length as a duration
    pub fn as_duration(self) -> Duration {
        Duration::hours(i64::from(self.hours()))
    }

    /// Default lease in seconds, as written to DHCP server config
    pub fn seconds(self) -> u32 {
        self.hours() * 3600
    }

    /// Maximum lease in seconds (twice the default)
    pub fn max_lease_seconds(self) -> u32 {
        self.seconds() * 2
    }
}

impl fmt::Display for LeaseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.hours())
    }
}

impl FromStr for LeaseTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let hours = trimmed.strip_suffix('h').unwrap_or(&trimmed);
        let hours: u32 = hours.parse().map_err(|_| format!("Invalid lease time: {}", s))?;
        LeaseTime::ALL
            .into_iter()
            .find(|lease| lease.hours() == hours)
            .ok_or_else(|| format!("Unsupported lease time: {}", s))
    }
}

impl Serialize for LeaseTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LeaseTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An organizational department a VLAN is assigned to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Department {
    /// Display name, e.g. "Engineering"
    pub name: String,
    /// DHCP default lease time for this department's VLANs
    pub dhcp_lease_time: LeaseTime,
}

impl Department {
    /// Create a new department
    pub fn new(name: impl Into<String>, dhcp_lease_time: LeaseTime) -> Self {
        Self { name: name.into(), dhcp_lease_time }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const STANDARD_DEPARTMENTS: [(&str, LeaseTime); 20] = [
    ("Sales", LeaseTime::Hours8),
    ("IT", LeaseTime::Hours24),
    ("HR", LeaseTime::Hours4),
    ("Finance", LeaseTime::Hours12),
    ("Marketing", LeaseTime::Hours8),
    ("Operations", LeaseTime::Hours16),
    ("Engineering", LeaseTime::Hours24),
    ("Support", LeaseTime::Hours4),
    ("Legal", LeaseTime::Hours12),
    ("Procurement", LeaseTime::Hours20),
    ("Security", LeaseTime::Hours8),
    ("Development", LeaseTime::Hours24),
    ("QA", LeaseTime::Hours4),
    ("Research", LeaseTime::Hours16),
    ("Training", LeaseTime::Hours8),
    ("Management", LeaseTime::Hours20),
    ("Accounting", LeaseTime::Hours12),
    ("Customer Service", LeaseTime::Hours4),
    ("Logistics", LeaseTime::Hours16),
    ("Production", LeaseTime::Hours24),
];

/// Immutable, ordered list of departments with name lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCatalog {
    departments: Vec<Department>,
    name_index: HashMap<String, usize>,
}

impl DepartmentCatalog {
    /// Build a catalog; names must be non-empty and unique
    pub fn new(departments: Vec<Department>) -> Result<Self, VlanError> {
        if departments.is_empty() {
            return Err(VlanError::new(
                None,
                "department",
                VlanErrorKind::Invalid,
                "department catalog must not be empty",
            ));
        }

        let mut name_index = HashMap::with_capacity(departments.len());
        for (idx, department) in departments.iter().enumerate() {
            if department.name.trim().is_empty() {
                return Err(VlanError::new(
                    None,
                    "department",
                    VlanErrorKind::Invalid,
                    format!("department at position {} has an empty name", idx),
                ));
            }
            if name_index.insert(department.name.clone(), idx).is_some() {
                return Err(VlanError::new(
                    None,
                    "department",
                    VlanErrorKind::Duplicate,
                    format!("department '{}' listed twice", department.name),
                ));
            }
        }

        Ok(Self { departments, name_index })
    }

    /// The standard 20-entry catalog
    pub fn standard() -> Self {
        let departments: Vec<Department> = STANDARD_DEPARTMENTS
            .iter()
            .map(|(name, lease)| Department::new(*name, *lease))
            .collect();
        let name_index =
            departments.iter().enumerate().map(|(idx, d)| (d.name.clone(), idx)).collect();
        Self { departments, name_index }
    }

    /// Number of departments
    pub fn len(&self) -> usize {
        self.departments.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Department at `index`
    pub fn get(&self, index: usize) -> Option<&Department> {
        self.departments.get(index)
    }

    /// Look up a department by exact name
    pub fn find(&self, name: &str) -> Option<&Department> {
        self.name_index.get(name).map(|idx| &self.departments[*idx])
    }

    /// Iterate in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Department> {
        self.departments.iter()
    }

    /// Uniformly pick one department, consuming a single draw
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Department {
        &self.departments[rng.gen_range(0..self.departments.len())]
    }
}

impl Default for DepartmentCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a DepartmentCatalog {
    type Item = &'a Department;
    type IntoIter = std::slice::Iter<'a, Department>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

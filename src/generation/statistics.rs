//! Statistics collection and reporting
//!
//! Per-run counters kept by the allocator: attempts, collisions per field and
//! accepted records per address class.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::types::AddressClass;

/// Counters for a single generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatistics {
    /// Records requested
    pub requested: usize,
    /// Candidate tuples drawn, accepted or not
    pub attempts: u64,
    /// Records accepted
    pub accepted: usize,
    /// Attempts whose VLAN ID was already taken
    pub vlan_collisions: u64,
    /// Attempts whose network was already taken
    pub network_collisions: u64,
    /// Accepted records per class, indexed by [`AddressClass::index`]
    pub per_class: [usize; 3],
    /// Seed the run was started with
    pub seed: u64,
    /// Wall-clock time spent generating
    pub duration: Duration,
}

impl GenerationStatistics {
    /// Create empty statistics for a run
    pub fn new(requested: usize, seed: u64) -> Self {
        Self { requested, seed, ..Default::default() }
    }

    /// Count one drawn candidate
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Count a candidate rejected on one or both unique fields
    pub fn record_collision(&mut self, vlan_taken: bool, network_taken: bool) {
        if vlan_taken {
            self.vlan_collisions += 1;
        }
        if network_taken {
            self.network_collisions += 1;
        }
    }

    /// Count an accepted record of the given class
    pub fn record_accepted(&mut self, class: AddressClass) {
        self.accepted += 1;
        self.per_class[class.index()] += 1;
    }

    /// Set the elapsed generation time
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Attempts that were rejected
    pub fn rejected_attempts(&self) -> u64 {
        self.attempts.saturating_sub(self.accepted as u64)
    }

    /// Share of attempts that were rejected, in percent
    pub fn collision_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            (self.rejected_attempts() as f64 / self.attempts as f64) * 100.0
        }
    }

    /// Accepted records of a class
    pub fn class_count(&self, class: AddressClass) -> usize {
        self.per_class[class.index()]
    }

    /// Share of accepted records in a class, in percent
    pub fn class_percentage(&self, class: AddressClass) -> f64 {
        if self.accepted == 0 {
            0.0
        } else {
            (self.class_count(class) as f64 / self.accepted as f64) * 100.0
        }
    }

    /// Multi-line report printed after generation
    pub fn summary(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Generation Summary ===\n");
        report.push_str(&format!("Seed: {}\n", self.seed));
        report.push_str(&format!("Records: {} of {} requested\n", self.accepted, self.requested));
        report.push_str(&format!(
            "Attempts: {} ({} rejected, {:.1}%)\n",
            self.attempts,
            self.rejected_attempts(),
            self.collision_rate()
        ));
        report.push_str(&format!(
            "Collisions: {} VLAN ID, {} network\n",
            self.vlan_collisions, self.network_collisions
        ));

        report.push_str("Address classes:\n");
        for class in AddressClass::ALL {
            report.push_str(&format!(
                "  - {}: {} ({:.1}%)\n",
                class,
                self.class_count(class),
                self.class_percentage(class)
            ));
        }

        report.push_str(&format!("Duration: {:.3} seconds\n", self.duration.as_secs_f64()));
        report
    }

    /// Compact one-line summary suitable for logging
    pub fn compact_summary(&self) -> String {
        format!(
            "Generation: {} records, {} attempts ({} VLAN / {} network collisions), A/B/C = {}/{}/{}",
            self.accepted,
            self.attempts,
            self.vlan_collisions,
            self.network_collisions,
            self.per_class[0],
            self.per_class[1],
            self.per_class[2]
        )
    }
}

impl fmt::Display for GenerationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

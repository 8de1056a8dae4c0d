//! Random /24 prefix generation inside the RFC 1918 classes
//!
//! Every generator here consumes entropy only from the random source handed
//! in by the caller, so a seeded source reproduces the same prefixes.

use rand::Rng;

use super::prefix::NetworkPrefix;
use crate::generation::error::{VlanError, VlanErrorKind};
use crate::types::{AddressClass, ClassPolicy};

/// Lowest randomized octet value; 0 is never produced
pub const OCTET_MIN: u8 = 1;
/// Highest randomized octet value; 255 is never produced
pub const OCTET_MAX: u8 = 254;
/// Class B second octet range (172.16.0.0/12)
pub const CLASS_B_SECOND_OCTET: std::ops::RangeInclusive<u8> = 16..=31;

/// `10.b.c.0/24` with `b` and `c` in 1..=254
pub fn random_class_a<R: Rng + ?Sized>(rng: &mut R) -> NetworkPrefix {
    let second = rng.gen_range(OCTET_MIN..=OCTET_MAX);
    let third = rng.gen_range(OCTET_MIN..=OCTET_MAX);
    NetworkPrefix::slash24(10, second, third)
}

/// `172.b.c.0/24` with `b` in 16..=31 and `c` in 1..=254
pub fn random_class_b<R: Rng + ?Sized>(rng: &mut R) -> NetworkPrefix {
    let second = rng.gen_range(CLASS_B_SECOND_OCTET);
    let third = rng.gen_range(OCTET_MIN..=OCTET_MAX);
    NetworkPrefix::slash24(172, second, third)
}

/// `192.168.c.0/24` with `c` in 1..=254
pub fn random_class_c<R: Rng + ?Sized>(rng: &mut R) -> NetworkPrefix {
    let third = rng.gen_range(OCTET_MIN..=OCTET_MAX);
    NetworkPrefix::slash24(192, 168, third)
}

/// Draw a /24 from the given class
pub fn random_prefix<R: Rng + ?Sized>(class: AddressClass, rng: &mut R) -> NetworkPrefix {
    match class {
        AddressClass::A => random_class_a(rng),
        AddressClass::B => random_class_b(rng),
        AddressClass::C => random_class_c(rng),
    }
}

/// Number of distinct /24 prefixes the generator can produce for a class
pub fn class_capacity(class: AddressClass) -> usize {
    let octet_values = usize::from(OCTET_MAX - OCTET_MIN) + 1;
    match class {
        AddressClass::A => octet_values * octet_values,
        AddressClass::B => CLASS_B_SECOND_OCTET.count() * octet_values,
        AddressClass::C => octet_values,
    }
}

/// Chooses the class for each record according to a [`ClassPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSelector {
    policy: ClassPolicy,
    total_weight: u64,
}

impl ClassSelector {
    /// Create a selector; a weighted policy with every weight at zero is invalid
    pub fn new(policy: ClassPolicy) -> Result<Self, VlanError> {
        let total_weight = policy.total_weight();
        if total_weight == 0 {
            return Err(VlanError::new(
                None,
                "class_policy",
                VlanErrorKind::Invalid,
                "at least one address class needs a non-zero weight",
            ));
        }
        Ok(Self { policy, total_weight })
    }

    /// The policy this selector applies
    pub fn policy(&self) -> ClassPolicy {
        self.policy
    }

    /// Class for the record at `record_index`.
    ///
    /// Weighted selection consumes one draw; round-robin and single-class
    /// policies consume none.
    pub fn select<R: Rng + ?Sized>(&self, record_index: usize, rng: &mut R) -> AddressClass {
        match self.policy {
            ClassPolicy::RoundRobin => AddressClass::ALL[record_index % AddressClass::ALL.len()],
            ClassPolicy::Only { class } => class,
            ClassPolicy::Weighted { .. } => {
                let mut roll = rng.gen_range(0..self.total_weight);
                for class in AddressClass::ALL {
                    let weight = u64::from(self.policy.weight(class));
                    if roll < weight {
                        return class;
                    }
                    roll -= weight;
                }
                // roll < total_weight, so the loop always returns
                AddressClass::C
            }
        }
    }

    /// Chance that a fresh network drawn for `record_index` is still unused,
    /// given the per-class counts already taken (indexed by [`AddressClass::index`])
    pub fn free_fraction(&self, record_index: usize, used: &[usize; 3]) -> f64 {
        let free = |class: AddressClass| {
            let capacity = class_capacity(class);
            capacity.saturating_sub(used[class.index()]) as f64 / capacity as f64
        };
        match self.policy {
            ClassPolicy::RoundRobin => free(AddressClass::ALL[record_index % AddressClass::ALL.len()]),
            ClassPolicy::Only { class } => free(class),
            ClassPolicy::Weighted { .. } => AddressClass::ALL
                .into_iter()
                .map(|class| f64::from(self.policy.weight(class)) * free(class))
                .sum::<f64>()
                / self.total_weight as f64,
        }
    }

    /// Largest batch whose networks can all be distinct under this policy
    pub fn network_capacity(&self) -> usize {
        match self.policy {
            ClassPolicy::Only { class } => class_capacity(class),
            ClassPolicy::Weighted { .. } => AddressClass::ALL
                .into_iter()
                .filter(|class| self.policy.weight(*class) > 0)
                .map(class_capacity)
                .sum(),
            // record k uses class k % 3, so the smallest class caps the batch
            ClassPolicy::RoundRobin => AddressClass::ALL
                .into_iter()
                .map(|class| 3 * class_capacity(class) + class.index())
                .min()
                .unwrap_or(0),
        }
    }
}

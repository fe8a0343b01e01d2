//! Observation types catalog
use std::collections::HashMap;

use itertools::Itertools;

use crate::{observable::Observable, sv::Sv};

/// Catalog key of the V2 observables, shared by all systems
pub const UNIVERSAL_SYSTEM: char = ' ';

/// Observables declared for one system
#[derive(Debug, Clone, Default, PartialEq)]
struct Entry {
    /// Declared number of observables
    declared: usize,
    /// Observables, in order of declaration
    observables: Vec<Observable>,
}

impl Entry {
    fn is_complete(&self) -> bool {
        self.observables.len() >= self.declared
    }
}

/// [Catalog] maps a GNSS system letter to its ordered list of [Observable]s.
/// RINEX V2 uses one universal entry keyed by [UNIVERSAL_SYSTEM].
/// RINEX V3 declares one entry per system.
/// Entries are built from header lines, and cannot change
/// once they reached their declared length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: HashMap<char, Entry>,
}

impl Catalog {
    /// Returns true if no system was declared yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if this system was declared
    pub fn contains(&self, system: char) -> bool {
        self.entries.contains_key(&system)
    }

    /// Returns [Observable]s declared for this system
    pub fn observables(&self, system: char) -> Option<&[Observable]> {
        self.entries
            .get(&system)
            .map(|entry| entry.observables.as_slice())
    }

    /// Returns the V2 universal [Observable]s
    pub fn universal(&self) -> Option<&[Observable]> {
        self.observables(UNIVERSAL_SYSTEM)
    }

    /// Returns [Observable]s that describe this [Sv]'s observations:
    /// either its own system entry, or the V2 universal entry.
    pub fn for_sv(&self, sv: &Sv) -> Option<&[Observable]> {
        self.observables(sv.system())
            .or_else(|| self.universal())
    }

    /// Returns declared systems, in alphabetical order
    pub fn systems(&self) -> Vec<char> {
        self.entries.keys().copied().sorted().collect()
    }

    /// Returns true if this system's declaration was fully received
    pub fn is_complete(&self, system: char) -> bool {
        self.entries
            .get(&system)
            .map(|entry| entry.is_complete())
            .unwrap_or(false)
    }

    /// Declares a new system, expecting this many [Observable]s.
    /// Returns false if this system was already fully declared,
    /// in which case the catalog is left untouched.
    pub(crate) fn declare(&mut self, system: char, declared: usize) -> bool {
        match self.entries.get(&system) {
            Some(entry) if entry.is_complete() => false,
            _ => {
                self.entries.insert(
                    system,
                    Entry {
                        declared,
                        observables: Vec::with_capacity(declared),
                    },
                );
                true
            },
        }
    }

    /// Appends one [Observable] to this system's entry.
    /// Returns true once the entry is complete.
    /// Complete or undeclared entries are left untouched.
    pub(crate) fn push(&mut self, system: char, observable: Observable) -> bool {
        match self.entries.get_mut(&system) {
            Some(entry) => {
                if !entry.is_complete() {
                    entry.observables.push(observable);
                }
                entry.is_complete()
            },
            None => false,
        }
    }
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (index, system) in self.systems().into_iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let observables = self.observables(system).unwrap_or(&[]);
            write!(f, "'{}': {}", system, observables.iter().join(", "))?;
        }
        Ok(())
    }
}

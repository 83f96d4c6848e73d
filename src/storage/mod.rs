//! # Triple Store Trait
//!
//! This is THE contract between the analysis core and any fact store.
//! The detector and navigator only ever call `find`; the write methods exist
//! so one store type can serve ingestion and analysis alike.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | Indexed in-memory store for testing/embedding |

pub mod memory;

use crate::model::{Triple, TriplePattern};
use crate::Result;

pub use memory::MemoryStore;

// ============================================================================
// TripleStore Trait
// ============================================================================

/// The fact store contract.
///
/// `find` takes `""` as a wildcard in any position. The order of returned
/// triples is store-defined and callers must not rely on it, not even
/// across two identical calls.
///
/// Thread-safety of concurrent reads is the store's responsibility; the
/// trait requires `Send + Sync` so one store can back several analyses.
pub trait TripleStore: Send + Sync {
    // ========================================================================
    // Query
    // ========================================================================

    /// All triples matching the pattern. `""` matches anything.
    fn find(&self, subject: &str, predicate: &str, object: &str) -> Vec<Triple>;

    /// Total number of stored triples.
    fn count(&self) -> usize;

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a triple. Returns `false` if it was already present.
    ///
    /// Fails with `Error::InvalidTriple` if any component is empty.
    fn insert(&self, triple: Triple) -> Result<bool>;

    /// Remove every triple matching the pattern. Returns how many were removed.
    fn remove(&self, subject: &str, predicate: &str, object: &str) -> usize;

    // ========================================================================
    // Provided helpers
    // ========================================================================

    /// `find` with a typed pattern.
    fn find_pattern(&self, pattern: &TriplePattern) -> Vec<Triple> {
        let (s, p, o) = pattern.as_parts();
        self.find(s, p, o)
    }

    /// The object of a `(subject, predicate, _)` match.
    ///
    /// With multi-valued predicates the lexicographically smallest object
    /// wins, so the answer does not depend on store iteration order.
    fn object_of(&self, subject: &str, predicate: &str) -> Option<String> {
        if subject.is_empty() || predicate.is_empty() {
            return None;
        }
        self.find(subject, predicate, "").into_iter().map(|t| t.object).min()
    }

    /// Whether the exact triple is present.
    fn contains(&self, subject: &str, predicate: &str, object: &str) -> bool {
        if subject.is_empty() || predicate.is_empty() || object.is_empty() {
            return false;
        }
        !self.find(subject, predicate, object).is_empty()
    }

    /// Convenience wrapper around `insert`.
    fn add(&self, subject: &str, predicate: &str, object: &str) -> Result<bool> {
        self.insert(Triple::new(subject, predicate, object))
    }
}

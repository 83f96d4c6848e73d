//! In-memory triple store.
//!
//! This is the reference implementation of `TripleStore`.
//! It keeps three hash indexes behind a single `RwLock`:
//!
//! - **SPO**: subject → predicate → objects (facts about a subject)
//! - **POS**: predicate → object → subjects (subjects with property = value)
//! - **OSP**: object → subject → predicates (who points at an object)
//!
//! ## Limitations
//!
//! - **No persistence**: contents live as long as the last clone.
//! - **Unordered results**: `find` returns triples in hash order, which
//!   changes between runs. Callers that need a stable order sort.
//!
//! Use this store for:
//! - Testing the detector and navigator
//! - Embedding the analysis core in tools that load facts themselves

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;

use crate::model::Triple;
use crate::{Error, Result};
use super::TripleStore;

type Index = HashMap<String, HashMap<String, HashSet<String>>>;

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory triple store. Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    spo: Index,
    pos: Index,
    osp: Index,
    count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(subject, predicate, object)` tuples.
    ///
    /// Invalid tuples (any empty component) are rejected.
    pub fn from_triples<I, S, P, O>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, P, O)>,
        S: Into<String>,
        P: Into<String>,
        O: Into<String>,
    {
        let store = Self::new();
        for (s, p, o) in triples {
            store.insert(Triple::new(s, p, o))?;
        }
        Ok(store)
    }

    /// Remove everything.
    pub fn clear(&self) {
        *self.inner.write() = MemoryInner::default();
    }

    /// Distinct subjects, sorted.
    pub fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self.inner.read().spo.keys().cloned().collect();
        subjects.sort();
        subjects
    }

    /// Every triple, sorted. Handy for snapshots and debugging.
    pub fn all(&self) -> Vec<Triple> {
        let mut triples = self.find("", "", "");
        triples.sort();
        triples
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").field("count", &self.count()).finish()
    }
}

// ============================================================================
// Index plumbing
// ============================================================================

fn index_insert(index: &mut Index, a: &str, b: &str, c: &str) -> bool {
    index
        .entry_ref(a)
        .or_default()
        .entry_ref(b)
        .or_default()
        .insert(c.to_string())
}

fn index_remove(index: &mut Index, a: &str, b: &str, c: &str) {
    let Some(inner) = index.get_mut(a) else { return };
    if let Some(leaf) = inner.get_mut(b) {
        leaf.remove(c);
        if leaf.is_empty() {
            inner.remove(b);
        }
    }
    if inner.is_empty() {
        index.remove(a);
    }
}

impl MemoryInner {
    fn find(&self, subject: &str, predicate: &str, object: &str) -> Vec<Triple> {
        let mut results = Vec::new();

        match (subject.is_empty(), predicate.is_empty(), object.is_empty()) {
            // Everything
            (true, true, true) => {
                for (s, p_map) in &self.spo {
                    for (p, objects) in p_map {
                        results.extend(objects.iter().map(|o| Triple::new(s, p, o)));
                    }
                }
            }
            // Subject known: SPO
            (false, _, _) => {
                let Some(p_map) = self.spo.get(subject) else { return results };
                for (p, objects) in p_map {
                    if !predicate.is_empty() && p != predicate {
                        continue;
                    }
                    if object.is_empty() {
                        results.extend(objects.iter().map(|o| Triple::new(subject, p, o)));
                    } else if objects.contains(object) {
                        results.push(Triple::new(subject, p, object));
                    }
                }
            }
            // Predicate known, subject wildcard: POS
            (true, false, _) => {
                let Some(o_map) = self.pos.get(predicate) else { return results };
                for (o, subjects) in o_map {
                    if !object.is_empty() && o != object {
                        continue;
                    }
                    results.extend(subjects.iter().map(|s| Triple::new(s, predicate, o)));
                }
            }
            // Only object known: OSP
            (true, true, false) => {
                let Some(s_map) = self.osp.get(object) else { return results };
                for (s, predicates) in s_map {
                    results.extend(predicates.iter().map(|p| Triple::new(s, p, object)));
                }
            }
        }

        results
    }

    fn insert(&mut self, t: &Triple) -> bool {
        if !index_insert(&mut self.spo, &t.subject, &t.predicate, &t.object) {
            return false;
        }
        index_insert(&mut self.pos, &t.predicate, &t.object, &t.subject);
        index_insert(&mut self.osp, &t.object, &t.subject, &t.predicate);
        self.count += 1;
        true
    }

    fn remove(&mut self, t: &Triple) {
        index_remove(&mut self.spo, &t.subject, &t.predicate, &t.object);
        index_remove(&mut self.pos, &t.predicate, &t.object, &t.subject);
        index_remove(&mut self.osp, &t.object, &t.subject, &t.predicate);
        self.count -= 1;
    }
}

// ============================================================================
// TripleStore impl
// ============================================================================

impl TripleStore for MemoryStore {
    fn find(&self, subject: &str, predicate: &str, object: &str) -> Vec<Triple> {
        self.inner.read().find(subject, predicate, object)
    }

    fn count(&self) -> usize {
        self.inner.read().count
    }

    fn insert(&self, triple: Triple) -> Result<bool> {
        if !triple.is_valid() {
            return Err(Error::InvalidTriple(triple.to_string()));
        }
        Ok(self.inner.write().insert(&triple))
    }

    fn remove(&self, subject: &str, predicate: &str, object: &str) -> usize {
        let mut inner = self.inner.write();
        let doomed = inner.find(subject, predicate, object);
        for t in &doomed {
            inner.remove(t);
        }
        doomed.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

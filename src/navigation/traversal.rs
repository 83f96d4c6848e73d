//! Breadth-first traversal over the store.
//!
//! Path finding walks raw store adjacency, ignoring filters and the node
//! cache. Subgraph extraction walks loaded node connections instead; see
//! `GraphNavigator::subgraph`.

use std::collections::{BTreeSet, VecDeque};

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::model::literal::is_uri;
use crate::model::{Connection, NavigationNode};
use crate::storage::TripleStore;

/// Undirected neighbours of `uri`: URI-like objects of its outgoing triples
/// plus subjects of its incoming triples. Sorted and deduplicated.
pub fn neighbors(store: &dyn TripleStore, uri: &str) -> Vec<String> {
    let mut out: BTreeSet<String> = BTreeSet::new();
    for t in store.find(uri, "", "") {
        if is_uri(&t.object) {
            out.insert(t.object);
        }
    }
    for t in store.find("", "", uri) {
        out.insert(t.subject);
    }
    out.into_iter().collect()
}

/// First shortest path from `from` to `to` using at most `max_hops` edges.
///
/// Neighbours are visited in sorted order, so among equal-length paths the
/// lexicographically earliest one wins.
pub fn shortest_path(store: &dyn TripleStore, from: &str, to: &str, max_hops: usize) -> Option<Vec<String>> {
    if from == to {
        return Some(vec![from.to_string()]);
    }

    let mut parent: HashMap<String, String> = HashMap::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<(String, usize)> = VecDeque::new();
    seen.insert(from.to_string());
    queue.push_back((from.to_string(), 0));

    while let Some((current, hops)) = queue.pop_front() {
        if hops >= max_hops {
            continue;
        }
        for next in neighbors(store, &current) {
            if !seen.insert(next.clone()) {
                continue;
            }
            parent.insert(next.clone(), current.clone());
            if next == to {
                return Some(unwind(&parent, from, to));
            }
            queue.push_back((next, hops + 1));
        }
    }

    None
}

fn unwind(parent: &HashMap<String, String>, from: &str, to: &str) -> Vec<String> {
    let mut path = vec![to.to_string()];
    let mut cursor = to;
    while cursor != from {
        let Some(prev) = parent.get(cursor) else { break };
        path.push(prev.clone());
        cursor = prev.as_str();
    }
    path.reverse();
    path
}

// ============================================================================
// Subgraph
// ============================================================================

/// A connection together with the node it leaves from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphEdge {
    pub source_uri: String,
    #[serde(flatten)]
    pub connection: Connection,
}

/// Nodes within a hop bound of a focus node, in BFS order, and the
/// connections traversed to reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgraph {
    pub focus_uri: String,
    pub nodes: Vec<NavigationNode>,
    pub connections: Vec<SubgraphEdge>,
}

impl Subgraph {
    pub fn node(&self, uri: &str) -> Option<&NavigationNode> {
        self.nodes.iter().find(|n| n.uri == uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.node(uri).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn chain() -> MemoryStore {
        MemoryStore::from_triples([
            ("n:a", "p:next", "n:b"),
            ("n:b", "p:next", "n:c"),
            ("n:c", "p:next", "n:d"),
            ("n:a", "p:note", "free text"),
        ])
        .unwrap()
    }

    #[test]
    fn test_neighbors_are_undirected_and_skip_literals() {
        let store = chain();
        assert_eq!(neighbors(&store, "n:b"), ["n:a", "n:c"]);
        assert_eq!(neighbors(&store, "n:a"), ["n:b"]);
    }

    #[test]
    fn test_path_respects_hop_bound() {
        let store = chain();
        assert_eq!(shortest_path(&store, "n:a", "n:c", 2).unwrap(), ["n:a", "n:b", "n:c"]);
        assert!(shortest_path(&store, "n:a", "n:c", 1).is_none());
        assert_eq!(shortest_path(&store, "n:d", "n:a", 3).unwrap(), ["n:d", "n:c", "n:b", "n:a"]);
    }

    #[test]
    fn test_path_to_self() {
        assert_eq!(shortest_path(&chain(), "n:a", "n:a", 0).unwrap(), ["n:a"]);
    }

    #[test]
    fn test_equal_length_paths_pick_sorted_first() {
        let store = MemoryStore::from_triples([
            ("n:s", "p:x", "n:right"),
            ("n:s", "p:x", "n:left"),
            ("n:left", "p:x", "n:t"),
            ("n:right", "p:x", "n:t"),
        ])
        .unwrap();
        assert_eq!(shortest_path(&store, "n:s", "n:t", 5).unwrap(), ["n:s", "n:left", "n:t"]);
    }

    #[test]
    fn test_disconnected() {
        let store = chain();
        store.add("n:z", "p:next", "n:y").unwrap();
        assert!(shortest_path(&store, "n:a", "n:z", 10).is_none());
    }
}

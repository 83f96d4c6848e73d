//! Cycle detection over the motion reference graph.
//!
//! # Edge Direction
//!
//! An edge `A → B` means "motion A references motion B". A cycle means no
//! motion in it can be settled before the others.

use std::collections::{BTreeMap, HashSet};

/// Adjacency list keyed by node, neighbours sorted and deduplicated.
pub type Adjacency = BTreeMap<String, Vec<String>>;

/// Find cycles with an iterative depth-first search.
///
/// The search keeps an explicit frame stack, the current path and the set
/// of nodes on that path. Every edge that reaches back to a node on the path
/// closes a cycle; the cycle is the path suffix starting at that node.
///
/// Roots are visited in key order and neighbours in list order, so the
/// result is deterministic for a given adjacency. A simple cycle of N nodes
/// is reported exactly once. Cycles that share nodes are reported
/// separately, one per closing edge: `A ⇄ B ⇄ C` yields `[A, B]` and `[B, C]`.
#[must_use]
pub fn find_cycles(adjacency: &Adjacency) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_path: HashSet<&str> = HashSet::new();
    let mut path: Vec<&str> = Vec::new();
    // (node, index of the next neighbour to look at)
    let mut frames: Vec<(&str, usize)> = Vec::new();

    for root in adjacency.keys() {
        if !visited.insert(root.as_str()) {
            continue;
        }
        on_path.insert(root);
        path.push(root);
        frames.push((root, 0));

        while let Some(&(node, cursor)) = frames.last() {
            let neighbours = adjacency.get(node).map(Vec::as_slice).unwrap_or_default();

            let Some(next) = neighbours.get(cursor) else {
                frames.pop();
                on_path.remove(node);
                path.pop();
                continue;
            };

            if let Some(top) = frames.last_mut() {
                top.1 += 1;
            }

            let next = next.as_str();
            if visited.insert(next) {
                on_path.insert(next);
                path.push(next);
                frames.push((next, 0));
            } else if on_path.contains(next) {
                if let Some(start) = path.iter().position(|n| *n == next) {
                    cycles.push(path[start..].iter().map(|n| n.to_string()).collect());
                }
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> Adjacency {
        let mut adj = Adjacency::new();
        for (from, to) in edges {
            adj.entry(from.to_string()).or_default().push(to.to_string());
        }
        for targets in adj.values_mut() {
            targets.sort();
            targets.dedup();
        }
        adj
    }

    #[test]
    fn test_triangle() {
        let cycles = find_cycles(&graph(&[("A", "B"), ("B", "C"), ("C", "A")]));
        assert_eq!(cycles, vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn test_acyclic_chain() {
        assert!(find_cycles(&graph(&[("A", "B"), ("B", "C")])).is_empty());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let adj = graph(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        assert!(find_cycles(&adj).is_empty());
    }

    #[test]
    fn test_cycle_behind_a_tail() {
        // X → A → B → A: only A and B loop.
        let cycles = find_cycles(&graph(&[("X", "A"), ("A", "B"), ("B", "A")]));
        assert_eq!(cycles, vec![vec!["A", "B"]]);
    }

    #[test]
    fn test_two_disjoint_cycles() {
        let adj = graph(&[("A", "B"), ("B", "A"), ("C", "D"), ("D", "C")]);
        let cycles = find_cycles(&adj);
        assert_eq!(cycles.len(), 2);
        assert!(cycles.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_overlapping_cycles_reported_separately() {
        let adj = graph(&[("A", "B"), ("B", "A"), ("B", "C"), ("C", "B")]);
        assert_eq!(find_cycles(&adj), vec![vec!["A", "B"], vec!["B", "C"]]);
    }

    #[test]
    fn test_self_reference() {
        let cycles = find_cycles(&graph(&[("A", "A")]));
        assert_eq!(cycles, vec![vec!["A"]]);
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let names: Vec<String> = (0..50_000).map(|i| format!("m{i:05}")).collect();
        let mut adj = Adjacency::new();
        for pair in names.windows(2) {
            adj.insert(pair[0].clone(), vec![pair[1].clone()]);
        }
        adj.insert(names[names.len() - 1].clone(), vec![names[0].clone()]);

        let cycles = find_cycles(&adj);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), names.len());
    }
}

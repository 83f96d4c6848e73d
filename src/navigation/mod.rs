//! # Graph Navigator
//!
//! Interactive exploration of the deliberation graph: focus, expand, back,
//! search, shortest path and subgraph extraction.
//!
//! The navigator itself is stateless apart from its store handle and
//! config. Every session lives in a caller-owned [`NavigationState`], so one
//! navigator can serve any number of sessions.
//!
//! ```rust
//! use std::sync::Arc;
//! use deliberation_graph::{GraphNavigator, MemoryStore};
//!
//! # fn main() -> deliberation_graph::Result<()> {
//! let store = MemoryStore::from_triples([
//!     ("meeting:1", "rdf:type", "reg:Meeting"),
//!     ("meeting:1", "reg:hasAgendaItem", "agenda:1"),
//! ])?;
//! let navigator = GraphNavigator::new(Arc::new(store));
//! let mut session = navigator.session();
//!
//! let node = navigator.focus(&mut session, "meeting:1")?;
//! assert_eq!(node.connections.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod state;
pub mod traversal;

use std::collections::VecDeque;
use std::sync::Arc;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::model::literal::{is_uri, local_name};
use crate::model::{Connection, ConnectionDirection, NavigationNode, Triple};
use crate::storage::TripleStore;
use crate::{vocab, Error, Result};

pub use classify::{classify_node_type, format_predicate_label, resolve_label};
pub use state::{LayoutType, NavigationFilters, NavigationState};
pub use traversal::{Subgraph, SubgraphEdge};

// ============================================================================
// Configuration
// ============================================================================

/// Defaults for new sessions and unbounded path searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Hop bound used when `find_path` is given `0`.
    pub default_max_depth: usize,
    pub default_filters: NavigationFilters,
    pub default_layout: LayoutType,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            default_max_depth: 10,
            default_filters: NavigationFilters::default(),
            default_layout: LayoutType::default(),
        }
    }
}

// ============================================================================
// Navigator
// ============================================================================

/// Lazily loads nodes from a triple store into navigation sessions.
#[derive(Clone, Default)]
pub struct GraphNavigator {
    store: Option<Arc<dyn TripleStore>>,
    config: NavigatorConfig,
}

impl std::fmt::Debug for GraphNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphNavigator")
            .field("has_store", &self.store.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl GraphNavigator {
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        Self { store: Some(store), config: NavigatorConfig::default() }
    }

    pub fn with_store(mut self, store: Arc<dyn TripleStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// A fresh session seeded with the configured filters and layout.
    pub fn session(&self) -> NavigationState {
        NavigationState::new(self.config.default_filters.clone(), self.config.default_layout)
    }

    fn store(&self) -> Result<&dyn TripleStore> {
        self.store
            .as_deref()
            .ok_or_else(|| Error::Configuration("graph navigator has no triple store".into()))
    }

    // ========================================================================
    // Session operations
    // ========================================================================

    /// Load `uri`, make it the focus and push it onto the history.
    pub fn focus<'s>(&self, state: &'s mut NavigationState, uri: &str) -> Result<&'s NavigationNode> {
        let store = self.store()?;
        ensure_loaded(store, state, uri);
        state.focus_node = Some(uri.to_string());
        state.visited_nodes.push(uri.to_string());
        cached(state, uri)
    }

    /// The cached node for `uri`, building and caching it on first use.
    pub fn load_node<'s>(&self, state: &'s mut NavigationState, uri: &str) -> Result<&'s NavigationNode> {
        let store = self.store()?;
        ensure_loaded(store, state, uri);
        cached(state, uri)
    }

    /// Mark `uri` expanded and load every neighbour not yet cached, one
    /// level deeper than `uri`. Does not change the focus.
    pub fn expand<'s>(&self, state: &'s mut NavigationState, uri: &str) -> Result<&'s NavigationNode> {
        let store = self.store()?;
        ensure_loaded(store, state, uri);
        state.expanded_nodes.insert(uri.to_string());

        let (depth, targets) = {
            let node = cached(state, uri)?;
            let targets: Vec<String> = node.connections.iter().map(|c| c.target_uri.clone()).collect();
            (node.depth, targets)
        };

        for target in targets {
            if state.nodes.contains_key(target.as_str()) {
                continue;
            }
            ensure_loaded(store, state, &target);
            if let Some(node) = state.nodes.get_mut(target.as_str()) {
                node.depth = depth + 1;
            }
        }

        cached(state, uri)
    }

    /// Remove `uri` from the expanded set. Cached data stays.
    /// Returns whether it was expanded.
    pub fn collapse(&self, state: &mut NavigationState, uri: &str) -> bool {
        state.expanded_nodes.remove(uri)
    }

    /// Pop the current node off the history and refocus the previous one.
    pub fn back<'s>(&self, state: &'s mut NavigationState) -> Result<&'s NavigationNode> {
        if state.visited_nodes.len() < 2 {
            return Err(Error::NoHistory);
        }
        state.visited_nodes.pop();
        let previous = state.visited_nodes.last().cloned().ok_or(Error::NoHistory)?;
        state.focus_node = Some(previous.clone());
        cached(state, &previous)
    }

    /// Nodes whose label or URI contains `query`, case-insensitively.
    ///
    /// Looks at cached nodes first, then scans `reg:title` across the store
    /// and loads any matching subject not yet cached. Ranked exact label
    /// match first, then label prefix, then alphabetically by label.
    pub fn search(&self, state: &mut NavigationState, query: &str) -> Result<Vec<NavigationNode>> {
        let store = self.store()?;
        let needle = query.to_lowercase();

        let mut seen: HashSet<String> = HashSet::new();
        let mut results: Vec<NavigationNode> = Vec::new();

        for node in state.nodes.values() {
            if node.label.to_lowercase().contains(&needle) || node.uri.to_lowercase().contains(&needle) {
                seen.insert(node.uri.clone());
                results.push(node.clone());
            }
        }

        let mut titled: Vec<Triple> = store.find("", vocab::PROP_TITLE, "");
        titled.sort();
        for t in titled {
            if seen.contains(t.subject.as_str()) || !t.object.to_lowercase().contains(&needle) {
                continue;
            }
            ensure_loaded(store, state, &t.subject);
            results.push(cached(state, &t.subject)?.clone());
            seen.insert(t.subject);
        }

        results.sort_by_cached_key(|node| {
            let label = node.label.to_lowercase();
            (label != needle, !label.starts_with(&needle), label, node.uri.clone())
        });
        debug!(query, hits = results.len(), "search finished");
        Ok(results)
    }

    /// Shortest undirected path from `from` to `to`.
    ///
    /// `max_depth` bounds the number of hops; `0` means the configured
    /// default. Each returned node's `depth` is its position in the path.
    /// Cached nodes keep their own depth.
    #[instrument(skip(self, state), level = "debug")]
    pub fn find_path(
        &self,
        state: &mut NavigationState,
        from: &str,
        to: &str,
        max_depth: usize,
    ) -> Result<Vec<NavigationNode>> {
        let store = self.store()?;
        let max_depth = if max_depth == 0 { self.config.default_max_depth } else { max_depth };

        let Some(uris) = traversal::shortest_path(store, from, to, max_depth) else {
            debug!("no path within bound");
            return Err(Error::DepthExceeded { from: from.to_string(), to: to.to_string(), max_depth });
        };
        debug!(hops = uris.len() - 1, "path found");

        let mut path = Vec::with_capacity(uris.len());
        for (idx, uri) in uris.iter().enumerate() {
            ensure_loaded(store, state, uri);
            let mut node = cached(state, uri)?.clone();
            node.depth = idx;
            path.push(node);
        }
        Ok(path)
    }

    /// Every node within `max_depth` hops of `focus` through filtered node
    /// connections, and every connection leaving a node short of the bound.
    ///
    /// Nodes come back in BFS order with `depth` set to their BFS distance.
    /// History and focus are left alone.
    #[instrument(skip(self, state), level = "debug")]
    pub fn subgraph(&self, state: &mut NavigationState, focus: &str, max_depth: usize) -> Result<Subgraph> {
        let store = self.store()?;

        let mut nodes = Vec::new();
        let mut connections = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<(String, usize)> = VecDeque::new();
        seen.insert(focus.to_string());
        queue.push_back((focus.to_string(), 0));

        while let Some((uri, depth)) = queue.pop_front() {
            ensure_loaded(store, state, &uri);
            let mut node = cached(state, &uri)?.clone();
            node.depth = depth;

            if depth < max_depth {
                for conn in &node.connections {
                    connections.push(SubgraphEdge { source_uri: uri.clone(), connection: conn.clone() });
                    if seen.insert(conn.target_uri.clone()) {
                        queue.push_back((conn.target_uri.clone(), depth + 1));
                    }
                }
            }
            nodes.push(node);
        }

        debug!(nodes = nodes.len(), connections = connections.len(), "subgraph extracted");
        Ok(Subgraph { focus_uri: focus.to_string(), nodes, connections })
    }

    /// Replace the filters used by later loads. Cached nodes are not refiltered.
    pub fn set_filters(&self, state: &mut NavigationState, filters: NavigationFilters) {
        state.filters = filters;
    }

    pub fn set_layout(&self, state: &mut NavigationState, layout: LayoutType) {
        state.layout = layout;
    }
}

// ============================================================================
// Node building
// ============================================================================

fn cached<'s>(state: &'s NavigationState, uri: &str) -> Result<&'s NavigationNode> {
    state.nodes.get(uri).ok_or_else(|| Error::NotFound(uri.to_string()))
}

fn ensure_loaded(store: &dyn TripleStore, state: &mut NavigationState, uri: &str) {
    if state.nodes.contains_key(uri) {
        trace!(uri, "node cache hit");
        return;
    }
    let node = build_node(store, &state.filters, uri);
    state.nodes.insert(uri.to_string(), node);
}

fn build_node(store: &dyn TripleStore, filters: &NavigationFilters, uri: &str) -> NavigationNode {
    let mut node = NavigationNode::new(
        uri,
        classify::classify_node_type(store, uri),
        classify::resolve_label(store, uri),
    );

    for predicate in classify::PROPERTY_PREDICATES {
        if let Some(value) = store.object_of(uri, predicate) {
            node.properties.insert(local_name(predicate).to_string(), value);
        }
    }

    let mut outgoing: Vec<Triple> = store
        .find(uri, "", "")
        .into_iter()
        .filter(|t| t.predicate != vocab::RDF_TYPE && is_uri(&t.object))
        .collect();
    outgoing.sort_by(|a, b| (&a.predicate, &a.object).cmp(&(&b.predicate, &b.object)));

    let mut incoming: Vec<Triple> = store.find("", "", uri);
    incoming.sort_by(|a, b| (&a.predicate, &a.subject).cmp(&(&b.predicate, &b.subject)));

    let mut connections: Vec<Connection> = outgoing
        .into_iter()
        .map(|t| connection(store, t.predicate, t.object, ConnectionDirection::Outgoing))
        .chain(
            incoming
                .into_iter()
                .map(|t| connection(store, t.predicate, t.subject, ConnectionDirection::Incoming)),
        )
        .filter(|c| filters.matches(c))
        .collect();

    if filters.max_connections > 0 && connections.len() > filters.max_connections {
        connections.truncate(filters.max_connections);
        node.expandable = true;
    } else {
        node.expandable = !connections.is_empty();
    }
    node.connections = connections;

    trace!(uri, node_type = %node.node_type, connections = node.connections.len(), "node loaded");
    node
}

fn connection(
    store: &dyn TripleStore,
    predicate: String,
    target: String,
    direction: ConnectionDirection,
) -> Connection {
    Connection {
        predicate_label: classify::format_predicate_label(&predicate),
        target_label: classify::resolve_label(store, &target),
        target_type: classify::classify_node_type(store, &target),
        predicate,
        target_uri: target,
        direction,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeType;
    use crate::storage::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::from_triples([
            ("meeting:1", vocab::RDF_TYPE, vocab::CLASS_MEETING),
            ("meeting:1", vocab::PROP_TITLE, "First plenary"),
            ("meeting:1", vocab::PROP_DATE, "2024-01-10"),
            ("meeting:1", vocab::PROP_HAS_AGENDA_ITEM, "agenda:1"),
            ("meeting:1", vocab::PROP_HAS_AGENDA_ITEM, "agenda:2"),
            ("agenda:1", vocab::RDF_TYPE, vocab::CLASS_AGENDA_ITEM),
            ("agenda:1", vocab::PROP_PROVISION_DISCUSSED, "article:5"),
            ("agenda:2", vocab::RDF_TYPE, vocab::CLASS_AGENDA_ITEM),
            ("article:5", vocab::RDF_TYPE, vocab::CLASS_ARTICLE),
            ("article:5", vocab::PROP_TITLE, "Article 5"),
        ])
        .unwrap()
    }

    fn navigator() -> GraphNavigator {
        GraphNavigator::new(Arc::new(store()))
    }

    #[test]
    fn test_no_store() {
        let nav = GraphNavigator::default();
        let mut state = nav.session();
        assert!(matches!(nav.focus(&mut state, "meeting:1"), Err(Error::Configuration(_))));
        assert!(matches!(nav.search(&mut state, "x"), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_node_fields() {
        let nav = navigator();
        let mut state = nav.session();
        let node = nav.load_node(&mut state, "meeting:1").unwrap();

        assert_eq!(node.node_type, NodeType::Meeting);
        assert_eq!(node.label, "First plenary");
        assert_eq!(node.property("title"), Some("First plenary"));
        assert_eq!(node.property("date"), Some("2024-01-10"));
        assert!(node.expandable);

        let targets: Vec<_> = node.connections.iter().map(|c| c.target_uri.as_str()).collect();
        assert_eq!(targets, ["agenda:1", "agenda:2"]);
        assert_eq!(node.connections[0].predicate_label, "has agenda item");
        assert_eq!(node.connections[0].target_type, NodeType::Agenda);
    }

    #[test]
    fn test_outgoing_before_incoming() {
        let nav = navigator();
        let mut state = nav.session();
        let node = nav.load_node(&mut state, "agenda:1").unwrap();
        let dirs: Vec<_> = node.connections.iter().map(|c| (c.direction, c.target_uri.as_str())).collect();
        assert_eq!(
            dirs,
            [
                (ConnectionDirection::Outgoing, "article:5"),
                (ConnectionDirection::Incoming, "meeting:1"),
            ]
        );
    }

    #[test]
    fn test_max_connections_truncates() {
        let nav = navigator();
        let mut state = nav.session();
        nav.set_filters(&mut state, NavigationFilters::default().with_max_connections(1));
        let node = nav.load_node(&mut state, "meeting:1").unwrap();
        assert_eq!(node.connections.len(), 1);
        assert!(node.expandable);
    }

    #[test]
    fn test_leaf_is_not_expandable() {
        let nav = navigator();
        let mut state = nav.session();
        nav.set_filters(&mut state, NavigationFilters::default().excluding([vocab::PROP_HAS_AGENDA_ITEM]));
        let node = nav.load_node(&mut state, "agenda:2").unwrap();
        assert!(node.connections.is_empty());
        assert!(!node.expandable);
    }

    #[test]
    fn test_expand_stamps_depth() {
        let nav = navigator();
        let mut state = nav.session();
        nav.focus(&mut state, "meeting:1").unwrap();
        nav.expand(&mut state, "meeting:1").unwrap();

        assert!(state.is_expanded("meeting:1"));
        assert_eq!(state.node("agenda:1").unwrap().depth, 1);
        assert_eq!(state.focus_node.as_deref(), Some("meeting:1"));

        nav.expand(&mut state, "agenda:1").unwrap();
        assert_eq!(state.node("article:5").unwrap().depth, 2);

        assert!(nav.collapse(&mut state, "meeting:1"));
        assert!(!nav.collapse(&mut state, "meeting:1"));
        assert!(state.node("agenda:1").is_some());
    }

    #[test]
    fn test_back() {
        let nav = navigator();
        let mut state = nav.session();
        nav.focus(&mut state, "meeting:1").unwrap();
        assert!(matches!(nav.back(&mut state), Err(Error::NoHistory)));

        nav.focus(&mut state, "agenda:1").unwrap();
        let node = nav.back(&mut state).unwrap();
        assert_eq!(node.uri, "meeting:1");
        assert_eq!(state.visited_nodes, ["meeting:1"]);
        assert_eq!(state.focus_node.as_deref(), Some("meeting:1"));
    }

    #[test]
    fn test_search_ranking() {
        let store = MemoryStore::from_triples([
            ("doc:1", vocab::PROP_TITLE, "Annual budget"),
            ("doc:2", vocab::PROP_TITLE, "Budget"),
            ("doc:3", vocab::PROP_TITLE, "Budget annex"),
            ("doc:4", vocab::PROP_TITLE, "Agenda"),
        ])
        .unwrap();
        let nav = GraphNavigator::new(Arc::new(store));
        let mut state = nav.session();

        let hits: Vec<_> = nav
            .search(&mut state, "budget")
            .unwrap()
            .into_iter()
            .map(|n| n.uri)
            .collect();
        assert_eq!(hits, ["doc:2", "doc:3", "doc:1"]);

        // Cached now; a second search finds each once.
        assert_eq!(nav.search(&mut state, "BUDGET").unwrap().len(), 3);
    }

    #[test]
    fn test_find_path_depths_do_not_touch_cache() {
        let nav = navigator();
        let mut state = nav.session();
        let path = nav.find_path(&mut state, "meeting:1", "article:5", 0).unwrap();

        let uris: Vec<_> = path.iter().map(|n| n.uri.as_str()).collect();
        assert_eq!(uris, ["meeting:1", "agenda:1", "article:5"]);
        assert_eq!(path.iter().map(|n| n.depth).collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(state.node("article:5").unwrap().depth, 0);
    }

    #[test]
    fn test_subgraph_bounds() {
        let nav = navigator();
        let mut state = nav.session();

        let sub = nav.subgraph(&mut state, "meeting:1", 1).unwrap();
        let uris: Vec<_> = sub.nodes.iter().map(|n| n.uri.as_str()).collect();
        assert_eq!(uris, ["meeting:1", "agenda:1", "agenda:2"]);
        assert_eq!(sub.connections.len(), 2);
        assert!(sub.connections.iter().all(|e| e.source_uri == "meeting:1"));
        assert!(state.visited_nodes.is_empty());

        let sub = nav.subgraph(&mut state, "meeting:1", 0).unwrap();
        assert_eq!(sub.nodes.len(), 1);
        assert!(sub.connections.is_empty());
    }
}

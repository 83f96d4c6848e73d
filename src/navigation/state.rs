//! Navigation session state, filters and layout.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::{Connection, NavigationNode, NodeType};

// ============================================================================
// Layout
// ============================================================================

/// Layout hint passed through to renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    #[default]
    Force,
    Hierarchy,
    Radial,
    Grid,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::Force => "force",
            LayoutType::Hierarchy => "hierarchy",
            LayoutType::Radial => "radial",
            LayoutType::Grid => "grid",
        }
    }
}

impl std::fmt::Display for LayoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Which connections a node load keeps.
///
/// Empty allow-lists allow everything. Exclusion beats allowance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationFilters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub node_types: Vec<NodeType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub predicates: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_predicates: Vec<String>,
    /// Cap on connections per node. `0` means no cap.
    pub max_connections: usize,
    /// Case-insensitive substring matched against target label or URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl NavigationFilters {
    pub fn with_node_types(mut self, types: impl IntoIterator<Item = NodeType>) -> Self {
        self.node_types = types.into_iter().collect();
        self
    }

    pub fn with_predicates(mut self, predicates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.predicates = predicates.into_iter().map(Into::into).collect();
        self
    }

    pub fn excluding(mut self, predicates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude_predicates = predicates.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Whether a connection passes every configured constraint.
    pub fn matches(&self, conn: &Connection) -> bool {
        if !self.node_types.is_empty() && !self.node_types.contains(&conn.target_type) {
            return false;
        }
        if !self.predicates.is_empty() && !self.predicates.iter().any(|p| *p == conn.predicate) {
            return false;
        }
        if self.exclude_predicates.iter().any(|p| *p == conn.predicate) {
            return false;
        }
        match self.search_query.as_deref().filter(|q| !q.is_empty()) {
            Some(query) => {
                let query = query.to_lowercase();
                conn.target_label.to_lowercase().contains(&query)
                    || conn.target_uri.to_lowercase().contains(&query)
            }
            None => true,
        }
    }
}

// ============================================================================
// Session state
// ============================================================================

/// One exploration session. Owned by the caller, threaded through every
/// navigator call.
///
/// Nodes are cached on first load and never refreshed: if the store changes
/// underneath, cached nodes go stale until `reset`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationState {
    pub focus_node: Option<String>,
    /// History stack; the last entry is the current focus.
    pub visited_nodes: Vec<String>,
    pub expanded_nodes: BTreeSet<String>,
    pub filters: NavigationFilters,
    pub layout: LayoutType,
    pub nodes: HashMap<String, NavigationNode>,
}

impl NavigationState {
    pub fn new(filters: NavigationFilters, layout: LayoutType) -> Self {
        Self { filters, layout, ..Default::default() }
    }

    /// Drop the cache, history, expansion and focus. Filters and layout stay.
    pub fn reset(&mut self) {
        self.focus_node = None;
        self.visited_nodes.clear();
        self.expanded_nodes.clear();
        self.nodes.clear();
    }

    pub fn node(&self, uri: &str) -> Option<&NavigationNode> {
        self.nodes.get(uri)
    }

    pub fn focused(&self) -> Option<&NavigationNode> {
        self.focus_node.as_deref().and_then(|uri| self.nodes.get(uri))
    }

    pub fn is_expanded(&self, uri: &str) -> bool {
        self.expanded_nodes.contains(uri)
    }

    pub fn cached_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConnectionDirection;

    fn conn(predicate: &str, target: &str, label: &str, target_type: NodeType) -> Connection {
        Connection {
            predicate: predicate.into(),
            predicate_label: String::new(),
            target_uri: target.into(),
            target_label: label.into(),
            target_type,
            direction: ConnectionDirection::Outgoing,
        }
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let c = conn("reg:references", "motion:B", "Motion B", NodeType::Amendment);
        assert!(NavigationFilters::default().matches(&c));
    }

    #[test]
    fn test_exclusion_beats_allowance() {
        let filters = NavigationFilters::default()
            .with_predicates(["reg:references"])
            .excluding(["reg:references"]);
        let c = conn("reg:references", "motion:B", "Motion B", NodeType::Amendment);
        assert!(!filters.matches(&c));
    }

    #[test]
    fn test_node_type_and_predicate_allow_lists() {
        let filters = NavigationFilters::default()
            .with_node_types([NodeType::Meeting])
            .with_predicates(["reg:hasAgendaItem"]);

        assert!(filters.matches(&conn("reg:hasAgendaItem", "meeting:1", "M1", NodeType::Meeting)));
        assert!(!filters.matches(&conn("reg:hasAgendaItem", "agenda:1", "A1", NodeType::Agenda)));
        assert!(!filters.matches(&conn("reg:references", "meeting:1", "M1", NodeType::Meeting)));
    }

    #[test]
    fn test_search_query_checks_label_and_uri() {
        let filters = NavigationFilters::default().with_search_query("BUDGET");
        assert!(filters.matches(&conn("p:x", "article:5", "Budget rules", NodeType::Provision)));
        assert!(filters.matches(&conn("p:x", "doc:budget-2024", "Annex", NodeType::Document)));
        assert!(!filters.matches(&conn("p:x", "article:6", "Scope", NodeType::Provision)));

        let blank = NavigationFilters::default().with_search_query("");
        assert!(blank.matches(&conn("p:x", "article:6", "Scope", NodeType::Provision)));
    }

    #[test]
    fn test_reset_keeps_filters_and_layout() {
        let filters = NavigationFilters::default().with_max_connections(3);
        let mut state = NavigationState::new(filters.clone(), LayoutType::Radial);
        state.focus_node = Some("meeting:1".into());
        state.visited_nodes.push("meeting:1".into());
        state.expanded_nodes.insert("meeting:1".into());
        state
            .nodes
            .insert("meeting:1".into(), NavigationNode::new("meeting:1", NodeType::Meeting, "M1"));

        state.reset();

        assert_eq!(state.cached_count(), 0);
        assert!(state.visited_nodes.is_empty());
        assert!(!state.is_expanded("meeting:1"));
        assert!(state.focused().is_none());
        assert_eq!(state.filters, filters);
        assert_eq!(state.layout, LayoutType::Radial);
    }

    #[test]
    fn test_layout_serde_names() {
        assert_eq!(serde_json::to_string(&LayoutType::Hierarchy).unwrap(), "\"hierarchy\"");
        assert_eq!(LayoutType::default(), LayoutType::Force);
    }
}

//! Navigation DTOs: nodes as the navigator presents them, and their edges.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Domain kind of a node in the deliberation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Meeting,
    Provision,
    Stakeholder,
    Decision,
    Amendment,
    Vote,
    Action,
    Document,
    Agenda,
    Process,
    Unknown,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Meeting => "Meeting",
            NodeType::Provision => "Provision",
            NodeType::Stakeholder => "Stakeholder",
            NodeType::Decision => "Decision",
            NodeType::Amendment => "Amendment",
            NodeType::Vote => "Vote",
            NodeType::Action => "Action",
            NodeType::Document => "Document",
            NodeType::Agenda => "Agenda",
            NodeType::Process => "Process",
            NodeType::Unknown => "Unknown",
        }
    }

    /// Single-glyph marker for compact renderers.
    pub fn symbol(&self) -> &'static str {
        match self {
            NodeType::Meeting => "M",
            NodeType::Provision => "P",
            NodeType::Stakeholder => "S",
            NodeType::Decision => "D",
            NodeType::Amendment => "A",
            NodeType::Vote => "V",
            NodeType::Action => "!",
            NodeType::Document => "◊",
            NodeType::Agenda => "#",
            NodeType::Process => "⚙",
            NodeType::Unknown => "?",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way an edge points relative to the node that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionDirection {
    Outgoing,
    Incoming,
    Bidirectional,
}

impl std::fmt::Display for ConnectionDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConnectionDirection::Outgoing => "outgoing",
            ConnectionDirection::Incoming => "incoming",
            ConnectionDirection::Bidirectional => "bidirectional",
        })
    }
}

/// An edge from a loaded node to a neighbour. Derived from triples on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub predicate: String,
    pub predicate_label: String,
    pub target_uri: String,
    pub target_label: String,
    pub target_type: NodeType,
    pub direction: ConnectionDirection,
}

/// A node as loaded by the navigator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationNode {
    pub uri: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<Connection>,
    /// More connections exist than are listed, or the node has neighbours to expand into.
    pub expandable: bool,
    /// Distance from the node the exploration started at.
    pub depth: usize,
}

impl NavigationNode {
    pub fn new(uri: impl Into<String>, node_type: NodeType, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            node_type,
            label: label.into(),
            properties: HashMap::new(),
            connections: Vec::new(),
            expandable: true,
            depth: 0,
        }
    }

    pub fn outgoing(&self) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(|c| c.direction != ConnectionDirection::Incoming)
    }

    pub fn incoming(&self) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(|c| c.direction == ConnectionDirection::Incoming)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

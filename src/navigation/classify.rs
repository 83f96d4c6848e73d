//! Node classification and labelling. Pure derivations over store facts.

use crate::model::literal::{local_name, uri_tail};
use crate::model::NodeType;
use crate::storage::TripleStore;
use crate::vocab;

/// Ordered keyword rules applied to lowercased `rdf:type` values.
/// First match wins.
pub const TYPE_RULES: &[(&[&str], NodeType)] = &[
    (&["meeting"], NodeType::Meeting),
    (&["article", "provision", "section", "chapter"], NodeType::Provision),
    (&["stakeholder", "participant", "delegation"], NodeType::Stakeholder),
    (&["decision"], NodeType::Decision),
    (&["motion", "amendment"], NodeType::Amendment),
    (&["vote"], NodeType::Vote),
    (&["action"], NodeType::Action),
    (&["document"], NodeType::Document),
    (&["agenda"], NodeType::Agenda),
    (&["process"], NodeType::Process),
];

/// Fallback rules applied to the lowercased node URI when no type matched.
pub const URI_RULES: &[(&[&str], NodeType)] = &[
    (&["/meeting/"], NodeType::Meeting),
    (&["/article/", "/provision/"], NodeType::Provision),
    (&["/stakeholder/", "/delegation/"], NodeType::Stakeholder),
    (&["/decision/"], NodeType::Decision),
    (&["/motion/", "/amendment/"], NodeType::Amendment),
    (&["/vote/"], NodeType::Vote),
    (&["/action/"], NodeType::Action),
    (&["/process/"], NodeType::Process),
];

/// Predicates copied into `NavigationNode::properties`, keyed by local name.
pub const PROPERTY_PREDICATES: &[&str] = &[
    vocab::PROP_TITLE,
    vocab::PROP_TEXT,
    vocab::PROP_IDENTIFIER,
    vocab::PROP_DATE,
    vocab::PROP_STATUS,
    vocab::PROP_DESCRIPTION,
];

/// Label sources in priority order. The URI tail is the last resort.
const LABEL_PREDICATES: &[&str] = &[
    vocab::PROP_TITLE,
    vocab::RDFS_LABEL,
    vocab::PROP_NAME,
    vocab::PROP_IDENTIFIER,
];

fn apply_rules(rules: &[(&[&str], NodeType)], haystack: &str) -> Option<NodeType> {
    let haystack = haystack.to_lowercase();
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| haystack.contains(n)))
        .map(|&(_, node_type)| node_type)
}

/// Classify one `rdf:type` value.
pub fn classify_type_name(type_uri: &str) -> Option<NodeType> {
    apply_rules(TYPE_RULES, type_uri)
}

/// Classify from URI shape alone.
pub fn classify_uri(uri: &str) -> NodeType {
    apply_rules(URI_RULES, uri).unwrap_or(NodeType::Unknown)
}

/// Type of a node: its `rdf:type` values first (sorted), then its URI.
pub fn classify_node_type(store: &dyn TripleStore, uri: &str) -> NodeType {
    let mut types: Vec<String> = store
        .find(uri, vocab::RDF_TYPE, "")
        .into_iter()
        .map(|t| t.object)
        .collect();
    types.sort();

    types
        .iter()
        .find_map(|t| classify_type_name(t))
        .unwrap_or_else(|| classify_uri(uri))
}

/// Display label for a node.
pub fn resolve_label(store: &dyn TripleStore, uri: &str) -> String {
    LABEL_PREDICATES
        .iter()
        .find_map(|p| store.object_of(uri, p))
        .unwrap_or_else(|| uri_tail(uri).to_string())
}

/// Human-readable predicate: `reg:hasAgendaItem` → `has agenda item`.
pub fn format_predicate_label(predicate: &str) -> String {
    let local = match predicate.rfind('#').or_else(|| predicate.rfind('/')) {
        Some(idx) => &predicate[idx + 1..],
        None => local_name(predicate),
    };

    let mut out = String::with_capacity(local.len() + 4);
    for (i, ch) in local.chars().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_type_rules() {
        let cases = [
            ("reg:Meeting", NodeType::Meeting),
            ("reg:Article", NodeType::Provision),
            ("http://example.org/onto#Chapter", NodeType::Provision),
            ("reg:Stakeholder", NodeType::Stakeholder),
            ("reg:DeliberationDecision", NodeType::Decision),
            ("reg:Motion", NodeType::Amendment),
            ("reg:VoteRecord", NodeType::Vote),
            ("reg:ActionItem", NodeType::Action),
            ("reg:Document", NodeType::Document),
            ("reg:AgendaItem", NodeType::Agenda),
            ("reg:DeliberationProcess", NodeType::Process),
        ];
        for (type_uri, expected) in cases {
            assert_eq!(classify_type_name(type_uri), Some(expected), "{type_uri}");
        }
        assert_eq!(classify_type_name("foaf:Person"), None);
    }

    #[test]
    fn test_first_rule_wins() {
        // "meeting" outranks "agenda".
        assert_eq!(classify_type_name("reg:MeetingAgenda"), Some(NodeType::Meeting));
    }

    #[test]
    fn test_uri_fallback() {
        assert_eq!(classify_uri("http://ex.org/Meeting/7"), NodeType::Meeting);
        assert_eq!(classify_uri("http://ex.org/amendment/3"), NodeType::Amendment);
        assert_eq!(classify_uri("http://ex.org/thing/3"), NodeType::Unknown);
    }

    #[test]
    fn test_classify_node_prefers_rdf_type() {
        let store = MemoryStore::from_triples([
            ("http://ex.org/meeting/1", vocab::RDF_TYPE, "reg:Document"),
            ("http://ex.org/meeting/2", vocab::RDF_TYPE, "foaf:Thing"),
        ])
        .unwrap();
        assert_eq!(classify_node_type(&store, "http://ex.org/meeting/1"), NodeType::Document);
        assert_eq!(classify_node_type(&store, "http://ex.org/meeting/2"), NodeType::Meeting);
        assert_eq!(classify_node_type(&store, "x:unknown"), NodeType::Unknown);
    }

    #[test]
    fn test_label_priority() {
        let store = MemoryStore::from_triples([
            ("a:1", vocab::PROP_TITLE, "Title"),
            ("a:1", vocab::RDFS_LABEL, "Label"),
            ("a:2", vocab::RDFS_LABEL, "Label"),
            ("a:2", vocab::PROP_NAME, "Name"),
            ("a:3", vocab::PROP_IDENTIFIER, "ID-3"),
        ])
        .unwrap();
        assert_eq!(resolve_label(&store, "a:1"), "Title");
        assert_eq!(resolve_label(&store, "a:2"), "Label");
        assert_eq!(resolve_label(&store, "a:3"), "ID-3");
        assert_eq!(resolve_label(&store, "http://ex.org/article/42"), "42");
        assert_eq!(resolve_label(&store, "http://ex.org/onto#Scope"), "Scope");
    }

    #[test]
    fn test_predicate_labels() {
        assert_eq!(format_predicate_label("reg:hasAgendaItem"), "has agenda item");
        assert_eq!(format_predicate_label("http://ex.org/onto#provisionDiscussed"), "provision discussed");
        assert_eq!(format_predicate_label("http://ex.org/terms/references"), "references");
        assert_eq!(format_predicate_label("title"), "title");
    }
}

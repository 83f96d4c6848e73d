//! Triple and pattern DTOs.

use serde::{Deserialize, Serialize};

/// A subject-predicate-object fact.
///
/// In the deliberation graph:
/// - Subject: usually an entity URI (e.g. `"meeting:2024-03"`)
/// - Predicate: a relationship or property (e.g. `"reg:hasAgendaItem"`)
/// - Object: another URI or a literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// All three components are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.subject.is_empty() && !self.predicate.is_empty() && !self.object.is_empty()
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}> <{}> <{}>", self.subject, self.predicate, self.object)
    }
}

/// A pattern for matching triples. `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriplePattern {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<String>,
}

impl TriplePattern {
    /// Build a pattern from the store's string convention, where `""` is a wildcard.
    pub fn from_parts(subject: &str, predicate: &str, object: &str) -> Self {
        let slot = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            subject: slot(subject),
            predicate: slot(predicate),
            object: slot(object),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        let slot_matches = |slot: &Option<String>, value: &str| {
            slot.as_deref().is_none_or(|want| want == value)
        };
        slot_matches(&self.subject, &triple.subject)
            && slot_matches(&self.predicate, &triple.predicate)
            && slot_matches(&self.object, &triple.object)
    }

    pub fn wildcard_count(&self) -> usize {
        [&self.subject, &self.predicate, &self.object]
            .iter()
            .filter(|slot| slot.is_none())
            .count()
    }

    /// Borrow the pattern back in `""`-wildcard form.
    pub fn as_parts(&self) -> (&str, &str, &str) {
        (
            self.subject.as_deref().unwrap_or(""),
            self.predicate.as_deref().unwrap_or(""),
            self.object.as_deref().unwrap_or(""),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_wildcards() {
        let t = Triple::new("motion:A", "reg:references", "motion:B");

        assert!(TriplePattern::default().matches(&t));
        assert!(TriplePattern::default().subject("motion:A").matches(&t));
        assert!(!TriplePattern::default().object("motion:C").matches(&t));
        assert_eq!(TriplePattern::default().predicate("reg:references").wildcard_count(), 2);
    }

    #[test]
    fn test_from_parts_treats_empty_as_wildcard() {
        let p = TriplePattern::from_parts("", "rdf:type", "");
        assert_eq!(p.subject, None);
        assert_eq!(p.predicate.as_deref(), Some("rdf:type"));
        assert_eq!(p.as_parts(), ("", "rdf:type", ""));
    }

    #[test]
    fn test_validity() {
        assert!(Triple::new("a:1", "p:x", "lit").is_valid());
        assert!(!Triple::new("a:1", "", "lit").is_valid());
    }
}

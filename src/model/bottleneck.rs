//! Bottleneck DTOs produced by the detector.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The six stall patterns the detector looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckType {
    /// A topic not discussed in recent meetings.
    InactiveTopic,
    /// An agenda item deferred again and again.
    RepeatedDeferral,
    /// An action item past its due date.
    OverdueAction,
    /// A pending motion waiting on other pending motions.
    BlockedDecision,
    /// A vote that could not proceed for lack of quorum.
    MissingQuorum,
    /// Motions referencing each other in a loop.
    CircularDependency,
}

impl BottleneckType {
    pub const ALL: [BottleneckType; 6] = [
        BottleneckType::InactiveTopic,
        BottleneckType::RepeatedDeferral,
        BottleneckType::OverdueAction,
        BottleneckType::BlockedDecision,
        BottleneckType::MissingQuorum,
        BottleneckType::CircularDependency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BottleneckType::InactiveTopic => "inactive_topic",
            BottleneckType::RepeatedDeferral => "repeated_deferral",
            BottleneckType::OverdueAction => "overdue_action",
            BottleneckType::BlockedDecision => "blocked_decision",
            BottleneckType::MissingQuorum => "missing_quorum",
            BottleneckType::CircularDependency => "circular_dependency",
        }
    }
}

impl std::fmt::Display for BottleneckType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a bottleneck. Variant order is the severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BottleneckSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BottleneckSeverity::Low => "low",
            BottleneckSeverity::Medium => "medium",
            BottleneckSeverity::High => "high",
            BottleneckSeverity::Critical => "critical",
        }
    }

    /// Severity from how many meetings an item has been stalled.
    pub fn from_meeting_count(meetings: usize) -> Self {
        match meetings {
            n if n >= 5 => BottleneckSeverity::High,
            n if n >= 3 => BottleneckSeverity::Medium,
            _ => BottleneckSeverity::Low,
        }
    }

    /// Severity from how many days an action is past due.
    pub fn from_days_overdue(days: i64) -> Self {
        match days {
            d if d >= 60 => BottleneckSeverity::Critical,
            d if d >= 30 => BottleneckSeverity::High,
            d if d >= 14 => BottleneckSeverity::Medium,
            _ => BottleneckSeverity::Low,
        }
    }
}

impl std::fmt::Display for BottleneckSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected process stall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    #[serde(rename = "type")]
    pub kind: BottleneckType,
    pub severity: BottleneckSeverity,
    pub description: String,
    /// URIs of the stalled provisions, actions, motions or meetings.
    pub affected_items: Vec<String>,
    /// URIs of the items causing the stall.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_by: Vec<String>,
    /// When the stall began, if the data says.
    pub stalled_since: Option<DateTime<Utc>>,
    pub meeting_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_meeting: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_topics: Vec<String>,
}

impl Bottleneck {
    pub fn new(
        kind: BottleneckType,
        severity: BottleneckSeverity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            affected_items: Vec::new(),
            blocked_by: Vec::new(),
            stalled_since: None,
            meeting_count: 0,
            suggestions: Vec::new(),
            source_meeting: None,
            related_topics: Vec::new(),
        }
    }

    pub fn with_affected(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.affected_items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blocked_by(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.blocked_by = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stalled_since(mut self, since: Option<DateTime<Utc>>) -> Self {
        self.stalled_since = since;
        self
    }

    pub fn with_meeting_count(mut self, count: usize) -> Self {
        self.meeting_count = count;
        self
    }

    pub fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Whether `uri` is either stalled by or causing this bottleneck.
    pub fn involves(&self, uri: &str) -> bool {
        self.affected_items.iter().any(|i| i == uri) || self.blocked_by.iter().any(|b| b == uri)
    }
}

/// Aggregate statistics over a set of bottlenecks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BottleneckSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub by_type: BTreeMap<BottleneckType, usize>,
    /// Earliest known stall date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_stall: Option<DateTime<Utc>>,
    /// Up to five URIs mentioned most often across `affected_items`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub most_affected: Vec<String>,
}

impl BottleneckSummary {
    pub fn count_for(&self, severity: BottleneckSeverity) -> usize {
        match severity {
            BottleneckSeverity::Critical => self.critical,
            BottleneckSeverity::High => self.high,
            BottleneckSeverity::Medium => self.medium,
            BottleneckSeverity::Low => self.low,
        }
    }
}

/// Result of one detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleneckReport {
    /// Reference time the analysis was computed against.
    pub analyzed_at: DateTime<Utc>,
    /// Most severe first.
    pub bottlenecks: Vec<Bottleneck>,
    pub summary: BottleneckSummary,
}

impl BottleneckReport {
    pub fn is_empty(&self) -> bool {
        self.bottlenecks.is_empty()
    }

    pub fn of_type(&self, kind: BottleneckType) -> impl Iterator<Item = &Bottleneck> {
        self.bottlenecks.iter().filter(move |b| b.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order_is_total() {
        assert!(BottleneckSeverity::Critical > BottleneckSeverity::High);
        assert!(BottleneckSeverity::High > BottleneckSeverity::Medium);
        assert!(BottleneckSeverity::Medium > BottleneckSeverity::Low);
    }

    #[test]
    fn test_meeting_count_table() {
        let cases = [(1, "low"), (2, "low"), (3, "medium"), (4, "medium"), (5, "high"), (10, "high")];
        for (count, expected) in cases {
            assert_eq!(BottleneckSeverity::from_meeting_count(count).as_str(), expected, "count {count}");
        }
    }

    #[test]
    fn test_overdue_table() {
        assert_eq!(BottleneckSeverity::from_days_overdue(7), BottleneckSeverity::Low);
        assert_eq!(BottleneckSeverity::from_days_overdue(14), BottleneckSeverity::Medium);
        assert_eq!(BottleneckSeverity::from_days_overdue(29), BottleneckSeverity::Medium);
        assert_eq!(BottleneckSeverity::from_days_overdue(30), BottleneckSeverity::High);
        assert_eq!(BottleneckSeverity::from_days_overdue(60), BottleneckSeverity::Critical);
        assert_eq!(BottleneckSeverity::from_days_overdue(100), BottleneckSeverity::Critical);
    }

    #[test]
    fn test_type_names() {
        let names: Vec<_> = BottleneckType::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "inactive_topic",
                "repeated_deferral",
                "overdue_action",
                "blocked_decision",
                "missing_quorum",
                "circular_dependency",
            ]
        );
    }

    #[test]
    fn test_involves() {
        let b = Bottleneck::new(BottleneckType::BlockedDecision, BottleneckSeverity::Medium, "x")
            .with_affected(["motion:B"])
            .with_blocked_by(["motion:A"]);
        assert!(b.involves("motion:A"));
        assert!(b.involves("motion:B"));
        assert!(!b.involves("motion:C"));
    }

    #[test]
    fn test_summary_serializes_type_keys_as_names() {
        let mut summary = BottleneckSummary::default();
        summary.by_type.insert(BottleneckType::MissingQuorum, 2);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["by_type"]["missing_quorum"], 2);
    }
}

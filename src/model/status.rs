//! Status vocabularies for deliberation entities.
//!
//! Each status is stored as a plain literal in the graph. Parsing is lenient:
//! an unrecognized literal maps to `None`, and callers decide the fallback.

use serde::{Deserialize, Serialize};

// ============================================================================
// MeetingStatus
// ============================================================================

/// Lifecycle of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Postponed,
}

impl MeetingStatus {
    /// The literal stored in the graph.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::InProgress => "in_progress",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
            MeetingStatus::Postponed => "postponed",
        }
    }

    /// Parse a stored literal. Surrounding whitespace and case are ignored.
    pub fn from_literal(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Some(MeetingStatus::Scheduled),
            "in_progress" => Some(MeetingStatus::InProgress),
            "completed" => Some(MeetingStatus::Completed),
            "cancelled" => Some(MeetingStatus::Cancelled),
            "postponed" => Some(MeetingStatus::Postponed),
            _ => None,
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MotionStatus
// ============================================================================

/// Lifecycle of a motion or amendment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionStatus {
    Proposed,
    Seconded,
    Debated,
    Voted,
    Adopted,
    Rejected,
    Withdrawn,
    Tabled,
    Pending,
}

impl MotionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionStatus::Proposed => "proposed",
            MotionStatus::Seconded => "seconded",
            MotionStatus::Debated => "debated",
            MotionStatus::Voted => "voted",
            MotionStatus::Adopted => "adopted",
            MotionStatus::Rejected => "rejected",
            MotionStatus::Withdrawn => "withdrawn",
            MotionStatus::Tabled => "tabled",
            MotionStatus::Pending => "pending",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proposed" => Some(MotionStatus::Proposed),
            "seconded" => Some(MotionStatus::Seconded),
            "debated" => Some(MotionStatus::Debated),
            "voted" => Some(MotionStatus::Voted),
            "adopted" => Some(MotionStatus::Adopted),
            "rejected" => Some(MotionStatus::Rejected),
            "withdrawn" => Some(MotionStatus::Withdrawn),
            "tabled" => Some(MotionStatus::Tabled),
            "pending" => Some(MotionStatus::Pending),
            _ => None,
        }
    }

    /// Adopted, rejected and withdrawn motions no longer block anything.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MotionStatus::Adopted | MotionStatus::Rejected | MotionStatus::Withdrawn)
    }
}

impl std::fmt::Display for MotionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ActionStatus
// ============================================================================

/// Lifecycle of an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    InProgress,
    Completed,
    Deferred,
    Cancelled,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Pending => "pending",
            ActionStatus::InProgress => "in_progress",
            ActionStatus::Completed => "completed",
            ActionStatus::Deferred => "deferred",
            ActionStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ActionStatus::Pending),
            "in_progress" => Some(ActionStatus::InProgress),
            "completed" => Some(ActionStatus::Completed),
            "deferred" => Some(ActionStatus::Deferred),
            "cancelled" => Some(ActionStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ActionStatus::Completed | ActionStatus::Cancelled)
    }
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// AgendaOutcome
// ============================================================================

/// What happened to an agenda item in a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgendaOutcome {
    Discussed,
    Deferred,
    Adopted,
    Rejected,
    NoQuorum,
    Withdrawn,
}

impl AgendaOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgendaOutcome::Discussed => "discussed",
            AgendaOutcome::Deferred => "deferred",
            AgendaOutcome::Adopted => "adopted",
            AgendaOutcome::Rejected => "rejected",
            AgendaOutcome::NoQuorum => "no_quorum",
            AgendaOutcome::Withdrawn => "withdrawn",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discussed" => Some(AgendaOutcome::Discussed),
            "deferred" => Some(AgendaOutcome::Deferred),
            "adopted" => Some(AgendaOutcome::Adopted),
            "rejected" => Some(AgendaOutcome::Rejected),
            "no_quorum" => Some(AgendaOutcome::NoQuorum),
            "withdrawn" => Some(AgendaOutcome::Withdrawn),
            _ => None,
        }
    }
}

impl std::fmt::Display for AgendaOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_literals() {
        assert_eq!(MeetingStatus::from_literal("in_progress"), Some(MeetingStatus::InProgress));
        assert_eq!(AgendaOutcome::from_literal(" No_Quorum "), Some(AgendaOutcome::NoQuorum));
        assert_eq!(ActionStatus::Completed.as_str(), "completed");
        assert_eq!(MotionStatus::from_literal("shelved"), None);
    }

    #[test]
    fn test_terminal_motions() {
        assert!(MotionStatus::Adopted.is_terminal());
        assert!(MotionStatus::Withdrawn.is_terminal());
        assert!(!MotionStatus::Pending.is_terminal());
        assert!(!MotionStatus::Tabled.is_terminal());
    }

    #[test]
    fn test_closed_actions() {
        assert!(ActionStatus::Cancelled.is_closed());
        assert!(!ActionStatus::Deferred.is_closed());
    }

    #[test]
    fn test_meeting_defaults_to_scheduled() {
        assert_eq!(MeetingStatus::default(), MeetingStatus::Scheduled);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AgendaOutcome::NoQuorum).unwrap();
        assert_eq!(json, "\"no_quorum\"");
    }
}

//! # Bottleneck Detector
//!
//! Six independent passes over the store, concatenated, sorted by urgency
//! and summarized.
//!
//! | Pass | Looks at | Fires when |
//! |------|----------|------------|
//! | inactive topic | provisions discussed per meeting | not discussed in the last N meetings |
//! | repeated deferral | agenda item outcomes | same item deferred N times |
//! | overdue action | `reg:ActionItem` due dates | open and N days past due |
//! | blocked decision | `reg:references` between motions | pending motion references pending motions |
//! | missing quorum | agenda item outcomes | outcome is `no_quorum` |
//! | circular dependency | `reg:references` between motions | references loop back |
//!
//! Every pass iterates sorted keys, so a fixed store and a fixed `now` give
//! the same report every time.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::model::literal::parse_date;
use crate::model::{
    ActionStatus, AgendaOutcome, Bottleneck, BottleneckReport, BottleneckSeverity,
    BottleneckSummary, BottleneckType, MotionStatus,
};
use crate::storage::TripleStore;
use crate::{vocab, Error, Result};

use super::cycles::{find_cycles, Adjacency};
use super::meetings::{load_meetings, Meeting};

const MOST_AFFECTED_LIMIT: usize = 5;

// ============================================================================
// Configuration
// ============================================================================

/// Detection thresholds and the reference time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BottleneckConfig {
    /// Meetings without discussion before a topic counts as inactive.
    pub inactive_meetings: usize,
    /// Deferrals before an item counts as repeatedly deferred.
    pub max_deferrals: usize,
    /// Days past due before an action counts as overdue.
    pub overdue_days: i64,
    /// Reference time for overdue calculations and `analyzed_at`.
    pub now: DateTime<Utc>,
}

impl Default for BottleneckConfig {
    fn default() -> Self {
        Self {
            inactive_meetings: 3,
            max_deferrals: 3,
            overdue_days: 7,
            now: Utc::now(),
        }
    }
}

// ============================================================================
// Detector
// ============================================================================

/// Finds process bottlenecks in a deliberation graph.
#[derive(Clone, Default)]
pub struct BottleneckDetector {
    store: Option<Arc<dyn TripleStore>>,
    config: BottleneckConfig,
}

impl std::fmt::Debug for BottleneckDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BottleneckDetector")
            .field("has_store", &self.store.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl BottleneckDetector {
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        Self { store: Some(store), config: BottleneckConfig::default() }
    }

    pub fn with_store(mut self, store: Arc<dyn TripleStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: BottleneckConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BottleneckConfig {
        &self.config
    }

    fn store(&self) -> Result<&dyn TripleStore> {
        self.store
            .as_deref()
            .ok_or_else(|| Error::Configuration("bottleneck detector has no triple store".into()))
    }

    /// Run every pass and build the report.
    #[instrument(skip(self), level = "debug")]
    pub fn detect_bottlenecks(&self) -> Result<BottleneckReport> {
        let store = self.store()?;
        let meetings = load_meetings(store);
        debug!(meetings = meetings.len(), triples = store.count(), "loaded meeting timeline");

        let passes: [(BottleneckType, Vec<Bottleneck>); 6] = [
            (BottleneckType::InactiveTopic, self.find_inactive_topics(store, &meetings)),
            (BottleneckType::RepeatedDeferral, self.find_repeated_deferrals(store, &meetings)),
            (BottleneckType::OverdueAction, self.find_overdue_actions(store)),
            (BottleneckType::BlockedDecision, find_blocked_decisions(store)),
            (BottleneckType::MissingQuorum, find_missing_quorum(store, &meetings)),
            (BottleneckType::CircularDependency, find_circular_dependencies(store)),
        ];

        let mut bottlenecks = Vec::new();
        for (kind, found) in passes {
            debug!(pass = %kind, found = found.len(), "bottleneck pass finished");
            bottlenecks.extend(found);
        }

        sort_by_severity(&mut bottlenecks);
        let summary = summarize(&bottlenecks);

        Ok(BottleneckReport { analyzed_at: self.config.now, bottlenecks, summary })
    }

    /// Bottlenecks that stall or are caused by `uri`.
    pub fn bottlenecks_for_provision(&self, uri: &str) -> Result<Vec<Bottleneck>> {
        let report = self.detect_bottlenecks()?;
        Ok(report.bottlenecks.into_iter().filter(|b| b.involves(uri)).collect())
    }

    // ========================================================================
    // Passes
    // ========================================================================

    fn find_inactive_topics(&self, store: &dyn TripleStore, meetings: &[Meeting]) -> Vec<Bottleneck> {
        let window = self.config.inactive_meetings;
        let total = meetings.len();
        if total <= window {
            return Vec::new();
        }

        let mut last_discussed: BTreeMap<String, usize> = BTreeMap::new();
        for (idx, meeting) in meetings.iter().enumerate() {
            for item in meeting.agenda_items(store) {
                for t in store.find(&item, vocab::PROP_PROVISION_DISCUSSED, "") {
                    last_discussed.insert(t.object, idx);
                }
            }
        }

        let threshold = total - window;
        last_discussed
            .into_iter()
            .filter(|&(_, last)| last < threshold)
            .map(|(topic, last)| {
                let since = total - last - 1;
                let description = match store.object_of(&topic, vocab::RDFS_LABEL) {
                    Some(label) => format!("{label} inactive for {since} meetings"),
                    None => format!("Topic inactive for {since} meetings"),
                };
                Bottleneck::new(
                    BottleneckType::InactiveTopic,
                    BottleneckSeverity::from_meeting_count(since),
                    description,
                )
                .with_affected([topic])
                .with_stalled_since(meetings[last].date)
                .with_meeting_count(since)
                .with_suggestions(&[
                    "Add to upcoming agenda",
                    "Close topic if no longer relevant",
                    "Assign action item to revive discussion",
                ])
            })
            .collect()
    }

    fn find_repeated_deferrals(&self, store: &dyn TripleStore, meetings: &[Meeting]) -> Vec<Bottleneck> {
        #[derive(Default)]
        struct Deferrals {
            meetings: Vec<String>,
            first: Option<DateTime<Utc>>,
        }

        let mut by_title: BTreeMap<String, Deferrals> = BTreeMap::new();
        for meeting in meetings {
            for item in meeting.agenda_items(store) {
                if outcome_of(store, &item) != Some(AgendaOutcome::Deferred) {
                    continue;
                }
                let title = store.object_of(&item, vocab::RDFS_LABEL).unwrap_or(item);
                let entry = by_title.entry(title).or_default();
                entry.meetings.push(meeting.uri.clone());
                // Meetings arrive oldest first, so the first dated one is the earliest.
                if entry.first.is_none() {
                    entry.first = meeting.date;
                }
            }
        }

        by_title
            .into_iter()
            .filter(|(_, d)| d.meetings.len() >= self.config.max_deferrals)
            .map(|(title, d)| {
                let count = d.meetings.len();
                Bottleneck::new(
                    BottleneckType::RepeatedDeferral,
                    BottleneckSeverity::from_meeting_count(count),
                    format!("Item deferred {count} times: {title}"),
                )
                .with_affected(d.meetings)
                .with_stalled_since(d.first)
                .with_meeting_count(count)
                .with_suggestions(&[
                    "Schedule dedicated session to resolve",
                    "Break item into smaller sub-items",
                    "Identify and address blocking issues",
                    "Consider withdrawing if no longer viable",
                ])
            })
            .collect()
    }

    fn find_overdue_actions(&self, store: &dyn TripleStore) -> Vec<Bottleneck> {
        let mut found = Vec::new();

        for action in subjects_of_type(store, vocab::CLASS_ACTION_ITEM) {
            let closed = store
                .object_of(&action, vocab::PROP_ACTION_STATUS)
                .and_then(|raw| ActionStatus::from_literal(&raw))
                .is_some_and(|status| status.is_closed());
            if closed {
                continue;
            }

            let Some(due) = store
                .object_of(&action, vocab::PROP_ACTION_DUE_DATE)
                .and_then(|raw| parse_date(&raw))
            else {
                continue;
            };

            let days = (self.config.now - due).num_seconds().div_euclid(86_400);
            if days < self.config.overdue_days {
                continue;
            }

            let label = store.object_of(&action, vocab::RDFS_LABEL).unwrap_or_else(|| action.clone());
            let mut bottleneck = Bottleneck::new(
                BottleneckType::OverdueAction,
                BottleneckSeverity::from_days_overdue(days),
                format!("Action overdue by {days} days: {label}"),
            )
            .with_affected([action.as_str()])
            .with_stalled_since(Some(due))
            .with_suggestions(&[
                "Follow up with assigned party",
                "Escalate to leadership",
                "Reassign action if needed",
                "Extend deadline with justification",
            ]);
            if let Some(assignee) = store.object_of(&action, vocab::PROP_ACTION_ASSIGNED_TO) {
                bottleneck.related_topics.push(assignee);
            }
            found.push(bottleneck);
        }

        found
    }
}

fn find_blocked_decisions(store: &dyn TripleStore) -> Vec<Bottleneck> {
    let mut found = Vec::new();

    for motion in subjects_of_type(store, vocab::CLASS_MOTION) {
        if !is_pending_motion(store, &motion) {
            continue;
        }

        let blocked_by: Vec<String> = references_of(store, &motion)
            .into_iter()
            .filter(|target| is_blocking_target(store, target))
            .collect();
        if blocked_by.is_empty() {
            continue;
        }

        let label = store.object_of(&motion, vocab::RDFS_LABEL).unwrap_or_else(|| motion.clone());
        let severity = if blocked_by.len() > 2 {
            BottleneckSeverity::High
        } else {
            BottleneckSeverity::Medium
        };
        let proposed = store
            .object_of(&motion, vocab::PROP_MEETING_DATE)
            .or_else(|| store.object_of(&motion, vocab::PROP_DATE))
            .and_then(|raw| parse_date(&raw));

        found.push(
            Bottleneck::new(
                BottleneckType::BlockedDecision,
                severity,
                format!("Decision blocked by {} pending items: {label}", blocked_by.len()),
            )
            .with_affected([motion.as_str()])
            .with_blocked_by(blocked_by)
            .with_stalled_since(proposed)
            .with_suggestions(&[
                "Resolve blocking items first",
                "Decouple amendments if possible",
                "Schedule joint discussion of related items",
            ]),
        );
    }

    found
}

fn find_missing_quorum(store: &dyn TripleStore, meetings: &[Meeting]) -> Vec<Bottleneck> {
    let mut found = Vec::new();

    for meeting in meetings {
        for item in meeting.agenda_items(store) {
            if outcome_of(store, &item) != Some(AgendaOutcome::NoQuorum) {
                continue;
            }
            let label = store.object_of(&item, vocab::RDFS_LABEL).unwrap_or_else(|| item.clone());
            let mut bottleneck = Bottleneck::new(
                BottleneckType::MissingQuorum,
                BottleneckSeverity::Medium,
                format!("Vote failed due to missing quorum: {label}"),
            )
            .with_affected([item])
            .with_stalled_since(meeting.date)
            .with_meeting_count(1)
            .with_suggestions(&[
                "Reschedule vote with confirmed attendance",
                "Consider proxy voting if allowed",
                "Address attendance issues with participants",
            ]);
            bottleneck.source_meeting = Some(meeting.uri.clone());
            found.push(bottleneck);
        }
    }

    found
}

fn find_circular_dependencies(store: &dyn TripleStore) -> Vec<Bottleneck> {
    let mut adjacency = Adjacency::new();
    for motion in subjects_of_type(store, vocab::CLASS_MOTION) {
        let refs = references_of(store, &motion);
        if !refs.is_empty() {
            adjacency.insert(motion, refs);
        }
    }

    find_cycles(&adjacency)
        .into_iter()
        .map(|cycle| {
            Bottleneck::new(
                BottleneckType::CircularDependency,
                BottleneckSeverity::Critical,
                format!("Circular dependency detected between {} items", cycle.len()),
            )
            .with_affected(cycle.iter().cloned())
            .with_blocked_by(cycle)
            .with_suggestions(&[
                "Break circular reference by decoupling amendments",
                "Merge related amendments into single proposal",
                "Prioritize one amendment and defer others",
            ])
        })
        .collect()
}

// ============================================================================
// Store helpers
// ============================================================================

fn subjects_of_type(store: &dyn TripleStore, class: &str) -> BTreeSet<String> {
    store.find("", vocab::RDF_TYPE, class).into_iter().map(|t| t.subject).collect()
}

fn references_of(store: &dyn TripleStore, motion: &str) -> Vec<String> {
    let refs: BTreeSet<String> = store
        .find(motion, vocab::PROP_REFERENCES, "")
        .into_iter()
        .map(|t| t.object)
        .collect();
    refs.into_iter().collect()
}

fn outcome_of(store: &dyn TripleStore, item: &str) -> Option<AgendaOutcome> {
    store
        .object_of(item, vocab::PROP_AGENDA_ITEM_OUTCOME)
        .and_then(|raw| AgendaOutcome::from_literal(&raw))
}

/// A motion is pending unless its status is adopted, rejected or withdrawn.
/// A motion with no status at all has not been settled and is pending.
fn is_pending_motion(store: &dyn TripleStore, uri: &str) -> bool {
    store
        .object_of(uri, vocab::PROP_MOTION_STATUS)
        .is_none_or(|raw| !MotionStatus::from_literal(&raw).is_some_and(|s| s.is_terminal()))
}

/// A reference target blocks only when it carries a status that is not
/// terminal. Targets without a status are not counted.
fn is_blocking_target(store: &dyn TripleStore, uri: &str) -> bool {
    store
        .object_of(uri, vocab::PROP_MOTION_STATUS)
        .is_some_and(|raw| !MotionStatus::from_literal(&raw).is_some_and(|s| s.is_terminal()))
}

// ============================================================================
// Post-processing
// ============================================================================

/// Most severe first; within a severity, oldest stall first with undated
/// stalls ahead of dated ones. Stable.
pub fn sort_by_severity(bottlenecks: &mut [Bottleneck]) {
    bottlenecks.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.stalled_since.cmp(&b.stalled_since))
    });
}

/// Aggregate counts, the oldest stall and the most affected items.
pub fn summarize(bottlenecks: &[Bottleneck]) -> BottleneckSummary {
    let mut summary = BottleneckSummary { total: bottlenecks.len(), ..Default::default() };

    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for b in bottlenecks {
        match b.severity {
            BottleneckSeverity::Critical => summary.critical += 1,
            BottleneckSeverity::High => summary.high += 1,
            BottleneckSeverity::Medium => summary.medium += 1,
            BottleneckSeverity::Low => summary.low += 1,
        }
        *summary.by_type.entry(b.kind).or_default() += 1;

        if let Some(since) = b.stalled_since {
            summary.oldest_stall = Some(summary.oldest_stall.map_or(since, |old| old.min(since)));
        }

        for item in &b.affected_items {
            let slot = *slots.entry(item.as_str()).or_insert_with(|| {
                order.push((item.as_str(), 0));
                order.len() - 1
            });
            order[slot].1 += 1;
        }
    }

    order.sort_by(|a, b| b.1.cmp(&a.1));
    summary.most_affected = order
        .into_iter()
        .take(MOST_AFFECTED_LIMIT)
        .map(|(item, _)| item.to_string())
        .collect();

    summary
}

// ============================================================================
// Tests
// ============================================================================

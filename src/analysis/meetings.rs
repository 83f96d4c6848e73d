//! Meeting timeline loading.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::model::literal::parse_date;
use crate::model::MeetingStatus;
use crate::storage::TripleStore;
use crate::vocab;

/// A meeting as the detector sees it: just enough to order and label it.
#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    pub uri: String,
    pub date: Option<DateTime<Utc>>,
    pub sequence: Option<u32>,
    pub title: Option<String>,
    pub status: MeetingStatus,
}

impl Meeting {
    /// Read one meeting's facts. Unparseable values are left unset.
    pub fn load(store: &dyn TripleStore, uri: &str) -> Self {
        let date = store.object_of(uri, vocab::PROP_MEETING_DATE).and_then(|raw| {
            let parsed = parse_date(&raw);
            if parsed.is_none() {
                trace!(meeting = uri, value = %raw, "unparseable meeting date");
            }
            parsed
        });

        let sequence = store
            .object_of(uri, vocab::PROP_MEETING_SEQUENCE)
            .and_then(|raw| raw.trim().parse().ok());

        let status = store
            .object_of(uri, vocab::PROP_MEETING_STATUS)
            .and_then(|raw| MeetingStatus::from_literal(&raw))
            .unwrap_or_default();

        Self {
            uri: uri.to_string(),
            date,
            sequence,
            title: store.object_of(uri, vocab::RDFS_LABEL),
            status,
        }
    }

    /// Agenda item URIs attached to this meeting, sorted.
    pub fn agenda_items(&self, store: &dyn TripleStore) -> Vec<String> {
        let mut items: Vec<String> = store
            .find(&self.uri, vocab::PROP_HAS_AGENDA_ITEM, "")
            .into_iter()
            .map(|t| t.object)
            .collect();
        items.sort();
        items.dedup();
        items
    }
}

/// Every `reg:Meeting` in the store, oldest first.
///
/// Undated meetings sort first; ties fall back to sequence number, then URI,
/// so the timeline does not depend on store iteration order.
pub fn load_meetings(store: &dyn TripleStore) -> Vec<Meeting> {
    let mut uris: Vec<String> = store
        .find("", vocab::RDF_TYPE, vocab::CLASS_MEETING)
        .into_iter()
        .map(|t| t.subject)
        .collect();
    uris.sort();
    uris.dedup();

    let mut meetings: Vec<Meeting> = uris.iter().map(|uri| Meeting::load(store, uri)).collect();
    meetings.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.sequence.cmp(&b.sequence))
            .then_with(|| a.uri.cmp(&b.uri))
    });
    meetings
}

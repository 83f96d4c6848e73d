//! Fixed predicate and class vocabulary of the deliberation graph.
//!
//! These are shorthand (`prefix:local`) names as they appear in the store.

// ============================================================================
// RDF standard
// ============================================================================

pub const RDF_TYPE: &str = "rdf:type";
pub const RDFS_LABEL: &str = "rdfs:label";

// ============================================================================
// Classes
// ============================================================================

pub const CLASS_MEETING: &str = "reg:Meeting";
pub const CLASS_AGENDA_ITEM: &str = "reg:AgendaItem";
pub const CLASS_MOTION: &str = "reg:Motion";
pub const CLASS_DECISION: &str = "reg:DeliberationDecision";
pub const CLASS_VOTE_RECORD: &str = "reg:VoteRecord";
pub const CLASS_ACTION_ITEM: &str = "reg:ActionItem";
pub const CLASS_STAKEHOLDER: &str = "reg:Stakeholder";
pub const CLASS_PROCESS: &str = "reg:DeliberationProcess";
pub const CLASS_DOCUMENT: &str = "reg:Document";
pub const CLASS_ARTICLE: &str = "reg:Article";

// ============================================================================
// Descriptive properties
// ============================================================================

pub const PROP_TITLE: &str = "reg:title";
pub const PROP_TEXT: &str = "reg:text";
pub const PROP_NAME: &str = "reg:name";
pub const PROP_IDENTIFIER: &str = "reg:identifier";
pub const PROP_DATE: &str = "reg:date";
pub const PROP_STATUS: &str = "reg:status";
pub const PROP_DESCRIPTION: &str = "reg:description";

// ============================================================================
// Meetings and agendas
// ============================================================================

pub const PROP_MEETING_DATE: &str = "reg:meetingDate";
pub const PROP_MEETING_SEQUENCE: &str = "reg:meetingSequence";
pub const PROP_MEETING_STATUS: &str = "reg:meetingStatus";
pub const PROP_HAS_AGENDA_ITEM: &str = "reg:hasAgendaItem";
pub const PROP_AGENDA_ITEM_OUTCOME: &str = "reg:agendaItemOutcome";
pub const PROP_PROVISION_DISCUSSED: &str = "reg:provisionDiscussed";

// ============================================================================
// Motions
// ============================================================================

pub const PROP_MOTION_STATUS: &str = "reg:motionStatus";
pub const PROP_REFERENCES: &str = "reg:references";

// ============================================================================
// Action items
// ============================================================================

pub const PROP_ACTION_STATUS: &str = "reg:actionStatus";
pub const PROP_ACTION_DUE_DATE: &str = "reg:actionDueDate";
pub const PROP_ACTION_ASSIGNED_TO: &str = "reg:actionAssignedTo";

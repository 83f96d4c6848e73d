//! # Deliberation Graph Model
//!
//! Clean DTOs shared by the store, the detector, the navigator and any
//! renderer that consumes their output.
//!
//! Design rule: this module is pure data and pure parsing helpers. No store
//! access, no session state.

pub mod triple;
pub mod literal;
pub mod status;
pub mod bottleneck;
pub mod navigation;

pub use triple::{Triple, TriplePattern};
pub use status::{ActionStatus, AgendaOutcome, MeetingStatus, MotionStatus};
pub use bottleneck::{
    Bottleneck, BottleneckReport, BottleneckSeverity, BottleneckSummary, BottleneckType,
};
pub use navigation::{Connection, ConnectionDirection, NavigationNode, NodeType};

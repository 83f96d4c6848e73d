//! # Bottleneck Analysis
//!
//! Finds where a deliberation process is stuck.
//!
//! ```text
//! TripleStore ──► load_meetings ──► six passes ──► sort ──► summarize ──► BottleneckReport
//!                                       │
//!                                  find_cycles (reg:references)
//! ```

pub mod cycles;
pub mod detector;
pub mod meetings;

pub use cycles::find_cycles;
pub use detector::{summarize, sort_by_severity, BottleneckConfig, BottleneckDetector};
pub use meetings::{load_meetings, Meeting};

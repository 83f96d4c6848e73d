//! # deliberation-graph — Bottleneck Detection and Graph Navigation
//!
//! Analysis core for legislative and committee deliberation records stored
//! as subject-predicate-object triples (meetings, agenda items, motions,
//! votes, action items, provisions).
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `TripleStore` is the only contract between the
//!    analysis core and whatever holds the facts
//! 2. **Clean DTOs**: `Bottleneck`, `NavigationNode`, `Connection` cross all
//!    boundaries and serialize as-is
//! 3. **Deterministic**: store iteration order never leaks into results
//! 4. **Caller-owned sessions**: navigation state is a value, not a singleton
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use deliberation_graph::{BottleneckDetector, BottleneckType, MemoryStore};
//!
//! # fn main() -> deliberation_graph::Result<()> {
//! let store = MemoryStore::from_triples([
//!     ("motion:A", "rdf:type", "reg:Motion"),
//!     ("motion:B", "rdf:type", "reg:Motion"),
//!     ("motion:A", "reg:references", "motion:B"),
//!     ("motion:B", "reg:references", "motion:A"),
//! ])?;
//!
//! let report = BottleneckDetector::new(Arc::new(store)).detect_bottlenecks()?;
//! assert_eq!(report.of_type(BottleneckType::CircularDependency).count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Components
//!
//! | Component | Module | Description |
//! |-----------|--------|-------------|
//! | `BottleneckDetector` | `analysis` | Six stall passes, sorted and summarized |
//! | `GraphNavigator` | `navigation` | Focus/expand/search/path/subgraph over a lazy node cache |
//! | `MemoryStore` | `storage` | Indexed in-memory `TripleStore` |
//! | JSON export | `export` | Reports and subgraphs for external renderers |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod vocab;
pub mod storage;
pub mod analysis;
pub mod navigation;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Triple, TriplePattern,
    Bottleneck, BottleneckType, BottleneckSeverity, BottleneckReport, BottleneckSummary,
    NavigationNode, NodeType, Connection, ConnectionDirection,
};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{MemoryStore, TripleStore};

// ============================================================================
// Re-exports: Engines
// ============================================================================

pub use analysis::{BottleneckConfig, BottleneckDetector};
pub use navigation::{
    GraphNavigator, NavigatorConfig, NavigationState, NavigationFilters, LayoutType,
    Subgraph, SubgraphEdge,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No previous node in history")]
    NoHistory,

    #[error("No path from {from} to {to} within depth {max_depth}")]
    DepthExceeded { from: String, to: String, max_depth: usize },

    #[error("Invalid triple: {0}")]
    InvalidTriple(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

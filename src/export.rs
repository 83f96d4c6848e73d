//! JSON export of analysis results.
//!
//! Hands reports and subgraphs to external renderers (dashboards, graph
//! viewers) as plain JSON.
//!
//! ```text
//! BottleneckDetector → BottleneckReport → report_json()   → {analyzed_at, bottlenecks, summary}
//! GraphNavigator     → Subgraph         → subgraph_json() → {focus_uri, nodes, connections}
//! ```

use std::io::Write;

use crate::model::BottleneckReport;
use crate::navigation::Subgraph;
use crate::Result;

/// Write a bottleneck report as pretty-printed JSON followed by a newline.
pub fn report_json(report: &BottleneckReport, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a subgraph as pretty-printed JSON followed by a newline.
pub fn subgraph_json(subgraph: &Subgraph, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, subgraph)?;
    writeln!(writer)?;
    Ok(())
}

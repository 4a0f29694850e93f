//! The editable graph and everything that reads or writes it as a whole:
//! textual input, generated shapes, export, undo/redo history, statistics
//! and presets.

/// Graphs generated from a shape description.
pub mod describe;
mod error;
/// Graph export.
pub mod export;
/// Undo/redo stacks.
pub mod history;
/// Textual input formats.
pub mod parse;
/// Example graphs.
pub mod presets;
/// Statistics and classification.
pub mod stats;
mod types;

pub use error::{GraphError, ParseError};
pub use export::ExportFormat;
pub use history::History;
pub use parse::InputFormat;
pub use presets::Preset;
pub use stats::{GraphKind, GraphStats, classify};
pub use types::{GraphData, GraphEdge, GraphNode, generate_node_id, grid_position};

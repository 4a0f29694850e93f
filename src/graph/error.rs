//! Errors for graph edits and textual input.

use thiserror::Error;

/// Result of a graph mutation.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Rejected graph mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// An edge from a node to itself.
	#[error("Cannot connect node {0} to itself")]
	SelfLoop(String),

	/// The two nodes are already joined.
	#[error("Edge already exists between {from} and {to}")]
	DuplicateEdge {
		/// Requested source.
		from: String,
		/// Requested target.
		to: String,
	},

	/// No node has this id.
	#[error("Node not found: {0}")]
	UnknownNode(String),

	/// No edge joins the two nodes, in either orientation.
	#[error("No edge between {from} and {to}")]
	UnknownEdge {
		/// One endpoint.
		from: String,
		/// The other endpoint.
		to: String,
	},

	/// Another node already has this id.
	#[error("Node already exists: {0}")]
	DuplicateNode(String),

	/// A blank node name.
	#[error("Node name must not be empty")]
	EmptyName,
}

/// Failures of the textual graph input formats.
#[derive(Error, Debug)]
pub enum ParseError {
	/// A line that does not fit the format.
	#[error("Line {line}: {reason}")]
	InvalidLine {
		/// 1-based line number.
		line: usize,
		/// What was expected there.
		reason: String,
	},

	/// An edge from a node to itself.
	#[error("Self-loop detected on node {0}; self-loops are not allowed")]
	SelfLoop(String),

	/// Input without a single node.
	#[error("No nodes found in input")]
	Empty,

	/// A JSON edge naming a node missing from `nodes`.
	#[error("Node {0} is not declared in the nodes array")]
	UnknownNode(String),

	/// A matrix row of the wrong length.
	#[error("Matrix must be square: row {row} has {actual} cells, expected {expected}")]
	MatrixShape {
		/// 1-based row number.
		row: usize,
		/// Row count of the matrix.
		expected: usize,
		/// Cells found on the row.
		actual: usize,
	},

	/// A JSON edge without `from`/`source` or `to`/`target`.
	#[error("Edge at index {0} is missing its source or target")]
	MissingEndpoint(usize),

	/// A JSON node with a blank id.
	#[error("Node at index {0} has an empty id")]
	MissingId(usize),

	/// Malformed JSON or a document of the wrong shape.
	#[error("Invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// A description naming no known graph shape.
	#[error("Could not recognise a graph type in \"{0}\"")]
	UnknownShape(String),

	/// A description asking for fewer nodes than its shape needs.
	#[error("A {shape} needs at least {min} nodes")]
	TooFewNodes {
		/// Shape name.
		shape: &'static str,
		/// Smallest node count the shape allows.
		min: usize,
	},

	/// A description asking for too many nodes.
	#[error("Node count {count} is out of range (at most {max})")]
	NodeCount {
		/// The count as written.
		count: String,
		/// Largest allowed count.
		max: usize,
	},

	/// A built-in description pattern failed to compile.
	#[error("Invalid description pattern: {0}")]
	Pattern(regex::Error),
}

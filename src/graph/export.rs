//! Serializes the current graph (never the playback state) to text.

use super::parse::{EdgeJson, GraphJson, NodeJson};
use super::types::GraphData;

/// Export formats offered for download.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
	/// Pretty-printed JSON document.
	Json,
	/// `source target` per line.
	EdgeList,
	/// `node: neighbors` per line.
	AdjacencyList,
}

impl ExportFormat {
	/// Every format, in menu order.
	pub const ALL: [ExportFormat; 3] = [
		ExportFormat::Json,
		ExportFormat::EdgeList,
		ExportFormat::AdjacencyList,
	];

	/// Button label.
	pub fn label(self) -> &'static str {
		match self {
			ExportFormat::Json => "JSON",
			ExportFormat::EdgeList => "Edge List",
			ExportFormat::AdjacencyList => "Adjacency List",
		}
	}

	/// Suggested download name.
	pub fn file_name(self) -> &'static str {
		match self {
			ExportFormat::Json => "graph.json",
			ExportFormat::EdgeList => "graph_edges.txt",
			ExportFormat::AdjacencyList => "graph_adjacency.txt",
		}
	}

	/// MIME type of the rendered text.
	pub fn mime_type(self) -> &'static str {
		match self {
			ExportFormat::Json => "application/json",
			_ => "text/plain",
		}
	}

	/// Serializes `graph` in this format.
	pub fn render(self, graph: &GraphData) -> Result<String, serde_json::Error> {
		Ok(match self {
			ExportFormat::Json => to_json(graph)?,
			ExportFormat::EdgeList => to_edge_list(graph),
			ExportFormat::AdjacencyList => to_adjacency_list(graph),
		})
	}
}

/// Positions and per-edge direction overrides survive a round trip through
/// [`parse_json`](super::parse::parse_json).
pub fn to_json(graph: &GraphData) -> Result<String, serde_json::Error> {
	let doc = GraphJson {
		directed: graph.directed,
		nodes: graph
			.nodes
			.iter()
			.map(|n| NodeJson {
				id: n.id.clone(),
				label: Some(n.label.clone()),
				x: Some(n.x),
				y: Some(n.y),
			})
			.collect(),
		edges: graph
			.edges
			.iter()
			.map(|e| EdgeJson {
				from: Some(e.source.clone()),
				to: Some(e.target.clone()),
				directed: e.directed,
				..Default::default()
			})
			.collect(),
	};
	serde_json::to_string_pretty(&doc)
}

/// One `source target` line per edge.
pub fn to_edge_list(graph: &GraphData) -> String {
	graph
		.edges
		.iter()
		.map(|e| format!("{} {}", e.source, e.target))
		.collect::<Vec<_>>()
		.join("\n")
}

/// One `node: neighbors` line per node, in node order. An edge contributes
/// its reverse entry only when neither the graph nor the edge is directed.
pub fn to_adjacency_list(graph: &GraphData) -> String {
	let mut lines: Vec<(&str, Vec<&str>)> = graph
		.nodes
		.iter()
		.map(|n| (n.id.as_str(), Vec::new()))
		.collect();

	for edge in &graph.edges {
		push_neighbor(&mut lines, &edge.source, &edge.target);
		if !edge.is_directed(graph.directed) {
			push_neighbor(&mut lines, &edge.target, &edge.source);
		}
	}

	lines
		.into_iter()
		.map(|(id, neighbors)| {
			if neighbors.is_empty() {
				format!("{id}:")
			} else {
				format!("{id}: {}", neighbors.join(" "))
			}
		})
		.collect::<Vec<_>>()
		.join("\n")
}

fn push_neighbor<'a>(lines: &mut Vec<(&'a str, Vec<&'a str>)>, from: &'a str, to: &'a str) {
	match lines.iter_mut().find(|(id, _)| *id == from) {
		Some((_, neighbors)) => neighbors.push(to),
		None => lines.push((from, vec![to])),
	}
}

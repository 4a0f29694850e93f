//! Textual graph input: edge lists, adjacency lists, adjacency matrices and
//! JSON documents.
//!
//! Every parser produces a structurally valid [`GraphData`]: no self-loops,
//! no edge naming an undeclared node, no duplicate edge ids.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::ParseError;
use super::types::{GraphData, GraphEdge, GraphNode};

/// Result of parsing textual input.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Which textual format a piece of input is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputFormat {
	/// `source target` per line.
	#[default]
	EdgeList,
	/// `node: neighbors` per line.
	AdjacencyList,
	/// Square 0/1 adjacency matrix.
	Matrix,
	/// JSON document with `nodes` and `edges`.
	Json,
	/// A few words naming a graph shape, see [`super::describe`].
	Description,
}

impl InputFormat {
	/// Every format, in tab order.
	pub const ALL: [InputFormat; 5] = [
		InputFormat::EdgeList,
		InputFormat::AdjacencyList,
		InputFormat::Matrix,
		InputFormat::Json,
		InputFormat::Description,
	];

	/// Tab label.
	pub fn label(self) -> &'static str {
		match self {
			InputFormat::EdgeList => "Edge List",
			InputFormat::AdjacencyList => "Adjacency List",
			InputFormat::Matrix => "Matrix",
			InputFormat::Json => "JSON",
			InputFormat::Description => "Describe",
		}
	}

	/// Example input shown in an empty text area.
	pub fn placeholder(self) -> &'static str {
		match self {
			InputFormat::EdgeList => "A B\nB C\nC D\nD A",
			InputFormat::AdjacencyList => "A: B C\nB: D\nC: D\nD:",
			InputFormat::Matrix => "0 1 1\n1 0 1\n1 1 0",
			InputFormat::Json => {
				"{\n  \"directed\": false,\n  \"nodes\": [{\"id\": \"A\"}, {\"id\": \"B\"}, {\"id\": \"C\"}],\n  \"edges\": [{\"from\": \"A\", \"to\": \"B\"}, {\"from\": \"B\", \"to\": \"C\"}]\n}"
			}
			InputFormat::Description => "cyclic graph with 6 nodes",
		}
	}

	/// Guesses the format of an uploaded file from its name.
	pub fn from_file_name(name: &str) -> Self {
		let lower = name.to_ascii_lowercase();
		if lower.ends_with(".json") {
			InputFormat::Json
		} else if lower.ends_with(".csv") || lower.contains("matrix") {
			InputFormat::Matrix
		} else if lower.contains("adj") {
			InputFormat::AdjacencyList
		} else {
			InputFormat::EdgeList
		}
	}

	/// Parses `text` in this format. `directed` is ignored for JSON, which
	/// carries its own flag.
	pub fn parse(self, text: &str, directed: bool) -> Result<GraphData> {
		match self {
			InputFormat::EdgeList => parse_edge_list(text, directed),
			InputFormat::AdjacencyList => parse_adjacency_list(text, directed),
			InputFormat::Matrix => parse_matrix(text, directed),
			InputFormat::Json => parse_json(text),
			InputFormat::Description => super::describe::parse_description(text, directed),
		}
	}
}

/// Serialized graph document, shared with the JSON exporter.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GraphJson {
	#[serde(default)]
	pub directed: bool,
	pub nodes: Vec<NodeJson>,
	pub edges: Vec<EdgeJson>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct NodeJson {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub x: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct EdgeJson {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target: Option<String>,
	/// Overrides the document-level `directed` for this edge.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub directed: Option<bool>,
}

/// Accumulates nodes in first-seen order and edges without duplicates.
pub(super) struct Builder {
	graph: GraphData,
	seen: HashSet<String>,
}

impl Builder {
	pub(super) fn new(directed: bool) -> Self {
		Self {
			graph: GraphData::new(directed),
			seen: HashSet::new(),
		}
	}

	pub(super) fn node(&mut self, id: &str) {
		if self.seen.insert(id.to_string()) {
			let index = self.graph.nodes.len();
			self.graph.nodes.push(GraphNode::at_grid(id, index));
		}
	}

	pub(super) fn edge(&mut self, source: &str, target: &str) -> Result<()> {
		if source == target {
			return Err(ParseError::SelfLoop(source.to_string()));
		}
		self.node(source);
		self.node(target);
		if !is_duplicate(&self.graph, source, target, None) {
			self.graph.edges.push(GraphEdge::new(source, target));
		}
		Ok(())
	}

	pub(super) fn finish(self) -> Result<GraphData> {
		if self.graph.is_empty() {
			return Err(ParseError::Empty);
		}
		Ok(self.graph)
	}
}

/// In a directed graph `A B` and `B A` are distinct edges; otherwise they name
/// the same one. A per-edge `directed` flag overrides the graph's.
fn is_duplicate(graph: &GraphData, source: &str, target: &str, directed: Option<bool>) -> bool {
	if directed.unwrap_or(graph.directed) {
		graph
			.edges
			.iter()
			.any(|e| e.source == source && e.target == target)
	} else {
		graph.has_edge_between(source, target)
	}
}

fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
	text.lines()
		.enumerate()
		.map(|(i, line)| (i + 1, line.trim()))
		.filter(|(_, line)| !line.is_empty())
}

/// One `source target` pair per line.
pub fn parse_edge_list(text: &str, directed: bool) -> Result<GraphData> {
	let mut builder = Builder::new(directed);
	for (line, content) in content_lines(text) {
		let parts: Vec<&str> = content.split_whitespace().collect();
		let [source, target] = parts.as_slice() else {
			return Err(ParseError::InvalidLine {
				line,
				reason: format!("expected \"source target\", found \"{content}\""),
			});
		};
		builder.edge(source, target)?;
	}
	builder.finish()
}

/// `node: neighbor neighbor ...` per line. Nodes may list no neighbors.
pub fn parse_adjacency_list(text: &str, directed: bool) -> Result<GraphData> {
	let mut builder = Builder::new(directed);
	for (line, content) in content_lines(text) {
		let Some((source, targets)) = content.split_once(':') else {
			return Err(ParseError::InvalidLine {
				line,
				reason: format!("expected \"node: neighbors\", found \"{content}\""),
			});
		};
		let source = source.trim();
		if source.is_empty() {
			return Err(ParseError::InvalidLine {
				line,
				reason: "empty node name".into(),
			});
		}
		builder.node(source);
		for target in targets.split_whitespace() {
			builder.edge(source, target)?;
		}
	}
	builder.finish()
}

/// Square 0/1 matrix, rows separated by newlines and cells by whitespace or
/// commas. Nodes are named A, B, C, ... and the diagonal is ignored.
pub fn parse_matrix(text: &str, directed: bool) -> Result<GraphData> {
	let mut rows = Vec::new();
	for (line, content) in content_lines(text) {
		let row = content
			.split(|c: char| c == ',' || c.is_whitespace())
			.filter(|cell| !cell.is_empty())
			.map(|cell| {
				cell.parse::<i64>().map_err(|_| ParseError::InvalidLine {
					line,
					reason: format!("\"{cell}\" is not a number"),
				})
			})
			.collect::<Result<Vec<_>>>()?;
		rows.push(row);
	}

	let size = rows.len();
	for (row, cells) in rows.iter().enumerate() {
		if cells.len() != size {
			return Err(ParseError::MatrixShape {
				row: row + 1,
				expected: size,
				actual: cells.len(),
			});
		}
	}

	let ids: Vec<String> = (0..size).map(super::types::generate_node_id).collect();
	let mut builder = Builder::new(directed);
	for id in &ids {
		builder.node(id);
	}
	for i in 0..size {
		for j in 0..size {
			if i == j {
				continue;
			}
			let connected = if directed {
				rows[i][j] > 0
			} else {
				i < j && (rows[i][j] > 0 || rows[j][i] > 0)
			};
			if connected {
				builder.edge(&ids[i], &ids[j])?;
			}
		}
	}
	builder.finish()
}

/// `{ directed?, nodes: [{id, label?, x?, y?}], edges: [{from|source, to|target, directed?}] }`.
pub fn parse_json(text: &str) -> Result<GraphData> {
	let doc: GraphJson = serde_json::from_str(text)?;
	let mut graph = GraphData::new(doc.directed);
	let mut ids = HashSet::new();

	for (index, node) in doc.nodes.into_iter().enumerate() {
		let id = node.id.trim().to_string();
		if id.is_empty() {
			return Err(ParseError::MissingId(index));
		}
		if !ids.insert(id.clone()) {
			continue;
		}
		let (gx, gy) = super::types::grid_position(index);
		graph.nodes.push(GraphNode {
			label: node.label.unwrap_or_else(|| id.clone()),
			x: node.x.unwrap_or(gx),
			y: node.y.unwrap_or(gy),
			id,
		});
	}
	if graph.is_empty() {
		return Err(ParseError::Empty);
	}

	for (index, edge) in doc.edges.into_iter().enumerate() {
		let (Some(source), Some(target)) = (edge.from.or(edge.source), edge.to.or(edge.target))
		else {
			return Err(ParseError::MissingEndpoint(index));
		};
		if source == target {
			return Err(ParseError::SelfLoop(source));
		}
		for id in [&source, &target] {
			if !ids.contains(id) {
				return Err(ParseError::UnknownNode(id.clone()));
			}
		}
		if !is_duplicate(&graph, &source, &target, edge.directed) {
			graph.edges.push(GraphEdge {
				directed: edge.directed,
				..GraphEdge::new(source, target)
			});
		}
	}
	Ok(graph)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pairs(g: &GraphData) -> Vec<(&str, &str)> {
		g.edges
			.iter()
			.map(|e| (e.source.as_str(), e.target.as_str()))
			.collect()
	}

	#[test]
	fn test_edge_list() {
		let g = parse_edge_list("A B\n\n  B C \nC D\nD A\nA B", false).unwrap();
		assert_eq!(g.node_ids(), vec!["A", "B", "C", "D"]);
		assert_eq!(pairs(&g), vec![("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
		assert_eq!((g.nodes[1].x, g.nodes[1].y), (350.0, 150.0));
		assert_eq!((g.nodes[3].x, g.nodes[3].y), (750.0, 150.0));
	}

	#[test]
	fn test_edge_list_errors() {
		assert!(matches!(
			parse_edge_list("A B\nA B C", false),
			Err(ParseError::InvalidLine { line: 2, .. })
		));
		assert!(matches!(
			parse_edge_list("A A", false),
			Err(ParseError::SelfLoop(n)) if n == "A"
		));
		assert!(matches!(parse_edge_list(" \n", false), Err(ParseError::Empty)));
	}

	#[test]
	fn test_adjacency_list() {
		let g = parse_adjacency_list("A: B C\nB: D\nC: D\nD:\nE:", true).unwrap();
		assert!(g.directed);
		assert_eq!(g.node_ids(), vec!["A", "B", "C", "D", "E"]);
		assert_eq!(pairs(&g), vec![("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
	}

	#[test]
	fn test_undirected_reverse_entries_name_one_edge() {
		let g = parse_adjacency_list("A: B\nB: A C\nC: B", false).unwrap();
		assert_eq!(pairs(&g), vec![("A", "B"), ("B", "C")]);

		let g = parse_edge_list("A B\nB A", false).unwrap();
		assert_eq!(g.edges.len(), 1);

		let g = parse_adjacency_list("A: B\nB: A", true).unwrap();
		assert_eq!(pairs(&g), vec![("A", "B"), ("B", "A")]);
	}

	#[test]
	fn test_adjacency_list_errors() {
		assert!(matches!(
			parse_adjacency_list("A B", false),
			Err(ParseError::InvalidLine { line: 1, .. })
		));
		assert!(matches!(
			parse_adjacency_list(": B", false),
			Err(ParseError::InvalidLine { .. })
		));
		assert!(matches!(
			parse_adjacency_list("A: A", false),
			Err(ParseError::SelfLoop(_))
		));
	}

	#[test]
	fn test_matrix_undirected_collapses_symmetric_cells() {
		let g = parse_matrix("0 1 1\n1 0 1\n1 1 1", false).unwrap();
		assert_eq!(g.node_ids(), vec!["A", "B", "C"]);
		assert_eq!(pairs(&g), vec![("A", "B"), ("A", "C"), ("B", "C")]);
	}

	#[test]
	fn test_matrix_directed_and_csv() {
		let g = parse_matrix("0,1,0\n0,0,1\n1,0,0", true).unwrap();
		assert_eq!(pairs(&g), vec![("A", "B"), ("B", "C"), ("C", "A")]);
	}

	#[test]
	fn test_matrix_errors() {
		assert!(matches!(
			parse_matrix("0 1\n1 0 1", false),
			Err(ParseError::MatrixShape { row: 2, expected: 2, actual: 3 })
		));
		assert!(matches!(
			parse_matrix("0 x\n1 0", false),
			Err(ParseError::InvalidLine { line: 1, .. })
		));
		assert!(matches!(parse_matrix("", false), Err(ParseError::Empty)));
	}

	#[test]
	fn test_json_accepts_both_endpoint_spellings() {
		let g = parse_json(
			r#"{
				"directed": true,
				"nodes": [{"id": "A", "label": "Start", "x": 10, "y": 20}, {"id": "B"}, {"id": "C"}],
				"edges": [{"from": "A", "to": "B"}, {"source": "B", "target": "C"}]
			}"#,
		)
		.unwrap();
		assert!(g.directed);
		assert_eq!(g.nodes[0].label, "Start");
		assert_eq!((g.nodes[0].x, g.nodes[0].y), (10.0, 20.0));
		assert_eq!(g.nodes[2].label, "C");
		assert_eq!(pairs(&g), vec![("A", "B"), ("B", "C")]);
	}

	#[test]
	fn test_json_edge_direction_override() {
		let g = parse_json(
			r#"{
				"nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}],
				"edges": [
					{"from": "A", "to": "B"},
					{"from": "B", "to": "A"},
					{"from": "B", "to": "C", "directed": true},
					{"from": "C", "to": "B", "directed": true}
				]
			}"#,
		)
		.unwrap();
		assert!(!g.directed);
		assert_eq!(pairs(&g), vec![("A", "B"), ("B", "C"), ("C", "B")]);
		assert_eq!(g.edges[0].directed, None);
		assert_eq!(g.edges[1].directed, Some(true));
	}

	#[test]
	fn test_json_errors() {
		assert!(matches!(parse_json("{"), Err(ParseError::Json(_))));
		assert!(matches!(
			parse_json(r#"{"nodes": [{"id": "A"}]}"#),
			Err(ParseError::Json(_))
		));
		assert!(matches!(
			parse_json(r#"{"nodes": [{"id": "A"}], "edges": [{"from": "A"}]}"#),
			Err(ParseError::MissingEndpoint(0))
		));
		assert!(matches!(
			parse_json(r#"{"nodes": [{"id": "A"}], "edges": [{"from": "A", "to": "Z"}]}"#),
			Err(ParseError::UnknownNode(n)) if n == "Z"
		));
		assert!(matches!(
			parse_json(r#"{"nodes": [{"id": "A"}], "edges": [{"from": "A", "to": "A"}]}"#),
			Err(ParseError::SelfLoop(_))
		));
	}

	#[test]
	fn test_format_from_file_name() {
		assert_eq!(InputFormat::from_file_name("graph.JSON"), InputFormat::Json);
		assert_eq!(InputFormat::from_file_name("graph_adjacency.txt"), InputFormat::AdjacencyList);
		assert_eq!(InputFormat::from_file_name("m.csv"), InputFormat::Matrix);
		assert_eq!(InputFormat::from_file_name("graph_edges.txt"), InputFormat::EdgeList);
		assert_eq!(InputFormat::from_file_name("describe.txt"), InputFormat::EdgeList);
	}

	#[test]
	fn test_description_dispatch() {
		let g = InputFormat::Description.parse("complete graph with 3 nodes", true).unwrap();
		assert!(g.directed);
		assert_eq!(pairs(&g), vec![("A", "B"), ("A", "C"), ("B", "C")]);
	}
}

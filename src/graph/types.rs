//! The editable graph model.

use serde::{Deserialize, Serialize};

use super::error::{GraphError, Result};

/// Column count of the fallback grid used for nodes without coordinates.
const GRID_COLUMNS: usize = 4;

/// A node and its last known position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique name.
	pub id: String,
	/// Display text, the id unless a document says otherwise.
	pub label: String,
	/// Horizontal position in graph space.
	pub x: f64,
	/// Vertical position in graph space.
	pub y: f64,
}

impl GraphNode {
	/// A node labelled with its own id.
	pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
		let id = id.into();
		Self {
			label: id.clone(),
			id,
			x,
			y,
		}
	}

	/// A node placed on the default grid by its insertion index.
	pub fn at_grid(id: impl Into<String>, index: usize) -> Self {
		let (x, y) = grid_position(index);
		Self::new(id, x, y)
	}
}

/// An edge drawn from `source` to `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// `"{source}-{target}"`.
	pub id: String,
	/// Tail node id.
	pub source: String,
	/// Head node id.
	pub target: String,
	/// Per-edge override of the graph's directedness.
	pub directed: Option<bool>,
}

impl GraphEdge {
	/// An edge following the graph's directedness.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		let (source, target) = (source.into(), target.into());
		Self {
			id: edge_id(&source, &target),
			source,
			target,
			directed: None,
		}
	}

	/// The edge's own flag, else the graph's.
	pub fn is_directed(&self, graph_directed: bool) -> bool {
		self.directed.unwrap_or(graph_directed)
	}

	/// True when the edge joins `a` and `b`, in either orientation.
	pub fn joins(&self, a: &str, b: &str) -> bool {
		(self.source == a && self.target == b) || (self.source == b && self.target == a)
	}

	/// True when `id` is either endpoint.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

/// The user's graph: the single source of truth every panel reads from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Nodes in insertion order.
	pub nodes: Vec<GraphNode>,
	/// Edges in insertion order.
	pub edges: Vec<GraphEdge>,
	/// Whether edges run one way only.
	pub directed: bool,
}

impl GraphData {
	/// An empty graph.
	pub fn new(directed: bool) -> Self {
		Self {
			directed,
			..Default::default()
		}
	}

	/// True when there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// True when a node has this id.
	pub fn contains(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	/// Node ids in insertion order.
	pub fn node_ids(&self) -> Vec<String> {
		self.nodes.iter().map(|n| n.id.clone()).collect()
	}

	/// True when an edge joins `a` and `b` in either orientation.
	pub fn has_edge_between(&self, a: &str, b: &str) -> bool {
		self.edges.iter().any(|e| e.joins(a, b))
	}

	/// Appends a node with the next free generated id and returns that id.
	pub fn add_node(&mut self, x: f64, y: f64) -> String {
		let mut index = self.nodes.len();
		let id = loop {
			let candidate = generate_node_id(index);
			if !self.contains(&candidate) {
				break candidate;
			}
			index += 1;
		};
		self.nodes.push(GraphNode::new(id.clone(), x, y));
		id
	}

	/// Adds an edge between two existing nodes. Self-loops and a second edge
	/// between the same pair (in either orientation) are rejected.
	pub fn connect(&mut self, source: &str, target: &str) -> Result<()> {
		if source == target {
			return Err(GraphError::SelfLoop(source.to_string()));
		}
		for id in [source, target] {
			if !self.contains(id) {
				return Err(GraphError::UnknownNode(id.to_string()));
			}
		}
		if self.has_edge_between(source, target) {
			return Err(GraphError::DuplicateEdge {
				from: source.to_string(),
				to: target.to_string(),
			});
		}
		self.edges.push(GraphEdge::new(source, target));
		Ok(())
	}

	/// Removes a node together with every edge touching it.
	pub fn remove_node(&mut self, id: &str) -> Result<()> {
		let before = self.nodes.len();
		self.nodes.retain(|n| n.id != id);
		if self.nodes.len() == before {
			return Err(GraphError::UnknownNode(id.to_string()));
		}
		self.edges.retain(|e| !e.touches(id));
		Ok(())
	}

	/// Removes the edge between `a` and `b`, whichever way it was drawn.
	pub fn remove_edge(&mut self, a: &str, b: &str) -> Result<()> {
		let before = self.edges.len();
		self.edges.retain(|e| !e.joins(a, b));
		if self.edges.len() == before {
			return Err(GraphError::UnknownEdge {
				from: a.to_string(),
				to: b.to_string(),
			});
		}
		Ok(())
	}

	/// Renames a node and rewrites the edges that touch it. The new name is
	/// trimmed and must be non-empty and unused.
	pub fn rename_node(&mut self, old: &str, new: &str) -> Result<()> {
		let new = new.trim();
		if new.is_empty() {
			return Err(GraphError::EmptyName);
		}
		if old == new {
			return Ok(());
		}
		if self.contains(new) {
			return Err(GraphError::DuplicateNode(new.to_string()));
		}
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == old)
			.ok_or_else(|| GraphError::UnknownNode(old.to_string()))?;
		node.id = new.to_string();
		node.label = new.to_string();

		for edge in self.edges.iter_mut().filter(|e| e.touches(old)) {
			if edge.source == old {
				edge.source = new.to_string();
			}
			if edge.target == old {
				edge.target = new.to_string();
			}
			edge.id = edge_id(&edge.source, &edge.target);
		}
		Ok(())
	}

	/// Stores a dragged node's new position.
	pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
		node.x = x;
		node.y = y;
		Ok(())
	}

	/// Removes every node and edge, keeping the direction.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}
}

/// Id of the edge drawn from `source` to `target`.
pub fn edge_id(source: &str, target: &str) -> String {
	format!("{source}-{target}")
}

/// Spreadsheet-style node names: A..Z, AA..ZZ, AAA..
pub fn generate_node_id(index: usize) -> String {
	let mut n = index;
	let mut len = 1;
	let mut span = 26;
	while n >= span {
		n -= span;
		len += 1;
		span *= 26;
	}
	let mut name = vec![b'A'; len];
	for slot in name.iter_mut().rev() {
		*slot = b'A' + (n % 26) as u8;
		n /= 26;
	}
	String::from_utf8(name).unwrap_or_default()
}

/// Default placement of the `index`-th node, four per row.
pub fn grid_position(index: usize) -> (f64, f64) {
	(
		150.0 + (index % GRID_COLUMNS) as f64 * 200.0,
		150.0 + (index / GRID_COLUMNS) as f64 * 150.0,
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn abc() -> GraphData {
		let mut g = GraphData::default();
		for id in ["A", "B", "C"] {
			g.add_node(0.0, 0.0);
			assert!(g.contains(id));
		}
		g
	}

	#[test]
	fn test_generate_node_id() {
		assert_eq!(generate_node_id(0), "A");
		assert_eq!(generate_node_id(25), "Z");
		assert_eq!(generate_node_id(26), "AA");
		assert_eq!(generate_node_id(27), "AB");
		assert_eq!(generate_node_id(701), "ZZ");
		assert_eq!(generate_node_id(702), "AAA");
	}

	#[test]
	fn test_add_node_skips_taken_ids() {
		let mut g = GraphData::default();
		g.nodes.push(GraphNode::new("B", 0.0, 0.0));
		assert_eq!(g.add_node(0.0, 0.0), "C");
		assert_eq!(g.add_node(0.0, 0.0), "D");
	}

	#[test]
	fn test_connect_rejects_self_loop_and_duplicates() {
		let mut g = abc();
		g.connect("A", "B").unwrap();
		assert_eq!(g.connect("A", "A"), Err(GraphError::SelfLoop("A".into())));
		assert!(matches!(
			g.connect("B", "A"),
			Err(GraphError::DuplicateEdge { .. })
		));
		assert_eq!(g.connect("A", "Z"), Err(GraphError::UnknownNode("Z".into())));
		assert_eq!(g.edges.len(), 1);
		assert_eq!(g.edges[0].id, "A-B");
	}

	#[test]
	fn test_remove_node_cascades() {
		let mut g = abc();
		g.connect("A", "B").unwrap();
		g.connect("B", "C").unwrap();
		g.connect("A", "C").unwrap();
		g.remove_node("B").unwrap();
		assert_eq!(g.node_ids(), vec!["A", "C"]);
		assert_eq!(g.edges.len(), 1);
		assert!(g.remove_node("B").is_err());
	}

	#[test]
	fn test_remove_edge_either_orientation() {
		let mut g = abc();
		g.connect("A", "B").unwrap();
		g.connect("B", "C").unwrap();
		g.remove_edge("B", "A").unwrap();
		assert!(matches!(
			g.remove_edge("B", "A"),
			Err(GraphError::UnknownEdge { .. })
		));
		assert_eq!(g.edges, [GraphEdge::new("B", "C")]);
	}

	#[test]
	fn test_move_node_updates_position() {
		let mut g = abc();
		g.move_node("B", 42.0, -7.5).unwrap();
		assert_eq!((g.nodes[1].x, g.nodes[1].y), (42.0, -7.5));
		assert_eq!(g.move_node("Z", 0.0, 0.0), Err(GraphError::UnknownNode("Z".into())));
	}

	#[test]
	fn test_rename_rewrites_edges() {
		let mut g = abc();
		g.connect("A", "B").unwrap();
		g.connect("C", "A").unwrap();
		g.rename_node("A", " Root ").unwrap();
		assert!(g.contains("Root"));
		assert_eq!(g.edges[0].id, "Root-B");
		assert_eq!(g.edges[1].target, "Root");
		assert_eq!(g.rename_node("B", "C"), Err(GraphError::DuplicateNode("C".into())));
		assert_eq!(g.rename_node("B", "  "), Err(GraphError::EmptyName));
	}
}

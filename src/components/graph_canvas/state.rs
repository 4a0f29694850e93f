use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::graph::GraphData;
use crate::traversal::PlaybackSnapshot;

pub const NODE_RADIUS: f64 = 14.0;
pub const HIT_RADIUS: f64 = 18.0;
/// Graph-space distance within which a click lands on an edge.
pub const EDGE_HIT_DISTANCE: f64 = 6.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
}

/// Role a node plays in the frame currently on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
	Current,
	Frontier,
	Visited,
	Unvisited,
}

impl NodeRole {
	pub fn color(self) -> &'static str {
		match self {
			NodeRole::Current => "#f59e0b",
			NodeRole::Frontier => "#a855f7",
			NodeRole::Visited => "#22c55e",
			NodeRole::Unvisited => "#1f77b4",
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Traversal frame mirrored from the playback controller.
#[derive(Clone, Debug, Default)]
pub struct TraversalOverlay {
	pub current: Option<String>,
	pub frontier: HashSet<String>,
	pub visited: HashSet<String>,
}

pub struct CanvasState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: Option<DefaultNodeIdx>,
	pub overlay: TraversalOverlay,
	pub start_node: Option<String>,
	/// First endpoint of an edge being drawn with shift-click.
	pub link_source: Option<String>,
	pub directed: bool,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx, bool)>,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl CanvasState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			overlay: TraversalOverlay::default(),
			start_node: None,
			link_source: None,
			directed: data.directed,
			width,
			height,
			flow_time: 0.0,
			id_to_idx: HashMap::new(),
			edges: Vec::new(),
		};
		state.sync(data);
		state
	}

	/// Rebuilds the simulation for a new graph, keeping the on-screen position
	/// of every node that survives.
	pub fn sync(&mut self, data: &GraphData) {
		let mut placed: HashMap<String, (f32, f32, bool)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			placed.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});

		let mut graph = simulation();
		let mut id_to_idx = HashMap::new();
		for node in &data.nodes {
			let (x, y, is_anchor) = placed
				.get(&node.id)
				.copied()
				.unwrap_or((node.x as f32, node.y as f32, false));
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut edges = Vec::new();
		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&edge.source), id_to_idx.get(&edge.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt, edge.is_directed(data.directed)));
			}
		}

		self.graph = graph;
		self.id_to_idx = id_to_idx;
		self.edges = edges;
		self.directed = data.directed;
		self.hover = None;
		self.drag = DragState::default();
		if self
			.link_source
			.as_ref()
			.is_some_and(|id| !data.contains(id))
		{
			self.link_source = None;
		}
	}

	pub fn set_overlay(&mut self, snapshot: &PlaybackSnapshot) {
		self.overlay = TraversalOverlay {
			current: snapshot.current_node.clone(),
			frontier: snapshot.frontier_nodes.iter().cloned().collect(),
			visited: snapshot.visited_nodes.iter().cloned().collect(),
		};
	}

	pub fn role(&self, id: &str) -> NodeRole {
		if self.overlay.current.as_deref() == Some(id) {
			NodeRole::Current
		} else if self.overlay.frontier.contains(id) {
			NodeRole::Frontier
		} else if self.overlay.visited.contains(id) {
			NodeRole::Visited
		} else {
			NodeRole::Unvisited
		}
	}

	/// Whether edge `(a, b)` joins two visited nodes.
	pub fn is_traversed(&self, a: &str, b: &str) -> bool {
		self.overlay.visited.contains(a) && self.overlay.visited.contains(b)
	}

	pub fn is_directed_edge(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> bool {
		self.edges
			.iter()
			.find(|&&(s, t, _)| s == src && t == tgt)
			.map(|&(_, _, directed)| directed)
			.unwrap_or(self.directed)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Endpoints of the edge nearest to a screen point, if close enough.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<(String, String)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		let (mut best, mut nearest) = (None, EDGE_HIT_DISTANCE);
		for &(src, tgt, _) in &self.edges {
			let (Some(&a), Some(&b)) = (positions.get(&src), positions.get(&tgt)) else {
				continue;
			};
			let d = segment_distance((gx, gy), a, b);
			if d < nearest {
				nearest = d;
				best = Some((src, tgt));
			}
		}
		let (src, tgt) = best?;
		Some((self.node_id(src)?, self.node_id(tgt)?))
	}

	/// Current simulation position of a node, in graph space.
	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		self.id_to_idx
			.iter()
			.find(|&(_, &i)| i == idx)
			.map(|(id, _)| id.clone())
	}

	pub fn is_neighbor_of_hover(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.is_some_and(|h| {
			self.edges
				.iter()
				.any(|&(s, t, _)| (s == h && t == idx) || (t == h && s == idx))
		})
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
	}
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len2 = dx * dx + dy * dy;
	let t = if len2 == 0.0 {
		0.0
	} else {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::GraphNode;

	fn line() -> GraphData {
		let mut g = GraphData::new(false);
		g.nodes.push(GraphNode::new("A", 0.0, 0.0));
		g.nodes.push(GraphNode::new("B", 100.0, 0.0));
		g.nodes.push(GraphNode::new("C", 100.0, 100.0));
		g.connect("A", "B").unwrap();
		g.connect("B", "C").unwrap();
		g
	}

	#[test]
	fn test_segment_distance() {
		assert_eq!(segment_distance((50.0, 4.0), (0.0, 0.0), (100.0, 0.0)), 4.0);
		assert_eq!(segment_distance((-3.0, 4.0), (0.0, 0.0), (100.0, 0.0)), 5.0);
		assert_eq!(segment_distance((3.0, 4.0), (0.0, 0.0), (0.0, 0.0)), 5.0);
	}

	#[test]
	fn test_edge_hit_testing() {
		let state = CanvasState::new(&line(), 800.0, 600.0);
		assert_eq!(
			state.edge_at_position(50.0, 3.0),
			Some(("A".to_string(), "B".to_string()))
		);
		assert_eq!(
			state.edge_at_position(102.0, 60.0),
			Some(("B".to_string(), "C".to_string()))
		);
		assert_eq!(state.edge_at_position(50.0, 50.0), None);
	}

	#[test]
	fn test_sync_keeps_position_of_surviving_nodes() {
		let mut state = CanvasState::new(&line(), 800.0, 600.0);
		let a = state.node_at_position(0.0, 0.0).unwrap();
		assert_eq!(state.node_id(a).as_deref(), Some("A"));
		assert_eq!(state.node_position(a), Some((0.0, 0.0)));

		let mut moved = line();
		moved.move_node("A", 40.0, 40.0).unwrap();
		state.sync(&moved);
		let a = state.node_at_position(0.0, 0.0).unwrap();
		assert_eq!(state.node_position(a), Some((0.0, 0.0)));
	}
}

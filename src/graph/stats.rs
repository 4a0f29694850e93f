//! Degree statistics and a structural graph classification.

use std::collections::HashMap;
use std::fmt;

use petgraph::Direction;
use petgraph::algo::{connected_components, is_cyclic_directed, is_cyclic_undirected};
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::GraphData;

/// Counts and degree figures for the statistics panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStats {
	/// Number of nodes.
	pub node_count: usize,
	/// Number of edges.
	pub edge_count: usize,
	/// `e / (n * (n - 1))`, zero for graphs with fewer than two nodes.
	pub density: f64,
	/// Mean in-degree.
	pub avg_in_degree: f64,
	/// Mean out-degree.
	pub avg_out_degree: f64,
	/// Largest in-degree.
	pub max_in_degree: usize,
	/// Largest out-degree.
	pub max_out_degree: usize,
	/// `(id, in, out)` per node, in node order.
	pub degrees: Vec<(String, usize, usize)>,
}

impl GraphStats {
	/// Degrees follow the drawn direction of each edge (source out, target in).
	pub fn compute(graph: &GraphData) -> Self {
		let n = graph.nodes.len();
		let e = graph.edges.len();
		let index: HashMap<&str, usize> = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.as_str(), i))
			.collect();

		let (mut ins, mut outs) = (vec![0usize; n], vec![0usize; n]);
		for edge in &graph.edges {
			if let Some(&i) = index.get(edge.source.as_str()) {
				outs[i] += 1;
			}
			if let Some(&i) = index.get(edge.target.as_str()) {
				ins[i] += 1;
			}
		}

		let avg = |v: &[usize]| {
			if n == 0 {
				0.0
			} else {
				v.iter().sum::<usize>() as f64 / n as f64
			}
		};

		Self {
			node_count: n,
			edge_count: e,
			density: if n > 1 {
				e as f64 / (n * (n - 1)) as f64
			} else {
				0.0
			},
			avg_in_degree: avg(&ins),
			avg_out_degree: avg(&outs),
			max_in_degree: ins.iter().copied().max().unwrap_or(0),
			max_out_degree: outs.iter().copied().max().unwrap_or(0),
			degrees: graph
				.nodes
				.iter()
				.enumerate()
				.map(|(i, node)| (node.id.clone(), ins[i], outs[i]))
				.collect(),
		}
	}
}

/// Structural class reported by [`classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphKind {
	/// No nodes.
	Empty,
	/// Connected and acyclic.
	Tree,
	/// Acyclic with several components.
	Forest,
	/// Directed, acyclic, and not a tree or forest.
	Dag,
	/// Contains a cycle.
	Cyclic,
}

impl fmt::Display for GraphKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			GraphKind::Empty => "Empty",
			GraphKind::Tree => "Tree",
			GraphKind::Forest => "Forest",
			GraphKind::Dag => "DAG",
			GraphKind::Cyclic => "Cyclic",
		})
	}
}

/// Classifies by structure. Undirected graphs are trees, forests or cyclic.
/// A directed graph is a tree or forest when its underlying undirected graph
/// has no cycle and no node has more than one parent; any other graph
/// without a directed cycle is a DAG.
pub fn classify(graph: &GraphData) -> GraphKind {
	if graph.nodes.is_empty() {
		return GraphKind::Empty;
	}
	let g = to_petgraph(graph);
	let tree_like = if connected_components(&g) == 1 {
		GraphKind::Tree
	} else {
		GraphKind::Forest
	};

	if !graph.directed {
		return if is_cyclic_undirected(&g) {
			GraphKind::Cyclic
		} else {
			tree_like
		};
	}
	if is_cyclic_directed(&g) {
		return GraphKind::Cyclic;
	}
	let single_parent = g
		.node_indices()
		.all(|n| g.neighbors_directed(n, Direction::Incoming).count() <= 1);
	if single_parent && !is_cyclic_undirected(&g) {
		tree_like
	} else {
		GraphKind::Dag
	}
}

/// Edges with an unknown endpoint are left out.
fn to_petgraph(graph: &GraphData) -> DiGraph<(), ()> {
	let mut g = DiGraph::with_capacity(graph.nodes.len(), graph.edges.len());
	let index: HashMap<&str, NodeIndex> = graph
		.nodes
		.iter()
		.map(|node| (node.id.as_str(), g.add_node(())))
		.collect();
	for edge in &graph.edges {
		if let (Some(&a), Some(&b)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str())) {
			g.add_edge(a, b, ());
		}
	}
	g
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::parse::{parse_adjacency_list, parse_edge_list};

	#[test]
	fn test_stats() {
		let g = parse_edge_list("A B\nA C\nB C", true).unwrap();
		let s = GraphStats::compute(&g);
		assert_eq!(s.node_count, 3);
		assert_eq!(s.edge_count, 3);
		assert!((s.density - 0.5).abs() < 1e-9);
		assert!((s.avg_in_degree - 1.0).abs() < 1e-9);
		assert_eq!(s.max_out_degree, 2);
		assert_eq!(s.max_in_degree, 2);
		assert_eq!(s.degrees[0], ("A".to_string(), 0, 2));
		assert_eq!(s.degrees[2], ("C".to_string(), 2, 0));
	}

	#[test]
	fn test_stats_empty_and_single() {
		assert_eq!(GraphStats::compute(&GraphData::default()), GraphStats::default());
		let g = parse_adjacency_list("A:", false).unwrap();
		let s = GraphStats::compute(&g);
		assert_eq!(s.density, 0.0);
		assert_eq!(s.avg_out_degree, 0.0);
	}

	#[test]
	fn test_classify_undirected() {
		assert_eq!(classify(&GraphData::default()), GraphKind::Empty);
		assert_eq!(classify(&parse_edge_list("A B\nB C", false).unwrap()), GraphKind::Tree);
		assert_eq!(
			classify(&parse_edge_list("A B\nC D", false).unwrap()),
			GraphKind::Forest
		);
		assert_eq!(
			classify(&parse_edge_list("A B\nB C\nC A", false).unwrap()),
			GraphKind::Cyclic
		);
	}

	#[test]
	fn test_classify_directed() {
		assert_eq!(
			classify(&parse_edge_list("A B\nA C\nB D", true).unwrap()),
			GraphKind::Tree
		);
		assert_eq!(
			classify(&parse_edge_list("A B\nA C\nB D\nC D", true).unwrap()),
			GraphKind::Dag
		);
		assert_eq!(
			classify(&parse_edge_list("A B\nB C\nC A", true).unwrap()),
			GraphKind::Cyclic
		);
		assert_eq!(GraphKind::Dag.to_string(), "DAG");
	}

	#[test]
	fn test_classify_directed_shared_child_is_dag() {
		// B has two parents, so the undirected path A-B-C is not a directed tree.
		assert_eq!(
			classify(&parse_edge_list("A B\nC B", true).unwrap()),
			GraphKind::Dag
		);
		assert_eq!(
			classify(&parse_edge_list("A B\nC D\nE D", true).unwrap()),
			GraphKind::Dag
		);
		assert_eq!(
			classify(&parse_edge_list("A B\nC D", true).unwrap()),
			GraphKind::Forest
		);
		let mut looped = parse_edge_list("A B", true).unwrap();
		looped.edges.push(crate::graph::GraphEdge::new("B", "B"));
		assert_eq!(classify(&looped), GraphKind::Cyclic);
	}
}

//! Neighbor lists derived from a graph.

use std::collections::HashMap;

use crate::graph::{GraphEdge, GraphNode};

/// Node id to neighbor ids, neighbors in edge insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Adjacency {
	neighbors: HashMap<String, Vec<String>>,
}

impl Adjacency {
	/// Every node starts with no neighbors; each edge then appends its target
	/// to its source and, unless `directed`, its source to its target.
	/// Edges naming a node missing from `nodes` contribute nothing on that side.
	pub fn build(nodes: &[GraphNode], edges: &[GraphEdge], directed: bool) -> Self {
		let mut adjacency = Self::default();
		for node in nodes {
			adjacency.neighbors.entry(node.id.clone()).or_default();
		}
		for edge in edges {
			adjacency.append(&edge.source, &edge.target);
			if !directed {
				adjacency.append(&edge.target, &edge.source);
			}
		}
		adjacency
	}

	fn append(&mut self, from: &str, to: &str) {
		if let Some(list) = self.neighbors.get_mut(from) {
			list.push(to.to_string());
		}
	}

	/// True for every node passed to [`build`](Self::build).
	pub fn contains(&self, id: &str) -> bool {
		self.neighbors.contains_key(id)
	}

	/// Neighbors of `id`, empty for unknown ids.
	pub fn neighbors(&self, id: &str) -> &[String] {
		self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The stored key equal to `id`, borrowed from the mapping.
	pub(crate) fn key(&self, id: &str) -> Option<&str> {
		self.neighbors.get_key_value(id).map(|(k, _)| k.as_str())
	}

	/// Builds a mapping directly from `(id, neighbors)` entries.
	#[cfg(test)]
	pub(crate) fn from_entries(entries: &[(&str, &[&str])]) -> Self {
		let neighbors = entries
			.iter()
			.map(|&(id, list)| (id.to_string(), list.iter().map(|n| n.to_string()).collect()))
			.collect();
		Self { neighbors }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nodes(ids: &[&str]) -> Vec<GraphNode> {
		ids.iter().map(|id| GraphNode::new(*id, 0.0, 0.0)).collect()
	}

	#[test]
	fn test_undirected_adds_both_directions_in_edge_order() {
		let edges = vec![
			GraphEdge::new("A", "B"),
			GraphEdge::new("C", "A"),
			GraphEdge::new("B", "C"),
		];
		let adj = Adjacency::build(&nodes(&["A", "B", "C", "D"]), &edges, false);
		assert_eq!(adj.neighbors("A"), ["B", "C"]);
		assert_eq!(adj.neighbors("B"), ["A", "C"]);
		assert_eq!(adj.neighbors("C"), ["A", "B"]);
		assert!(adj.neighbors("D").is_empty());
		assert!(adj.contains("D"));
	}

	#[test]
	fn test_directed_only_source_to_target() {
		let edges = vec![GraphEdge::new("A", "B"), GraphEdge::new("C", "A")];
		let adj = Adjacency::build(&nodes(&["A", "B", "C"]), &edges, true);
		assert_eq!(adj.neighbors("A"), ["B"]);
		assert!(adj.neighbors("B").is_empty());
		assert_eq!(adj.neighbors("C"), ["A"]);
	}

	#[test]
	fn test_unknown_endpoints_degrade_to_no_neighbors() {
		let edges = vec![GraphEdge::new("A", "Z"), GraphEdge::new("Y", "A")];
		let adj = Adjacency::build(&nodes(&["A"]), &edges, false);
		assert_eq!(adj.neighbors("A"), ["Z", "Y"]);
		assert!(!adj.contains("Z"));
		assert!(adj.neighbors("Z").is_empty());
		assert!(!adj.contains("Y"));
	}
}

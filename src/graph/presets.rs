//! Small example graphs for trying the traversals.

use super::types::{GraphData, GraphEdge, GraphNode};

/// Ready-made example graphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
	/// A-B-C-D.
	SimplePath,
	/// A five-node ring.
	Cycle,
	/// Seven nodes, three levels.
	BinaryTree,
}

impl Preset {
	/// Every preset, in button order.
	pub const ALL: [Preset; 3] = [Preset::SimplePath, Preset::Cycle, Preset::BinaryTree];

	/// Button label.
	pub fn name(self) -> &'static str {
		match self {
			Preset::SimplePath => "Simple Path",
			Preset::Cycle => "Cycle Graph",
			Preset::BinaryTree => "Binary Tree",
		}
	}

	/// The preset as a graph with the given direction.
	pub fn build(self, directed: bool) -> GraphData {
		let (nodes, edges): (&[(&str, f64, f64)], &[(&str, &str)]) = match self {
			Preset::SimplePath => (
				&[
					("A", 100.0, 100.0),
					("B", 300.0, 100.0),
					("C", 500.0, 100.0),
					("D", 700.0, 100.0),
				],
				&[("A", "B"), ("B", "C"), ("C", "D")],
			),
			Preset::Cycle => (
				&[
					("A", 300.0, 100.0),
					("B", 500.0, 200.0),
					("C", 400.0, 400.0),
					("D", 200.0, 400.0),
					("E", 100.0, 200.0),
				],
				&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"), ("E", "A")],
			),
			Preset::BinaryTree => (
				&[
					("A", 400.0, 50.0),
					("B", 250.0, 150.0),
					("C", 550.0, 150.0),
					("D", 150.0, 250.0),
					("E", 350.0, 250.0),
					("F", 450.0, 250.0),
					("G", 650.0, 250.0),
				],
				&[
					("A", "B"),
					("A", "C"),
					("B", "D"),
					("B", "E"),
					("C", "F"),
					("C", "G"),
				],
			),
		};

		GraphData {
			nodes: nodes
				.iter()
				.map(|&(id, x, y)| GraphNode::new(id, x, y))
				.collect(),
			edges: edges
				.iter()
				.map(|&(s, t)| GraphEdge::new(s, t))
				.collect(),
			directed,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::stats::{GraphKind, classify};

	#[test]
	fn test_presets_have_expected_shape() {
		assert_eq!(classify(&Preset::SimplePath.build(false)), GraphKind::Tree);
		assert_eq!(classify(&Preset::Cycle.build(false)), GraphKind::Cyclic);
		assert_eq!(classify(&Preset::Cycle.build(true)), GraphKind::Cyclic);
		let tree = Preset::BinaryTree.build(true);
		assert_eq!(tree.nodes.len(), 7);
		assert_eq!(classify(&tree), GraphKind::Tree);
	}
}

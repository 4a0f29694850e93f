//! Eager step generation: a whole traversal is computed up front and then
//! replayed by index.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use log::debug;

use super::adjacency::Adjacency;

/// Traversal order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
	/// Breadth-first, with a queue.
	#[default]
	Bfs,
	/// Depth-first, with a stack.
	Dfs,
}

impl Algorithm {
	/// Both algorithms, in menu order.
	pub const ALL: [Algorithm; 2] = [Algorithm::Bfs, Algorithm::Dfs];

	/// Short name, also accepted by `from_str`.
	pub fn label(self) -> &'static str {
		match self {
			Algorithm::Bfs => "BFS",
			Algorithm::Dfs => "DFS",
		}
	}

	/// Name of the frontier structure, as shown next to its contents.
	pub fn frontier_label(self) -> &'static str {
		match self {
			Algorithm::Bfs => "Queue",
			Algorithm::Dfs => "Stack",
		}
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

impl FromStr for Algorithm {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"BFS" => Ok(Algorithm::Bfs),
			"DFS" => Ok(Algorithm::Dfs),
			other => Err(format!("unknown algorithm: {other}")),
		}
	}
}

/// One frame of a traversal animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalStep {
	/// Node visited in this frame.
	pub current_node: String,
	/// Visited nodes in visitation order.
	pub visited_nodes: Vec<String>,
	/// Queue front-to-back (BFS) or stack bottom-to-top (DFS), taken after
	/// `current_node` was removed and before its neighbors were added.
	pub frontier_nodes: Vec<String>,
	/// Position of this frame in its plan.
	pub step_index: usize,
}

/// The immutable step sequence of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraversalPlan {
	algorithm: Algorithm,
	start: String,
	steps: Vec<TraversalStep>,
}

impl TraversalPlan {
	/// Computes every step from `start`. An unknown start yields an empty plan.
	pub fn generate(algorithm: Algorithm, start: &str, adjacency: &Adjacency) -> Self {
		let steps = match adjacency.key(start) {
			Some(start) => match algorithm {
				Algorithm::Bfs => bfs(start, adjacency),
				Algorithm::Dfs => dfs(start, adjacency),
			},
			None => Vec::new(),
		};
		debug!("{algorithm} plan from {start}: {} steps", steps.len());
		Self {
			algorithm,
			start: start.to_string(),
			steps,
		}
	}

	/// Algorithm the plan was generated with.
	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	/// Requested start node, even when unknown.
	pub fn start(&self) -> &str {
		&self.start
	}

	/// Every frame, in order.
	pub fn steps(&self) -> &[TraversalStep] {
		&self.steps
	}

	/// Frame at `index`.
	pub fn get(&self, index: usize) -> Option<&TraversalStep> {
		self.steps.get(index)
	}

	/// Number of frames.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// True when the start node was unknown.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// Node visited at each step.
	pub fn order(&self) -> Vec<&str> {
		self.steps.iter().map(|s| s.current_node.as_str()).collect()
	}
}

fn owned<I>(ids: I) -> Vec<String>
where
	I: IntoIterator,
	I::Item: ToString,
{
	ids.into_iter().map(|id| id.to_string()).collect()
}

fn bfs<'a>(start: &'a str, adjacency: &'a Adjacency) -> Vec<TraversalStep> {
	let mut visited: HashSet<&str> = HashSet::from([start]);
	let mut visit_order = vec![start];
	let mut queue = VecDeque::from([start]);
	let mut steps = Vec::new();

	while let Some(current) = queue.pop_front() {
		steps.push(TraversalStep {
			current_node: current.to_string(),
			visited_nodes: owned(&visit_order),
			frontier_nodes: owned(&queue),
			step_index: steps.len(),
		});
		for neighbor in adjacency.neighbors(current) {
			if visited.insert(neighbor) {
				visit_order.push(neighbor);
				queue.push_back(neighbor);
			}
		}
	}
	steps
}

fn dfs<'a>(start: &'a str, adjacency: &'a Adjacency) -> Vec<TraversalStep> {
	let mut visited: HashSet<&str> = HashSet::new();
	let mut visit_order = Vec::new();
	let mut stack = vec![start];
	let mut steps = Vec::new();

	while let Some(current) = stack.pop() {
		// A node can sit on the stack several times; only its first pop counts.
		if !visited.insert(current) {
			continue;
		}
		visit_order.push(current);
		steps.push(TraversalStep {
			current_node: current.to_string(),
			visited_nodes: owned(&visit_order),
			frontier_nodes: owned(&stack),
			step_index: steps.len(),
		});
		for neighbor in adjacency.neighbors(current).iter().rev() {
			if !visited.contains(neighbor.as_str()) {
				stack.push(neighbor);
			}
		}
	}
	steps
}

//! Traversal planning and playback.
//!
//! A graph is turned into an [`Adjacency`] mapping, the mapping into a
//! [`TraversalPlan`] of discrete steps, and the plan is replayed one step per
//! tick by a [`PlaybackController`].

mod adjacency;
#[cfg(test)]
mod manual;
mod plan;
mod playback;
mod timer;

pub use adjacency::Adjacency;
pub use plan::{Algorithm, TraversalPlan, TraversalStep};
pub use playback::{
	PlaybackController, PlaybackSnapshot, PlaybackStatus, Scheduler, TimerHandle,
};
pub use timer::{IntervalScheduler, IntervalTimer};

#[cfg(test)]
mod proptests {
	use std::collections::{HashMap, HashSet, VecDeque};

	use proptest::prelude::*;

	use super::*;
	use crate::graph::{GraphData, GraphEdge, GraphNode, generate_node_id};

	/// Random simple graphs on up to 10 nodes.
	fn graph_strategy() -> impl Strategy<Value = GraphData> {
		(1usize..10, any::<bool>()).prop_flat_map(|(n, directed)| {
			prop::collection::vec((0..n, 0..n), 0..(n * 2)).prop_map(move |pairs| {
				let mut graph = GraphData::new(directed);
				for i in 0..n {
					graph.nodes.push(GraphNode::at_grid(generate_node_id(i), i));
				}
				for (a, b) in pairs {
					let (a, b) = (generate_node_id(a), generate_node_id(b));
					if a != b && !graph.has_edge_between(&a, &b) {
						graph.edges.push(GraphEdge::new(a, b));
					}
				}
				graph
			})
		})
	}

	fn adjacency(graph: &GraphData) -> Adjacency {
		Adjacency::build(&graph.nodes, &graph.edges, graph.directed)
	}

	/// Hop distance from `start` to every reachable node.
	fn distances(adj: &Adjacency, start: &str) -> HashMap<String, usize> {
		let mut dist = HashMap::from([(start.to_string(), 0)]);
		let mut queue = VecDeque::from([start.to_string()]);
		while let Some(node) = queue.pop_front() {
			let d = dist[&node];
			for next in adj.neighbors(&node) {
				if !dist.contains_key(next) {
					dist.insert(next.clone(), d + 1);
					queue.push_back(next.clone());
				}
			}
		}
		dist
	}

	proptest! {
		#[test]
		fn test_each_reachable_node_visited_once(graph in graph_strategy(), algo in prop::sample::select(Algorithm::ALL.to_vec())) {
			let adj = adjacency(&graph);
			let plan = TraversalPlan::generate(algo, "A", &adj);
			let reachable: HashSet<String> = distances(&adj, "A").into_keys().collect();

			let order = plan.order();
			let unique: HashSet<&str> = order.iter().copied().collect();
			prop_assert_eq!(unique.len(), order.len());
			prop_assert_eq!(order.len(), reachable.len());

			let last = plan.steps().last().unwrap();
			let final_visited: HashSet<String> = last.visited_nodes.iter().cloned().collect();
			prop_assert_eq!(final_visited, reachable);
			for (i, step) in plan.steps().iter().enumerate() {
				prop_assert_eq!(step.step_index, i);
			}
		}

		#[test]
		fn test_generation_is_deterministic(graph in graph_strategy(), algo in prop::sample::select(Algorithm::ALL.to_vec())) {
			let first = TraversalPlan::generate(algo, "A", &adjacency(&graph));
			let second = TraversalPlan::generate(algo, "A", &adjacency(&graph));
			prop_assert_eq!(first, second);
		}

		#[test]
		fn test_bfs_emits_by_nondecreasing_distance(graph in graph_strategy()) {
			let adj = adjacency(&graph);
			let dist = distances(&adj, "A");
			let plan = TraversalPlan::generate(Algorithm::Bfs, "A", &adj);
			let layers: Vec<usize> = plan.order().iter().map(|n| dist[*n]).collect();
			prop_assert!(layers.windows(2).all(|w| w[0] <= w[1]));
		}

		#[test]
		fn test_dfs_steps_extend_a_tree_path(graph in graph_strategy()) {
			// Every node after the first is a neighbor of some node visited
			// before it, and the most recent such node must still have had it
			// as an unvisited neighbor: a preorder of a depth-first tree.
			let adj = adjacency(&graph);
			let plan = TraversalPlan::generate(Algorithm::Dfs, "A", &adj);
			let order = plan.order();
			let mut path: Vec<&str> = Vec::new();
			for (i, node) in order.iter().enumerate() {
				if i == 0 {
					path.push(node);
					continue;
				}
				while let Some(top) = path.last() {
					if adj.neighbors(top).iter().any(|n| n == node) {
						break;
					}
					path.pop();
				}
				prop_assert!(!path.is_empty(), "{} has no visited parent on the DFS path", node);
				// No earlier-listed unvisited neighbor of the parent was skipped.
				let parent = path.last().unwrap();
				let seen: HashSet<&str> = order[..i].iter().copied().collect();
				let first_unvisited = adj
					.neighbors(parent)
					.iter()
					.find(|n| !seen.contains(n.as_str()))
					.map(String::as_str);
				prop_assert_eq!(first_unvisited, Some(*node));
				path.push(node);
			}
		}

		#[test]
		fn test_playback_replays_plan_across_pauses(graph in graph_strategy(), pause_after in 0usize..12) {
			let scheduler = super::manual::ManualScheduler::default();
			let controller = PlaybackController::new(scheduler.clone());
			let tempo = std::time::Duration::from_millis(10);
			controller.start(&graph, Algorithm::Bfs, "A", tempo);
			let plan = controller.plan();

			let mut published = Vec::new();
			for _ in 0..pause_after.min(plan.len()) {
				scheduler.fire();
				published.extend(controller.snapshot().current_node);
			}
			controller.pause();
			scheduler.fire_n(3);
			controller.resume(tempo);
			while controller.status() == PlaybackStatus::Running {
				scheduler.fire();
				published.extend(controller.snapshot().current_node);
			}
			let expected: Vec<String> = plan.order().iter().map(|s| s.to_string()).collect();
			prop_assert_eq!(published, expected);
		}
	}
}

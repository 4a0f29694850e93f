use std::collections::HashSet;

use leptos::prelude::*;

use crate::graph::GraphData;
use crate::traversal::{Algorithm, PlaybackSnapshot};

/// Edges whose endpoints have both been visited.
pub fn traversed_edge_count(graph: &GraphData, visited: &[String]) -> usize {
	let visited: HashSet<&str> = visited.iter().map(String::as_str).collect();
	graph
		.edges
		.iter()
		.filter(|e| visited.contains(e.source.as_str()) && visited.contains(e.target.as_str()))
		.count()
}

fn status_label(snap: &PlaybackSnapshot) -> &'static str {
	if snap.is_running {
		"Running"
	} else if snap.is_paused {
		"Paused"
	} else if snap.total_steps > 0 && snap.step_index == snap.total_steps {
		"Complete"
	} else {
		"Idle"
	}
}

#[component]
pub fn StatusPanel(
	#[prop(into)] playback: Signal<PlaybackSnapshot>,
	#[prop(into)] algorithm: Signal<Algorithm>,
	#[prop(into)] graph: Signal<GraphData>,
) -> impl IntoView {
	let traversed = move || traversed_edge_count(&graph.get(), &playback.get().visited_nodes);

	view! {
		<div class="panel status-panel">
			<h2>"Status"</h2>
			<dl>
				<dt>"Algorithm"</dt>
				<dd>{move || algorithm.get().label()}</dd>
				<dt>"Status"</dt>
				<dd>{move || status_label(&playback.get())}</dd>
				<dt>"Step"</dt>
				<dd>
					{move || {
						let snap = playback.get();
						format!("{} / {}", snap.step_index, snap.total_steps)
					}}
				</dd>
				<dt>"Current node"</dt>
				<dd>{move || playback.get().current_node.unwrap_or_else(|| "-".to_string())}</dd>
				<dt>{move || algorithm.get().frontier_label()}</dt>
				<dd>{move || format!("[{}]", playback.get().frontier_nodes.join(", "))}</dd>
				<dt>"Visited"</dt>
				<dd>{move || playback.get().visited_nodes.join(" → ")}</dd>
				<dt>"Edges traversed"</dt>
				<dd>{traversed}</dd>
			</dl>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::Preset;

	#[test]
	fn test_traversed_edges_need_both_endpoints() {
		let graph = Preset::BinaryTree.build(false);
		let visited: Vec<String> = ["A", "B", "D", "C"].iter().map(|s| s.to_string()).collect();
		// A-B, B-D, A-C
		assert_eq!(traversed_edge_count(&graph, &visited), 3);
		assert_eq!(traversed_edge_count(&graph, &[]), 0);
	}

	#[test]
	fn test_status_label() {
		let mut snap = PlaybackSnapshot::default();
		assert_eq!(status_label(&snap), "Idle");
		snap.total_steps = 3;
		snap.step_index = 3;
		assert_eq!(status_label(&snap), "Complete");
		snap.is_paused = true;
		assert_eq!(status_label(&snap), "Paused");
	}
}

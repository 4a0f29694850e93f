use leptos::prelude::*;
use log::{debug, info, warn};

use crate::components::control_panel::ControlPanel;
use crate::components::download::download;
use crate::components::graph_canvas::GraphCanvas;
use crate::components::input_panel::InputPanel;
use crate::components::notice::{Notice, NoticeBar};
use crate::components::stats_panel::StatsPanel;
use crate::components::status_panel::StatusPanel;
use crate::config::VisualizerConfig;
use crate::graph::{ExportFormat, GraphData, GraphError, History, grid_position};
use crate::traversal::{
	Algorithm, IntervalScheduler, PlaybackController, PlaybackSnapshot, PlaybackStatus,
};

type Controller = PlaybackController<IntervalScheduler>;

/// Handles shared by every edit callback on the page.
#[derive(Clone, Copy)]
struct Workspace {
	graph: RwSignal<GraphData>,
	history: RwSignal<History<GraphData>>,
	controller: StoredValue<Controller, LocalStorage>,
	notice: RwSignal<Option<Notice>>,
}

impl Workspace {
	/// Commits `change` to a copy of the graph, recording the replaced graph
	/// for undo. A rejected change leaves the graph and history untouched and
	/// is reported as a notice; a change that leaves the graph as it was is
	/// not recorded and returns false.
	///
	/// Every committed edit discards the traversal, whose plan names the old
	/// graph's nodes.
	fn edit(
		self,
		label: &str,
		change: impl FnOnce(&mut GraphData) -> Result<(), GraphError>,
	) -> bool {
		let previous = self.graph.get_untracked();
		let mut next = previous.clone();
		if let Err(err) = change(&mut next) {
			warn!("{label} rejected: {err}");
			self.notify(Notice::error(err.to_string()));
			return false;
		}
		let mut changed = false;
		self.history.update(|h| changed = h.record_if_changed(previous, &next));
		if !changed {
			debug!("{label}: nothing changed");
			return false;
		}
		self.graph.set(next);
		self.stop();
		info!("{label}");
		true
	}

	/// Swaps in a graph taken from the undo or redo stack.
	fn restore(self, graph: Option<GraphData>) {
		if let Some(graph) = graph {
			self.stop();
			self.graph.set(graph);
		}
	}

	fn stop(self) {
		self.controller.with_value(|c| c.stop());
	}

	fn notify(self, notice: Notice) {
		self.notice.set(Some(notice));
	}
}

/// The visualizer: graph canvas in the middle, input and statistics on the
/// left, playback controls and status on the right.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<VisualizerConfig>().unwrap_or_default();

	let graph = RwSignal::new(GraphData::new(config.directed));
	let history = RwSignal::new(History::<GraphData>::new(config.history_capacity));
	let algorithm = RwSignal::new(Algorithm::Bfs);
	let start_node = RwSignal::new(String::new());
	let tempo_ms = RwSignal::new(config.default_tempo_ms);
	let playback = RwSignal::new(PlaybackSnapshot::default());
	let notice = RwSignal::new(None::<Notice>);

	let controller = StoredValue::new_local(Controller::new(IntervalScheduler));
	controller.with_value(|c| c.subscribe(move |snap| playback.set(snap.clone())));
	on_cleanup(move || {
		controller.try_with_value(|c| c.stop());
	});

	let tempo = move || config.tempo(tempo_ms.get_untracked());

	let is_active = move || controller.with_value(|c| c.status() != PlaybackStatus::Idle);
	let ws = Workspace {
		graph,
		history,
		controller,
		notice,
	};

	let on_canvas_add = Callback::new(move |(x, y): (f64, f64)| {
		ws.edit("add node", |g| {
			g.add_node(x, y);
			Ok(())
		});
	});

	let on_add_node = Callback::new(move |()| {
		ws.edit("add node", |g| {
			let (x, y) = grid_position(g.nodes.len());
			g.add_node(x, y);
			Ok(())
		});
	});

	let on_select = Callback::new(move |id: String| {
		if is_active() {
			ws.notify(Notice::info("Stop the traversal to change the start node"));
			return;
		}
		ws.notify(Notice::info(format!("Start node set to {id}")));
		start_node.set(id);
	});

	let on_connect = Callback::new(move |(from, to): (String, String)| {
		let label = format!("connect {from} -> {to}");
		if ws.edit(&label, |g| g.connect(&from, &to)) {
			ws.notify(Notice::success(label));
		}
	});

	let on_remove_edge = Callback::new(move |(a, b): (String, String)| {
		if ws.edit(&format!("remove edge {a} - {b}"), |g| g.remove_edge(&a, &b)) {
			ws.notify(Notice::info(format!("Removed edge {a} - {b}")));
		}
	});

	// Positions are layout, not structure: no undo entry, and the traversal
	// keeps running.
	let on_move = Callback::new(move |(id, x, y): (String, f64, f64)| {
		graph.update(|g| {
			if let Err(err) = g.move_node(&id, x, y) {
				warn!("move rejected: {err}");
			}
		});
	});

	let on_delete = Callback::new(move |id: String| {
		if ws.edit(&format!("delete {id}"), |g| g.remove_node(&id)) {
			if start_node.get_untracked() == id {
				start_node.set(String::new());
			}
			ws.notify(Notice::info(format!("Deleted node {id}")));
		}
	});

	let on_rename = Callback::new(move |new_id: String| {
		let old = start_node.get_untracked();
		if ws.edit(&format!("rename {old} to {new_id}"), |g| g.rename_node(&old, &new_id)) {
			start_node.set(new_id);
		}
	});

	let on_load = Callback::new(move |loaded: GraphData| {
		let first = loaded.nodes.first().map(|n| n.id.clone()).unwrap_or_default();
		let summary = format!(
			"Loaded {} nodes and {} edges",
			loaded.nodes.len(),
			loaded.edges.len()
		);
		if ws.edit("load graph", |g| {
			*g = loaded;
			Ok(())
		}) {
			start_node.set(first);
			ws.notify(Notice::success(summary));
		}
	});

	let on_directed = Callback::new(move |directed: bool| {
		let label = if directed {
			"make graph directed"
		} else {
			"make graph undirected"
		};
		ws.edit(label, |g| {
			g.directed = directed;
			Ok(())
		});
	});

	let on_error = Callback::new(move |message: String| {
		warn!("input rejected: {message}");
		ws.notify(Notice::error(message));
	});

	let on_undo = Callback::new(move |()| {
		let mut restored = None;
		history.update(|h| restored = h.undo(graph.get_untracked()));
		ws.restore(restored);
	});

	let on_redo = Callback::new(move |()| {
		let mut restored = None;
		history.update(|h| restored = h.redo(graph.get_untracked()));
		ws.restore(restored);
	});

	let start_tempo = tempo.clone();
	let on_start = Callback::new(move |()| {
		let start = start_node.get_untracked();
		if !graph.with_untracked(|g| g.contains(&start)) {
			ws.notify(Notice::error("Pick a start node first"));
			return;
		}
		let algo = algorithm.get_untracked();
		graph.with_untracked(|g| controller.with_value(|c| c.start(g, algo, &start, start_tempo())));
		ws.notify(Notice::success(format!(
			"{algo} traversal started from node {start}"
		)));
	});

	let on_pause = Callback::new(move |()| {
		if controller.with_value(|c| c.pause()) {
			ws.notify(Notice::info("Traversal paused"));
		}
	});

	let resume_tempo = tempo.clone();
	let on_resume = Callback::new(move |()| controller.with_value(|c| c.resume(resume_tempo())));

	// Applied when the slider is released, not on every step of a drag.
	let on_retime = Callback::new(move |()| {
		controller.with_value(|c| c.set_tempo(tempo()));
	});

	let on_stop = Callback::new(move |()| {
		ws.stop();
		ws.notify(Notice::info("Traversal stopped"));
	});

	let on_reset = Callback::new(move |()| {
		controller.with_value(|c| c.reset());
		if ws.edit("reset graph", |g| {
			g.clear();
			Ok(())
		}) {
			start_node.set(String::new());
			ws.notify(Notice::success("Graph reset"));
		}
	});

	let on_export = Callback::new(move |format: ExportFormat| {
		let rendered = graph.with_untracked(|g| format.render(g));
		let result = match rendered {
			Ok(text) => download(format.file_name(), format.mime_type(), &text)
				.map_err(|err| format!("{err:?}")),
			Err(err) => Err(err.to_string()),
		};
		match result {
			Ok(()) => info!("exported {}", format.file_name()),
			Err(err) => {
				warn!("export failed: {err}");
				ws.notify(Notice::error(format!("Export failed: {err}")));
			}
		}
	});

	let node_ids = Signal::derive(move || graph.with(|g| g.node_ids()));
	let directed = Signal::derive(move || graph.with(|g| g.directed));
	let can_undo = Signal::derive(move || history.with(|h| h.can_undo()));
	let can_redo = Signal::derive(move || history.with(|h| h.can_redo()));

	view! {
		<div class="app">
			<header class="app-header">
				<h1>"Graph Traversal Visualizer"</h1>
				<p class="subtitle">
					"Double-click to add a node. Shift-click two nodes to connect them. Click a node to start from it. Right-click a node or edge to delete it."
				</p>
			</header>
			<NoticeBar notice=notice />
			<main class="layout">
				<aside class="sidebar">
					<InputPanel
						directed=directed
						on_directed=on_directed
						on_load=on_load
						on_error=on_error
					/>
					<StatsPanel graph=graph />
				</aside>
				<section class="stage">
					<GraphCanvas
						graph=graph
						playback=playback
						start_node=start_node
						on_add_node=on_canvas_add
						on_select=on_select
						on_connect=on_connect
						on_delete=on_delete
						on_remove_edge=on_remove_edge
						on_move=on_move
					/>
				</section>
				<aside class="sidebar">
					<ControlPanel
						node_ids=node_ids
						algorithm=algorithm
						start_node=start_node
						tempo_ms=tempo_ms
						playback=playback
						can_undo=can_undo
						can_redo=can_redo
						on_start=on_start
						on_pause=on_pause
						on_resume=on_resume
						on_retime=on_retime
						on_stop=on_stop
						on_reset=on_reset
						on_add_node=on_add_node
						on_rename=on_rename
						on_undo=on_undo
						on_redo=on_redo
						on_export=on_export
					/>
					<StatusPanel playback=playback algorithm=algorithm graph=graph />
				</aside>
			</main>
		</div>
	}
}

use leptos::prelude::*;

use crate::config::VisualizerConfig;
use crate::graph::ExportFormat;
use crate::traversal::{Algorithm, PlaybackSnapshot};

/// Algorithm and start-node selection, tempo, playback buttons and graph
/// editing shortcuts.
///
/// Dragging the tempo slider only updates `tempo_ms`; `on_retime` fires once
/// the slider is released.
#[component]
pub fn ControlPanel(
	#[prop(into)] node_ids: Signal<Vec<String>>,
	algorithm: RwSignal<Algorithm>,
	start_node: RwSignal<String>,
	tempo_ms: RwSignal<u32>,
	#[prop(into)] playback: Signal<PlaybackSnapshot>,
	#[prop(into)] can_undo: Signal<bool>,
	#[prop(into)] can_redo: Signal<bool>,
	#[prop(into)] on_start: Callback<()>,
	#[prop(into)] on_pause: Callback<()>,
	#[prop(into)] on_resume: Callback<()>,
	#[prop(into)] on_retime: Callback<()>,
	#[prop(into)] on_stop: Callback<()>,
	#[prop(into)] on_reset: Callback<()>,
	#[prop(into)] on_add_node: Callback<()>,
	#[prop(into)] on_rename: Callback<String>,
	#[prop(into)] on_undo: Callback<()>,
	#[prop(into)] on_redo: Callback<()>,
	#[prop(into)] on_export: Callback<ExportFormat>,
) -> impl IntoView {
	let config = use_context::<VisualizerConfig>().unwrap_or_default();
	let active = move || {
		let snap = playback.get();
		snap.is_running || snap.is_paused
	};
	let rename_to = RwSignal::new(String::new());
	let (min_tempo, max_tempo, tempo_step) = (
		config.min_tempo_ms.to_string(),
		config.max_tempo_ms.to_string(),
		config.tempo_step_ms.to_string(),
	);

	let algorithm_options = Algorithm::ALL
		.into_iter()
		.map(|a| {
			view! {
				<option value=a.to_string() selected=move || algorithm.get() == a>
					{a.label()}
				</option>
			}
		})
		.collect_view();

	let export_buttons = ExportFormat::ALL
		.into_iter()
		.map(|format| {
			view! {
				<button class="btn btn-secondary" on:click=move |_| on_export.run(format)>
					{format.label()}
				</button>
			}
		})
		.collect_view();

	let playback_buttons = move || {
		let snap = playback.get();
		if snap.is_running {
			view! {
				<button class="btn btn-primary" on:click=move |_| on_pause.run(())>
					"Pause"
				</button>
			}
			.into_any()
		} else if snap.is_paused {
			view! {
				<button class="btn btn-primary" on:click=move |_| on_resume.run(())>
					"Resume"
				</button>
			}
			.into_any()
		} else {
			view! {
				<button
					class="btn btn-primary"
					disabled=move || start_node.get().is_empty()
					on:click=move |_| on_start.run(())
				>
					"Start"
				</button>
			}
			.into_any()
		}
	};

	view! {
		<div class="panel control-panel">
			<h2>"Controls"</h2>

			<label>
				"Algorithm"
				<select
					disabled=active
					on:change=move |ev| {
						if let Ok(a) = event_target_value(&ev).parse::<Algorithm>() {
							algorithm.set(a);
						}
					}
				>
					{algorithm_options}
				</select>
			</label>

			<label>
				"Start node"
				<select
					disabled=active
					prop:value=move || start_node.get()
					on:change=move |ev| start_node.set(event_target_value(&ev))
				>
					<option value="">"Select a node"</option>
					{move || {
						node_ids
							.get()
							.into_iter()
							.map(|id| view! { <option value=id.clone()>{id.clone()}</option> })
							.collect_view()
					}}
				</select>
			</label>

			<label>
				{move || format!("Step interval: {} ms", tempo_ms.get())}
				<input
					type="range"
					min=min_tempo
					max=max_tempo
					step=tempo_step
					prop:value=move || tempo_ms.get().to_string()
					on:input=move |ev| {
						if let Ok(ms) = event_target_value(&ev).parse::<u32>() {
							tempo_ms.set(config.clamp_tempo(ms));
						}
					}
					on:change=move |_| on_retime.run(())
				/>
			</label>

			<div class="button-row">
				{playback_buttons}
				<button class="btn" disabled=move || !active() on:click=move |_| on_stop.run(())>
					"Stop"
				</button>
				<button class="btn btn-danger" on:click=move |_| on_reset.run(())>
					"Reset"
				</button>
			</div>

			<h3>"Edit"</h3>
			<div class="button-row">
				<button class="btn" disabled=active on:click=move |_| on_add_node.run(())>
					"Add node"
				</button>
				<button class="btn" disabled=move || !can_undo.get() on:click=move |_| on_undo.run(())>
					"Undo"
				</button>
				<button class="btn" disabled=move || !can_redo.get() on:click=move |_| on_redo.run(())>
					"Redo"
				</button>
			</div>
			<div class="button-row">
				<input
					type="text"
					placeholder="New name for start node"
					prop:value=move || rename_to.get()
					on:input=move |ev| rename_to.set(event_target_value(&ev))
				/>
				<button
					class="btn"
					disabled=move || active() || start_node.get().is_empty() || rename_to.get().trim().is_empty()
					on:click=move |_| {
						on_rename.run(rename_to.get_untracked().trim().to_string());
						rename_to.set(String::new());
					}
				>
					"Rename"
				</button>
			</div>

			<h3>"Export"</h3>
			<div class="button-row">{export_buttons}</div>
		</div>
	}
}

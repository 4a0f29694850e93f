use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use crate::graph::{GraphData, InputFormat, Preset};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Text(InputFormat),
	File,
}

/// Builds graphs from typed text, uploaded files or presets.
///
/// Parsed graphs are handed to `on_load`; parse failures go to `on_error`
/// and leave the current graph untouched.
#[component]
pub fn InputPanel(
	#[prop(into)] directed: Signal<bool>,
	#[prop(into)] on_directed: Callback<bool>,
	#[prop(into)] on_load: Callback<GraphData>,
	#[prop(into)] on_error: Callback<String>,
) -> impl IntoView {
	let tab = RwSignal::new(Tab::Text(InputFormat::default()));
	let text = RwSignal::new(String::new());

	let generate = move |_: leptos::ev::MouseEvent| {
		let Tab::Text(format) = tab.get_untracked() else {
			return;
		};
		match format.parse(&text.get_untracked(), directed.get_untracked()) {
			Ok(graph) => {
				info!(
					"parsed {} nodes and {} edges from {}",
					graph.nodes.len(),
					graph.edges.len(),
					format.label()
				);
				on_load.run(graph);
			}
			Err(err) => on_error.run(err.to_string()),
		}
	};

	let on_file = move |ev: leptos::ev::Event| {
		let input = event_target::<HtmlInputElement>(&ev);
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		// Let the same file be picked again.
		input.set_value("");
		let name = file.name();
		let format = InputFormat::from_file_name(&name);
		let directed = directed.get_untracked();
		spawn_local(async move {
			let contents = match JsFuture::from(file.text()).await {
				Ok(value) => value.as_string().unwrap_or_default(),
				Err(err) => {
					warn!("reading {name} failed: {err:?}");
					on_error.run(format!("Could not read {name}"));
					return;
				}
			};
			match format.parse(&contents, directed) {
				Ok(graph) => {
					info!("loaded {name} as {}", format.label());
					on_load.run(graph);
				}
				Err(err) => on_error.run(format!("{name}: {err}")),
			}
		});
	};

	let tabs = InputFormat::ALL
		.into_iter()
		.map(Tab::Text)
		.chain([Tab::File])
		.map(|t| {
			let label = match t {
				Tab::Text(format) => format.label(),
				Tab::File => "File",
			};
			view! {
				<button
					class="tab"
					class:active=move || tab.get() == t
					on:click=move |_| tab.set(t)
				>
					{label}
				</button>
			}
		})
		.collect_view();

	let presets = Preset::ALL
		.into_iter()
		.map(|preset| {
			view! {
				<button
					class="btn btn-secondary"
					on:click=move |_| on_load.run(preset.build(directed.get_untracked()))
				>
					{preset.name()}
				</button>
			}
		})
		.collect_view();

	let body = move || match tab.get() {
		Tab::Text(format) => view! {
			<textarea
				rows="8"
				placeholder=format.placeholder()
				prop:value=move || text.get()
				on:input=move |ev| text.set(event_target_value(&ev))
			/>
			<button class="btn btn-primary" on:click=generate>
				"Generate graph"
			</button>
		}
		.into_any(),
		Tab::File => view! {
			<p class="hint">"Edge lists, adjacency lists (.txt), matrices (.csv) or JSON."</p>
			<input type="file" accept=".txt,.csv,.json" on:change=on_file />
		}
		.into_any(),
	};

	view! {
		<div class="panel input-panel">
			<h2>"Input"</h2>
			<label class="toggle">
				<input
					type="checkbox"
					prop:checked=move || directed.get()
					on:change=move |ev| on_directed.run(event_target_checked(&ev))
				/>
				"Directed"
			</label>
			<div class="tabs">{tabs}</div>
			{body}
			<h3>"Examples"</h3>
			<div class="button-row">{presets}</div>
		</div>
	}
}

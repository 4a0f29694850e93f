use leptos::prelude::*;

use crate::graph::{GraphData, GraphStats, classify};

#[component]
pub fn StatsPanel(#[prop(into)] graph: Signal<GraphData>) -> impl IntoView {
	let stats = Memo::new(move |_| GraphStats::compute(&graph.get()));
	let kind = Memo::new(move |_| classify(&graph.get()));

	view! {
		<div class="panel stats-panel">
			<h2>"Graph statistics"</h2>
			<dl>
				<dt>"Type"</dt>
				<dd>{move || kind.get().to_string()}</dd>
				<dt>"Nodes"</dt>
				<dd>{move || stats.with(|s| s.node_count)}</dd>
				<dt>"Edges"</dt>
				<dd>{move || stats.with(|s| s.edge_count)}</dd>
				<dt>"Density"</dt>
				<dd>{move || stats.with(|s| format!("{:.3}", s.density))}</dd>
				<dt>"Avg in / out degree"</dt>
				<dd>
					{move || stats.with(|s| format!("{:.2} / {:.2}", s.avg_in_degree, s.avg_out_degree))}
				</dd>
				<dt>"Max in / out degree"</dt>
				<dd>{move || stats.with(|s| format!("{} / {}", s.max_in_degree, s.max_out_degree))}</dd>
			</dl>
			<table class="degree-table">
				<thead>
					<tr>
						<th>"Node"</th>
						<th>"In"</th>
						<th>"Out"</th>
					</tr>
				</thead>
				<tbody>
					{move || {
						stats
							.with(|s| s.degrees.clone())
							.into_iter()
							.map(|(id, din, dout)| {
								view! {
									<tr>
										<td>{id}</td>
										<td>{din}</td>
										<td>{dout}</td>
									</tr>
								}
							})
							.collect_view()
					}}
				</tbody>
			</table>
		</div>
	}
}

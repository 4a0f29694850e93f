use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::CanvasState;
use crate::graph::GraphData;
use crate::traversal::PlaybackSnapshot;

/// Pointer travel, in pixels, below which a press-release counts as a click.
const CLICK_SLOP: f64 = 3.0;

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed drawing of the graph with the traversal frame overlaid.
///
/// Double-click empty space to add a node, click a node to pick it as the
/// start node, shift-click two nodes to connect them, right-click a node or
/// an edge to delete it. Dropping a dragged node reports its new position
/// through `on_move`.
#[component]
pub fn GraphCanvas(
	#[prop(into)] graph: Signal<GraphData>,
	#[prop(into)] playback: Signal<PlaybackSnapshot>,
	#[prop(into)] start_node: Signal<String>,
	#[prop(into)] on_add_node: Callback<(f64, f64)>,
	#[prop(into)] on_select: Callback<String>,
	#[prop(into)] on_connect: Callback<(String, String)>,
	#[prop(into)] on_delete: Callback<String>,
	#[prop(into)] on_remove_edge: Callback<(String, String)>,
	#[prop(into)] on_move: Callback<(String, f64, f64)>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));
	let (state_init, animate_init, alive_init) = (state.clone(), animate.clone(), alive.clone());

	on_cleanup(move || alive.store(false, Ordering::Relaxed));

	Effect::new(move |_| {
		let data = graph.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if let Some(s) = state_init.borrow_mut().as_mut() {
			s.sync(&data);
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.filter(|h| *h > 0.0)
					.unwrap_or(600.0)
			}),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context");
			return;
		};

		let mut initial = CanvasState::new(&data, w, h);
		initial.set_overlay(&playback.get_untracked());
		let start = start_node.get_untracked();
		initial.start_node = (!start.is_empty()).then_some(start);
		*state_init.borrow_mut() = Some(initial);

		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(win)) = (animate_init.borrow().as_ref(), web_sys::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_overlay = state.clone();
	Effect::new(move |_| {
		let snapshot = playback.get();
		let start = start_node.get();
		if let Some(s) = state_overlay.borrow_mut().as_mut() {
			s.set_overlay(&snapshot);
			s.start_node = (!start.is_empty()).then_some(start);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let link = {
			let mut guard = state_md.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let hit = s.node_at_position(x, y);
			let mut link = None;
			if ev.shift_key() {
				if let Some(id) = hit.and_then(|idx| s.node_id(idx)) {
					match s.link_source.take() {
						Some(source) if source != id => link = Some((source, id)),
						Some(_) => {}
						None => s.link_source = Some(id),
					}
				}
			} else if let Some(idx) = hit {
				s.drag.active = true;
				s.drag.moved = false;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.link_source = None;
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
			link
		};
		if let Some(pair) = link {
			on_connect.run(pair);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let mut guard = state_mm.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		if !s.drag.active {
			s.hover = s.node_at_position(x, y);
		}

		if s.drag.active {
			let (px, py) = (x - s.drag.start_x, y - s.drag.start_y);
			if !s.drag.moved && (px * px + py * py).sqrt() < CLICK_SLOP {
				return;
			}
			s.drag.moved = true;
			if let Some(idx) = s.drag.node_idx {
				let (dx, dy) = (px / s.transform.k, py / s.transform.k);
				let (nx, ny) = (
					s.drag.node_start_x + dx as f32,
					s.drag.node_start_y + dy as f32,
				);
				s.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if s.pan.active {
			s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
			s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let (clicked, dropped) = {
			let mut guard = state_mu.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let (mut clicked, mut dropped) = (None, None);
			if let (true, Some(idx)) = (s.drag.active, s.drag.node_idx) {
				if s.drag.moved {
					dropped = s.node_id(idx).zip(s.node_position(idx));
				} else {
					clicked = s.node_id(idx);
				}
			}
			s.drag = Default::default();
			s.pan.active = false;
			(clicked, dropped)
		};
		if let Some(id) = clicked {
			on_select.run(id);
		}
		if let Some((id, (x, y))) = dropped {
			on_move.run((id, x, y));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag = Default::default();
			s.pan.active = false;
			s.hover = None;
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let position = match *state_dc.borrow() {
			Some(ref s) if s.node_at_position(x, y).is_none() => Some(s.screen_to_graph(x, y)),
			_ => None,
		};
		if let Some(position) = position {
			on_add_node.run(position);
		}
	};

	let state_cm = state.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		// Nodes win over the edges drawn underneath them.
		let (node, edge) = match *state_cm.borrow() {
			Some(ref s) => match s.node_at_position(x, y) {
				Some(idx) => (s.node_id(idx), None),
				None => (None, s.edge_at_position(x, y)),
			},
			None => (None, None),
		};
		if let Some(id) = node {
			on_delete.run(id);
		} else if let Some(pair) = edge {
			on_remove_edge.run(pair);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:contextmenu=on_contextmenu
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, NODE_RADIUS, NodeRole};

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let (a, b) = (&n1.data.user_data.id, &n2.data.user_data.id);
		let traversed = state.is_traversed(a, b);
		let hovered = state.hover.is_some_and(|h| h == n1.index() || h == n2.index());
		let directed = state.is_directed_edge(n1.index(), n2.index());

		let (alpha, width, color) = if traversed {
			(0.9, line_width * 1.6, "34, 197, 94")
		} else if hovered {
			(0.9, line_width * 1.3, "100, 180, 255")
		} else {
			(0.55, line_width, "100, 180, 255")
		};

		ctx.set_stroke_style_str(&format!("rgba({color}, {alpha})"));
		ctx.set_line_width(width);
		if traversed {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		let tail = if directed { NODE_RADIUS + arrow_size } else { NODE_RADIUS };
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(x2 - ux * tail, y2 - uy * tail);
		ctx.stroke();

		if !directed {
			return;
		}
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba({color}, {alpha})"));
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	// Pulse for the node being processed.
	let pulse = 0.5 + 0.5 * (state.flow_time * 6.0).sin();

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let role = state.role(&info.id);
		let emphasized = state.hover == Some(idx) || state.is_neighbor_of_hover(idx);
		let radius = if emphasized {
			NODE_RADIUS * 1.15
		} else {
			NODE_RADIUS
		};

		if role == NodeRole::Current {
			let glow_radius = NODE_RADIUS * (1.8 + 0.6 * pulse);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius)
			{
				let _ = gradient.add_color_stop(0.0, "rgba(245, 158, 11, 0.55)");
				let _ = gradient.add_color_stop(0.6, "rgba(245, 158, 11, 0.18)");
				let _ = gradient.add_color_stop(1.0, "rgba(245, 158, 11, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(role.color());
		ctx.fill();

		let ring = if state.link_source.as_deref() == Some(info.id.as_str()) {
			Some("rgba(255, 255, 255, 0.95)")
		} else if state.start_node.as_deref() == Some(info.id.as_str()) {
			Some("rgba(245, 158, 11, 0.9)")
		} else {
			None
		};
		if let Some(ring) = ring {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 3.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(ring);
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_font(&format!("bold {}px sans-serif", 12.0 / k.max(0.5)));
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&info.label, x, y);
	});
}

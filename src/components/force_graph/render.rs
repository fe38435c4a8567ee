//! Canvas painting for the force graph.
//!
//! Draws the background in screen space, then the scene's layers in world
//! space under the view transform: edges, edge labels, nodes. Suppressed
//! elements are drawn with the theme's suppressed opacity.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::highlight::VisualState;
use super::interaction::ViewTransform;
use super::scene::{EdgeLabelVisual, EdgeVisual, Layer, NodeVisual, Scene};
use super::theme::Theme;

/// Renders the complete scene to the canvas.
pub fn render(
	scene: &Scene,
	transform: &ViewTransform,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	size: (f64, f64),
	node_radius: f64,
) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, size.0, size.1);

	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);

	for layer in scene.layers() {
		match layer {
			Layer::Edge(edge) => draw_edge(ctx, theme, edge),
			Layer::EdgeLabel(label) => draw_edge_label(ctx, theme, label),
			Layer::Node(node) => draw_node(ctx, theme, node, node_radius),
		}
	}

	ctx.restore();
	ctx.set_global_alpha(1.0);
}

fn opacity(theme: &Theme, state: VisualState) -> f64 {
	match state {
		VisualState::Normal => 1.0,
		VisualState::Suppressed => theme.suppressed_opacity,
	}
}

fn draw_edge(ctx: &CanvasRenderingContext2d, theme: &Theme, edge: &EdgeVisual) {
	ctx.set_global_alpha(opacity(theme, edge.state));
	ctx.set_stroke_style_str(&theme.edge.to_css());
	ctx.set_line_width(theme.edge_width);

	if edge.dashed {
		let (dash, gap) = theme.sentinel_dash;
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
	}

	ctx.begin_path();
	ctx.move_to(edge.x1, edge.y1);
	ctx.line_to(edge.x2, edge.y2);
	ctx.stroke();

	if edge.dashed {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}

fn draw_edge_label(ctx: &CanvasRenderingContext2d, theme: &Theme, label: &EdgeLabelVisual) {
	if label.text.is_empty() {
		return;
	}
	ctx.set_global_alpha(opacity(theme, label.state));
	ctx.set_fill_style_str(&theme.edge_label.to_css());
	ctx.set_font(theme.edge_label_font);
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&label.text, label.x, label.y);
}

fn draw_node(ctx: &CanvasRenderingContext2d, theme: &Theme, node: &NodeVisual, radius: f64) {
	let (x, y) = (node.x, node.y);
	ctx.set_global_alpha(opacity(theme, node.state));

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	if theme.node_gradient {
		match ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius) {
			Ok(gradient) => {
				let _ = gradient.add_color_stop(0.0, &node.fill.lighten(0.4).to_css());
				let _ = gradient.add_color_stop(0.7, &node.fill.to_css());
				let _ = gradient.add_color_stop(1.0, &node.fill.darken(0.2).to_css());
				ctx.set_fill_style_canvas_gradient(&gradient);
			}
			Err(_) => ctx.set_fill_style_str(&node.fill.to_css()),
		}
	} else {
		ctx.set_fill_style_str(&node.fill.to_css());
	}
	ctx.fill();

	if theme.node_border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node_border.to_css());
		ctx.set_line_width(theme.node_border_width);
		ctx.stroke();
	}

	ctx.set_global_alpha(opacity(theme, node.label_state));
	ctx.set_fill_style_str(&theme.node_label.to_css());
	ctx.set_font(theme.label_font);
	ctx.set_text_align("left");
	let _ = ctx.fill_text(&node.label, x + radius + 4.0, y + 4.0);
}

//! Pointer interaction: node dragging, viewport pan/zoom and the tooltip.
//!
//! [`Interaction`] turns raw pointer input (screen coordinates relative to
//! the canvas) into pin/unpin requests on the [`Simulation`], updates to the
//! [`ViewTransform`], tooltip contents, and [`Click`]s for the highlight
//! state machine. It never writes node positions itself.

use log::debug;
use serde_json::Value;

use super::config::{GraphConfig, TooltipConfig};
use super::simulation::Simulation;
use super::types::{NodeId, SimNode};

/// Zoom factor applied per wheel notch.
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Translate + uniform scale applied to the whole scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Sets the scale keeping the screen point `(sx, sy)` fixed. Non-finite
	/// or non-positive scales are ignored.
	pub fn zoom_to(&mut self, new_k: f64, sx: f64, sy: f64) {
		if !new_k.is_finite() || new_k <= 0.0 {
			return;
		}
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// Tracks an in-progress background pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Floating attribute panel for the hovered node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
	pub visible: bool,
	pub node: Option<NodeId>,
	/// Panel position, in the same coordinates as the pointer.
	pub x: f64,
	pub y: f64,
	pub rows: Vec<(String, String)>,
}

/// Result of a press/release that did not move past the click tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Click {
	Node(NodeId),
	Background,
}

/// Lists a node's displayable attributes: every serialized field except the
/// ones `config` marks hidden.
pub fn tooltip_rows(node: &SimNode, config: &TooltipConfig) -> Vec<(String, String)> {
	let Ok(Value::Object(fields)) = serde_json::to_value(node) else {
		return Vec::new();
	};
	fields
		.into_iter()
		.filter(|(key, _)| !config.is_hidden(key))
		.map(|(key, value)| {
			let text = match value {
				Value::String(s) => s,
				other => other.to_string(),
			};
			(key, text)
		})
		.collect()
}

/// Pointer state machine for one mounted graph.
#[derive(Clone, Debug)]
pub struct Interaction {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub tooltip: TooltipState,
	press: Option<(f64, f64)>,
	moved: bool,
	config: GraphConfig,
}

impl Interaction {
	pub fn new(config: &GraphConfig) -> Self {
		Self {
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			tooltip: TooltipState::default(),
			press: None,
			moved: false,
			config: config.clone().sanitized(),
		}
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.node.is_some()
	}

	/// Pointer pressed over `hit` (or the background when `None`).
	///
	/// Pressing a node pins it where it is and wakes the engine.
	pub fn press(&mut self, sim: &mut Simulation, hit: Option<NodeId>, sx: f64, sy: f64) {
		self.press = Some((sx, sy));
		self.moved = false;

		let node = hit.and_then(|id| sim.node(id)).map(|n| (n.id, n.x, n.y));
		if let Some((id, x, y)) = node {
			self.drag = DragState {
				node: Some(id),
				start_x: sx,
				start_y: sy,
				node_start_x: x,
				node_start_y: y,
			};
			sim.pin(id, x, y);
			sim.reheat(self.config.alpha_target_dragging);
			debug!("force-network: drag start on node {}", id);
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	/// Pointer moved. Drags follow the pointer, pans shift the viewport.
	pub fn motion(&mut self, sim: &mut Simulation, sx: f64, sy: f64) {
		if let Some((px, py)) = self.press {
			let travel = ((sx - px).powi(2) + (sy - py).powi(2)).sqrt();
			if travel > self.config.click_tolerance {
				self.moved = true;
			}
		}

		if let Some(id) = self.drag.node {
			let dx = (sx - self.drag.start_x) / self.transform.k;
			let dy = (sy - self.drag.start_y) / self.transform.k;
			sim.pin(id, self.drag.node_start_x + dx, self.drag.node_start_y + dy);
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Pointer released. Ends any drag (unpinning the node) or pan and
	/// reports a click when the pointer stayed put.
	pub fn release(&mut self, sim: &mut Simulation, hit: Option<NodeId>) -> Option<Click> {
		let dragged = self.drag.node;
		self.end_gestures(sim);

		let pressed = self.press.take().is_some();
		if !pressed || self.moved {
			return None;
		}
		Some(match dragged.or(hit) {
			Some(id) => Click::Node(id),
			None => Click::Background,
		})
	}

	/// Pointer left the canvas: cancel gestures and hide the tooltip.
	pub fn leave(&mut self, sim: &mut Simulation) {
		self.end_gestures(sim);
		self.press = None;
		self.hide_tooltip();
	}

	fn end_gestures(&mut self, sim: &mut Simulation) {
		if let Some(id) = self.drag.node.take() {
			sim.unpin(id);
			sim.set_alpha_target(0.0);
			sim.set_alpha_floor(self.config.alpha_floor_dragging);
			debug!("force-network: drag end on node {}", id);
		}
		self.pan.active = false;
	}

	/// Wheel zoom anchored at the pointer.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
		self.zoom_to(self.transform.k * factor, sx, sy);
	}

	/// Requests an absolute scale; out-of-range values land on the bound.
	pub fn zoom_to(&mut self, k: f64, sx: f64, sy: f64) {
		if !k.is_finite() {
			return;
		}
		let k = self.config.clamp_zoom(k);
		self.transform.zoom_to(k, sx, sy);
	}

	/// Updates the tooltip for the node under the pointer (`None` hides it).
	pub fn hover(&mut self, node: Option<&SimNode>, sx: f64, sy: f64) {
		let Some(node) = node else {
			self.hide_tooltip();
			return;
		};
		if self.tooltip.node != Some(node.id) {
			self.tooltip.rows = tooltip_rows(node, &self.config.tooltip);
			self.tooltip.node = Some(node.id);
		}
		self.tooltip.visible = true;
		self.tooltip.x = sx + self.config.tooltip.offset_x;
		self.tooltip.y = sy + self.config.tooltip.offset_y;
	}

	pub fn hide_tooltip(&mut self) {
		self.tooltip.visible = false;
		self.tooltip.node = None;
	}
}

//! Explicit configuration for layout, viewport and interaction.
//!
//! Every field has a default so hosts can supply a partial JSON object
//! (camelCase keys), e.g. `{"width": 800, "chargeStrength": -250}`.

use log::warn;
use serde::Deserialize;

/// What to do with an edge whose source or target matches no node.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DanglingEdgePolicy {
	/// Leave the edge out and log a warning.
	#[default]
	Drop,
	/// Attach the missing end to a single, visible placeholder node.
	Sentinel,
	/// Reject the whole graph.
	Fail,
}

/// Built-in color themes.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	#[default]
	Light,
	Dark,
}

/// Tooltip content and placement.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipConfig {
	/// Serialized node fields never shown (simulation-only state).
	pub hidden_fields: Vec<String>,
	/// Panel offset from the pointer, in screen pixels.
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Default for TooltipConfig {
	fn default() -> Self {
		Self {
			hidden_fields: ["index", "x", "y", "vx", "vy", "fx", "fy"]
				.into_iter()
				.map(String::from)
				.collect(),
			offset_x: 20.0,
			offset_y: -60.0,
		}
	}
}

impl TooltipConfig {
	pub fn is_hidden(&self, field: &str) -> bool {
		self.hidden_fields.iter().any(|f| f == field)
	}
}

/// Complete graph view configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
	/// Canvas size in pixels. The centering force targets its midpoint.
	pub width: f64,
	pub height: f64,
	/// Node circle radius in graph units, also the hit radius.
	pub node_radius: f64,
	/// Rest length of the link spring.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Centering strength (1.0 recenters fully every tick).
	pub center_strength: f64,
	/// Zoom scale bounds.
	pub zoom_min: f64,
	pub zoom_max: f64,
	/// Stepping stops once alpha falls below this after a load.
	pub alpha_floor_idle: f64,
	/// Stepping floor applied once a drag ends.
	pub alpha_floor_dragging: f64,
	/// Alpha the engine is held at while a node is dragged.
	pub alpha_target_dragging: f64,
	/// Per-tick alpha decay rate.
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Max pointer travel (pixels) for a press/release to count as a click.
	pub click_tolerance: f64,
	pub dangling_edges: DanglingEdgePolicy,
	pub tooltip: TooltipConfig,
	pub theme: ThemeName,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			width: 1200.0,
			height: 800.0,
			node_radius: 20.0,
			link_distance: 200.0,
			charge_strength: -400.0,
			center_strength: 1.0,
			zoom_min: 0.1,
			zoom_max: 10.0,
			alpha_floor_idle: 0.02,
			alpha_floor_dragging: 0.2,
			alpha_target_dragging: 0.9,
			// Reaches the d3 default floor of 0.001 in 300 ticks.
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			click_tolerance: 3.0,
			dangling_edges: DanglingEdgePolicy::Drop,
			tooltip: TooltipConfig::default(),
			theme: ThemeName::Light,
		}
	}
}

impl GraphConfig {
	pub fn from_json(json: &str) -> Result<Self, super::error::GraphError> {
		let config: Self = serde_json::from_str(json)?;
		Ok(config.sanitized())
	}

	/// Replaces unusable zoom bounds (non-finite, non-positive or inverted)
	/// with the defaults.
	pub fn sanitized(mut self) -> Self {
		let (min, max) = (self.zoom_min, self.zoom_max);
		if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
			let defaults = Self::default();
			warn!(
				"force-network: invalid zoom bounds [{}, {}], using [{}, {}]",
				min, max, defaults.zoom_min, defaults.zoom_max
			);
			self.zoom_min = defaults.zoom_min;
			self.zoom_max = defaults.zoom_max;
		}
		self
	}

	/// Clamps a zoom scale into the configured bounds.
	pub fn clamp_zoom(&self, k: f64) -> f64 {
		k.max(self.zoom_min).min(self.zoom_max)
	}
}

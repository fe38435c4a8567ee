//! Graph state for one load: simulation, scene, interaction and selection.
//!
//! Created when a graph is mounted, then driven by the component: pointer
//! handlers call the `pointer_*` methods and the animation loop calls
//! [`ForceGraphState::frame`]. Dropping it discards the whole load.

use log::info;

use super::config::GraphConfig;
use super::highlight::{HighlightFrame, Selection};
use super::interaction::{Click, Interaction};
use super::scene::Scene;
use super::simulation::{Simulation, SimulationParameters};
use super::theme::Theme;
use super::types::{NodeId, SimGraph};

pub struct ForceGraphState {
	pub simulation: Simulation,
	pub scene: Scene,
	pub interaction: Interaction,
	pub selection: Selection,
	pub theme: Theme,
	pub config: GraphConfig,
}

impl ForceGraphState {
	pub fn new(graph: SimGraph, config: GraphConfig) -> Self {
		info!(
			"force-network: starting layout for {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		let theme = Theme::from(config.theme);
		let simulation = Simulation::start(graph, SimulationParameters::from(&config));
		let scene = Scene::build(simulation.nodes(), simulation.edges(), &theme);

		Self {
			simulation,
			scene,
			interaction: Interaction::new(&config),
			selection: Selection::Idle,
			theme,
			config,
		}
	}

	/// Topmost node within `node_radius` of the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.interaction.transform.screen_to_graph(sx, sy);
		let r2 = self.config.node_radius * self.config.node_radius;
		self.simulation
			.nodes()
			.iter()
			.rev()
			.find(|n| (n.x - gx).powi(2) + (n.y - gy).powi(2) < r2)
			.map(|n| n.id)
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		let hit = self.node_at_position(sx, sy);
		self.interaction.press(&mut self.simulation, hit, sx, sy);
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		self.interaction.motion(&mut self.simulation, sx, sy);
		let hovered = if self.interaction.is_dragging() {
			self.interaction.drag.node
		} else {
			self.node_at_position(sx, sy)
		};
		let node = hovered.and_then(|id| self.simulation.node(id));
		self.interaction.hover(node, sx, sy);
	}

	pub fn pointer_up(&mut self, sx: f64, sy: f64) {
		let hit = self.node_at_position(sx, sy);
		if let Some(click) = self.interaction.release(&mut self.simulation, hit) {
			self.click(click);
		}
	}

	pub fn pointer_leave(&mut self) {
		self.interaction.leave(&mut self.simulation);
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.interaction.wheel(sx, sy, delta_y);
	}

	/// Moves the selection and re-applies element states from scratch.
	pub fn click(&mut self, click: Click) {
		self.selection = self.selection.on_click(click);
		let frame = HighlightFrame::compute(
			self.simulation.nodes().len(),
			self.simulation.edges(),
			self.selection,
		);
		self.scene.apply_highlight(&frame);
	}

	/// One animation frame: step the engine and bind its output to the
	/// scene. Returns whether the engine stepped.
	pub fn frame(&mut self) -> bool {
		match self.simulation.step() {
			Some(tick) => {
				self.scene.apply_tick(&tick);
				true
			}
			None => false,
		}
	}
}

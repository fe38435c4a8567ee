//! Retained visual scene for one graph load.
//!
//! Every node, edge and edge label gets exactly one visual record, bound to
//! its data entity by stable id. The simulation's [`Tick`] moves them and a
//! [`HighlightFrame`] sets their states; the painter only reads the scene.

use super::highlight::{HighlightFrame, VisualState};
use super::simulation::Tick;
use super::theme::{Color, GroupPalette, Theme};
use super::types::{EdgeId, NodeId, SimEdge, SimNode};

#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
	pub id: NodeId,
	pub label: String,
	pub fill: Color,
	/// Placeholder for unresolved edge endpoints.
	pub sentinel: bool,
	pub x: f64,
	pub y: f64,
	pub state: VisualState,
	pub label_state: VisualState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVisual {
	pub id: EdgeId,
	pub source: NodeId,
	pub target: NodeId,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	/// Drawn dashed: one end is the unresolved-endpoint placeholder.
	pub dashed: bool,
	pub state: VisualState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeLabelVisual {
	pub edge: EdgeId,
	pub text: String,
	pub x: f64,
	pub y: f64,
	pub state: VisualState,
}

/// One drawable element, in paint order.
#[derive(Clone, Copy, Debug)]
pub enum Layer<'a> {
	Edge(&'a EdgeVisual),
	EdgeLabel(&'a EdgeLabelVisual),
	Node(&'a NodeVisual),
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
	pub nodes: Vec<NodeVisual>,
	pub edges: Vec<EdgeVisual>,
	pub edge_labels: Vec<EdgeLabelVisual>,
}

impl Scene {
	/// Creates the visual records for a freshly started graph.
	pub fn build(nodes: &[SimNode], edges: &[SimEdge], theme: &Theme) -> Self {
		let mut palette = GroupPalette::default();
		let nodes: Vec<NodeVisual> = nodes
			.iter()
			.map(|node| NodeVisual {
				id: node.id,
				label: node.name.clone(),
				fill: if node.sentinel {
					theme.sentinel
				} else {
					palette.color(&node.group)
				},
				sentinel: node.sentinel,
				x: node.x,
				y: node.y,
				state: VisualState::Normal,
				label_state: VisualState::Normal,
			})
			.collect();
		let sentinel = |id: NodeId| nodes.get(id.index()).is_some_and(|n| n.sentinel);

		let edge_visuals = edges
			.iter()
			.map(|edge| EdgeVisual {
				id: edge.id,
				source: edge.source,
				target: edge.target,
				x1: 0.0,
				y1: 0.0,
				x2: 0.0,
				y2: 0.0,
				dashed: sentinel(edge.source) || sentinel(edge.target),
				state: VisualState::Normal,
			})
			.collect();
		let edge_labels = edges
			.iter()
			.map(|edge| EdgeLabelVisual {
				edge: edge.id,
				text: edge.value.clone(),
				x: 0.0,
				y: 0.0,
				state: VisualState::Normal,
			})
			.collect();

		let mut scene = Self {
			nodes,
			edges: edge_visuals,
			edge_labels,
		};
		scene.layout_edges();
		scene
	}

	/// Moves every element to the positions carried by `tick`.
	pub fn apply_tick(&mut self, tick: &Tick<'_>) {
		for (visual, node) in self.nodes.iter_mut().zip(tick.nodes) {
			debug_assert_eq!(visual.id, node.id);
			visual.x = node.x;
			visual.y = node.y;
		}
		self.layout_edges();
	}

	/// Edge endpoints follow their nodes; labels sit at the midpoint.
	fn layout_edges(&mut self) {
		let nodes = &self.nodes;
		let position = |id: NodeId| nodes.get(id.index()).map(|n| (n.x, n.y)).unwrap_or_default();
		for (edge, label) in self.edges.iter_mut().zip(self.edge_labels.iter_mut()) {
			(edge.x1, edge.y1) = position(edge.source);
			(edge.x2, edge.y2) = position(edge.target);
			label.x = (edge.x1 + edge.x2) / 2.0;
			label.y = (edge.y1 + edge.y2) / 2.0;
		}
	}

	/// Re-applies per-element states. Labels follow their owner.
	pub fn apply_highlight(&mut self, frame: &HighlightFrame) {
		for node in &mut self.nodes {
			node.state = frame.node(node.id);
			node.label_state = node.state;
		}
		for (edge, label) in self.edges.iter_mut().zip(self.edge_labels.iter_mut()) {
			edge.state = frame.edges.get(edge.id.index()).copied().unwrap_or_default();
			label.state = edge.state;
		}
	}

	/// All elements in paint order: edges, then edge labels, then nodes, so
	/// nodes cover the line ends.
	pub fn layers(&self) -> impl Iterator<Item = Layer<'_>> {
		self.edges
			.iter()
			.map(Layer::Edge)
			.chain(self.edge_labels.iter().map(Layer::EdgeLabel))
			.chain(self.nodes.iter().map(Layer::Node))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::config::GraphConfig;
	use crate::components::force_graph::highlight::Selection;
	use crate::components::force_graph::normalize::normalize;
	use crate::components::force_graph::simulation::{Simulation, SimulationParameters};
	use crate::components::force_graph::types::{InputEdge, InputGraph, InputNode};

	fn simulation() -> Simulation {
		let graph = normalize(&InputGraph {
			nodes: vec![InputNode::named("a", "x"), InputNode::named("b", "y"), InputNode::named("c", "x")],
			edges: vec![InputEdge::new("a", "b", "ab"), InputEdge::new("b", "c", "bc")],
		});
		Simulation::start(graph, SimulationParameters::from(&GraphConfig::default()))
	}

	#[test]
	fn one_visual_per_entity() {
		let sim = simulation();
		let scene = Scene::build(sim.nodes(), sim.edges(), &Theme::default());
		assert_eq!(scene.nodes.len(), 3);
		assert_eq!(scene.edges.len(), 2);
		assert_eq!(scene.edge_labels.len(), 2);
		assert_eq!(scene.edge_labels[1].text, "bc");
		assert_eq!(scene.nodes[0].fill, scene.nodes[2].fill);
		assert_ne!(scene.nodes[0].fill, scene.nodes[1].fill);
	}

	#[test]
	fn edges_are_painted_before_nodes() {
		let sim = simulation();
		let scene = Scene::build(sim.nodes(), sim.edges(), &Theme::default());
		let order: Vec<char> = scene
			.layers()
			.map(|layer| match layer {
				Layer::Edge(_) => 'e',
				Layer::EdgeLabel(_) => 'l',
				Layer::Node(_) => 'n',
			})
			.collect();
		assert_eq!(order, ['e', 'e', 'l', 'l', 'n', 'n', 'n']);
	}

	#[test]
	fn tick_moves_nodes_edges_and_midpoints() {
		let mut sim = simulation();
		let mut scene = Scene::build(sim.nodes(), sim.edges(), &Theme::default());
		for _ in 0..5 {
			sim.step();
		}
		let tick = sim.step().unwrap();
		scene.apply_tick(&tick);

		let (a, b) = (&tick.nodes[0], &tick.nodes[1]);
		assert_eq!((scene.nodes[0].x, scene.nodes[0].y), (a.x, a.y));
		let edge = &scene.edges[0];
		assert_eq!((edge.x1, edge.y1, edge.x2, edge.y2), (a.x, a.y, b.x, b.y));
		let label = &scene.edge_labels[0];
		assert_eq!((label.x, label.y), ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0));
	}

	#[test]
	fn highlight_states_reach_labels() {
		let sim = simulation();
		let mut scene = Scene::build(sim.nodes(), sim.edges(), &Theme::default());
		let frame = HighlightFrame::compute(3, sim.edges(), Selection::Node(NodeId(0)));
		scene.apply_highlight(&frame);

		assert_eq!(scene.nodes[2].state, VisualState::Suppressed);
		assert_eq!(scene.nodes[2].label_state, VisualState::Suppressed);
		assert_eq!(scene.nodes[1].label_state, VisualState::Normal);
		assert_eq!(scene.edge_labels[0].state, VisualState::Normal);
		assert_eq!(scene.edge_labels[1].state, VisualState::Suppressed);
	}
}

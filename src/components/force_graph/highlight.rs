//! Click-to-highlight of a node's neighborhood.
//!
//! The current [`Selection`] is a plain value; [`HighlightFrame::compute`]
//! derives every element's [`VisualState`] from it from scratch, and the
//! scene re-applies the frame. Nothing here holds global state.

use log::debug;

use super::interaction::Click;
use super::types::{NodeId, SimEdge};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualState {
	#[default]
	Normal,
	Suppressed,
}

/// Which node, if any, is highlighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	Idle,
	Node(NodeId),
}

impl Selection {
	/// Next selection after a click. Clicking any node (including a different
	/// one) selects it; clicking the background returns to idle.
	pub fn on_click(self, click: Click) -> Self {
		let next = match click {
			Click::Node(id) => Selection::Node(id),
			Click::Background => Selection::Idle,
		};
		if next != self {
			debug!("force-network: highlight {:?} -> {:?}", self, next);
		}
		next
	}
}

/// Per-element states for one selection. Labels share their owner's state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightFrame {
	pub nodes: Vec<VisualState>,
	pub edges: Vec<VisualState>,
}

impl HighlightFrame {
	/// Idle: everything normal. Node N selected: everything suppressed except
	/// N, its incident edges, and the nodes at their other ends.
	pub fn compute(node_count: usize, edges: &[SimEdge], selection: Selection) -> Self {
		let Selection::Node(selected) = selection else {
			return Self {
				nodes: vec![VisualState::Normal; node_count],
				edges: vec![VisualState::Normal; edges.len()],
			};
		};

		let mut nodes = vec![VisualState::Suppressed; node_count];
		let mut edge_states = vec![VisualState::Suppressed; edges.len()];

		if let Some(state) = nodes.get_mut(selected.index()) {
			*state = VisualState::Normal;
		}
		for (state, edge) in edge_states.iter_mut().zip(edges) {
			let Some(other) = edge.other(selected) else {
				continue;
			};
			*state = VisualState::Normal;
			if let Some(neighbor) = nodes.get_mut(other.index()) {
				*neighbor = VisualState::Normal;
			}
		}

		Self {
			nodes,
			edges: edge_states,
		}
	}

	pub fn node(&self, id: NodeId) -> VisualState {
		self.nodes.get(id.index()).copied().unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::EdgeId;

	use VisualState::{Normal, Suppressed};

	/// A–B, B–C
	fn chain() -> Vec<SimEdge> {
		[(0, 1), (1, 2)]
			.into_iter()
			.enumerate()
			.map(|(i, (s, t))| SimEdge {
				id: EdgeId(i),
				source: NodeId(s),
				target: NodeId(t),
				value: String::new(),
			})
			.collect()
	}

	#[test]
	fn idle_is_all_normal() {
		let frame = HighlightFrame::compute(3, &chain(), Selection::Idle);
		assert_eq!(frame.nodes, [Normal; 3]);
		assert_eq!(frame.edges, [Normal; 2]);
	}

	#[test]
	fn clicking_a_end_node_isolates_its_neighborhood() {
		let selection = Selection::Idle.on_click(Click::Node(NodeId(0)));
		let frame = HighlightFrame::compute(3, &chain(), selection);
		assert_eq!(frame.nodes, [Normal, Normal, Suppressed]);
		assert_eq!(frame.edges, [Normal, Suppressed]);
	}

	#[test]
	fn incidence_holds_for_target_endpoint() {
		// C is only ever a target, yet clicking it lights up B–C and B.
		let frame = HighlightFrame::compute(3, &chain(), Selection::Node(NodeId(2)));
		assert_eq!(frame.nodes, [Suppressed, Normal, Normal]);
		assert_eq!(frame.edges, [Suppressed, Normal]);
	}

	#[test]
	fn background_click_restores_everything() {
		let selection = Selection::Node(NodeId(0)).on_click(Click::Background);
		assert_eq!(selection, Selection::Idle);
		let frame = HighlightFrame::compute(3, &chain(), selection);
		assert!(frame.nodes.iter().chain(&frame.edges).all(|s| *s == Normal));
	}

	#[test]
	fn clicking_another_node_recomputes_from_scratch() {
		let selection = Selection::Node(NodeId(0)).on_click(Click::Node(NodeId(1)));
		let frame = HighlightFrame::compute(3, &chain(), selection);
		assert_eq!(frame.nodes, [Normal; 3]);
		assert_eq!(frame.edges, [Normal; 2]);
	}

	#[test]
	fn self_loop_keeps_node_normal() {
		let edges = vec![SimEdge {
			id: EdgeId(0),
			source: NodeId(1),
			target: NodeId(1),
			value: String::new(),
		}];
		let frame = HighlightFrame::compute(2, &edges, Selection::Node(NodeId(1)));
		assert_eq!(frame.nodes, [Suppressed, Normal]);
		assert_eq!(frame.edges, [Normal]);
	}
}

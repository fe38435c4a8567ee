//! Converts an [`InputGraph`] into a [`SimGraph`].
//!
//! Node ids are assigned from input order. Edge endpoints are resolved once,
//! by exact match on each node's natural key, as chosen by a [`NodeKey`]
//! strategy. Unresolvable endpoints follow the configured
//! [`DanglingEdgePolicy`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::warn;

use super::config::DanglingEdgePolicy;
use super::error::{Endpoint, GraphError};
use super::types::{EdgeId, InputGraph, InputNode, NodeId, SimEdge, SimGraph, SimNode};

/// Label and group of the placeholder node used by [`DanglingEdgePolicy::Sentinel`].
pub const SENTINEL_LABEL: &str = "?";
pub const SENTINEL_GROUP: &str = "unresolved";

/// Derives the natural key edges use to refer to a node.
pub trait NodeKey {
	fn key<'a>(&self, node: &'a InputNode) -> Option<&'a str>;
}

/// Nodes are referenced by their `name` field.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByName;

/// Nodes are referenced by their `id` field.
#[derive(Clone, Copy, Debug, Default)]
pub struct ById;

/// `name` if present, otherwise `id`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Auto;

impl NodeKey for ByName {
	fn key<'a>(&self, node: &'a InputNode) -> Option<&'a str> {
		node.name.as_deref()
	}
}

impl NodeKey for ById {
	fn key<'a>(&self, node: &'a InputNode) -> Option<&'a str> {
		node.id.as_deref()
	}
}

impl NodeKey for Auto {
	fn key<'a>(&self, node: &'a InputNode) -> Option<&'a str> {
		node.name.as_deref().or(node.id.as_deref())
	}
}

/// Normalizes with [`Auto`] keys, dropping dangling edges.
pub fn normalize(input: &InputGraph) -> SimGraph {
	build(input, &Auto, false)
}

/// Normalizes with an explicit key strategy and dangling-edge policy.
///
/// Only [`DanglingEdgePolicy::Fail`] can return an error.
pub fn normalize_with<K: NodeKey + ?Sized>(
	input: &InputGraph,
	key: &K,
	policy: DanglingEdgePolicy,
) -> Result<SimGraph, GraphError> {
	match policy {
		DanglingEdgePolicy::Drop => Ok(build(input, key, false)),
		DanglingEdgePolicy::Sentinel => Ok(build(input, key, true)),
		DanglingEdgePolicy::Fail => {
			let index = key_index(input, key);
			for (i, edge) in input.edges.iter().enumerate() {
				for (endpoint, name) in [(Endpoint::Source, &edge.source), (Endpoint::Target, &edge.target)] {
					if !index.contains_key(name.as_str()) {
						return Err(GraphError::UnresolvedEdge {
							edge: i,
							endpoint,
							key: name.clone(),
						});
					}
				}
			}
			Ok(build(input, key, false))
		}
	}
}

/// Maps natural keys to node ids. The first node with a given key wins.
fn key_index<'a, K: NodeKey + ?Sized>(input: &'a InputGraph, key: &K) -> HashMap<&'a str, NodeId> {
	let mut index = HashMap::with_capacity(input.nodes.len());
	for (i, node) in input.nodes.iter().enumerate() {
		let Some(k) = key.key(node) else {
			continue;
		};
		match index.entry(k) {
			Entry::Vacant(slot) => {
				slot.insert(NodeId(i));
			}
			Entry::Occupied(first) => {
				warn!(
					"force-network: duplicate node key {:?} (nodes {} and {}), edges resolve to the first",
					k,
					first.get(),
					i
				);
			}
		}
	}
	index
}

fn build<K: NodeKey + ?Sized>(input: &InputGraph, key: &K, with_sentinel: bool) -> SimGraph {
	let index = key_index(input, key);

	let mut nodes: Vec<SimNode> = input
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let label = node
				.name
				.as_deref()
				.or(node.id.as_deref())
				.map(str::to_string)
				.unwrap_or_else(|| i.to_string());
			let mut sim = SimNode::new(i, label, node.group.clone());
			sim.attributes = node.attributes.clone();
			sim
		})
		.collect();

	let mut sentinel: Option<NodeId> = None;
	let mut edges = Vec::with_capacity(input.edges.len());

	for (i, edge) in input.edges.iter().enumerate() {
		let source = index.get(edge.source.as_str()).copied();
		let target = index.get(edge.target.as_str()).copied();

		let (source, target) = match (source, target) {
			(Some(s), Some(t)) => (s, t),
			_ if with_sentinel => {
				let placeholder = *sentinel.get_or_insert_with(|| {
					let id = NodeId(nodes.len());
					let mut node = SimNode::new(id.index(), SENTINEL_LABEL, SENTINEL_GROUP);
					node.sentinel = true;
					nodes.push(node);
					id
				});
				warn!(
					"force-network: edge #{} ({:?} -> {:?}) has an unknown endpoint, attached to placeholder",
					i, edge.source, edge.target
				);
				(source.unwrap_or(placeholder), target.unwrap_or(placeholder))
			}
			_ => {
				warn!(
					"force-network: dropping edge #{} ({:?} -> {:?}): unknown endpoint",
					i, edge.source, edge.target
				);
				continue;
			}
		};

		edges.push(SimEdge {
			id: EdgeId(edges.len()),
			source,
			target,
			value: edge.value.clone(),
		});
	}

	SimGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::InputEdge;

	fn people() -> InputGraph {
		InputGraph {
			nodes: vec![
				InputNode::named("Ann", "a"),
				InputNode::named("Bo", "b"),
				InputNode::named("Cy", "a"),
			],
			edges: vec![
				InputEdge::new("Ann", "Bo", "friends"),
				InputEdge::new("Bo", "Cy", "siblings"),
			],
		}
	}

	#[test]
	fn ids_follow_input_order() {
		let graph = normalize(&people());
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.to_string()).collect();
		assert_eq!(ids, ["0", "1", "2"]);
		assert_eq!(graph.nodes[1].name, "Bo");
		assert_eq!(graph.edges[1].source, NodeId(1));
		assert_eq!(graph.edges[1].target, NodeId(2));
		assert_eq!(graph.edges[1].value, "siblings");
	}

	#[test]
	fn same_input_gives_same_graph() {
		let input = people();
		assert_eq!(normalize(&input), normalize(&input));
	}

	#[test]
	fn key_strategy_decides_resolution() {
		let input = InputGraph {
			nodes: vec![
				InputNode {
					name: Some("alpha".into()),
					id: Some("a".into()),
					..InputNode::default()
				},
				InputNode {
					name: Some("beta".into()),
					id: Some("b".into()),
					..InputNode::default()
				},
			],
			edges: vec![InputEdge::new("a", "b", "")],
		};

		let by_name = normalize_with(&input, &ByName, DanglingEdgePolicy::Drop).unwrap();
		assert!(by_name.edges.is_empty());

		let by_id = normalize_with(&input, &ById, DanglingEdgePolicy::Drop).unwrap();
		assert_eq!(by_id.edges.len(), 1);
		assert_eq!((by_id.edges[0].source, by_id.edges[0].target), (NodeId(0), NodeId(1)));
		// Labels still prefer the name.
		assert_eq!(by_id.nodes[0].name, "alpha");
	}

	#[test]
	fn dangling_edges_are_dropped_by_default() {
		let mut input = people();
		input.edges.push(InputEdge::new("Ann", "Nobody", "?"));
		let graph = normalize(&input);
		assert_eq!(graph.nodes.len(), 3);
		assert_eq!(graph.edges.len(), 2);
		assert!(graph.edges.iter().all(|e| graph.node(e.source).is_some() && graph.node(e.target).is_some()));
	}

	#[test]
	fn sentinel_policy_shares_one_placeholder() {
		let mut input = people();
		input.edges.push(InputEdge::new("Ann", "Nobody", ""));
		input.edges.push(InputEdge::new("Ghost", "Cy", ""));
		let graph = normalize_with(&input, &Auto, DanglingEdgePolicy::Sentinel).unwrap();

		assert_eq!(graph.nodes.len(), 4);
		let sentinel = graph.nodes.iter().find(|n| n.sentinel).unwrap();
		assert_eq!(sentinel.id, NodeId(3));
		assert_eq!(sentinel.name, SENTINEL_LABEL);
		assert_eq!(graph.edges[2].target, sentinel.id);
		assert_eq!(graph.edges[3].source, sentinel.id);
		assert_eq!(graph.edges[3].target, NodeId(2));
	}

	#[test]
	fn fail_policy_reports_the_first_bad_endpoint() {
		let mut input = people();
		input.edges.push(InputEdge::new("Ann", "Nobody", ""));
		let err = normalize_with(&input, &Auto, DanglingEdgePolicy::Fail).unwrap_err();
		match err {
			GraphError::UnresolvedEdge { edge, endpoint, key } => {
				assert_eq!(edge, 2);
				assert_eq!(endpoint, Endpoint::Target);
				assert_eq!(key, "Nobody");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn duplicate_keys_resolve_to_first_node() {
		let input = InputGraph {
			nodes: vec![InputNode::named("x", "g"), InputNode::named("x", "g"), InputNode::named("y", "g")],
			edges: vec![InputEdge::new("y", "x", "")],
		};
		let graph = normalize(&input);
		assert_eq!(graph.nodes.len(), 3);
		assert_eq!(graph.edges[0].target, NodeId(0));
	}

	#[test]
	fn keyless_nodes_are_labelled_by_index() {
		let input = InputGraph {
			nodes: vec![InputNode::default()],
			edges: vec![],
		};
		assert_eq!(normalize(&input).nodes[0].name, "0");
	}
}

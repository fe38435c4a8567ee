//! End-to-end flows through the public API: input parsing, normalization,
//! layout, interaction and highlighting without a browser.

use force_network::components::force_graph::csv_import::from_csv_readers;
use force_network::components::force_graph::{
	Auto, ByName, Click, DanglingEdgePolicy, ForceGraphState, GraphConfig, GraphError,
	InputEdge, InputGraph, InputNode, NodeId, Simulation, SimulationParameters, VisualState,
	normalize, normalize_with,
};

fn chain() -> InputGraph {
	InputGraph {
		nodes: vec![
			InputNode::named("A", "g1"),
			InputNode::named("B", "g1"),
			InputNode::named("C", "g2"),
		],
		edges: vec![InputEdge::new("A", "B", "1"), InputEdge::new("B", "C", "2")],
	}
}

fn settled(input: &InputGraph) -> ForceGraphState {
	let mut state = ForceGraphState::new(normalize(input), GraphConfig::default());
	while state.frame() {}
	state
}

#[test]
fn two_node_graph_settles_and_stops_stepping() {
	let input = InputGraph {
		nodes: vec![InputNode::with_id("A", "g1"), InputNode::with_id("B", "g2")],
		edges: vec![InputEdge::new("A", "B", "1")],
	};
	let graph = normalize(&input);
	assert_eq!(graph.nodes.len(), 2);
	assert_eq!(graph.edges.len(), 1);
	assert_eq!(graph.edges[0].source, NodeId(0));
	assert_eq!(graph.edges[0].target, NodeId(1));

	let config = GraphConfig::default();
	let mut sim = Simulation::start(graph, SimulationParameters::from(&config));
	let mut ticks = 0;
	while sim.step().is_some() {
		ticks += 1;
		assert!(ticks < 10_000, "layout never settled");
	}
	assert!(ticks > 0);
	assert!(sim.alpha() < config.alpha_floor_idle);
	assert!(!sim.is_running());
	assert!(sim.step().is_none());

	let (a, b) = (&sim.nodes()[0], &sim.nodes()[1]);
	let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
	assert!(distance.is_finite() && distance > 0.0);
}

#[test]
fn clicking_a_node_highlights_its_neighborhood() {
	let mut state = settled(&chain());

	state.click(Click::Node(NodeId(0)));
	let states: Vec<VisualState> = state.scene.nodes.iter().map(|n| n.state).collect();
	assert_eq!(
		states,
		vec![VisualState::Normal, VisualState::Normal, VisualState::Suppressed]
	);
	assert_eq!(state.scene.edges[0].state, VisualState::Normal);
	assert_eq!(state.scene.edges[1].state, VisualState::Suppressed);

	state.click(Click::Background);
	assert!(state.scene.nodes.iter().all(|n| n.state == VisualState::Normal));
	assert!(state.scene.edges.iter().all(|e| e.state == VisualState::Normal));
}

#[test]
fn clicking_the_same_node_twice_keeps_the_highlight() {
	let mut state = settled(&chain());
	state.click(Click::Node(NodeId(2)));
	let first: Vec<VisualState> = state.scene.nodes.iter().map(|n| n.state).collect();
	state.click(Click::Node(NodeId(2)));
	let second: Vec<VisualState> = state.scene.nodes.iter().map(|n| n.state).collect();
	assert_eq!(first, second);
	assert_eq!(second[0], VisualState::Suppressed);
}

#[test]
fn dragged_node_stays_where_it_was_released() {
	let mut state = settled(&chain());
	let start = state.simulation.nodes()[1].clone();
	let (sx, sy) = state.interaction.transform.graph_to_screen(start.x, start.y);

	state.pointer_down(sx, sy);
	assert!(state.simulation.is_running());
	assert!(state.simulation.nodes()[1].is_pinned());

	state.pointer_move(sx + 80.0, sy - 40.0);
	state.frame();
	let held = state.simulation.nodes()[1].clone();
	assert!((held.x - (start.x + 80.0)).abs() < 1e-9);
	assert!((held.y - (start.y - 40.0)).abs() < 1e-9);

	state.pointer_up(sx + 80.0, sy - 40.0);
	let released = state.simulation.nodes()[1].clone();
	assert!(!released.is_pinned());
	assert_eq!((released.x, released.y), (held.x, held.y));
	assert!(state.scene.nodes.iter().all(|n| n.state == VisualState::Normal));

	// From here on only stepping moves the node.
	let mut stepped = 0;
	for _ in 0..20 {
		if !state.frame() {
			break;
		}
		stepped += 1;
		let node = &state.simulation.nodes()[1];
		assert_eq!((node.fx, node.fy), (None, None));
	}
	assert!(stepped > 0);
	let moved = &state.simulation.nodes()[1];
	assert!((moved.x, moved.y) != (released.x, released.y));
	let visual = &state.scene.nodes[1];
	assert_eq!((visual.x, visual.y), (moved.x, moved.y));
}

#[test]
fn inverted_zoom_bounds_from_json_do_not_break_wheel_zoom() {
	let config = GraphConfig::from_json(r#"{"zoomMin": 5, "zoomMax": 2}"#).unwrap();
	let mut state = ForceGraphState::new(normalize(&chain()), config);
	state.wheel(10.0, 10.0, -1.0);
	assert!((state.interaction.transform.k - 1.1).abs() < 1e-12);
}

#[test]
fn press_and_release_in_place_is_a_click() {
	let mut state = settled(&chain());
	let node = state.simulation.nodes()[0].clone();
	let (sx, sy) = state.interaction.transform.graph_to_screen(node.x, node.y);

	state.pointer_down(sx, sy);
	state.pointer_move(sx + 1.0, sy);
	state.pointer_up(sx + 1.0, sy);

	assert_eq!(state.scene.nodes[2].state, VisualState::Suppressed);
}

#[test]
fn wheel_zoom_is_clamped_to_configured_range() {
	let mut state = settled(&chain());
	for _ in 0..200 {
		state.wheel(100.0, 100.0, -1.0);
	}
	assert_eq!(state.interaction.transform.k, state.config.zoom_max);
	for _ in 0..400 {
		state.wheel(100.0, 100.0, 1.0);
	}
	assert_eq!(state.interaction.transform.k, state.config.zoom_min);
}

#[test]
fn json_payload_with_links_alias_and_numeric_fields() {
	let input = InputGraph::from_json(
		r#"{
			"nodes": [
				{"id": "a", "group": "x", "age": 42},
				{"id": "b", "group": "y"}
			],
			"links": [{"source": "a", "target": "b", "value": 3}]
		}"#,
	)
	.unwrap();
	assert_eq!(input.edges[0].value, "3");

	let graph = normalize(&input);
	assert_eq!(graph.nodes[0].name, "a");
	assert_eq!(graph.edges[0].target, NodeId(1));
}

#[test]
fn csv_import_feeds_the_same_pipeline() {
	let nodes = "name,group\nAnn,dev\n";
	let edges = "source,target,value\nAnn,Bo,knows\n";
	let input = from_csv_readers(nodes.as_bytes(), edges.as_bytes()).unwrap();

	let graph = normalize_with(&input, &ByName, DanglingEdgePolicy::Fail).unwrap();
	assert_eq!(graph.nodes.len(), 2);
	assert_eq!(graph.nodes[1].name, "Bo");
	assert_eq!(graph.edges[0].value, "knows");
}

#[test]
fn fail_policy_reports_the_unresolved_endpoint() {
	let input = InputGraph {
		nodes: vec![InputNode::named("A", "g")],
		edges: vec![InputEdge::new("A", "Z", "")],
	};
	let err = normalize_with(&input, &Auto, DanglingEdgePolicy::Fail).unwrap_err();
	assert!(matches!(err, GraphError::UnresolvedEdge { edge: 0, .. }));

	let dropped = normalize_with(&input, &Auto, DanglingEdgePolicy::Drop).unwrap();
	assert!(dropped.edges.is_empty());

	let sentinel = normalize_with(&input, &Auto, DanglingEdgePolicy::Sentinel).unwrap();
	assert_eq!(sentinel.nodes.len(), 2);
	assert_eq!(sentinel.edges[0].target, NodeId(1));
}

#[test]
fn config_overrides_come_from_camel_case_json() {
	let config = GraphConfig::from_json(r#"{"linkDistance": 120, "danglingEdges": "sentinel"}"#)
		.unwrap();
	assert_eq!(config.link_distance, 120.0);
	assert_eq!(config.dangling_edges, DanglingEdgePolicy::Sentinel);
	assert_eq!(config.node_radius, GraphConfig::default().node_radius);
}

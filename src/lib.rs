//! force-network: interactive force-directed network visualization.
//!
//! This crate provides a WASM-based graph view that lays out entities and
//! their relationships with a force simulation, and supports pan/zoom, node
//! dragging, tooltips and click-to-highlight of a node's neighborhood.
//!
//! Hosts call [`render_graph`] (or `renderGraph` from JavaScript) with a
//! graph payload and the id of an existing container element.

use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_graph::{
	DanglingEdgePolicy, ForceGraphCanvas, GraphConfig, GraphError, InputEdge, InputGraph,
	InputNode, unmount_graph,
};

/// Container id the CSR binary renders into.
pub const DEFAULT_TARGET: &str = "graph";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("force-network: logging initialized");
}

/// Text of the `<script>` element with the given id, if there is one.
fn load_script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], edges: [...] }
fn load_graph_data() -> Option<InputGraph> {
	let json_text = load_script_text("graph-data")?;
	match InputGraph::from_json(&json_text) {
		Ok(data) => {
			info!(
				"force-network: loaded {} nodes, {} edges",
				data.nodes.len(),
				data.edges.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("force-network: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Optional configuration from a script element with id="graph-config".
fn load_graph_config() -> GraphConfig {
	let Some(json_text) = load_script_text("graph-config") else {
		return GraphConfig::default();
	};
	GraphConfig::from_json(&json_text).unwrap_or_else(|e| {
		warn!("force-network: ignoring invalid graph config: {}", e);
		GraphConfig::default()
	})
}

/// Renders the graph embedded in the page into [`DEFAULT_TARGET`].
pub fn run() {
	let data = load_graph_data().unwrap_or_default();
	render_graph_with_config(data, DEFAULT_TARGET, load_graph_config());
}

/// Builds (or rebuilds) the graph view inside the element with id `target`.
///
/// Any graph already shown there is torn down first. Failures are logged.
pub fn render_graph(input: InputGraph, target: &str) {
	render_graph_with_config(input, target, GraphConfig::default());
}

/// [`render_graph`] with explicit configuration.
pub fn render_graph_with_config(input: InputGraph, target: &str, config: GraphConfig) {
	if let Err(e) = components::force_graph::mount_graph(&input, target, config) {
		warn!("force-network: could not render graph into #{}: {}", target, e);
	}
}

/// JavaScript entry point: `renderGraph(graphJson, targetId, configJson?)`.
#[wasm_bindgen(js_name = renderGraph)]
pub fn render_graph_json(graph_json: &str, target: &str, config_json: Option<String>) {
	let input = match InputGraph::from_json(graph_json) {
		Ok(input) => input,
		Err(e) => {
			warn!("force-network: failed to parse graph data: {}", e);
			return;
		}
	};
	let config = match config_json.as_deref().map(GraphConfig::from_json) {
		None => GraphConfig::default(),
		Some(Ok(config)) => config,
		Some(Err(e)) => {
			warn!("force-network: ignoring invalid graph config: {}", e);
			GraphConfig::default()
		}
	};
	render_graph_with_config(input, target, config);
}

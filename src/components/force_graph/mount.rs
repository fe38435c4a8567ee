//! Mount registry: at most one live graph per target element.
//!
//! Mounting into a target that already shows a graph first halts that
//! graph's engine and unmounts its view, then builds the new one.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use leptos::mount::mount_to;
use leptos::prelude::*;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::component::ForceGraphCanvas;
use super::config::GraphConfig;
use super::error::GraphError;
use super::normalize::{Auto, normalize_with};
use super::types::InputGraph;

struct Mounted {
	alive: Rc<Cell<bool>>,
	/// Unmounts the view when dropped.
	_handle: Box<dyn Any>,
}

impl Drop for Mounted {
	fn drop(&mut self) {
		self.alive.set(false);
	}
}

thread_local! {
	static MOUNTS: RefCell<HashMap<String, Mounted>> = RefCell::new(HashMap::new());
}

fn target_element(target: &str) -> Option<HtmlElement> {
	web_sys::window()?
		.document()?
		.get_element_by_id(target)?
		.dyn_into()
		.ok()
}

/// Replaces whatever graph `target` shows with `input`.
pub fn mount_graph(input: &InputGraph, target: &str, config: GraphConfig) -> Result<(), GraphError> {
	unmount_graph(target);

	let graph = normalize_with(input, &Auto, config.dangling_edges)?;
	let parent =
		target_element(target).ok_or_else(|| GraphError::MountTargetMissing(target.to_string()))?;

	let (node_count, edge_count) = (graph.nodes.len(), graph.edges.len());
	let alive = Rc::new(Cell::new(true));
	let flag = alive.clone();
	let handle = mount_to(parent, move || {
		view! { <ForceGraphCanvas graph=graph config=config alive=flag /> }
	});

	MOUNTS.with(|mounts| {
		mounts.borrow_mut().insert(
			target.to_string(),
			Mounted {
				alive,
				_handle: Box::new(handle),
			},
		)
	});
	info!(
		"force-network: mounted {} nodes, {} edges into #{}",
		node_count, edge_count, target
	);
	Ok(())
}

/// Halts and removes the graph shown in `target`. Returns whether there was one.
pub fn unmount_graph(target: &str) -> bool {
	// Take it out first so unmount callbacks never see the registry borrowed.
	let previous = MOUNTS.with(|mounts| mounts.borrow_mut().remove(target));
	match previous {
		Some(mounted) => {
			drop(mounted);
			info!("force-network: unmounted graph from #{}", target);
			true
		}
		None => false,
	}
}

//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates a canvas plus a tooltip panel and wires mouse and
//! wheel handlers into [`ForceGraphState`]. An animation loop runs via
//! `requestAnimationFrame`, stepping the simulation and repainting each
//! frame until the component is unmounted or its `alive` flag is cleared.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::config::GraphConfig;
use super::interaction::TooltipState;
use super::render;
use super::state::ForceGraphState;
use super::types::SimGraph;

type Shared = Rc<RefCell<Option<ForceGraphState>>>;

/// The `requestAnimationFrame` callback and its outstanding request.
///
/// The callback only holds a [`Weak`] back to this, so the component is the
/// sole owner. Dropping it cancels the outstanding request, which keeps the
/// browser from invoking a freed callback.
#[derive(Default)]
struct FrameLoop {
	callback: Option<Closure<dyn FnMut()>>,
	pending: Option<i32>,
}

impl FrameLoop {
	fn schedule(&mut self) {
		let Some(cb) = self.callback.as_ref() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		self.pending = window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let Some(id) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
	}
}

fn schedule_next(frames: &Weak<RefCell<FrameLoop>>) {
	if let Some(frames) = frames.upgrade() {
		frames.borrow_mut().schedule();
	}
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Publishes the tooltip to the view when it changed.
fn sync_tooltip(state: &ForceGraphState, tooltip: RwSignal<TooltipState>) {
	let current = &state.interaction.tooltip;
	if tooltip.with_untracked(|t| t != current) {
		tooltip.set(current.clone());
	}
}

/// Renders one normalized graph as an interactive force-directed canvas.
///
/// The graph is laid out once per mount; loading a different graph means
/// mounting a new component. Clearing `alive` halts the engine before the
/// next frame.
#[component]
pub fn ForceGraphCanvas(
	graph: SimGraph,
	#[prop(default = GraphConfig::default())] config: GraphConfig,
	#[prop(optional)] alive: Option<Rc<Cell<bool>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tooltip = RwSignal::new(TooltipState::default());
	let alive = alive.unwrap_or_else(|| Rc::new(Cell::new(true)));
	let context: Shared = Rc::new(RefCell::new(None));
	// Held only by the effect, so it is freed with the component.
	let frame_loop: Rc<RefCell<FrameLoop>> = Rc::new(RefCell::new(FrameLoop::default()));
	let pending = RefCell::new(Some(graph));
	let context_init = context.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(graph) = pending.borrow_mut().take() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let size = (config.width, config.height);
		canvas.set_width(size.0 as u32);
		canvas.set_height(size.1 as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("force-network: canvas has no 2d context, nothing will be drawn");
			return;
		};

		*context_init.borrow_mut() = Some(ForceGraphState::new(graph, config.clone()));

		let (context_anim, frame_handle, alive_anim) =
			(context_init.clone(), Rc::downgrade(&frame_loop), alive.clone());
		let node_radius = config.node_radius;
		frame_loop.borrow_mut().callback = Some(Closure::new(move || {
			if let Some(frames) = frame_handle.upgrade() {
				frames.borrow_mut().pending = None;
			}
			if !alive_anim.get() || !canvas.is_connected() {
				// Discard the engine; the loop is not rescheduled.
				if context_anim.borrow_mut().take().is_some() {
					info!("force-network: animation loop stopped");
				}
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.frame();
				render::render(
					&c.scene,
					&c.interaction.transform,
					&ctx,
					&c.theme,
					size,
					node_radius,
				);
			}
			schedule_next(&frame_handle);
		}));
		frame_loop.borrow_mut().schedule();
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.pointer_move(x, y);
			sync_tooltip(c, tooltip);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.pointer_up(x, y);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.pointer_leave();
			sync_tooltip(c, tooltip);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.wheel(x, y, ev.delta_y());
		}
	};

	let tooltip_style = move || {
		tooltip.with(|t| {
			format!(
				"position: absolute; pointer-events: none; z-index: 1000; visibility: {}; left: {}px; top: {}px;",
				if t.visible { "visible" } else { "hidden" },
				t.x,
				t.y
			)
		})
	};

	view! {
		<div class="force-graph" style="position: relative; display: inline-block;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="tooltip" style=tooltip_style>
				<ul>
					{move || {
						tooltip
							.with(|t| {
								t.rows
									.iter()
									.map(|(key, value)| view! { <li>{format!("{key}: {value}")}</li> })
									.collect_view()
							})
					}}
				</ul>
			</div>
		</div>
	}
}

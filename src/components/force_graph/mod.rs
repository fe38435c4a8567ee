//! Force-directed network view.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Normalization of name- or id-keyed input into stable, index-based ids
//! - A d3-style alpha-cooled simulation (link, many-body and centering forces)
//! - Node dragging (pin while held), pan and clamped zoom
//! - A tooltip listing the hovered node's attributes
//! - Click-to-highlight of a node's neighborhood
//!
//! # Example
//!
//! ```ignore
//! use force_network::{InputEdge, InputGraph, InputNode, render_graph};
//!
//! let data = InputGraph {
//!     nodes: vec![InputNode::with_id("A", "g1"), InputNode::with_id("B", "g2")],
//!     edges: vec![InputEdge::new("A", "B", "1")],
//! };
//!
//! render_graph(data, "graph");
//! ```

mod component;
pub mod config;
pub mod csv_import;
pub mod error;
pub mod highlight;
pub mod interaction;
mod mount;
pub mod normalize;
mod render;
pub mod scene;
pub mod simulation;
pub mod state;
pub mod theme;
pub mod types;

pub use component::ForceGraphCanvas;
pub use config::{DanglingEdgePolicy, GraphConfig, ThemeName, TooltipConfig};
pub use error::GraphError;
pub use highlight::{HighlightFrame, Selection, VisualState};
pub use interaction::{Click, Interaction, ViewTransform};
pub use mount::{mount_graph, unmount_graph};
pub use normalize::{Auto, ById, ByName, NodeKey, normalize, normalize_with};
pub use scene::Scene;
pub use simulation::{Simulation, SimulationParameters, Tick};
pub use state::ForceGraphState;
pub use theme::Theme;
pub use types::{EdgeId, InputEdge, InputGraph, InputNode, NodeId, SimEdge, SimGraph, SimNode};

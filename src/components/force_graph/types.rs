//! Graph data structures.
//!
//! [`InputGraph`] is what the host hands over (usually parsed from JSON).
//! [`SimGraph`] is the normalized form: every node has a stable index-based
//! id and every edge endpoint is a resolved [`NodeId`] instead of a name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Group assigned to nodes that do not name one.
pub const DEFAULT_GROUP: &str = "default";

fn default_group() -> String {
	DEFAULT_GROUP.to_string()
}

/// JSON scalars accepted wherever a display string is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
	Text(String),
	Number(serde_json::Number),
	Bool(bool),
}

impl From<Scalar> for String {
	fn from(scalar: Scalar) -> Self {
		match scalar {
			Scalar::Text(s) => s,
			Scalar::Number(n) => n.to_string(),
			Scalar::Bool(b) => b.to_string(),
		}
	}
}

fn display_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
	Scalar::deserialize(de).map(String::from)
}

fn display_string_opt<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
	Option::<Scalar>::deserialize(de).map(|s| s.map(String::from))
}

/// A node as supplied by the host.
///
/// Either `name` or `id` carries the node's natural key; which one is used to
/// resolve edge endpoints is decided by a [`NodeKey`](super::normalize::NodeKey)
/// strategy. Unknown fields are kept as attributes and shown in the tooltip.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct InputNode {
	#[serde(default, deserialize_with = "display_string_opt", skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, deserialize_with = "display_string_opt", skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default = "default_group", deserialize_with = "display_string")]
	pub group: String,
	#[serde(flatten)]
	pub attributes: BTreeMap<String, Value>,
}

impl InputNode {
	/// Node keyed by `name`.
	pub fn named(name: impl Into<String>, group: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			group: group.into(),
			..Self::default()
		}
	}

	/// Node keyed by `id`.
	pub fn with_id(id: impl Into<String>, group: impl Into<String>) -> Self {
		Self {
			id: Some(id.into()),
			group: group.into(),
			..Self::default()
		}
	}

	/// Adds a free-form attribute.
	pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}
}

/// A relationship between two nodes, referenced by natural key.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct InputEdge {
	#[serde(deserialize_with = "display_string")]
	pub source: String,
	#[serde(deserialize_with = "display_string")]
	pub target: String,
	/// Display label. Numbers in the JSON are kept as their textual form.
	#[serde(default, deserialize_with = "display_string")]
	pub value: String,
}

impl InputEdge {
	pub fn new(source: impl Into<String>, target: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			value: value.into(),
		}
	}
}

/// Complete input graph: nodes and edges (`links` is accepted as an alias).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct InputGraph {
	#[serde(default)]
	pub nodes: Vec<InputNode>,
	#[serde(default, alias = "links")]
	pub edges: Vec<InputEdge>,
}

impl InputGraph {
	/// Parses the JSON payload handed over by the host.
	pub fn from_json(json: &str) -> Result<Self, super::error::GraphError> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Stable node identifier: the node's position in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Stable edge identifier: the edge's position in the normalized graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl NodeId {
	pub fn index(self) -> usize {
		self.0
	}
}

impl EdgeId {
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

// Ids travel as strings ("0", "1", ...) wherever they are serialized.
impl Serialize for NodeId {
	fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
		s.collect_str(self)
	}
}

impl Serialize for EdgeId {
	fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
		s.collect_str(self)
	}
}

/// A normalized node. Position fields are written only by the simulation;
/// `fx`/`fy` are the pin override (`None` = free on that axis).
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SimNode {
	pub id: NodeId,
	pub index: usize,
	pub name: String,
	pub group: String,
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub sentinel: bool,
	#[serde(flatten)]
	pub attributes: BTreeMap<String, Value>,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

impl SimNode {
	pub fn new(index: usize, name: impl Into<String>, group: impl Into<String>) -> Self {
		Self {
			id: NodeId(index),
			index,
			name: name.into(),
			group: group.into(),
			sentinel: false,
			attributes: BTreeMap::new(),
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
			fx: None,
			fy: None,
		}
	}

	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

/// A normalized edge with resolved endpoints.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SimEdge {
	pub id: EdgeId,
	pub source: NodeId,
	pub target: NodeId,
	pub value: String,
}

impl SimEdge {
	/// Whether `node` is either endpoint. Direction is irrelevant.
	pub fn is_incident(&self, node: NodeId) -> bool {
		self.source == node || self.target == node
	}

	/// The endpoint opposite `node`, if the edge touches it.
	pub fn other(&self, node: NodeId) -> Option<NodeId> {
		if self.source == node {
			Some(self.target)
		} else if self.target == node {
			Some(self.source)
		} else {
			None
		}
	}
}

/// Normalized graph for one load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimGraph {
	pub nodes: Vec<SimNode>,
	pub edges: Vec<SimEdge>,
}

impl SimGraph {
	pub fn node(&self, id: NodeId) -> Option<&SimNode> {
		self.nodes.get(id.index())
	}
}

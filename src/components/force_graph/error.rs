//! Error type shared by loading, normalization and mounting.

use thiserror::Error;

/// Which end of an edge failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
	Source,
	Target,
}

impl std::fmt::Display for Endpoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Endpoint::Source => "source",
			Endpoint::Target => "target",
		})
	}
}

#[derive(Debug, Error)]
pub enum GraphError {
	/// An edge names a node that is not in the graph.
	#[error("edge #{edge}: {endpoint} {key:?} does not match any node")]
	UnresolvedEdge {
		edge: usize,
		endpoint: Endpoint,
		key: String,
	},
	#[error("no element with id {0:?} to mount the graph into")]
	MountTargetMissing(String),
	#[error("invalid graph JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid CSV: {0}")]
	Csv(#[from] csv::Error),
	#[error("{file} CSV has no {column:?} column")]
	MissingColumn {
		file: &'static str,
		column: &'static str,
	},
}

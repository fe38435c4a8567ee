//! Builds an [`InputGraph`] from a pair of CSV tables.
//!
//! Nodes: `name[,group]`. Edges: `source,target[,value]`. Edge endpoints that
//! are missing from the node table are added as nodes in the
//! [`DEFAULT_GROUP`], so the resulting graph never has dangling edges.

use std::collections::HashSet;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::error::GraphError;
use super::types::{DEFAULT_GROUP, InputEdge, InputGraph, InputNode};

fn column(headers: &StringRecord, file: &'static str, name: &'static str) -> Result<usize, GraphError> {
	headers
		.iter()
		.position(|h| h == name)
		.ok_or(GraphError::MissingColumn { file, column: name })
}

fn field(record: &StringRecord, index: Option<usize>) -> Option<String> {
	index.and_then(|i| record.get(i)).map(str::to_string)
}

/// Reads both tables and compensates for missing nodes.
pub fn from_csv_readers<N: Read, E: Read>(nodes: N, edges: E) -> Result<InputGraph, GraphError> {
	let mut node_reader = ReaderBuilder::new().trim(Trim::All).from_reader(nodes);
	let headers = node_reader.headers()?.clone();
	let name = column(&headers, "nodes", "name")?;
	let group = column(&headers, "nodes", "group").ok();

	let mut graph = InputGraph::default();
	for record in node_reader.records() {
		let record = record?;
		let group = field(&record, group)
			.filter(|g| !g.is_empty())
			.unwrap_or_else(|| DEFAULT_GROUP.to_string());
		graph.nodes.push(InputNode::named(field(&record, Some(name)).unwrap_or_default(), group));
	}

	let mut edge_reader = ReaderBuilder::new().trim(Trim::All).from_reader(edges);
	let headers = edge_reader.headers()?.clone();
	let source = column(&headers, "edges", "source")?;
	let target = column(&headers, "edges", "target")?;
	let value = column(&headers, "edges", "value").ok();

	for record in edge_reader.records() {
		let record = record?;
		graph.edges.push(InputEdge::new(
			field(&record, Some(source)).unwrap_or_default(),
			field(&record, Some(target)).unwrap_or_default(),
			field(&record, value).unwrap_or_default(),
		));
	}

	compensate_missing_nodes(&mut graph);
	Ok(graph)
}

/// Appends a default-group node for every edge endpoint no node is named
/// after, in the order the endpoints first appear.
pub fn compensate_missing_nodes(graph: &mut InputGraph) {
	let mut known: HashSet<String> = graph.nodes.iter().filter_map(|n| n.name.clone()).collect();
	let mut added = Vec::new();
	for edge in &graph.edges {
		for endpoint in [&edge.source, &edge.target] {
			if known.insert(endpoint.clone()) {
				added.push(InputNode::named(endpoint.clone(), DEFAULT_GROUP));
			}
		}
	}
	graph.nodes.extend(added);
}

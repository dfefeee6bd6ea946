//! Flat graph data structures, as read from the input document.

use serde::Deserialize;

fn default_link_value() -> f64 {
	1.0
}

/// A module or package in the flat graph.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Cluster/category tag. Drives group ordering in the list view and the
	/// leaf size in the radial view.
	#[serde(default)]
	pub group: u32,
}

/// A directed, weighted "uses" edge between two node ids.
///
/// Either end may name an id that has no [`GraphNode`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphLink {
	/// Id of the node doing the using.
	pub source: String,
	/// Id of the node being used.
	pub target: String,
	/// Edge weight. Summed for frequency ordering.
	#[serde(default = "default_link_value")]
	pub value: f64,
}

impl GraphLink {
	/// Whether the link points back at its own source.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	/// Modules, in document order.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Edges, in document order.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parse a `{ nodes: [...], links: [...] }` document.
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}
}

//! Vertical list-with-arcs view.
//!
//! Nodes are listed one per row and links drawn as arcs between rows. The
//! rows can be reordered by group, by name, or by link frequency. Links are
//! resolved by id; a link with an end missing from the node list is left
//! out, self-loops are kept.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use log::debug;
use serde::Serialize;

use super::highlight::neighbourhood;
use crate::graph::{GraphData, GraphError};

/// A row of the list.
#[derive(Clone, Debug, PartialEq)]
pub struct ListNode {
	/// Node id, also the row label.
	pub id: String,
	/// Cluster tag.
	pub group: u32,
	/// Indices of links leaving this node.
	pub source_links: Vec<usize>,
	/// Indices of links arriving at this node.
	pub target_links: Vec<usize>,
}

/// An arc between two rows, by node index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListLink {
	/// Row of the using node.
	pub source: usize,
	/// Row of the used node.
	pub target: usize,
	/// Link weight.
	pub value: f64,
}

/// Row ordering offered by the sort selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
	/// Group ascending, then id.
	Group,
	/// Id ascending.
	#[default]
	Name,
	/// Total link value descending, then id.
	Frequency,
}

impl FromStr for SortOrder {
	type Err = GraphError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Group" => Ok(SortOrder::Group),
			"Name" => Ok(SortOrder::Name),
			"Frequency" => Ok(SortOrder::Frequency),
			other => Err(GraphError::UnknownSortOrder {
				name: other.to_string(),
			}),
		}
	}
}

/// What hovering a row lights up.
#[derive(Clone, Debug, PartialEq)]
pub struct ListHighlight {
	/// The hovered row.
	pub primary: usize,
	/// Rows linked to or from it.
	pub secondary: BTreeSet<usize>,
	/// Links touching it.
	pub links: Vec<usize>,
}

/// Tooltip content for a row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
	/// Row label.
	pub id: String,
	/// Ids of nodes that use this one.
	pub used_by: Vec<String>,
	/// Ids of nodes this one uses.
	pub uses: Vec<String>,
}

/// The list view model.
#[derive(Clone, Debug, Default)]
pub struct VerticalView {
	nodes: Vec<ListNode>,
	links: Vec<ListLink>,
}

impl VerticalView {
	/// Build rows and arcs from the flat graph.
	pub fn new(data: &GraphData) -> Self {
		let mut nodes: Vec<ListNode> = data
			.nodes
			.iter()
			.map(|node| ListNode {
				id: node.id.clone(),
				group: node.group,
				source_links: Vec::new(),
				target_links: Vec::new(),
			})
			.collect();
		let by_id: HashMap<&str, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.as_str(), i))
			.collect();

		let mut links = Vec::with_capacity(data.links.len());
		for link in &data.links {
			let (Some(&source), Some(&target)) = (
				by_id.get(link.source.as_str()),
				by_id.get(link.target.as_str()),
			) else {
				debug!("list: dropping link {} -> {}", link.source, link.target);
				continue;
			};
			let idx = links.len();
			links.push(ListLink {
				source,
				target,
				value: link.value,
			});
			nodes[source].source_links.push(idx);
			nodes[target].target_links.push(idx);
		}

		Self { nodes, links }
	}

	/// Rows in input order.
	pub fn nodes(&self) -> &[ListNode] {
		&self.nodes
	}

	/// Arcs whose ends both resolved.
	pub fn links(&self) -> &[ListLink] {
		&self.links
	}

	/// Row index of `id`.
	pub fn position(&self, id: &str) -> Option<usize> {
		self.nodes.iter().rposition(|node| node.id == id)
	}

	/// Sum of the values of every link touching the row.
	pub fn frequency(&self, idx: usize) -> f64 {
		let node = &self.nodes[idx];
		node.source_links
			.iter()
			.chain(&node.target_links)
			.map(|&l| self.links[l].value)
			.sum()
	}

	/// Row indices in display order.
	pub fn order(&self, sort: SortOrder) -> Vec<usize> {
		let mut order: Vec<usize> = (0..self.nodes.len()).collect();
		let by_id = |a: usize, b: usize| self.nodes[a].id.cmp(&self.nodes[b].id);
		order.sort_by(|&a, &b| match sort {
			SortOrder::Name => by_id(a, b),
			SortOrder::Group => self.nodes[a]
				.group
				.cmp(&self.nodes[b].group)
				.then_with(|| by_id(a, b)),
			SortOrder::Frequency => self
				.frequency(b)
				.total_cmp(&self.frequency(a))
				.then_with(|| by_id(a, b)),
		});
		order
	}

	/// Ids in display order.
	pub fn ordered_ids(&self, sort: SortOrder) -> Vec<&str> {
		self.order(sort)
			.into_iter()
			.map(|i| self.nodes[i].id.as_str())
			.collect()
	}

	/// Rows and links lit up by hovering `idx`.
	pub fn highlight(&self, idx: usize) -> ListHighlight {
		let mut secondary = neighbourhood(idx, self.links.iter().map(|l| (l.source, l.target)));
		let self_loop = self
			.links
			.iter()
			.any(|l| l.source == idx && l.target == idx);
		if !self_loop {
			secondary.remove(&idx);
		}

		let links = self
			.links
			.iter()
			.enumerate()
			.filter(|(_, l)| l.source == idx || l.target == idx)
			.map(|(i, _)| i)
			.collect();

		ListHighlight {
			primary: idx,
			secondary,
			links,
		}
	}

	/// Tooltip lines for `idx`.
	pub fn summary(&self, idx: usize) -> NodeSummary {
		let node = &self.nodes[idx];
		let id_of = |i: usize| self.nodes[i].id.clone();
		NodeSummary {
			id: node.id.clone(),
			used_by: node
				.target_links
				.iter()
				.map(|&l| id_of(self.links[l].source))
				.collect(),
			uses: node
				.source_links
				.iter()
				.map(|&l| id_of(self.links[l].target))
				.collect(),
		}
	}

	/// Serializable form for the renderer.
	pub fn to_export(&self) -> VerticalExport {
		let id_of = |i: usize| self.nodes[i].id.clone();
		VerticalExport {
			nodes: (0..self.nodes.len())
				.map(|i| ListNodeExport {
					group: self.nodes[i].group,
					frequency: self.frequency(i),
					summary: self.summary(i),
				})
				.collect(),
			links: self
				.links
				.iter()
				.map(|l| ListLinkExport {
					source: id_of(l.source),
					target: id_of(l.target),
					value: l.value,
				})
				.collect(),
			orders: OrdersExport {
				group: self.owned_ids(SortOrder::Group),
				name: self.owned_ids(SortOrder::Name),
				frequency: self.owned_ids(SortOrder::Frequency),
			},
		}
	}

	fn owned_ids(&self, sort: SortOrder) -> Vec<String> {
		self.ordered_ids(sort).into_iter().map(str::to_string).collect()
	}
}

/// Row as sent to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNodeExport {
	#[serde(flatten)]
	#[allow(missing_docs)]
	pub summary: NodeSummary,
	#[allow(missing_docs)]
	pub group: u32,
	#[allow(missing_docs)]
	pub frequency: f64,
}

/// Arc as sent to the renderer, by node id.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ListLinkExport {
	pub source: String,
	pub target: String,
	pub value: f64,
}

/// Precomputed row orders, one per selector value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct OrdersExport {
	pub group: Vec<String>,
	pub name: Vec<String>,
	pub frequency: Vec<String>,
}

/// The list view as sent to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct VerticalExport {
	pub nodes: Vec<ListNodeExport>,
	pub links: Vec<ListLinkExport>,
	pub orders: OrdersExport,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphLink, GraphNode};

	fn sample() -> GraphData {
		let node = |id: &str, group| GraphNode {
			id: id.into(),
			group,
		};
		let link = |s: &str, t: &str, value| GraphLink {
			source: s.into(),
			target: t.into(),
			value,
		};
		GraphData {
			nodes: vec![node("c", 1), node("a", 2), node("b", 1)],
			links: vec![
				link("a", "b", 1.0),
				link("c", "b", 4.0),
				link("a", "missing", 2.0),
				link("b", "b", 1.0),
			],
		}
	}

	#[test]
	fn resolves_links_by_id() {
		let view = VerticalView::new(&sample());
		assert_eq!(view.links().len(), 3);
		assert_eq!(view.nodes()[1].source_links, [0]);
		assert_eq!(view.nodes()[2].target_links, [0, 1, 2]);
		assert_eq!(view.nodes()[2].source_links, [2]);
	}

	#[test]
	fn sort_orders() {
		let view = VerticalView::new(&sample());
		assert_eq!(view.ordered_ids(SortOrder::Name), ["a", "b", "c"]);
		assert_eq!(view.ordered_ids(SortOrder::Group), ["b", "c", "a"]);
		// b: 1 + 4 + 1 + 1, c: 4, a: 1
		assert_eq!(view.ordered_ids(SortOrder::Frequency), ["b", "c", "a"]);
		assert_eq!(view.frequency(2), 7.0);
	}

	#[test]
	fn parses_selector_values() {
		assert_eq!("Frequency".parse::<SortOrder>().unwrap(), SortOrder::Frequency);
		assert!(matches!(
			"Size".parse::<SortOrder>(),
			Err(GraphError::UnknownSortOrder { .. })
		));
	}

	#[test]
	fn highlight_marks_neighbours() {
		let view = VerticalView::new(&sample());

		let a = view.highlight(1);
		assert_eq!(a.secondary, BTreeSet::from([2]));
		assert_eq!(a.links, [0]);

		let b = view.highlight(2);
		assert_eq!(b.secondary, BTreeSet::from([0, 1, 2]));
		assert_eq!(b.links, [0, 1, 2]);
	}

	#[test]
	fn summary_lists_users_and_uses() {
		let view = VerticalView::new(&sample());
		let b = view.summary(2);
		assert_eq!(b.used_by, ["a", "c", "b"]);
		assert_eq!(b.uses, ["b"]);
	}

	#[test]
	fn export_uses_camel_case() {
		let view = VerticalView::new(&sample());
		let json = serde_json::to_value(view.to_export()).unwrap();
		assert_eq!(json["nodes"][1]["id"], "a");
		assert_eq!(json["nodes"][1]["uses"], serde_json::json!(["b"]));
		assert_eq!(json["nodes"][2]["usedBy"], serde_json::json!(["a", "c", "b"]));
		assert_eq!(json["orders"]["group"], serde_json::json!(["b", "c", "a"]));
	}
}

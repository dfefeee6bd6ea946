//! Flat node/link graph to hierarchy records.
//!
//! Every node id becomes a record named `root.id`. Links are folded into
//! the record of their source: as an import name for the radial view, or as
//! a weight increment for the packing view. A link whose source has no node
//! still produces a record, so no edge is lost.
//!
//! Records are accumulated by id, which makes the result independent of
//! link order. They come out sorted by id.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::config::HierarchyConfig;
use super::hierarchy::Record;
use super::overlay::Imports;
use super::types::GraphData;

/// Radial-view leaf payload: who the module uses, and how big it is drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleImports {
	/// Full record names of used modules, one entry per link.
	pub imports: Vec<String>,
	/// The node's group for explicit nodes, 1 for nodes only seen in links.
	pub size: u32,
}

impl Imports for ModuleImports {
	fn imports(&self) -> &[String] {
		&self.imports
	}
}

fn warn_duplicate(id: &str) {
	warn!("adapter: duplicate node id {:?}, keeping the last one", id);
}

/// Records for the radial view.
pub fn import_records(data: &GraphData, config: &HierarchyConfig) -> Vec<Record<ModuleImports>> {
	let mut by_id: BTreeMap<&str, ModuleImports> = BTreeMap::new();

	for node in &data.nodes {
		let fresh = ModuleImports {
			imports: Vec::new(),
			size: node.group,
		};
		if by_id.insert(&node.id, fresh).is_some() {
			warn_duplicate(&node.id);
		}
	}

	for link in data.links.iter().filter(|l| !l.is_self_loop()) {
		let target = config.qualify(&link.target);
		match by_id.get_mut(link.source.as_str()) {
			Some(record) => record.imports.push(target),
			None => {
				debug!("adapter: synthesizing record for link source {:?}", link.source);
				by_id.insert(
					&link.source,
					ModuleImports {
						imports: vec![target],
						size: 1,
					},
				);
			}
		}
	}

	by_id
		.into_iter()
		.map(|(id, payload)| Record::new(config.qualify(id), payload))
		.collect()
}

/// Records for the packing view: every node weighs 1, plus 1 per outgoing
/// link. A node seen only as a link source starts at 1 on its first link.
pub fn weight_records(data: &GraphData, config: &HierarchyConfig) -> Vec<Record<u32>> {
	let mut by_id: BTreeMap<&str, u32> = BTreeMap::new();

	for node in &data.nodes {
		if by_id.insert(&node.id, 1).is_some() {
			warn_duplicate(&node.id);
		}
	}

	for link in data.links.iter().filter(|l| !l.is_self_loop()) {
		by_id
			.entry(&link.source)
			.and_modify(|weight| *weight += 1)
			.or_insert(1);
	}

	by_id
		.into_iter()
		.map(|(id, weight)| Record::new(config.qualify(id), weight))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::types::{GraphLink, GraphNode};

	fn node(id: &str, group: u32) -> GraphNode {
		GraphNode {
			id: id.into(),
			group,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			value: 1.0,
		}
	}

	fn names<P>(records: &[Record<P>]) -> Vec<&str> {
		records.iter().map(|r| r.name.as_str()).collect()
	}

	#[test]
	fn prefixes_ids_and_collects_imports() {
		let data = GraphData {
			nodes: vec![node("b", 3), node("a", 1)],
			links: vec![link("a", "b"), link("a", "b"), link("a", "a")],
		};
		let records = import_records(&data, &HierarchyConfig::default());

		assert_eq!(names(&records), ["root.a", "root.b"]);
		assert_eq!(records[0].payload.imports, ["root.b", "root.b"]);
		assert_eq!(records[0].payload.size, 1);
		assert!(records[1].payload.imports.is_empty());
		assert_eq!(records[1].payload.size, 3);
	}

	#[test]
	fn dangling_source_gets_placeholder() {
		let data = GraphData {
			nodes: vec![],
			links: vec![link("x", "y"), link("x", "z")],
		};
		let records = import_records(&data, &HierarchyConfig::default());

		assert_eq!(names(&records), ["root.x"]);
		assert_eq!(records[0].payload.imports, ["root.y", "root.z"]);
		assert_eq!(records[0].payload.size, 1);
	}

	#[test]
	fn weights_count_outgoing_links() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("b", 1)],
			links: vec![
				link("a", "b"),
				link("a", "b"),
				link("b", "b"),
				link("ghost", "a"),
				link("ghost", "b"),
			],
		};
		let records = weight_records(&data, &HierarchyConfig::default());

		let weights: Vec<(&str, u32)> = records.iter().map(|r| (r.name.as_str(), r.payload)).collect();
		assert_eq!(weights, [("root.a", 3), ("root.b", 1), ("root.ghost", 2)]);
	}

	#[test]
	fn honours_configured_root() {
		let config = HierarchyConfig {
			delimiter: "/".into(),
			root: "deps".into(),
		};
		let data = GraphData {
			nodes: vec![node("a", 1)],
			links: vec![link("a", "b")],
		};
		let records = import_records(&data, &config);
		assert_eq!(names(&records), ["deps/a"]);
		assert_eq!(records[0].payload.imports, ["deps/b"]);
	}

	#[test]
	fn duplicate_node_ids_keep_last() {
		let data = GraphData {
			nodes: vec![node("a", 1), node("a", 4)],
			links: vec![],
		};
		let records = import_records(&data, &HierarchyConfig::default());
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].payload.size, 4);
	}
}

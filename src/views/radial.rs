//! Radial hierarchical-edge-bundling view.
//!
//! Leaves sit on a circle in name order; each resolved use is drawn as a
//! curve routed through the tree via the leaves' common ancestor. Hovering a
//! leaf colours the leaves that use it ("in") and the leaves it uses
//! ("out").

use serde::Serialize;

use crate::graph::{
	Bilinked, GraphData, HierarchyConfig, LeafLink, ModuleImports, NodeId, Tree, import_records,
};

/// What hovering a leaf lights up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadialHighlight {
	/// The hovered leaf.
	pub leaf: NodeId,
	/// Links arriving at the leaf.
	pub incoming: Vec<LeafLink>,
	/// Links leaving the leaf, unresolved ones included.
	pub outgoing: Vec<LeafLink>,
	/// Leaves using the hovered one, coloured "in".
	pub sources: Vec<NodeId>,
	/// Resolved leaves it uses, coloured "out".
	pub targets: Vec<NodeId>,
}

/// The radial view model.
#[derive(Clone, Debug)]
pub struct RadialView {
	graph: Bilinked<ModuleImports>,
	leaves: Vec<NodeId>,
}

impl RadialView {
	/// Build the bilinked tree for the flat graph. Ids that cannot be placed
	/// in the tree are skipped; an empty graph yields a lone root.
	pub fn build(data: &GraphData, config: &HierarchyConfig) -> Self {
		let records = import_records(data, config);
		Self::from_tree(Tree::build_lenient(records, &config.delimiter, &config.root))
	}

	/// Resolve links over an already built tree.
	pub fn from_tree(tree: Tree<ModuleImports>) -> Self {
		let graph = Bilinked::new(tree);
		let leaves = {
			let tree = graph.tree();
			tree.preorder_by(|a, b| tree.display_name(a).cmp(tree.display_name(b)))
				.into_iter()
				.filter(|&id| tree.is_leaf(id))
				.collect()
		};
		Self { graph, leaves }
	}

	/// The tree and its leaf links.
	pub fn graph(&self) -> &Bilinked<ModuleImports> {
		&self.graph
	}

	/// Leaves in circle order: every level sorted by display name.
	pub fn leaves(&self) -> &[NodeId] {
		&self.leaves
	}

	/// Leaves and links lit up by hovering `leaf`.
	pub fn highlight(&self, leaf: NodeId) -> RadialHighlight {
		let incoming = self.graph.incoming(leaf).to_vec();
		let outgoing = self.graph.outgoing(leaf).to_vec();
		RadialHighlight {
			leaf,
			sources: incoming.iter().map(|l| l.source).collect(),
			targets: outgoing.iter().filter_map(|l| l.target).collect(),
			incoming,
			outgoing,
		}
	}

	/// Hover title: full path and link counts.
	pub fn title(&self, leaf: NodeId) -> String {
		format!(
			"{}\n{} outgoing\n{} incoming",
			self.graph.tree().full_path(leaf),
			self.graph.outgoing(leaf).len(),
			self.graph.incoming(leaf).len()
		)
	}

	/// Bundled route for a link; unresolved links are not drawn.
	pub fn route(&self, link: &LeafLink) -> Option<Vec<NodeId>> {
		link.target.map(|target| self.graph.tree().path(link.source, target))
	}

	/// Serializable form for the renderer.
	pub fn to_export(&self) -> RadialExport {
		let tree = self.graph.tree();
		let name = |id: NodeId| tree.node(id).name().to_string();
		let bundles = self
			.graph
			.links()
			.iter()
			.filter_map(|link| {
				let route = self.route(link)?;
				Some(BundleExport {
					source: name(link.source),
					target: name(link.target?),
					route: route.into_iter().map(name).collect(),
				})
			})
			.collect();
		RadialExport {
			tree: self.export_node(tree.root()),
			bundles,
		}
	}

	fn export_node(&self, id: NodeId) -> RadialNodeExport {
		let tree = self.graph.tree();
		let name = |id: NodeId| tree.node(id).name().to_string();

		let mut children = tree.children(id).to_vec();
		children.sort_by(|&a, &b| tree.display_name(a).cmp(tree.display_name(b)));

		RadialNodeExport {
			name: tree.segment(id).to_string(),
			full_name: name(id),
			display_name: tree.display_name(id).to_string(),
			size: tree.payload(id).map(|p| p.size),
			children: (!tree.is_leaf(id))
				.then(|| children.into_iter().map(|c| self.export_node(c)).collect()),
			outgoing: self
				.graph
				.outgoing(id)
				.iter()
				.map(|l| l.target.map(name))
				.collect(),
			incoming: self
				.graph
				.incoming(id)
				.iter()
				.map(|l| name(l.source))
				.collect(),
		}
	}
}

/// A tree node as sent to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialNodeExport {
	/// Own segment.
	pub name: String,
	/// Full dotted name.
	pub full_name: String,
	/// Name without the root segment, used as the label.
	pub display_name: String,
	/// Leaf size, absent on containers.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size: Option<u32>,
	/// Children sorted by display name, absent on leaves.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub children: Option<Vec<RadialNodeExport>>,
	/// Full names of used leaves, `null` when unresolved.
	pub outgoing: Vec<Option<String>>,
	/// Full names of leaves using this one.
	pub incoming: Vec<String>,
}

/// One drawable curve.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct BundleExport {
	pub source: String,
	pub target: String,
	/// Node names from source through the common ancestor to target.
	pub route: Vec<String>,
}

/// The radial view as sent to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct RadialExport {
	pub tree: RadialNodeExport,
	pub bundles: Vec<BundleExport>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphLink, GraphNode, Record};

	fn data(nodes: &[&str], links: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: nodes
				.iter()
				.map(|&id| GraphNode {
					id: id.into(),
					group: 1,
				})
				.collect(),
			links: links
				.iter()
				.map(|&(s, t)| GraphLink {
					source: s.into(),
					target: t.into(),
					value: 1.0,
				})
				.collect(),
		}
	}

	#[test]
	fn leaves_sorted_by_display_name() {
		let view = RadialView::build(&data(&["c", "a", "b"], &[]), &HierarchyConfig::default());
		let tree = view.graph().tree();
		let names: Vec<&str> = view.leaves().iter().map(|&l| tree.display_name(l)).collect();
		assert_eq!(names, ["a", "b", "c"]);
	}

	#[test]
	fn hover_collects_in_and_out() {
		let view = RadialView::build(
			&data(&["a", "b", "c"], &[("a", "b"), ("c", "b"), ("b", "zzz")]),
			&HierarchyConfig::default(),
		);
		let tree = view.graph().tree();
		let id = |name: &str| tree.lookup(name).unwrap();

		let b = view.highlight(id("root.b"));
		assert_eq!(b.sources, [id("root.a"), id("root.c")]);
		assert!(b.targets.is_empty());
		assert_eq!(b.outgoing.len(), 1);
		assert_eq!(view.title(id("root.b")), "root.b\n1 outgoing\n2 incoming");
	}

	#[test]
	fn routes_pass_through_common_ancestor() {
		let tree = Tree::build(
			vec![
				Record::new(
					"root.x.a",
					ModuleImports {
						imports: vec!["root.y.b".into(), "root.nowhere".into()],
						size: 1,
					},
				),
				Record::new("root.y.b", ModuleImports::default()),
			],
			".",
		)
		.unwrap();
		let view = RadialView::from_tree(tree);
		let tree = view.graph().tree();
		let a = tree.lookup("root.x.a").unwrap();

		let links = view.graph().outgoing(a);
		let route: Vec<&str> = view
			.route(&links[0])
			.unwrap()
			.into_iter()
			.map(|n| tree.node(n).name())
			.collect();
		assert_eq!(route, ["root.x.a", "root.x", "root", "root.y", "root.y.b"]);
		assert_eq!(view.route(&links[1]), None);

		let export = serde_json::to_value(view.to_export()).unwrap();
		assert_eq!(export["bundles"].as_array().unwrap().len(), 1);
		assert_eq!(
			export["tree"]["children"][0]["children"][0]["outgoing"],
			serde_json::json!(["root.y.b", null])
		);
	}

	#[test]
	fn empty_graph_builds_lone_root() {
		let view = RadialView::build(&GraphData::default(), &HierarchyConfig::default());
		assert!(view.leaves().is_empty());
		let export = serde_json::to_value(view.to_export()).unwrap();
		assert_eq!(export["tree"]["name"], "root");
		assert_eq!(export["tree"]["children"], serde_json::json!([]));
	}
}

//! Bidirectional leaf links ("bilink") over a finished hierarchy.
//!
//! Each leaf names the leaves it uses by full path. Resolution happens once,
//! against the complete leaf set, and produces for every leaf (and for any
//! container a record was folded into):
//!
//! - `outgoing`: one [`LeafLink`] per import, resolved or not, in import order.
//! - `incoming`: every resolved link from another leaf that targets it.
//!
//! [`Bilinked`] takes the tree by value, so the overlay can neither be built
//! before the tree is complete nor go stale afterwards.

use std::collections::HashMap;

use log::debug;

use super::hierarchy::{NodeId, Tree};

/// Leaf payloads that reference other leaves by full name.
pub trait Imports {
	/// Full names of the used leaves. Repeats are allowed and kept.
	fn imports(&self) -> &[String];
}

/// One outgoing reference of a leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafLink {
	/// The leaf holding the import.
	pub source: NodeId,
	/// The imported leaf, `None` when no leaf has that name.
	pub target: Option<NodeId>,
}

impl LeafLink {
	/// Whether the import matched a leaf.
	pub fn is_resolved(&self) -> bool {
		self.target.is_some()
	}
}

/// Incoming and outgoing links of one node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Adjacency {
	/// Resolved links pointing at the node.
	pub incoming: Vec<LeafLink>,
	/// Links declared by the node.
	pub outgoing: Vec<LeafLink>,
}

/// A tree together with its resolved leaf links.
#[derive(Clone, Debug)]
pub struct Bilinked<P> {
	tree: Tree<P>,
	adjacency: Vec<Adjacency>,
}

impl<P: Imports> Bilinked<P> {
	/// Resolve every leaf's imports against the full leaf set.
	pub fn new(tree: Tree<P>) -> Self {
		let leaves = tree.records();
		let by_path: HashMap<String, NodeId> = leaves
			.iter()
			.map(|&leaf| (tree.full_path(leaf), leaf))
			.collect();

		let mut adjacency = vec![Adjacency::default(); tree.node_count()];
		for &leaf in &leaves {
			let imports = tree.payload(leaf).map(|p| p.imports()).unwrap_or_default();
			adjacency[leaf.index()].outgoing = imports
				.iter()
				.map(|name| {
					let target = by_path.get(name).copied();
					if target.is_none() {
						debug!("bilink: {} uses unknown {}", tree.node(leaf).name(), name);
					}
					LeafLink {
						source: leaf,
						target,
					}
				})
				.collect();
		}

		for &leaf in &leaves {
			for i in 0..adjacency[leaf.index()].outgoing.len() {
				let link = adjacency[leaf.index()].outgoing[i];
				if let Some(target) = link.target {
					adjacency[target.index()].incoming.push(link);
				}
			}
		}

		Self { tree, adjacency }
	}
}

impl<P> Bilinked<P> {
	/// The underlying hierarchy.
	pub fn tree(&self) -> &Tree<P> {
		&self.tree
	}

	/// Resolved links pointing at `id`.
	pub fn incoming(&self, id: NodeId) -> &[LeafLink] {
		&self.adjacency[id.index()].incoming
	}

	/// Links declared by `id`, unresolved ones included.
	pub fn outgoing(&self, id: NodeId) -> &[LeafLink] {
		&self.adjacency[id.index()].outgoing
	}

	/// Every outgoing link, sources in pre-order.
	pub fn links(&self) -> Vec<LeafLink> {
		self.tree
			.records()
			.into_iter()
			.flat_map(|leaf| self.outgoing(leaf).iter().copied())
			.collect()
	}

	/// Number of imports that matched no leaf.
	pub fn unresolved(&self) -> usize {
		self.adjacency
			.iter()
			.flat_map(|a| &a.outgoing)
			.filter(|link| !link.is_resolved())
			.count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::hierarchy::Record;

	struct Uses(Vec<String>);

	impl Imports for Uses {
		fn imports(&self) -> &[String] {
			&self.0
		}
	}

	fn record(name: &str, uses: &[&str]) -> Record<Uses> {
		Record::new(name, Uses(uses.iter().map(|s| s.to_string()).collect()))
	}

	fn bilinked(records: Vec<Record<Uses>>) -> Bilinked<Uses> {
		Bilinked::new(Tree::build(records, ".").unwrap())
	}

	#[test]
	fn resolves_links_in_both_directions() {
		let graph = bilinked(vec![
			record("root.a", &["root.b", "root.c"]),
			record("root.b", &["root.c"]),
			record("root.c", &[]),
		]);
		let tree = graph.tree();
		let id = |name: &str| tree.lookup(name).unwrap();

		assert_eq!(
			graph.outgoing(id("root.a")),
			[
				LeafLink { source: id("root.a"), target: Some(id("root.b")) },
				LeafLink { source: id("root.a"), target: Some(id("root.c")) },
			]
		);
		assert!(graph.incoming(id("root.a")).is_empty());
		assert_eq!(graph.incoming(id("root.c")).len(), 2);
		assert!(graph
			.incoming(id("root.c"))
			.iter()
			.all(|link| link.target == Some(id("root.c"))));
	}

	#[test]
	fn unresolved_imports_stay_outgoing_only() {
		let graph = bilinked(vec![record("root.x", &["root.y", "serde"])]);
		let x = graph.tree().lookup("root.x").unwrap();

		assert_eq!(graph.outgoing(x).len(), 2);
		assert!(graph.outgoing(x).iter().all(|l| l.target.is_none()));
		assert!(graph.incoming(x).is_empty());
		assert_eq!(graph.unresolved(), 2);
	}

	#[test]
	fn repeated_imports_are_kept() {
		let graph = bilinked(vec![
			record("root.a", &["root.b", "root.b"]),
			record("root.b", &[]),
		]);
		let tree = graph.tree();
		let b = tree.lookup("root.b").unwrap();
		assert_eq!(graph.outgoing(tree.lookup("root.a").unwrap()).len(), 2);
		assert_eq!(graph.incoming(b).len(), 2);
	}

	#[test]
	fn synthesized_containers_never_resolve() {
		let graph = bilinked(vec![
			record("root.pkg.a", &["root.pkg"]),
			record("root.pkg.b", &[]),
		]);
		let tree = graph.tree();
		let pkg = tree.lookup("root.pkg").unwrap();
		let a = tree.lookup("root.pkg.a").unwrap();

		assert_eq!(graph.outgoing(a)[0].target, None);
		assert!(graph.incoming(pkg).is_empty());
		assert!(graph.outgoing(pkg).is_empty());
	}

	#[test]
	fn folded_container_keeps_its_links() {
		let graph = bilinked(vec![
			record("root.pkg.a", &["root.pkg"]),
			record("root.pkg", &["root.b", "root.gone"]),
			record("root.b", &[]),
		]);
		let tree = graph.tree();
		let id = |name: &str| tree.lookup(name).unwrap();

		assert!(!tree.is_leaf(id("root.pkg")));
		assert_eq!(graph.outgoing(id("root.pkg.a"))[0].target, Some(id("root.pkg")));
		assert_eq!(graph.incoming(id("root.pkg")).len(), 1);
		assert_eq!(graph.incoming(id("root.b"))[0].source, id("root.pkg"));
		assert_eq!(graph.unresolved(), 1);
		assert_eq!(graph.links().len(), 3);
	}

	#[test]
	fn links_follow_leaf_order() {
		let graph = bilinked(vec![
			record("root.b", &["root.a"]),
			record("root.a", &["root.b", "root.z"]),
		]);
		let tree = graph.tree();
		let sources: Vec<&str> = graph
			.links()
			.iter()
			.map(|l| tree.node(l.source).name())
			.collect();
		assert_eq!(sources, ["root.b", "root.a", "root.a"]);
	}
}

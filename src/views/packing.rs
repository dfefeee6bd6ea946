//! Zoomable circle-packing view.
//!
//! Each module is a circle sized by its weight (1 plus one per outgoing
//! link). A container is sized by the sum of its children plus its own
//! weight: 1 for a synthesized path segment, the record's weight when one was
//! folded in, nothing for a bare root. Clicking a container zooms to it, and
//! only the labels of the focused container's children are shown.

use serde::Serialize;

use super::session::RenderSession;
use crate::graph::{GraphData, HierarchyConfig, NodeId, Tree, weight_records};

/// The packing view model.
#[derive(Clone, Debug)]
pub struct PackingView {
	tree: Tree<u32>,
	values: Vec<u64>,
}

impl PackingView {
	/// Build the weighted tree for the flat graph. Ids that cannot be placed
	/// in the tree are skipped; an empty graph yields a lone root.
	pub fn build(data: &GraphData, config: &HierarchyConfig) -> Self {
		let records = weight_records(data, config);
		Self::from_tree(Tree::build_lenient(records, &config.delimiter, &config.root))
	}

	/// Aggregate weights over an already built tree.
	pub fn from_tree(tree: Tree<u32>) -> Self {
		let mut values = vec![0u64; tree.node_count()];
		// Breadth-first reversed visits children before parents.
		for id in tree.descendants().into_iter().rev() {
			values[id.index()] += match tree.payload(id) {
				Some(&weight) => u64::from(weight),
				None if tree.parent(id).is_some() => 1,
				None => 0,
			};
			if let Some(parent) = tree.parent(id) {
				values[parent.index()] += values[id.index()];
			}
		}
		Self { tree, values }
	}

	/// The weighted hierarchy.
	pub fn tree(&self) -> &Tree<u32> {
		&self.tree
	}

	/// Own weight for leaves, total of the subtree for containers.
	pub fn value(&self, id: NodeId) -> u64 {
		self.values[id.index()]
	}

	/// Children, heaviest first.
	pub fn children(&self, id: NodeId) -> Vec<NodeId> {
		let mut children = self.tree.children(id).to_vec();
		children.sort_by(|&a, &b| self.value(b).cmp(&self.value(a)));
		children
	}

	/// Nodes drawn as circles: everything below the root, breadth-first.
	pub fn circles(&self) -> Vec<NodeId> {
		self.tree.descendants().into_iter().skip(1).collect()
	}

	/// A fresh focus on the root.
	pub fn focus(&self) -> PackingFocus {
		PackingFocus {
			root: self.tree.root(),
			focus: self.tree.root(),
		}
	}

	/// Whether `id`'s label is shown while `focus` is zoomed.
	pub fn label_visible(&self, id: NodeId, focus: &PackingFocus) -> bool {
		self.tree.parent(id) == Some(focus.current())
	}

	/// Serializable form for the renderer. Element ids come from `session`.
	pub fn to_export(&self, session: &mut RenderSession) -> PackingNodeExport {
		self.export_node(self.tree.root(), session)
	}

	fn export_node(&self, id: NodeId, session: &mut RenderSession) -> PackingNodeExport {
		let segment = self.tree.segment(id);
		PackingNodeExport {
			uid: session.uid(Some(segment)),
			name: segment.to_string(),
			value: self.value(id),
			children: (!self.tree.is_leaf(id)).then(|| {
				self.children(id)
					.into_iter()
					.map(|c| self.export_node(c, session))
					.collect()
			}),
		}
	}
}

/// Which container the packing view is zoomed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackingFocus {
	root: NodeId,
	focus: NodeId,
}

impl PackingFocus {
	/// The focused node.
	pub fn current(&self) -> NodeId {
		self.focus
	}

	/// Zoom to `target`. Returns `false` if it already has focus.
	pub fn zoom(&mut self, target: NodeId) -> bool {
		if self.focus == target {
			return false;
		}
		self.focus = target;
		true
	}

	/// Zoom back out to the root (background click).
	pub fn reset(&mut self) -> bool {
		self.zoom(self.root)
	}
}

/// A circle as sent to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PackingNodeExport {
	/// Element id, unique within the render.
	pub uid: String,
	/// Own segment, used as the label.
	pub name: String,
	/// Aggregated weight.
	pub value: u64,
	/// Children heaviest first, absent on leaves.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub children: Option<Vec<PackingNodeExport>>,
}

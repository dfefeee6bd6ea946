//! Hover tracking for the interactive views.
//!
//! The views compute what a hovered node lights up; [`HoverState`] keeps the
//! current result and only recomputes when the hovered node changes, so
//! repeated mouse-move events over the same node are free.

use std::collections::BTreeSet;

/// The hovered node plus its neighbours, from an undirected edge list.
///
/// A self-loop adds nothing beyond the node itself.
pub fn neighbourhood<K>(node: K, edges: impl IntoIterator<Item = (K, K)>) -> BTreeSet<K>
where
	K: Copy + Ord,
{
	let mut set = BTreeSet::from([node]);
	for (src, tgt) in edges {
		if src == node {
			set.insert(tgt);
		} else if tgt == node {
			set.insert(src);
		}
	}
	set
}

/// Currently hovered node and the highlight computed for it.
#[derive(Clone, Debug)]
pub struct HoverState<K, H> {
	hovered: Option<K>,
	highlight: Option<H>,
}

impl<K, H> Default for HoverState<K, H> {
	fn default() -> Self {
		Self {
			hovered: None,
			highlight: None,
		}
	}
}

impl<K: Copy + PartialEq, H> HoverState<K, H> {
	/// Update the hovered node, computing its highlight with `compute`.
	///
	/// Returns `false` when nothing changed.
	pub fn set_hover(&mut self, node: Option<K>, compute: impl FnOnce(K) -> H) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		self.highlight = node.map(compute);
		true
	}

	/// Highlight for the hovered node, if any.
	pub fn highlight(&self) -> Option<&H> {
		self.highlight.as_ref()
	}
}

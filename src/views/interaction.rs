//! Interaction state shared between the host's event handlers and the
//! view models.
//!
//! The host forwards hover, click and sort events by node name; this state
//! answers with what to highlight or show. The views themselves are never
//! modified.

use serde::Serialize;

use super::highlight::HoverState;
use super::packing::PackingFocus;
use super::radial::RadialHighlight;
use super::vertical::{ListHighlight, NodeSummary, SortOrder};
use super::DependencyViews;
use crate::graph::{NodeId, Result};

/// Highlighted row, by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowHighlight {
	/// Hovered row.
	pub primary: String,
	/// Rows linked to or from it.
	pub secondary: Vec<String>,
	/// Tooltip content.
	pub summary: NodeSummary,
}

/// Highlighted leaf, by full name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeafHighlight {
	/// Hovered leaf.
	pub leaf: String,
	/// Hover title.
	pub title: String,
	/// Leaves using it.
	pub incoming: Vec<String>,
	/// Leaves it uses that resolved.
	pub outgoing: Vec<String>,
}

/// Hover, sort and zoom state over one set of views.
#[derive(Clone, Debug)]
pub struct ViewState {
	views: DependencyViews,
	sort: SortOrder,
	rows: HoverState<usize, ListHighlight>,
	leaves: HoverState<NodeId, RadialHighlight>,
	focus: PackingFocus,
}

impl ViewState {
	/// Start unhovered, sorted by name, zoomed out.
	pub fn new(views: DependencyViews) -> Self {
		let focus = views.packing.focus();
		Self {
			views,
			sort: SortOrder::default(),
			rows: HoverState::default(),
			leaves: HoverState::default(),
			focus,
		}
	}

	/// The underlying views.
	pub fn views(&self) -> &DependencyViews {
		&self.views
	}

	/// Change the list order from a selector value; returns ids in the new
	/// order.
	pub fn sort(&mut self, order: &str) -> Result<Vec<String>> {
		self.sort = order.parse()?;
		Ok(self.row_order())
	}

	/// Ids in the current list order.
	pub fn row_order(&self) -> Vec<String> {
		self.views
			.vertical
			.ordered_ids(self.sort)
			.into_iter()
			.map(str::to_string)
			.collect()
	}

	/// Hover a row by id; unknown ids clear the hover. Returns whether the
	/// highlight changed.
	pub fn hover_row(&mut self, id: Option<&str>) -> bool {
		let vertical = &self.views.vertical;
		let row = id.and_then(|id| vertical.position(id));
		self.rows.set_hover(row, |idx| vertical.highlight(idx))
	}

	/// Current row highlight.
	pub fn row_highlight(&self) -> Option<RowHighlight> {
		let vertical = &self.views.vertical;
		let highlight = self.rows.highlight()?;
		let id = |idx: usize| vertical.nodes()[idx].id.clone();
		Some(RowHighlight {
			primary: id(highlight.primary),
			secondary: highlight.secondary.iter().map(|&idx| id(idx)).collect(),
			summary: vertical.summary(highlight.primary),
		})
	}

	/// Hover a radial leaf by full name; containers and unknown names clear
	/// the hover.
	pub fn hover_leaf(&mut self, name: Option<&str>) -> bool {
		let radial = &self.views.radial;
		let tree = radial.graph().tree();
		let leaf = name
			.and_then(|name| tree.lookup(name))
			.filter(|&id| tree.is_leaf(id));
		self.leaves.set_hover(leaf, |leaf| radial.highlight(leaf))
	}

	/// Current leaf highlight.
	pub fn leaf_highlight(&self) -> Option<LeafHighlight> {
		let radial = &self.views.radial;
		let tree = radial.graph().tree();
		let highlight = self.leaves.highlight()?;
		let name = |id: NodeId| tree.node(id).name().to_string();
		Some(LeafHighlight {
			leaf: name(highlight.leaf),
			title: radial.title(highlight.leaf),
			incoming: highlight.sources.iter().map(|&id| name(id)).collect(),
			outgoing: highlight.targets.iter().map(|&id| name(id)).collect(),
		})
	}

	/// Zoom the packing view to a container by full name, or back to the
	/// root with `None`. Leaves cannot take focus.
	pub fn zoom(&mut self, name: Option<&str>) -> bool {
		let tree = self.views.packing.tree();
		match name {
			None => self.focus.reset(),
			Some(name) => match tree.lookup(name) {
				Some(id) if !tree.is_leaf(id) => self.focus.zoom(id),
				_ => false,
			},
		}
	}

	/// Segments of the labels shown at the current zoom.
	pub fn visible_labels(&self) -> Vec<String> {
		let packing = &self.views.packing;
		packing
			.circles()
			.into_iter()
			.filter(|&id| packing.label_visible(id, &self.focus))
			.map(|id| packing.tree().segment(id).to_string())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphData, HierarchyConfig};

	fn state() -> ViewState {
		let data = GraphData::from_json(
			r#"{
				"nodes": [{"id":"a","group":2},{"id":"b","group":1},{"id":"c","group":1}],
				"links": [
					{"source":"a","target":"b","value":1},
					{"source":"b","target":"c","value":2},
					{"source":"a","target":"a","value":9}
				]
			}"#,
		)
		.unwrap();
		ViewState::new(DependencyViews::build(&data, &HierarchyConfig::default()))
	}

	#[test]
	fn sorting_by_selector_value() {
		let mut state = state();
		assert_eq!(state.row_order(), ["a", "b", "c"]);
		assert_eq!(state.sort("Group").unwrap(), ["b", "c", "a"]);
		assert!(state.sort("Bogus").is_err());
		assert_eq!(state.row_order(), ["b", "c", "a"]);
	}

	#[test]
	fn row_hover_round_trip() {
		let mut state = state();
		assert!(state.hover_row(Some("b")));
		assert!(!state.hover_row(Some("b")));

		let highlight = state.row_highlight().unwrap();
		assert_eq!(highlight.primary, "b");
		assert_eq!(highlight.secondary, ["a", "c"]);
		assert_eq!(highlight.summary.used_by, ["a"]);
		assert_eq!(highlight.summary.uses, ["c"]);

		assert!(state.hover_row(Some("nope")));
		assert!(state.row_highlight().is_none());
	}

	#[test]
	fn leaf_hover_uses_overlay() {
		let mut state = state();
		assert!(!state.hover_leaf(Some("root")));
		assert!(state.hover_leaf(Some("root.b")));

		let highlight = state.leaf_highlight().unwrap();
		assert_eq!(highlight.incoming, ["root.a"]);
		assert_eq!(highlight.outgoing, ["root.c"]);
		assert_eq!(highlight.title, "root.b\n1 outgoing\n1 incoming");
	}

	#[test]
	fn zoom_only_on_containers() {
		let mut state = state();
		assert_eq!(state.visible_labels(), ["a", "b", "c"]);
		assert!(!state.zoom(Some("root.a")));
		assert!(!state.zoom(None));
		assert!(!state.zoom(Some("root")));
	}
}

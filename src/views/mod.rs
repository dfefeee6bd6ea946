//! View models for the three dependency layouts.
//!
//! Each view is built from the same flat graph but owns its own structures:
//! - [`vertical`]: sortable list with arcs
//! - [`radial`]: hierarchical edge bundling over the name tree
//! - [`packing`]: zoomable nested circles weighted by use count
//!
//! Drawing is left to the host; these models provide orders, highlight sets,
//! labels, routes and weights, plus a JSON export of everything a renderer
//! needs.

pub mod highlight;
pub mod interaction;
pub mod packing;
pub mod radial;
pub mod session;
pub mod vertical;

use log::info;
use serde::Serialize;

use crate::graph::{GraphData, HierarchyConfig};

pub use highlight::HoverState;
pub use interaction::{LeafHighlight, RowHighlight, ViewState};
pub use packing::{PackingFocus, PackingNodeExport, PackingView};
pub use radial::{RadialExport, RadialHighlight, RadialView};
pub use session::RenderSession;
pub use vertical::{ListHighlight, SortOrder, VerticalExport, VerticalView};

/// All three views for one graph.
#[derive(Clone, Debug)]
pub struct DependencyViews {
	/// List-with-arcs view.
	pub vertical: VerticalView,
	/// Edge-bundling view.
	pub radial: RadialView,
	/// Circle-packing view.
	pub packing: PackingView,
}

impl DependencyViews {
	/// Build every view from `data`. Each view owns its own structures, so
	/// ids the trees cannot place only go missing from the tree views.
	pub fn build(data: &GraphData, config: &HierarchyConfig) -> Self {
		let views = Self {
			vertical: VerticalView::new(data),
			radial: RadialView::build(data, config),
			packing: PackingView::build(data, config),
		};
		info!(
			"views: {} rows, {} leaves, {} unresolved imports",
			views.vertical.nodes().len(),
			views.radial.leaves().len(),
			views.radial.graph().unresolved()
		);
		views
	}

	/// Renderer payload for all views, with element ids from a fresh session.
	pub fn to_export(&self) -> ViewsExport {
		let mut session = RenderSession::new();
		ViewsExport {
			vertical: self.vertical.to_export(),
			radial: self.radial.to_export(),
			packing: self.packing.to_export(&mut session),
		}
	}
}

/// What the renderer receives.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ViewsExport {
	pub vertical: VerticalExport,
	pub radial: RadialExport,
	pub packing: PackingNodeExport,
}

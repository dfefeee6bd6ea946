//! dep-graph: data models for interactive dependency graph views.
//!
//! Turns a flat `{ nodes, links }` dependency graph into the structures
//! behind three layouts (a sortable list with arcs, a radial edge-bundling
//! view, and a zoomable circle packing). Drawing stays in the host page; this
//! crate is compiled to WASM and answers the host's build, hover, sort and
//! zoom calls with JSON.

use log::{Level, info, warn};
use wasm_bindgen::prelude::*;

pub mod graph;
pub mod views;

pub use graph::{
	Bilinked, DataSource, GraphData, GraphError, GraphLink, GraphNode, HierarchyConfig, LeafLink,
	NodeId, Record, Tree,
};
pub use views::{DependencyViews, SortOrder, ViewState};

/// Initialize logging and panic hooks for the WASM target.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("dep-graph: logging initialized");
}

/// Graph document to fetch for a page location.
#[wasm_bindgen(js_name = dataPath)]
pub fn data_path(href: &str) -> String {
	DataSource::from_location(href).path().to_string()
}

/// Graph document to fetch for the current page.
#[wasm_bindgen(js_name = currentDataPath)]
pub fn current_data_path() -> String {
	let href = web_sys::window()
		.and_then(|window| window.location().href().ok())
		.unwrap_or_default();
	data_path(&href)
}

/// Parse a graph document and build all views.
pub fn load_views(json: &str, config: &HierarchyConfig) -> graph::Result<DependencyViews> {
	let data = match GraphData::from_json(json) {
		Ok(data) => data,
		Err(e) => {
			warn!("dep-graph: failed to parse graph data: {}", e);
			return Err(e.into());
		}
	};
	info!(
		"dep-graph: loaded {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Ok(DependencyViews::build(&data, config))
}

/// Parse optional host configuration, falling back to defaults.
fn parse_config(config: Option<String>) -> graph::Result<HierarchyConfig> {
	match config {
		Some(text) => Ok(serde_json::from_str(&text)?),
		None => Ok(HierarchyConfig::default()),
	}
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
	js_sys::Error::new(&err.to_string()).into()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
	serde_json::to_string(value).map_err(js_error)
}

/// One-shot build: graph JSON in, renderer payload JSON out.
#[wasm_bindgen(js_name = buildViews)]
pub fn build_views(json: &str) -> Result<String, JsValue> {
	let views = load_views(json, &HierarchyConfig::default()).map_err(js_error)?;
	to_json(&views.to_export())
}

/// Views plus interaction state, held by the host page for its lifetime.
#[wasm_bindgen]
pub struct Viewer {
	state: ViewState,
}

#[wasm_bindgen]
impl Viewer {
	/// Build from a graph document and an optional `HierarchyConfig` JSON.
	#[wasm_bindgen(constructor)]
	pub fn new(json: &str, config: Option<String>) -> Result<Viewer, JsValue> {
		let config = parse_config(config).map_err(js_error)?;
		let views = load_views(json, &config).map_err(js_error)?;
		Ok(Viewer {
			state: ViewState::new(views),
		})
	}

	/// Renderer payload for all views.
	pub fn export(&self) -> Result<String, JsValue> {
		to_json(&self.state.views().to_export())
	}

	/// Reorder the list by selector value; returns the ids as JSON.
	pub fn sort(&mut self, order: &str) -> Result<String, JsValue> {
		let ids = self.state.sort(order).map_err(js_error)?;
		to_json(&ids)
	}

	/// Hover a list row; `undefined` clears. Returns whether to redraw.
	#[wasm_bindgen(js_name = hoverRow)]
	pub fn hover_row(&mut self, id: Option<String>) -> bool {
		self.state.hover_row(id.as_deref())
	}

	/// Current row highlight as JSON, `null` when nothing is hovered.
	#[wasm_bindgen(js_name = rowHighlight)]
	pub fn row_highlight(&self) -> Result<String, JsValue> {
		to_json(&self.state.row_highlight())
	}

	/// Hover a radial leaf by full name; `undefined` clears.
	#[wasm_bindgen(js_name = hoverLeaf)]
	pub fn hover_leaf(&mut self, name: Option<String>) -> bool {
		self.state.hover_leaf(name.as_deref())
	}

	/// Current leaf highlight as JSON, `null` when nothing is hovered.
	#[wasm_bindgen(js_name = leafHighlight)]
	pub fn leaf_highlight(&self) -> Result<String, JsValue> {
		to_json(&self.state.leaf_highlight())
	}

	/// Zoom the packing view to a container; `undefined` zooms out.
	pub fn zoom(&mut self, name: Option<String>) -> bool {
		self.state.zoom(name.as_deref())
	}

	/// Labels visible at the current zoom, as JSON.
	#[wasm_bindgen(js_name = visibleLabels)]
	pub fn visible_labels(&self) -> Result<String, JsValue> {
		to_json(&self.state.visible_labels())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn picks_data_path_from_href() {
		assert_eq!(data_path("http://localhost:9000/?demo"), "demo.json");
		assert_eq!(data_path("http://localhost:9000/index.html"), "output.json");
	}

	#[test]
	fn load_views_reports_bad_json() {
		let err = load_views("{not json", &HierarchyConfig::default()).unwrap_err();
		assert!(matches!(err, GraphError::Json(_)));
	}

	#[test]
	fn host_config_is_optional() {
		assert_eq!(parse_config(None).unwrap(), HierarchyConfig::default());
		let custom = parse_config(Some(r#"{"delimiter":"/"}"#.to_string())).unwrap();
		assert_eq!(custom.delimiter, "/");
		assert_eq!(custom.root, "root");
	}
}

//! Naming and data-source configuration.
//!
//! Every id in the flat graph is placed under one synthetic root segment so
//! that the hierarchy always has a single root:
//!
//! - `HierarchyConfig::root` is that segment (`root` by default).
//! - `HierarchyConfig::delimiter` separates path segments (`.` by default).
//!
//! `DataSource` picks which document the host should fetch.

use serde::Deserialize;

/// How record names are formed and split.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HierarchyConfig {
	/// Separator between path segments.
	pub delimiter: String,
	/// Synthetic segment every node id is prefixed with.
	pub root: String,
}

impl Default for HierarchyConfig {
	fn default() -> Self {
		Self {
			delimiter: ".".to_string(),
			root: "root".to_string(),
		}
	}
}

impl HierarchyConfig {
	/// Full record name for a flat node id (`root.id`).
	pub fn qualify(&self, id: &str) -> String {
		format!("{}{}{}", self.root, self.delimiter, id)
	}
}

/// Which graph document a page should load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
	/// Bundled sample data.
	Demo,
	/// Document produced by the analyzer run.
	Output,
}

impl DataSource {
	/// Select the source from the page location: any URL mentioning `demo`
	/// loads the demo data.
	pub fn from_location(href: &str) -> Self {
		if href.contains("demo") {
			DataSource::Demo
		} else {
			DataSource::Output
		}
	}

	/// Relative path of the JSON document.
	pub fn path(self) -> &'static str {
		match self {
			DataSource::Demo => "demo.json",
			DataSource::Output => "output.json",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn qualifies_ids_under_root() {
		assert_eq!(HierarchyConfig::default().qualify("a"), "root.a");
		let slashed = HierarchyConfig {
			delimiter: "/".into(),
			root: "top".into(),
		};
		assert_eq!(slashed.qualify("x"), "top/x");
	}

	#[test]
	fn partial_config_keeps_defaults() {
		let config: HierarchyConfig = serde_json::from_str(r#"{"root":"deps"}"#).unwrap();
		assert_eq!(config.delimiter, ".");
		assert_eq!(config.root, "deps");
	}

	#[test]
	fn picks_source_from_location() {
		assert_eq!(
			DataSource::from_location("http://127.0.0.1:9000/demo.html").path(),
			"demo.json"
		);
		assert_eq!(
			DataSource::from_location("http://127.0.0.1:9000/").path(),
			"output.json"
		);
	}
}

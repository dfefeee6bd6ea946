//! Graph model: flat input, name hierarchy, and leaf link overlay.
//!
//! Pipeline:
//! - [`types`]: the `{ nodes, links }` document.
//! - [`adapter`]: node ids and links folded into named records.
//! - [`hierarchy`]: records split on the delimiter into a rooted tree.
//! - [`overlay`]: leaf imports resolved into incoming/outgoing links.
//!
//! # Example
//!
//! ```
//! use dep_graph::graph::{import_records, Bilinked, GraphData, HierarchyConfig, Tree};
//!
//! let data = GraphData::from_json(
//!     r#"{"nodes":[{"id":"a","group":1},{"id":"b","group":1}],
//!         "links":[{"source":"a","target":"b","value":1}]}"#,
//! )
//! .unwrap();
//! let config = HierarchyConfig::default();
//! let tree = Tree::build(import_records(&data, &config), &config.delimiter).unwrap();
//! let graph = Bilinked::new(tree);
//!
//! let b = graph.tree().lookup("root.b").unwrap();
//! assert_eq!(graph.incoming(b).len(), 1);
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod overlay;
pub mod types;

pub use adapter::{ModuleImports, import_records, weight_records};
pub use config::{DataSource, HierarchyConfig};
pub use error::{GraphError, Result};
pub use hierarchy::{NodeId, Record, Tree, TreeNode};
pub use overlay::{Adjacency, Bilinked, Imports, LeafLink};
pub use types::{GraphData, GraphLink, GraphNode};

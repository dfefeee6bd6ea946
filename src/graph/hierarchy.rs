//! Name-path hierarchy construction.
//!
//! Turns a flat list of delimiter-separated record names into a rooted tree.
//! Every proper prefix of a record name becomes an internal node, created on
//! first use; every record becomes a leaf carrying its payload. Nodes live in
//! an arena and refer to each other by [`NodeId`].
//!
//! ```text
//! root.pkg.a ─┐          root
//! root.pkg.b ─┼──►        ├─ pkg
//! root.c     ─┘           │   ├─ a
//!                         │   └─ b
//!                         └─ c
//! ```
//!
//! A name without a delimiter is the root, which is always a container. A
//! record whose name is also the prefix of other records (the root record
//! included) is folded into the container at that name and keeps its
//! payload there.
//!
//! Construction is validated up front, so record order never changes which
//! inputs are accepted or the shape of the result. Only sibling order
//! follows the input (first attachment wins).

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, warn};

use super::error::{GraphError, Result};

/// Handle to a node inside a [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	/// Position of the node in the arena.
	pub fn index(self) -> usize {
		self.0
	}
}

/// One named input to the hierarchy builder.
#[derive(Clone, Debug, PartialEq)]
pub struct Record<P> {
	/// Full delimiter-separated path, e.g. `root.pkg.mod`.
	pub name: String,
	/// Data carried by the resulting leaf.
	pub payload: P,
}

impl<P> Record<P> {
	/// Record named `name` carrying `payload`.
	pub fn new(name: impl Into<String>, payload: P) -> Self {
		Self {
			name: name.into(),
			payload,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
enum NodeKind<P> {
	Leaf {
		payload: P,
	},
	/// Path prefix; `payload` is set when a record was folded in.
	Internal {
		children: Vec<NodeId>,
		payload: Option<P>,
	},
}

impl<P> NodeKind<P> {
	fn container() -> Self {
		NodeKind::Internal {
			children: Vec::new(),
			payload: None,
		}
	}

	/// Container form of a node, keeping any payload.
	fn into_container(self) -> Self {
		match self {
			NodeKind::Leaf { payload } => NodeKind::Internal {
				children: Vec::new(),
				payload: Some(payload),
			},
			internal => internal,
		}
	}
}

/// A node of the hierarchy.
#[derive(Clone, Debug)]
pub struct TreeNode<P> {
	name: String,
	segment: String,
	parent: Option<NodeId>,
	kind: NodeKind<P>,
}

impl<P> TreeNode<P> {
	/// Full record name, never rewritten.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Last path segment; the label of the edge from the parent.
	pub fn segment(&self) -> &str {
		&self.segment
	}

	/// Back-reference to the parent, `None` for the root.
	pub fn parent(&self) -> Option<NodeId> {
		self.parent
	}

	/// Whether the node is an input record rather than a container.
	pub fn is_leaf(&self) -> bool {
		matches!(self.kind, NodeKind::Leaf { .. })
	}

	/// Children, empty for leaves.
	pub fn children(&self) -> &[NodeId] {
		match &self.kind {
			NodeKind::Leaf { .. } => &[],
			NodeKind::Internal { children, .. } => children,
		}
	}

	/// Payload of a leaf or of a container a record was folded into.
	pub fn payload(&self) -> Option<&P> {
		match &self.kind {
			NodeKind::Leaf { payload } => Some(payload),
			NodeKind::Internal { payload, .. } => payload.as_ref(),
		}
	}
}

/// Split at the last delimiter into `(parent, segment)`.
fn split_last<'n>(name: &'n str, delimiter: &str) -> Option<(&'n str, &'n str)> {
	name.rsplit_once(delimiter)
}

/// Every proper prefix of `name` that ends before a delimiter, shortest first.
fn prefixes<'n>(name: &'n str, delimiter: &'n str) -> impl Iterator<Item = &'n str> + 'n {
	name.match_indices(delimiter).map(move |(i, _)| &name[..i])
}

/// First segment of `name`, the root it belongs under.
fn first_segment<'n>(name: &'n str, delimiter: &str) -> &'n str {
	name.split_once(delimiter).map_or(name, |(first, _)| first)
}

fn check_name(name: &str, delimiter: &str) -> Result<()> {
	if name.split(delimiter).any(str::is_empty) {
		return Err(GraphError::MalformedName {
			name: name.to_string(),
		});
	}
	Ok(())
}

/// Check the whole record set before anything is linked.
///
/// Returns the root segment.
fn validate<P>(records: &[Record<P>], delimiter: &str) -> Result<String> {
	if delimiter.is_empty() {
		return Err(GraphError::EmptyDelimiter);
	}

	let mut names = HashSet::with_capacity(records.len());
	let mut root: Option<&str> = None;
	for record in records {
		check_name(&record.name, delimiter)?;
		if !names.insert(record.name.as_str()) {
			return Err(GraphError::DuplicateRecord {
				name: record.name.clone(),
			});
		}

		let first = first_segment(&record.name, delimiter);
		match root {
			None => root = Some(first),
			Some(seen) if seen != first => {
				return Err(GraphError::MultipleRoots {
					first: seen.to_string(),
					second: first.to_string(),
				});
			}
			Some(_) => {}
		}
	}

	root.map(str::to_string).ok_or(GraphError::MissingRoot)
}

/// Arena under construction plus the name lookup used to memoize parents.
struct Builder<'d, P> {
	delimiter: &'d str,
	nodes: Vec<TreeNode<P>>,
	index: HashMap<String, NodeId>,
}

impl<'d, P> Builder<'d, P> {
	fn new(delimiter: &'d str, capacity: usize) -> Self {
		Self {
			delimiter,
			nodes: Vec::with_capacity(capacity),
			index: HashMap::with_capacity(capacity),
		}
	}

	/// Materialize the container for `name`, synthesizing its ancestors.
	fn container(&mut self, name: &str) -> NodeId {
		if let Some(&id) = self.index.get(name) {
			self.promote(id);
			return id;
		}
		let parent = split_last(name, self.delimiter).map(|(parent, _)| self.container(parent));
		self.attach(name.to_string(), parent, NodeKind::container())
	}

	/// A record seen before its children becomes their container.
	fn promote(&mut self, id: NodeId) {
		let node = &mut self.nodes[id.0];
		if node.is_leaf() {
			debug!("hierarchy: folding {:?} into a container", node.name);
			let kind = std::mem::replace(&mut node.kind, NodeKind::container());
			node.kind = kind.into_container();
		}
	}

	fn leaf(&mut self, record: Record<P>) -> NodeId {
		if let Some(&id) = self.index.get(&record.name) {
			debug!("hierarchy: folding {:?} into its container", record.name);
			if let NodeKind::Internal { payload, .. } = &mut self.nodes[id.0].kind {
				*payload = Some(record.payload);
			}
			return id;
		}

		match split_last(&record.name, self.delimiter) {
			Some((parent, _)) => {
				let parent = self.container(parent);
				let kind = NodeKind::Leaf {
					payload: record.payload,
				};
				self.attach(record.name, Some(parent), kind)
			}
			None => {
				let kind = NodeKind::Internal {
					children: Vec::new(),
					payload: Some(record.payload),
				};
				self.attach(record.name, None, kind)
			}
		}
	}

	fn attach(&mut self, name: String, parent: Option<NodeId>, kind: NodeKind<P>) -> NodeId {
		let id = NodeId(self.nodes.len());
		let segment = split_last(&name, self.delimiter).map_or(name.as_str(), |(_, own)| own);
		self.nodes.push(TreeNode {
			segment: segment.to_string(),
			name: name.clone(),
			parent,
			kind,
		});
		// Parents always come from `container`, which promotes leaves.
		if let Some(NodeKind::Internal { children, .. }) = parent.map(|p| &mut self.nodes[p.0].kind) {
			children.push(id);
		}
		self.index.insert(name, id);
		id
	}
}

/// A finished, immutable hierarchy.
#[derive(Clone, Debug)]
pub struct Tree<P> {
	nodes: Vec<TreeNode<P>>,
	index: HashMap<String, NodeId>,
	root: NodeId,
	delimiter: String,
}

impl<P> Tree<P> {
	/// Build the tree for `records`, splitting names on `delimiter`.
	pub fn build(records: Vec<Record<P>>, delimiter: &str) -> Result<Self> {
		let root_name = validate(&records, delimiter)?;

		let mut builder = Builder::new(delimiter, records.len() * 2);
		for record in records {
			builder.leaf(record);
		}

		let Builder { nodes, index, .. } = builder;
		let root = *index.get(&root_name).ok_or(GraphError::MissingRoot)?;
		debug!(
			"hierarchy: {} nodes under {:?}",
			nodes.len(),
			root_name
		);
		Ok(Self {
			nodes,
			index,
			root,
			delimiter: delimiter.to_string(),
		})
	}

	/// Build from the records that fit one tree under `root`, skipping the
	/// rest with a warning.
	///
	/// Malformed names, repeats and records under another root are dropped.
	/// With nothing left, or an empty delimiter, the result is a lone root.
	pub fn build_lenient(records: Vec<Record<P>>, delimiter: &str, root: &str) -> Self {
		if delimiter.is_empty() {
			warn!("hierarchy: {}, keeping only {:?}", GraphError::EmptyDelimiter, root);
			return Self::with_root(root, delimiter);
		}

		let mut names = HashSet::with_capacity(records.len());
		let mut kept = Vec::with_capacity(records.len());
		for record in records {
			let problem = if let Err(err) = check_name(&record.name, delimiter) {
				Some(err)
			} else if first_segment(&record.name, delimiter) != root {
				Some(GraphError::MultipleRoots {
					first: root.to_string(),
					second: first_segment(&record.name, delimiter).to_string(),
				})
			} else if !names.insert(record.name.clone()) {
				Some(GraphError::DuplicateRecord {
					name: record.name.clone(),
				})
			} else {
				None
			};
			match problem {
				Some(err) => warn!("hierarchy: skipping record: {}", err),
				None => kept.push(record),
			}
		}

		if kept.is_empty() {
			return Self::with_root(root, delimiter);
		}
		Self::build(kept, delimiter).unwrap_or_else(|err| {
			warn!("hierarchy: {}, keeping only {:?}", err, root);
			Self::with_root(root, delimiter)
		})
	}

	/// A tree holding only an empty root container.
	pub fn with_root(segment: &str, delimiter: &str) -> Self {
		let mut builder = Builder::new(delimiter, 1);
		let root = builder.attach(segment.to_string(), None, NodeKind::container());
		Self {
			nodes: builder.nodes,
			index: builder.index,
			root,
			delimiter: delimiter.to_string(),
		}
	}

	/// The single node without a parent.
	pub fn root(&self) -> NodeId {
		self.root
	}

	/// Number of nodes, leaves and containers alike.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Borrow a node. Panics on an id from another tree.
	pub fn node(&self, id: NodeId) -> &TreeNode<P> {
		&self.nodes[id.0]
	}

	/// Find a node by its full name.
	pub fn lookup(&self, name: &str) -> Option<NodeId> {
		self.index.get(name).copied()
	}

	/// Children of `id`, empty for leaves.
	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.node(id).children()
	}

	/// Parent of `id`, `None` for the root.
	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.node(id).parent
	}

	/// Whether `id` is a leaf.
	pub fn is_leaf(&self, id: NodeId) -> bool {
		self.node(id).is_leaf()
	}

	/// Payload of a leaf.
	pub fn payload(&self, id: NodeId) -> Option<&P> {
		self.node(id).payload()
	}

	/// Last path segment of `id`.
	pub fn segment(&self, id: NodeId) -> &str {
		self.node(id).segment()
	}

	/// Path rebuilt by walking parent links and joining segments.
	pub fn full_path(&self, id: NodeId) -> String {
		let mut segments: Vec<&str> = self
			.ancestors(id)
			.into_iter()
			.map(|a| self.segment(a))
			.collect();
		segments.reverse();
		segments.join(&self.delimiter)
	}

	/// Name without the root segment (`root.pkg.a` → `pkg.a`).
	pub fn display_name(&self, id: NodeId) -> &str {
		let name = self.node(id).name();
		name.split_once(self.delimiter.as_str())
			.map_or(name, |(_, rest)| rest)
	}

	/// The node itself followed by each parent up to the root.
	pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
		let mut chain = vec![id];
		let mut current = id;
		while let Some(parent) = self.parent(current) {
			chain.push(parent);
			current = parent;
		}
		chain
	}

	/// Leaves in pre-order.
	pub fn leaves(&self) -> Vec<NodeId> {
		self.preorder_by(|_, _| Ordering::Equal)
			.into_iter()
			.filter(|&id| self.is_leaf(id))
			.collect()
	}

	/// Nodes carrying a payload in pre-order: every leaf plus the containers
	/// a record was folded into.
	pub fn records(&self) -> Vec<NodeId> {
		self.preorder_by(|_, _| Ordering::Equal)
			.into_iter()
			.filter(|&id| self.payload(id).is_some())
			.collect()
	}

	/// All nodes, breadth-first from the root.
	pub fn descendants(&self) -> Vec<NodeId> {
		let mut out = Vec::with_capacity(self.nodes.len());
		let mut queue = VecDeque::from([self.root]);
		while let Some(id) = queue.pop_front() {
			out.push(id);
			queue.extend(self.children(id).iter().copied());
		}
		out
	}

	/// All nodes in pre-order, visiting each node's children sorted by
	/// `compare` (stable, so equal children keep attachment order).
	pub fn preorder_by<F>(&self, mut compare: F) -> Vec<NodeId>
	where
		F: FnMut(NodeId, NodeId) -> Ordering,
	{
		let mut out = Vec::with_capacity(self.nodes.len());
		let mut stack = vec![self.root];
		while let Some(id) = stack.pop() {
			out.push(id);
			let mut children = self.children(id).to_vec();
			children.sort_by(|&a, &b| compare(a, b));
			stack.extend(children.into_iter().rev());
		}
		out
	}

	/// Route from `from` up to the lowest common ancestor and back down to
	/// `to`, both ends included.
	pub fn path(&self, from: NodeId, to: NodeId) -> Vec<NodeId> {
		let up = self.ancestors(from);
		let mut down = self.ancestors(to);

		let shared: HashSet<NodeId> = up.iter().copied().collect();
		let Some(turn) = down.iter().position(|id| shared.contains(id)) else {
			return Vec::new();
		};
		let lca = down[turn];
		down.truncate(turn);

		let mut route: Vec<NodeId> = up.into_iter().take_while(|&id| id != lca).collect();
		route.push(lca);
		route.extend(down.into_iter().rev());
		route
	}
}

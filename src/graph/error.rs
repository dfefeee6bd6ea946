//! Error types for hierarchy construction and document loading.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Everything that can stop a tree from being built.
///
/// Dangling references and self-loops are not errors: the adapter and the
/// overlay absorb them. These variants cover inputs that cannot be turned
/// into a single well-formed tree.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The input document is not valid graph JSON.
	#[error("invalid graph document: {0}")]
	Json(#[from] serde_json::Error),

	/// A record name is empty or contains an empty segment.
	#[error("malformed record name {name:?}")]
	MalformedName {
		/// The offending name.
		name: String,
	},

	/// The path delimiter is the empty string.
	#[error("path delimiter must not be empty")]
	EmptyDelimiter,

	/// Two records share the same name.
	#[error("duplicate record {name:?}")]
	DuplicateRecord {
		/// The repeated name.
		name: String,
	},


	/// A list ordering name that is not `Group`, `Name` or `Frequency`.
	#[error("unknown sort order {name:?}")]
	UnknownSortOrder {
		/// The rejected name.
		name: String,
	},

	/// No records were supplied, so there is nothing to root the tree at.
	#[error("no root record")]
	MissingRoot,

	/// Records start with more than one distinct first segment.
	#[error("multiple roots: {first:?} and {second:?}")]
	MultipleRoots {
		/// The root found first.
		first: String,
		/// A competing root.
		second: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_records() {
		let err = GraphError::MultipleRoots {
			first: "root".into(),
			second: "other".into(),
		};
		assert_eq!(err.to_string(), r#"multiple roots: "root" and "other""#);
	}

	#[test]
	fn wraps_json_errors() {
		let err: GraphError = serde_json::from_str::<u32>("nope").unwrap_err().into();
		assert!(matches!(err, GraphError::Json(_)));
	}
}

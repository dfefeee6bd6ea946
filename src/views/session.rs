//! Per-render id allocation.

/// Issues unique element ids (`O-name-1`, `O-2`, ...) for one render.
///
/// Each render gets its own session, so numbering restarts at 1 and two
/// renders never share a counter.
#[derive(Clone, Debug, Default)]
pub struct RenderSession {
	count: u64,
}

impl RenderSession {
	/// A session whose first id ends in `1`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Next id, optionally tagged with `name`.
	pub fn uid(&mut self, name: Option<&str>) -> String {
		self.count += 1;
		match name {
			Some(name) => format!("O-{}-{}", name, self.count),
			None => format!("O-{}", self.count),
		}
	}
}

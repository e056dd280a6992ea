//! Query count maps and scoped capture composition

use crate::db::{CaptureScope, ConnectionName, ConnectionRegistry};
use crate::error::QueryCountsResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-connection query counts for one test
///
/// Keys are connection names, values the number of queries captured on that
/// connection while the test body ran. A connection that saw no queries is
/// still present with a count of zero. Renders as the literal mapping text
/// used by the summary lines.
///
/// # Examples
///
/// ```
/// use reinhardt_query_counts::QueryCountMap;
///
/// let map = QueryCountMap::from_iter([("replica", 0), ("default", 3)]);
/// assert_eq!(map.total(), 3);
/// assert_eq!(map.to_string(), r#"{"default": 3, "replica": 0}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCountMap(BTreeMap<ConnectionName, usize>);

impl QueryCountMap {
	/// Create an empty map
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the count for one connection
	pub fn insert(&mut self, name: impl Into<ConnectionName>, count: usize) {
		self.0.insert(name.into(), count);
	}

	/// Count recorded for one connection, if present
	pub fn get(&self, name: &str) -> Option<usize> {
		self.0.get(name).copied()
	}

	/// Sum of all per-connection counts
	pub fn total(&self) -> usize {
		self.0.values().sum()
	}

	/// Number of connections in the map
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the map carries no connections at all
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Per-connection entries in lexicographic name order
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.0.iter().map(|(name, count)| (name.as_str(), *count))
	}
}

impl FromIterator<(ConnectionName, usize)> for QueryCountMap {
	fn from_iter<I: IntoIterator<Item = (ConnectionName, usize)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<'a> FromIterator<(&'a str, usize)> for QueryCountMap {
	fn from_iter<I: IntoIterator<Item = (&'a str, usize)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(name, count)| (name.to_string(), count))
				.collect(),
		)
	}
}

impl fmt::Display for QueryCountMap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{")?;
		for (i, (name, count)) in self.0.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{name:?}: {count}")?;
		}
		write!(f, "}}")
	}
}

/// One capture scope per configured connection, acquired all-or-nothing
///
/// Acquisition enumerates the registry fresh, so run-to-run changes in the
/// configured connection set are picked up. If a later connection fails to
/// acquire, the scopes already opened are released before the error
/// propagates.
pub struct CaptureSet {
	scopes: Vec<(ConnectionName, Box<dyn CaptureScope>)>,
}

impl fmt::Debug for CaptureSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.scopes.iter().map(|(name, _)| name))
			.finish()
	}
}

impl CaptureSet {
	/// Enumerate the registry and open one capture scope per connection
	pub fn acquire(registry: &dyn ConnectionRegistry) -> QueryCountsResult<Self> {
		let names = registry.connection_names();
		let mut scopes = Vec::with_capacity(names.len());
		for name in names {
			let connection = registry.connection(&name)?;
			// a failed acquisition drops the scopes opened so far
			let scope = connection.begin_capture()?;
			scopes.push((name, scope));
		}
		Ok(Self { scopes })
	}

	/// Number of scopes held
	pub fn len(&self) -> usize {
		self.scopes.len()
	}

	/// Whether the set holds no scopes (no connections configured)
	pub fn is_empty(&self) -> bool {
		self.scopes.is_empty()
	}

	/// Read every scope's count, then release all scopes
	pub fn finish(self) -> QueryCountMap {
		self.scopes
			.into_iter()
			.map(|(name, scope)| (name, scope.captured()))
			.collect()
	}
}

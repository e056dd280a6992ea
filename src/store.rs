//! Transient per-item count storage

use crate::capture::QueryCountMap;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Side table keyed by test node id
///
/// Holds each test's recorded counts from the end of its capture window
/// until its teardown report is built; discarded wholesale at suite end.
/// Nothing in here outlives the process running the suite.
#[derive(Debug, Default)]
pub struct QueryCountStore {
	records: Mutex<HashMap<String, QueryCountMap>>,
}

impl QueryCountStore {
	/// Create an empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Record the counts captured for one test, replacing any previous entry
	pub fn record(&self, nodeid: &str, counts: QueryCountMap) {
		self.records.lock().insert(nodeid.to_string(), counts);
	}

	/// Counts recorded for one test, if its capture window completed
	pub fn get(&self, nodeid: &str) -> Option<QueryCountMap> {
		self.records.lock().get(nodeid).cloned()
	}

	/// Number of tests with recorded counts
	pub fn len(&self) -> usize {
		self.records.lock().len()
	}

	/// Whether no counts have been recorded
	pub fn is_empty(&self) -> bool {
		self.records.lock().is_empty()
	}

	/// Discard all recorded entries
	pub fn clear(&self) {
		self.records.lock().clear();
	}
}

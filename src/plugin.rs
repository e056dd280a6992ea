//! The query count reporter plugin
//!
//! Wraps each test body in per-connection capture scopes and augments
//! teardown reports with the recorded counts. The host runner drives the
//! two-phase protocol: call [`QueryCountPlugin::begin_test`] before
//! executing a test body, hold the returned [`CaptureWindow`] while the
//! body runs, and complete (or drop) it afterwards. The plugin never
//! executes the test body itself; doing so would run it twice.

use crate::capture::{CaptureSet, QueryCountMap};
use crate::db::ConnectionRegistry;
use crate::error::QueryCountsResult;
use crate::report::{TestItem, TestPhase, TestReport};
use crate::store::QueryCountStore;
use std::sync::Arc;
use tracing::{debug, error};

/// Per-test query count reporter
pub struct QueryCountPlugin {
	registry: Arc<dyn ConnectionRegistry>,
	store: QueryCountStore,
}

impl QueryCountPlugin {
	/// Create a plugin reading connections from `registry`
	pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
		Self {
			registry,
			store: QueryCountStore::new(),
		}
	}

	/// Open a capture window around one test body
	///
	/// The connection set is enumerated fresh on every call. Acquisition is
	/// all-or-nothing; a failure aborts the run rather than undercounting.
	pub fn begin_test(&self, item: &TestItem) -> QueryCountsResult<CaptureWindow<'_>> {
		let scopes = CaptureSet::acquire(self.registry.as_ref()).inspect_err(|err| {
			error!(nodeid = %item.nodeid, %err, "query capture unavailable");
		})?;
		debug!(nodeid = %item.nodeid, connections = scopes.len(), "capture window opened");
		Ok(CaptureWindow {
			store: &self.store,
			nodeid: item.nodeid.clone(),
			scopes: Some(scopes),
		})
	}

	/// Attach recorded counts to a finished report
	///
	/// Teardown reports receive the counts stored for their test, an empty
	/// map when the capture window never ran. Reports for other phases are
	/// left untouched. The report is mutated in place, never replaced.
	pub fn attach_counts(&self, report: &mut TestReport) {
		if report.phase == TestPhase::Teardown {
			report.query_counts = Some(self.store.get(&report.nodeid).unwrap_or_default());
		}
	}

	/// Counts recorded so far for one test, if its window completed
	pub fn recorded(&self, nodeid: &str) -> Option<QueryCountMap> {
		self.store.get(nodeid)
	}

	/// Discard all per-test state at suite end
	pub fn finish_suite(&self) {
		self.store.clear();
	}
}

/// An open capture window around one test body
///
/// Counts are read and recorded when the window is completed, and likewise
/// when it is dropped, so a panicking test body or an early runner abort
/// still releases the capture scopes and keeps whatever was captured. The
/// window never swallows or alters the test outcome.
pub struct CaptureWindow<'a> {
	store: &'a QueryCountStore,
	nodeid: String,
	scopes: Option<CaptureSet>,
}

impl CaptureWindow<'_> {
	/// Node id of the test the window belongs to
	pub fn nodeid(&self) -> &str {
		&self.nodeid
	}

	/// Close the window and record the captured counts
	pub fn complete(mut self) {
		self.record();
	}

	fn record(&mut self) {
		if let Some(scopes) = self.scopes.take() {
			let counts = scopes.finish();
			debug!(nodeid = %self.nodeid, total = counts.total(), "capture window closed");
			self.store.record(&self.nodeid, counts);
		}
	}
}

impl Drop for CaptureWindow<'_> {
	fn drop(&mut self) {
		self.record();
	}
}

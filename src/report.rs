//! Test items and phase result reports

use crate::capture::QueryCountMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One collected test function, identified by its node id
///
/// The node id is the runner-supplied stable identifier used both as the
/// side-table key and as the human-readable label in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestItem {
	/// Stable identifier, e.g. `tests/api.rs::test_user_list`
	pub nodeid: String,
}

impl TestItem {
	/// Create an item from its node id
	pub fn new(nodeid: impl Into<String>) -> Self {
		Self {
			nodeid: nodeid.into(),
		}
	}
}

impl fmt::Display for TestItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.nodeid)
	}
}

/// Execution phase of one test item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestPhase {
	/// Fixture setup, before the test body
	Setup,
	/// The test body itself
	Call,
	/// Fixture teardown, after the test body
	Teardown,
}

impl fmt::Display for TestPhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			TestPhase::Setup => "setup",
			TestPhase::Call => "call",
			TestPhase::Teardown => "teardown",
		};
		f.write_str(s)
	}
}

/// Outcome of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
	/// The phase completed normally
	Passed,
	/// The phase raised an error or a failed assertion
	Failed,
	/// The phase was skipped
	Skipped,
}

impl TestOutcome {
	/// Category label the terminal reporter files this outcome under
	pub fn category(self) -> &'static str {
		match self {
			TestOutcome::Passed => "passed",
			TestOutcome::Failed => "failed",
			TestOutcome::Skipped => "skipped",
		}
	}
}

/// The runner's record of one phase's outcome for one test item
///
/// Exactly one phase per test, the teardown phase, carries a
/// [`QueryCountMap`]; query attribution is only meaningful once the full
/// test lifecycle, teardown included, has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
	/// Node id of the test this report belongs to
	pub nodeid: String,
	/// Which phase this report describes
	pub phase: TestPhase,
	/// Pass/fail outcome of the phase
	pub outcome: TestOutcome,
	/// Per-connection query counts; only ever set on teardown reports
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query_counts: Option<QueryCountMap>,
}

impl TestReport {
	/// Create a report with no count data attached
	pub fn new(nodeid: impl Into<String>, phase: TestPhase, outcome: TestOutcome) -> Self {
		Self {
			nodeid: nodeid.into(),
			phase,
			outcome,
			query_counts: None,
		}
	}

	/// Whether the report carries usable count data
	///
	/// An attached empty map counts as "no data": it means the capture
	/// wrapper never ran for this test (e.g. setup failed first).
	pub fn has_query_counts(&self) -> bool {
		self.query_counts
			.as_ref()
			.is_some_and(|counts| !counts.is_empty())
	}

	/// Sum of the attached per-connection counts, zero when none
	pub fn query_counts_total(&self) -> usize {
		self.query_counts.as_ref().map_or(0, QueryCountMap::total)
	}
}

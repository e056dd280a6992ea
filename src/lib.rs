//! # Reinhardt Query Counts
//!
//! Per-test SQL query count reporting for sequential test-suite runs,
//! inspired by pytest's `--durations` report.
//!
//! The reporter wraps every test body in one query-capture scope per
//! configured database connection, records the per-connection counts, and
//! prints the tests with the biggest totals once the suite finishes. It
//! exists to surface N+1 query regressions and unexpectedly expensive test
//! setup.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reinhardt_query_counts::{
//!     ConnectionMap, InstrumentedConnection, QueryCountPlugin, QueryCountsOptions,
//!     TerminalReporter, write_query_count_summary,
//! };
//!
//! let default = Arc::new(InstrumentedConnection::new("default"));
//! let registry = ConnectionMap::new().with_connection("default", default.clone());
//! let plugin = QueryCountPlugin::new(Arc::new(registry));
//!
//! // Per test, driven by the harness:
//! let window = plugin.begin_test(&item)?;
//! // ... the harness executes the test body ...
//! window.complete();
//!
//! // Per finished phase report:
//! plugin.attach_counts(&mut report);
//!
//! // After the suite:
//! write_query_count_summary(&options, &mut reporter)?;
//! ```
//!
//! ## Hook Protocol
//!
//! The host runner owns test execution; this crate only wraps it:
//!
//! 1. [`QueryCountPlugin::begin_test`] opens one capture scope per configured
//!    connection, all-or-nothing, reading the connection set fresh.
//! 2. The runner executes the test body while holding the returned
//!    [`CaptureWindow`]; completing (or dropping) the window records the
//!    per-connection counts in a side table keyed by test id.
//! 3. [`QueryCountPlugin::attach_counts`] copies the recorded counts onto the
//!    test's teardown report once the full lifecycle has finished.
//! 4. [`write_query_count_summary`] sorts all data-bearing reports by total
//!    count and prints the top N (`--query-counts=N`, `0` for all).
//!
//! The plugin introduces no concurrency of its own and never alters a test's
//! outcome; a failing body still gets its counts recorded before the failure
//! propagates through the runner.

#![warn(missing_docs)]

// Module declarations following Rust 2024 module system (no mod.rs)
pub mod capture;
pub mod db;
pub mod error;
pub mod options;
pub mod plugin;
pub mod report;
pub mod store;
pub mod summary;
pub mod terminal;

// Re-export main types
pub use capture::{CaptureSet, QueryCountMap};
pub use db::{
	CaptureScope, ConnectionMap, ConnectionName, ConnectionRegistry, DatabaseConnection,
	InstrumentedConnection,
};
pub use error::{QueryCountsError, QueryCountsResult};
pub use options::QueryCountsOptions;
pub use plugin::{CaptureWindow, QueryCountPlugin};
pub use report::{TestItem, TestOutcome, TestPhase, TestReport};
pub use store::QueryCountStore;
pub use summary::write_query_count_summary;
pub use terminal::{DEFAULT_WIDTH, TerminalReporter};

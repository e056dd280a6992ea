//! Database-layer collaborators
//!
//! The query-capture mechanism belongs to the database layer; this module
//! defines the contract the reporter needs from it (enumerate connections,
//! look one up, open a capture scope) plus an instrumented in-process
//! connection used by harnesses and this crate's own tests.

use crate::error::{QueryCountsError, QueryCountsResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// Identifier of one configured database connection
pub type ConnectionName = String;

/// A live query capture on one connection
///
/// While the scope exists, queries issued on its connection are counted.
/// Dropping the scope stops the capture. Only one scope per connection may
/// be active at a time.
pub trait CaptureScope: Send {
	/// Number of queries captured since the scope was opened
	fn captured(&self) -> usize;
}

impl fmt::Debug for dyn CaptureScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CaptureScope").finish_non_exhaustive()
	}
}

/// One configured database connection handle
pub trait DatabaseConnection: Send + Sync {
	/// Open a capture scope on this connection
	///
	/// Fails with [`QueryCountsError::CaptureUnavailable`] when capture
	/// cannot start, e.g. when a scope is already active on the connection.
	fn begin_capture(&self) -> QueryCountsResult<Box<dyn CaptureScope>>;
}

impl fmt::Debug for dyn DatabaseConnection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DatabaseConnection").finish_non_exhaustive()
	}
}

/// Read-only view of the configured connection set
///
/// `connection_names` is re-read before every test; under dynamic routing
/// setups the configured set may change between tests.
pub trait ConnectionRegistry: Send + Sync {
	/// Names of all currently configured connections
	fn connection_names(&self) -> Vec<ConnectionName>;

	/// Resolve a name to its live connection handle
	fn connection(&self, name: &str) -> QueryCountsResult<Arc<dyn DatabaseConnection>>;
}

/// In-process connection that logs every executed statement
///
/// The statement log is what capture scopes read: a scope remembers the log
/// length when it opens and reports the statements appended since. Recording
/// a query is a single lock acquisition, cheap enough for test workloads.
///
/// # Examples
///
/// ```
/// use reinhardt_query_counts::{DatabaseConnection, InstrumentedConnection};
///
/// let conn = InstrumentedConnection::new("default");
/// conn.record_query("INSERT INTO users (name) VALUES ('alice')");
///
/// let scope = conn.begin_capture().unwrap();
/// conn.record_query("SELECT * FROM users");
/// assert_eq!(scope.captured(), 1);
/// assert_eq!(conn.executed(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct InstrumentedConnection {
	name: ConnectionName,
	statements: Arc<Mutex<Vec<String>>>,
	capture_active: Arc<AtomicBool>,
}

impl InstrumentedConnection {
	/// Create a connection known to the registry as `name`
	pub fn new(name: impl Into<ConnectionName>) -> Self {
		Self {
			name: name.into(),
			statements: Arc::new(Mutex::new(Vec::new())),
			capture_active: Arc::new(AtomicBool::new(false)),
		}
	}

	/// Name this connection is configured under
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Record one executed statement
	pub fn record_query(&self, sql: &str) {
		trace!(connection = %self.name, sql, "recording query");
		self.statements.lock().push(sql.to_string());
	}

	/// Total number of statements executed over the connection's lifetime
	pub fn executed(&self) -> usize {
		self.statements.lock().len()
	}

	/// All statements executed so far, in execution order
	pub fn executed_statements(&self) -> Vec<String> {
		self.statements.lock().clone()
	}

	/// Whether a capture scope is currently open on this connection
	pub fn capture_active(&self) -> bool {
		self.capture_active.load(Ordering::SeqCst)
	}
}

impl DatabaseConnection for InstrumentedConnection {
	fn begin_capture(&self) -> QueryCountsResult<Box<dyn CaptureScope>> {
		if self.capture_active.swap(true, Ordering::SeqCst) {
			return Err(QueryCountsError::CaptureUnavailable {
				connection: self.name.clone(),
				reason: "a capture scope is already active".to_string(),
			});
		}
		Ok(Box::new(InstrumentedScope {
			statements: Arc::clone(&self.statements),
			active: Arc::clone(&self.capture_active),
			start: self.statements.lock().len(),
		}))
	}
}

/// Snapshot-based scope over an [`InstrumentedConnection`] statement log
struct InstrumentedScope {
	statements: Arc<Mutex<Vec<String>>>,
	active: Arc<AtomicBool>,
	start: usize,
}

impl CaptureScope for InstrumentedScope {
	fn captured(&self) -> usize {
		self.statements.lock().len() - self.start
	}
}

impl Drop for InstrumentedScope {
	fn drop(&mut self) {
		self.active.store(false, Ordering::SeqCst);
	}
}

/// Connection registry backed by a name → handle map
///
/// The `connections` object of the database layer, reduced to what the
/// reporter needs. Names enumerate in lexicographic order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_query_counts::{ConnectionMap, ConnectionRegistry, InstrumentedConnection};
///
/// let registry = ConnectionMap::new()
///     .with_connection("default", Arc::new(InstrumentedConnection::new("default")))
///     .with_connection("replica", Arc::new(InstrumentedConnection::new("replica")));
///
/// assert_eq!(registry.connection_names(), vec!["default", "replica"]);
/// assert!(registry.connection("analytics").is_err());
/// ```
#[derive(Clone, Default)]
pub struct ConnectionMap {
	connections: BTreeMap<ConnectionName, Arc<dyn DatabaseConnection>>,
}

impl ConnectionMap {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a connection, builder style
	pub fn with_connection(
		mut self,
		name: impl Into<ConnectionName>,
		connection: Arc<dyn DatabaseConnection>,
	) -> Self {
		self.insert(name, connection);
		self
	}

	/// Add or replace a connection
	pub fn insert(&mut self, name: impl Into<ConnectionName>, connection: Arc<dyn DatabaseConnection>) {
		self.connections.insert(name.into(), connection);
	}

	/// Number of configured connections
	pub fn len(&self) -> usize {
		self.connections.len()
	}

	/// Whether no connections are configured
	pub fn is_empty(&self) -> bool {
		self.connections.is_empty()
	}
}

impl ConnectionRegistry for ConnectionMap {
	fn connection_names(&self) -> Vec<ConnectionName> {
		self.connections.keys().cloned().collect()
	}

	fn connection(&self, name: &str) -> QueryCountsResult<Arc<dyn DatabaseConnection>> {
		self.connections
			.get(name)
			.cloned()
			.ok_or_else(|| QueryCountsError::UnknownConnection(name.to_string()))
	}
}

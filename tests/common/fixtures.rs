//! Shared fixtures for integration tests

use reinhardt_query_counts::{ConnectionMap, InstrumentedConnection};
use std::sync::Arc;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = env_logger::builder().is_test(true).try_init();
	});
}

/// A registry with `default` and `replica` instrumented connections
pub fn two_connection_registry() -> (
	ConnectionMap,
	Arc<InstrumentedConnection>,
	Arc<InstrumentedConnection>,
) {
	let default = Arc::new(InstrumentedConnection::new("default"));
	let replica = Arc::new(InstrumentedConnection::new("replica"));
	let registry = ConnectionMap::new()
		.with_connection("default", default.clone())
		.with_connection("replica", replica.clone());
	(registry, default, replica)
}

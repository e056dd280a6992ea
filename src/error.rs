//! Error types for query count capture and reporting

use crate::db::ConnectionName;
use std::io;
use thiserror::Error;

/// Errors raised while capturing or reporting query counts
///
/// Capture errors are fatal by design: silently undercounting would be worse
/// than failing loudly, so there is no degraded mode.
#[derive(Debug, Error)]
pub enum QueryCountsError {
	/// A name enumerated by the registry could not be resolved to a handle
	#[error("Unknown database connection: {0}")]
	UnknownConnection(ConnectionName),

	/// The scoped capture primitive could not be acquired
	#[error("Cannot begin query capture on connection '{connection}': {reason}")]
	CaptureUnavailable {
		/// Connection the capture was requested on
		connection: ConnectionName,
		/// Why the capture could not start
		reason: String,
	},

	/// Terminal writer failure while rendering the summary
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

/// Result alias for query count operations
pub type QueryCountsResult<T> = Result<T, QueryCountsError>;

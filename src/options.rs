//! Command-line configuration surface
//!
//! One opt-in flag, exposed the way the host harness exposes its own
//! options: flatten [`QueryCountsOptions`] into the harness CLI.

use clap::Args;

/// Query count reporting options
///
/// Absent flag means the feature is disabled and the suite run produces no
/// additional output. `--query-counts=0` reports every test with captured
/// counts; any other value reports the N biggest.
///
/// # Examples
///
/// ```
/// use clap::Parser;
/// use reinhardt_query_counts::QueryCountsOptions;
///
/// #[derive(Parser)]
/// struct HarnessCli {
///     #[command(flatten)]
///     query_counts: QueryCountsOptions,
/// }
///
/// let cli = HarnessCli::parse_from(["harness", "--query-counts", "10"]);
/// assert_eq!(cli.query_counts.limit(), Some(10));
///
/// let cli = HarnessCli::parse_from(["harness"]);
/// assert!(!cli.query_counts.enabled());
/// ```
#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = "Query counting")]
pub struct QueryCountsOptions {
	/// Shows N biggest SQL query counts for setup/test (N=0 for all)
	#[arg(long = "query-counts", value_name = "N")]
	pub query_counts: Option<usize>,
}

impl QueryCountsOptions {
	/// Options with reporting disabled
	pub fn disabled() -> Self {
		Self { query_counts: None }
	}

	/// Options reporting the `n` biggest counts (`0` for all)
	pub fn top(n: usize) -> Self {
		Self {
			query_counts: Some(n),
		}
	}

	/// Whether the reporting feature was opted into
	pub fn enabled(&self) -> bool {
		self.query_counts.is_some()
	}

	/// The configured limit, if any (`0` means "all")
	pub fn limit(&self) -> Option<usize> {
		self.query_counts
	}
}

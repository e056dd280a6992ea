//! End-of-suite summary rendering
//!
//! The `--durations`-style report: collect every data-bearing teardown
//! report, sort by total query count, print the biggest.

use crate::error::QueryCountsResult;
use crate::options::QueryCountsOptions;
use crate::terminal::TerminalReporter;
use std::io::Write;

/// Minimum width of the count-mapping column in summary lines
const COUNT_FIELD_WIDTH: usize = 80;

/// Render the query count summary after a suite run
///
/// A silent no-op when the option was never set or when no report carries
/// count data; opting out must cost nothing and print nothing.
///
/// Selected reports are sorted descending by total query count with a
/// stable sort, so ties keep their filing order. `--query-counts=0` prints
/// the whole list under a `biggest query counts` header; any other value
/// truncates to the N biggest under an `N biggest query counts` header.
/// Each line is the literal per-connection mapping, left-justified in an
/// 80-column-minimum field, followed by the test's node id.
pub fn write_query_count_summary<W: Write>(
	options: &QueryCountsOptions,
	reporter: &mut TerminalReporter<W>,
) -> QueryCountsResult<()> {
	let Some(limit) = options.limit() else {
		return Ok(());
	};

	let mut selected: Vec<_> = reporter
		.all_reports()
		.filter(|report| report.has_query_counts())
		.cloned()
		.collect();
	if selected.is_empty() {
		return Ok(());
	}

	selected.sort_by(|a, b| b.query_counts_total().cmp(&a.query_counts_total()));

	if limit == 0 {
		reporter.write_sep('=', "biggest query counts")?;
	} else {
		reporter.write_sep('=', &format!("{limit} biggest query counts"))?;
		selected.truncate(limit);
	}

	for report in &selected {
		if let Some(counts) = &report.query_counts {
			reporter.write_line(&format!(
				"{:<width$} {}",
				counts.to_string(),
				report.nodeid,
				width = COUNT_FIELD_WIDTH
			))?;
		}
	}
	Ok(())
}

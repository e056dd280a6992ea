//! Terminal reporting surface
//!
//! A minimal stand-in for the host runner's terminal reporter: collected
//! phase reports filed by outcome category, plus the separator/line writer
//! the end-of-suite summary renders through.

use crate::error::QueryCountsResult;
use crate::report::TestReport;
use std::collections::BTreeMap;
use std::io::Write;

/// Default width of separator lines
pub const DEFAULT_WIDTH: usize = 80;

/// Collected suite reports plus a formatted line writer
///
/// # Examples
///
/// ```
/// use reinhardt_query_counts::TerminalReporter;
///
/// let mut reporter = TerminalReporter::new(Vec::new()).with_width(20);
/// reporter.write_sep('=', "done").unwrap();
///
/// let output = String::from_utf8(reporter.into_writer()).unwrap();
/// assert_eq!(output, "======= done =======\n");
/// ```
pub struct TerminalReporter<W: Write> {
	stats: BTreeMap<String, Vec<TestReport>>,
	writer: W,
	width: usize,
}

impl<W: Write> TerminalReporter<W> {
	/// Create a reporter writing to `writer`
	pub fn new(writer: W) -> Self {
		Self {
			stats: BTreeMap::new(),
			writer,
			width: DEFAULT_WIDTH,
		}
	}

	/// Override the separator line width
	pub fn with_width(mut self, width: usize) -> Self {
		self.width = width;
		self
	}

	/// File a finished phase report under its outcome's category
	pub fn add_report(&mut self, report: TestReport) {
		self.stats
			.entry(report.outcome.category().to_string())
			.or_default()
			.push(report);
	}

	/// Collected reports, keyed by outcome category
	pub fn stats(&self) -> &BTreeMap<String, Vec<TestReport>> {
		&self.stats
	}

	/// All collected reports, category by category in filing order
	pub fn all_reports(&self) -> impl Iterator<Item = &TestReport> {
		self.stats.values().flatten()
	}

	/// Write a full-width separator line with `title` embedded
	pub fn write_sep(&mut self, sep: char, title: &str) -> QueryCountsResult<()> {
		let text = format!(" {title} ");
		let fill = self.width.saturating_sub(text.chars().count());
		let left = fill / 2;
		let right = fill - left;
		writeln!(
			self.writer,
			"{}{}{}",
			sep.to_string().repeat(left),
			text,
			sep.to_string().repeat(right)
		)?;
		Ok(())
	}

	/// Write one literal output line
	pub fn write_line(&mut self, line: &str) -> QueryCountsResult<()> {
		writeln!(self.writer, "{line}")?;
		Ok(())
	}

	/// Consume the reporter, returning the underlying writer
	pub fn into_writer(self) -> W {
		self.writer
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::report::{TestOutcome, TestPhase};

	fn rendered(reporter: TerminalReporter<Vec<u8>>) -> String {
		String::from_utf8(reporter.into_writer()).unwrap()
	}

	#[test]
	fn test_write_sep_centers_the_title() {
		let mut reporter = TerminalReporter::new(Vec::new()).with_width(20);
		reporter.write_sep('=', "hi").unwrap();
		assert_eq!(rendered(reporter), "======== hi ========\n");
	}

	#[test]
	fn test_write_sep_never_truncates_a_long_title() {
		let mut reporter = TerminalReporter::new(Vec::new()).with_width(4);
		reporter.write_sep('=', "a very long title").unwrap();
		assert_eq!(rendered(reporter), " a very long title \n");
	}

	#[test]
	fn test_write_line() {
		let mut reporter = TerminalReporter::new(Vec::new());
		reporter.write_line("one").unwrap();
		reporter.write_line("two").unwrap();
		assert_eq!(rendered(reporter), "one\ntwo\n");
	}

	#[test]
	fn test_reports_file_under_their_outcome_category() {
		let mut reporter = TerminalReporter::new(Vec::new());
		reporter.add_report(TestReport::new(
			"tests/a.rs::t1",
			TestPhase::Call,
			TestOutcome::Passed,
		));
		reporter.add_report(TestReport::new(
			"tests/a.rs::t2",
			TestPhase::Call,
			TestOutcome::Failed,
		));
		reporter.add_report(TestReport::new(
			"tests/a.rs::t3",
			TestPhase::Call,
			TestOutcome::Passed,
		));

		assert_eq!(reporter.stats()["passed"].len(), 2);
		assert_eq!(reporter.stats()["failed"].len(), 1);
		// filing order is preserved within a category
		assert_eq!(reporter.stats()["passed"][0].nodeid, "tests/a.rs::t1");
		assert_eq!(reporter.all_reports().count(), 3);
	}
}

//! Mock sequential test runner
//!
//! Drives the hook protocol the way the host runner would: a setup phase,
//! the capture window around the test body, a teardown phase, and one
//! report per phase handed to the plugin for augmentation before filing.
//! Setup and teardown hooks run outside the capture window, like fixture
//! code, so their queries never count against the test.

use reinhardt_query_counts::{
	QueryCountPlugin, QueryCountsOptions, QueryCountsResult, TerminalReporter, TestItem,
	TestOutcome, TestPhase, TestReport, write_query_count_summary,
};

type Hook = Box<dyn Fn()>;
type Body = Box<dyn Fn() -> Result<(), String>>;

/// One test the mock runner can execute
pub struct MockTest {
	item: TestItem,
	setup: Option<Hook>,
	body: Body,
	teardown: Option<Hook>,
	fail_setup: bool,
}

impl MockTest {
	/// A test whose body returns `Ok` for a pass, `Err` for a failure
	pub fn new(nodeid: &str, body: impl Fn() -> Result<(), String> + 'static) -> Self {
		Self {
			item: TestItem::new(nodeid),
			setup: None,
			body: Box::new(body),
			teardown: None,
			fail_setup: false,
		}
	}

	/// Run `hook` during the setup phase, before the capture window opens
	pub fn with_setup(mut self, hook: impl Fn() + 'static) -> Self {
		self.setup = Some(Box::new(hook));
		self
	}

	/// Run `hook` during the teardown phase, after the capture window closed
	pub fn with_teardown(mut self, hook: impl Fn() + 'static) -> Self {
		self.teardown = Some(Box::new(hook));
		self
	}

	/// Make setup fail; the body is skipped and the capture window never runs
	pub fn with_failing_setup(mut self) -> Self {
		self.fail_setup = true;
		self
	}
}

/// Sequential runner wired to a [`QueryCountPlugin`]
pub struct MockRunner {
	plugin: QueryCountPlugin,
	reporter: TerminalReporter<Vec<u8>>,
}

impl MockRunner {
	pub fn new(plugin: QueryCountPlugin) -> Self {
		Self {
			plugin,
			reporter: TerminalReporter::new(Vec::new()),
		}
	}

	/// Run one test through all three phases, filing a report per phase
	pub fn run_test(&mut self, test: &MockTest) -> QueryCountsResult<()> {
		if test.fail_setup {
			self.file_report(&test.item, TestPhase::Setup, TestOutcome::Failed);
			self.file_report(&test.item, TestPhase::Teardown, TestOutcome::Passed);
			return Ok(());
		}

		if let Some(setup) = &test.setup {
			setup();
		}
		self.file_report(&test.item, TestPhase::Setup, TestOutcome::Passed);

		let window = self.plugin.begin_test(&test.item)?;
		let outcome = match (test.body)() {
			Ok(()) => TestOutcome::Passed,
			Err(_) => TestOutcome::Failed,
		};
		window.complete();
		self.file_report(&test.item, TestPhase::Call, outcome);

		if let Some(teardown) = &test.teardown {
			teardown();
		}
		self.file_report(&test.item, TestPhase::Teardown, TestOutcome::Passed);
		Ok(())
	}

	/// Render the summary per `options` and finish the suite
	pub fn finish(mut self, options: &QueryCountsOptions) -> QueryCountsResult<String> {
		write_query_count_summary(options, &mut self.reporter)?;
		self.plugin.finish_suite();
		let output = self.reporter.into_writer();
		Ok(String::from_utf8(output).expect("summary output is utf-8"))
	}

	/// Run a whole suite, then render the summary per `options`
	pub fn run_suite(
		mut self,
		tests: &[MockTest],
		options: &QueryCountsOptions,
	) -> QueryCountsResult<String> {
		for test in tests {
			self.run_test(test)?;
		}
		self.finish(options)
	}

	pub fn reporter(&self) -> &TerminalReporter<Vec<u8>> {
		&self.reporter
	}

	pub fn plugin(&self) -> &QueryCountPlugin {
		&self.plugin
	}

	/// The filed teardown report for one test, if any
	pub fn teardown_report(&self, nodeid: &str) -> Option<TestReport> {
		self.reporter
			.all_reports()
			.find(|report| report.phase == TestPhase::Teardown && report.nodeid == nodeid)
			.cloned()
	}

	fn file_report(&mut self, item: &TestItem, phase: TestPhase, outcome: TestOutcome) {
		let mut report = TestReport::new(item.nodeid.clone(), phase, outcome);
		self.plugin.attach_counts(&mut report);
		self.reporter.add_report(report);
	}
}

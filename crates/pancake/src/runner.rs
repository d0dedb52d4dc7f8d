//! Test runner - filter, execute and tally registered cases

use crate::config::Config;
use crate::context::Context;
use crate::error::RunResult;
use crate::filter::Filter;
use crate::registry::{self, Registry};
use crate::reporter::{ColorChoice, Stream, Style, TestReporter};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Options recognised on the command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub filter: Filter,
    pub color: ColorChoice,
    /// Print matching names instead of running
    pub list: bool,
}

impl RunOptions {
    /// Scan option arguments left to right (program name excluded).
    ///
    /// Recognised: `--filter=PATTERN`, `--color=always|never|auto`,
    /// `--no-color` and `--list`. Later occurrences overwrite earlier ones;
    /// anything else is ignored.
    ///
    /// Hand-rolled rather than `clap`: unknown arguments, a bare `--filter`
    /// and a bad `--color=` value must be skipped silently, never rejected.
    pub fn parse<I, S>(args: I, config: &Config) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pattern = config.filter.clone().unwrap_or_else(|| "*".to_string());
        let mut color = config.color.unwrap_or_default();
        let mut list = false;

        for arg in args {
            let arg = arg.as_ref();
            if let Some(value) = arg.strip_prefix("--filter=") {
                pattern = value.to_string();
            } else if let Some(value) = arg.strip_prefix("--color=") {
                match ColorChoice::parse(value) {
                    Some(choice) => color = choice,
                    None => debug!(arg, "ignoring unknown color choice"),
                }
            } else if arg == "--no-color" {
                color = ColorChoice::Never;
            } else if arg == "--list" {
                list = true;
            } else {
                debug!(arg, "ignoring unrecognized argument");
            }
        }

        Self {
            filter: Filter::parse(&pattern),
            color,
            list,
        }
    }
}

/// Result of one executed case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    pub full_name: String,
    pub failed: bool,
}

/// Counts for one run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Cases in the registry
    pub registered: usize,
    /// Cases selected by the filter and executed
    pub run: usize,
    /// Executed cases that ended failed
    pub failed: usize,
    /// Executed cases in execution order
    pub outcomes: Vec<CaseOutcome>,
}

impl RunSummary {
    fn record(&mut self, full_name: String, failed: bool) {
        self.run += 1;
        if failed {
            self.failed += 1;
        }
        self.outcomes.push(CaseOutcome { full_name, failed });
    }

    pub fn passed(&self) -> usize {
        self.run.saturating_sub(self.failed)
    }

    /// 0 when nothing failed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 {
            0
        } else {
            1
        }
    }
}

/// Sequential console runner
pub struct Runner {
    options: RunOptions,
    reporter: TestReporter,
    failure_style: Style,
}

impl Runner {
    /// `auto` color is decided for stdout (progress) and stderr (failure
    /// lines) separately
    pub fn new(options: RunOptions) -> Self {
        let reporter = TestReporter::new(Style::for_stream(options.color, Stream::Stdout));
        let failure_style = Style::for_stream(options.color, Stream::Stderr);
        Self {
            options,
            reporter,
            failure_style,
        }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Run every matching case in registry order.
    ///
    /// Progress goes to `out`, assertion failure lines to `err`.
    pub fn run<W, E>(&self, registry: &Registry, out: &mut W, err: &mut E) -> RunResult<RunSummary>
    where
        W: Write,
        E: Write,
    {
        for name in registry.duplicates() {
            warn!(test = %name, "test case registered more than once");
        }

        let mut summary = RunSummary {
            registered: registry.len(),
            ..RunSummary::default()
        };

        self.reporter.header(out, registry.len())?;

        for case in registry {
            let full_name = case.full_name();
            if !self.options.filter.matches(&full_name) {
                debug!(test = %full_name, filter = %self.options.filter, "filtered out");
                continue;
            }

            self.reporter.case_started(out, case)?;
            // Keep progress ahead of the failure lines on a shared terminal
            out.flush()?;

            debug!(test = %full_name, "running");
            let failed = {
                let mut ctx = Context::new(err, self.failure_style);
                case.run(&mut ctx)
            };
            err.flush()?;
            debug!(test = %full_name, failed, "finished");

            self.reporter.case_finished(out, case, failed)?;
            summary.record(full_name, failed);
        }

        self.reporter.summary(out, &summary)?;
        out.flush()?;
        Ok(summary)
    }

    /// Print the full name of every matching case without running it
    pub fn list<W: Write>(&self, registry: &Registry, out: &mut W) -> RunResult<usize> {
        let mut listed = 0;
        for case in registry {
            if self.options.filter.matches(&case.full_name()) {
                self.reporter.listing(out, case)?;
                listed += 1;
            }
        }
        out.flush()?;
        Ok(listed)
    }
}

/// Run the process-wide registry and return the exit code.
///
/// `args` is the full argument vector, program name first, as produced by
/// `std::env::args()`.
pub fn run_all_tests<I, S>(args: I) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let options = RunOptions::parse(args.into_iter().skip(1), &Config::from_env());
    options.color.prepare_terminal();

    let registry = registry::snapshot();
    let runner = Runner::new(options);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();

    let result = if runner.options().list {
        runner.list(&registry, &mut out).map(|_| 0)
    } else {
        let mut err = stderr.lock();
        runner
            .run(&registry, &mut out, &mut err)
            .map(|summary| summary.exit_code())
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            drop(out);
            eprintln!("pancake: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Outcome;
    use crate::registry::TestCase;
    use crate::Location;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// stdout and stderr interleaved into one buffer
    #[derive(Clone, Default)]
    struct Transcript(Rc<RefCell<Vec<u8>>>);

    impl Write for Transcript {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Transcript {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn options(args: &[&str]) -> RunOptions {
        RunOptions::parse(args, &Config::default())
    }

    fn pass(_: &mut Context<'_>) -> Outcome {
        Ok(())
    }

    fn nonfatal(t: &mut Context<'_>) -> Outcome {
        t.expect(false, Location::new("math.rs", 7), "2 == 4", "lhs=2, rhs=4".into());
        Ok(())
    }

    fn fatal(t: &mut Context<'_>) -> Outcome {
        t.require(false, Location::new("math.rs", 9), "ready", String::new())?;
        t.expect(false, Location::new("math.rs", 10), "unreachable", String::new());
        Ok(())
    }

    fn sample() -> Registry {
        let mut registry = Registry::new();
        registry.push(TestCase::plain("Math", "add", pass));
        registry.push(TestCase::plain("Math", "half", nonfatal));
        registry.push(TestCase::plain("Io", "open", fatal));
        registry
    }

    fn run(registry: &Registry, args: &[&str]) -> (RunSummary, String) {
        let transcript = Transcript::default();
        let summary = Runner::new(options(args))
            .run(registry, &mut transcript.clone(), &mut transcript.clone())
            .unwrap();
        (summary, transcript.text())
    }

    #[test]
    fn test_options_defaults() {
        let opts = options(&[]);
        assert_eq!(opts.filter, Filter::All);
        assert_eq!(opts.color, ColorChoice::Auto);
        assert!(!opts.list);
    }

    #[test]
    fn test_options_last_filter_wins_and_unknown_ignored() {
        let opts = options(&["--filter=A.*", "--bogus", "positional", "--filter=B.x"]);
        assert_eq!(opts.filter, Filter::Exact("B.x".into()));
    }

    #[test]
    fn test_options_malformed_arguments_are_skipped() {
        let opts = options(&["--filter=A.x", "--filter", "--color=rainbow", "-f"]);
        assert_eq!(opts.filter, Filter::Exact("A.x".into()));
        assert_eq!(opts.color, ColorChoice::Auto);
    }

    #[test]
    fn test_options_color_flags() {
        assert_eq!(options(&["--no-color"]).color, ColorChoice::Never);
        assert_eq!(options(&["--color=always"]).color, ColorChoice::Always);
        assert_eq!(
            options(&["--no-color", "--color=auto"]).color,
            ColorChoice::Auto
        );
        assert_eq!(options(&["--color=purple"]).color, ColorChoice::Auto);
        assert!(options(&["--list"]).list);
    }

    #[test]
    fn test_options_config_defaults_are_overridden() {
        let config = Config {
            filter: Some("Math.*".into()),
            color: Some(ColorChoice::Never),
        };

        let from_env = RunOptions::parse(Vec::<String>::new(), &config);
        assert_eq!(from_env.filter, Filter::Prefix("Math.".into()));
        assert_eq!(from_env.color, ColorChoice::Never);

        let overridden = RunOptions::parse(["--filter=*", "--color=always"], &config);
        assert_eq!(overridden.filter, Filter::All);
        assert_eq!(overridden.color, ColorChoice::Always);
    }

    #[test]
    fn test_run_transcript() {
        let (summary, text) = run(&sample(), &["--no-color"]);

        assert_eq!(summary.exit_code(), 1);
        insta::assert_snapshot!(text, @r"
        [==========] Running 3 tests
        [ RUN      ] Math.add
        [       OK ] Math.add
        [ RUN      ] Math.half
        [ NONFATAL ] math.rs:7: 2 == 4 -> lhs=2, rhs=4
        [ FAILED  ] Math.half
        [ RUN      ] Io.open
        [  FAILED  ] math.rs:9: ready
        [ FAILED  ] Io.open
        [==========] 3 tests ran.  2 failed.
        ");
    }

    #[test]
    fn test_run_counts_and_outcomes() {
        let (summary, _) = run(&sample(), &["--no-color"]);

        assert_eq!(summary.registered, 3);
        assert_eq!(summary.run, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.passed(), 1);
        assert_eq!(
            summary.outcomes,
            vec![
                CaseOutcome { full_name: "Math.add".into(), failed: false },
                CaseOutcome { full_name: "Math.half".into(), failed: true },
                CaseOutcome { full_name: "Io.open".into(), failed: true },
            ]
        );
    }

    #[test]
    fn test_run_with_prefix_filter() {
        let (summary, text) = run(&sample(), &["--no-color", "--filter=Math.*"]);

        assert_eq!(summary.registered, 3);
        assert_eq!(summary.run, 2);
        assert_eq!(summary.failed, 1);
        assert!(text.starts_with("[==========] Running 3 tests\n"));
        assert!(!text.contains("Io.open"));
    }

    #[test]
    fn test_run_with_exact_filter_passing_case() {
        let (summary, text) = run(&sample(), &["--no-color", "--filter=Math.add"]);

        assert_eq!(summary.run, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.exit_code(), 0);
        assert!(text.ends_with("[==========] 1 tests ran.  0 failed.\n"));
    }

    #[test]
    fn test_run_with_filter_matching_nothing() {
        let (summary, text) = run(&sample(), &["--no-color", "--filter=Other.Name"]);

        assert_eq!(summary.run, 0);
        assert_eq!(summary.exit_code(), 0);
        assert!(!text.contains("[ RUN"));
    }

    #[test]
    fn test_list_prints_matching_names_only() {
        let runner = Runner::new(options(&["--filter=Math.*", "--list"]));
        let mut out = Vec::new();

        let listed = runner.list(&sample(), &mut out).unwrap();

        assert_eq!(listed, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "Math.add\nMath.half\n");
    }

    #[test]
    fn test_exit_code_law() {
        let mut summary = RunSummary::default();
        assert_eq!(summary.exit_code(), 0);
        summary.record("A.ok".into(), false);
        assert_eq!(summary.exit_code(), 0);
        summary.record("A.bad".into(), true);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_passed_with_inconsistent_counts() {
        let summary = RunSummary {
            registered: 1,
            run: 1,
            failed: 3,
            outcomes: Vec::new(),
        };
        assert_eq!(summary.passed(), 0);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_failure_lines_use_their_own_style() {
        let runner = Runner::new(RunOptions {
            color: ColorChoice::Always,
            ..RunOptions::default()
        });
        assert!(runner.failure_style.is_colored());

        let runner = Runner::new(RunOptions {
            color: ColorChoice::Never,
            ..RunOptions::default()
        });
        assert!(!runner.failure_style.is_colored());
    }
}

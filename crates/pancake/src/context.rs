//! Per-case execution state and the assertion reporter

use crate::error::{FatalFailure, Outcome};
use crate::reporter::{self, Style};
use std::fmt;
use std::io::Write;

/// Source position of an assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// How a failing assertion affects the rest of the case body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Failure is recorded and the body keeps running
    NonFatal,
    /// Failure is recorded and the body returns early
    Fatal,
}

impl Severity {
    /// Console tag printed in front of a failure line
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Fatal => "[  FAILED  ]",
            Severity::NonFatal => "[ NONFATAL ]",
        }
    }
}

/// State of a single case execution.
///
/// A fresh context is handed to every case; `failed` and `fatal` never
/// outlive the invocation they were recorded in.
pub struct Context<'a> {
    failed: bool,
    fatal: bool,
    failures: usize,
    err: &'a mut dyn Write,
    style: Style,
}

impl<'a> Context<'a> {
    /// Create a context that prints failure lines to `err`
    pub fn new(err: &'a mut dyn Write, style: Style) -> Self {
        Self {
            failed: false,
            fatal: false,
            failures: 0,
            err,
            style,
        }
    }

    /// Back to the initial state: no failure recorded
    pub fn reset(&mut self) {
        self.failed = false;
        self.fatal = false;
        self.failures = 0;
    }

    /// At least one assertion (fatal or not) did not hold
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// A fatal assertion did not hold
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// Number of failed assertions so far
    pub fn failure_count(&self) -> usize {
        self.failures
    }

    /// Record the outcome of one assertion.
    ///
    /// A holding assertion has no effect at all. A failing one marks the case
    /// failed and prints one line to the error stream; a failing fatal one
    /// also sets the fatal flag and returns `Err(FatalFailure)`.
    pub fn report(
        &mut self,
        ok: bool,
        location: Location,
        expr: &str,
        diagnostic: &str,
        severity: Severity,
    ) -> Outcome {
        if ok {
            return Ok(());
        }

        self.failed = true;
        self.failures += 1;

        let line = reporter::failure_line(self.style, severity, location, expr, diagnostic);
        // A broken error stream must not change the case outcome
        let _ = writeln!(self.err, "{}", line);

        match severity {
            Severity::Fatal => {
                self.fatal = true;
                Err(FatalFailure)
            }
            Severity::NonFatal => Ok(()),
        }
    }

    /// Non-fatal check
    pub fn expect(&mut self, ok: bool, location: Location, expr: &str, diagnostic: String) {
        let _ = self.report(ok, location, expr, &diagnostic, Severity::NonFatal);
    }

    /// Fatal check; propagate the result with `?`
    pub fn require(
        &mut self,
        ok: bool,
        location: Location,
        expr: &str,
        diagnostic: String,
    ) -> Outcome {
        self.report(ok, location, expr, &diagnostic, Severity::Fatal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::ColorChoice;
    use pretty_assertions::assert_eq;

    fn plain() -> Style {
        Style::new(ColorChoice::Never)
    }

    #[test]
    fn test_passing_report_has_no_effect() {
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut err, plain());

        let outcome = ctx.report(true, Location::new("a.rs", 1), "x", "", Severity::Fatal);

        assert!(outcome.is_ok());
        assert!(!ctx.failed());
        assert!(!ctx.is_fatal());
        drop(ctx);
        assert!(err.is_empty());
    }

    #[test]
    fn test_nonfatal_failure_sets_failed_only() {
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut err, plain());

        ctx.expect(false, Location::new("math.rs", 12), "a == b", String::new());

        assert!(ctx.failed());
        assert!(!ctx.is_fatal());
        assert_eq!(ctx.failure_count(), 1);
        drop(ctx);
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "[ NONFATAL ] math.rs:12: a == b\n"
        );
    }

    #[test]
    fn test_fatal_failure_sets_both_flags() {
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut err, plain());

        let outcome = ctx.require(
            false,
            Location::new("math.rs", 3),
            "a == b",
            "lhs=1, rhs=2".to_string(),
        );

        assert_eq!(outcome, Err(FatalFailure));
        assert!(ctx.failed());
        assert!(ctx.is_fatal());
        drop(ctx);
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "[  FAILED  ] math.rs:3: a == b -> lhs=1, rhs=2\n"
        );
    }

    #[test]
    fn test_reset_clears_state() {
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut err, plain());
        let _ = ctx.require(false, Location::new("a.rs", 1), "x", String::new());

        ctx.reset();

        assert!(!ctx.failed());
        assert!(!ctx.is_fatal());
        assert_eq!(ctx.failure_count(), 0);
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new("tests/sandbox.rs", 42).to_string(), "tests/sandbox.rs:42");
    }

    #[test]
    fn test_severity_tags() {
        assert_eq!(Severity::Fatal.tag(), "[  FAILED  ]");
        assert_eq!(Severity::NonFatal.tag(), "[ NONFATAL ]");
    }
}

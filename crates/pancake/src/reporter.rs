//! Console reporter - the runner's line protocol

use crate::context::{Location, Severity};
use crate::registry::TestCase;
use crate::runner::RunSummary;
use colored::{Color, Colorize};
use std::env;
use std::io::{self, IsTerminal, Write};

const BANNER: &str = "[==========]";
const RUN_TAG: &str = "[ RUN      ]";
const OK_TAG: &str = "[       OK ]";
const CASE_FAILED_TAG: &str = "[ FAILED  ]";

/// When to highlight console output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color a stream when it is a terminal, honouring `NO_COLOR`,
    /// `CLICOLOR` and `CLICOLOR_FORCE`
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Parse `always`, `never` or `auto` (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Some(ColorChoice::Auto),
            "always" => Some(ColorChoice::Always),
            "never" => Some(ColorChoice::Never),
            _ => None,
        }
    }

    /// Whether output to `stream` gets color under this choice
    pub fn resolve(self, stream: Stream) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => auto_color(stream.is_terminal()),
        }
    }

    /// Configure the process terminal for this choice.
    ///
    /// `colored` only looks at stdout, so its global override is switched
    /// on and every [`Style`] decides for its own stream.
    pub fn prepare_terminal(self) {
        if self == ColorChoice::Never {
            return;
        }
        #[cfg(windows)]
        {
            let _ = colored::control::set_virtual_terminal(true);
        }
        colored::control::set_override(true);
    }
}

/// `auto` rules for a stream that is (or is not) a terminal
fn auto_color(is_terminal: bool) -> bool {
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0") {
        return true;
    }
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    is_terminal
}

/// Console stream a [`Style`] is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Progress lines
    Stdout,
    /// Assertion failure lines
    Stderr,
}

impl Stream {
    pub fn is_terminal(self) -> bool {
        match self {
            Stream::Stdout => io::stdout().is_terminal(),
            Stream::Stderr => io::stderr().is_terminal(),
        }
    }
}

/// Color on/off switch for the lines printed to one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    /// Style for stdout
    pub fn new(choice: ColorChoice) -> Self {
        Self::for_stream(choice, Stream::Stdout)
    }

    pub fn for_stream(choice: ColorChoice, stream: Stream) -> Self {
        Self {
            color: choice.resolve(stream),
        }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Format one assertion failure line.
///
/// `[  FAILED  ] file:line: expr -> diagnostic`, with the diagnostic part
/// left out when empty.
pub fn failure_line(
    style: Style,
    severity: Severity,
    location: Location,
    expr: &str,
    diagnostic: &str,
) -> String {
    let mut line = format!("{} {}: {}", severity.tag(), location, expr);
    if !diagnostic.is_empty() {
        line.push_str(" -> ");
        line.push_str(diagnostic);
    }

    let color = match severity {
        Severity::Fatal => Color::Red,
        Severity::NonFatal => Color::Yellow,
    };
    style.paint(&line, color)
}

/// Writes the runner's progress lines to the output stream
pub struct TestReporter {
    style: Style,
}

impl TestReporter {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// `[==========] Running N tests`
    pub fn header(&self, out: &mut dyn Write, registered: usize) -> io::Result<()> {
        let line = format!("{} Running {} tests", BANNER, registered);
        writeln!(out, "{}", self.style.bold(&line))
    }

    /// `[ RUN      ] Suite.name`
    pub fn case_started(&self, out: &mut dyn Write, case: &TestCase) -> io::Result<()> {
        writeln!(
            out,
            "{} {}",
            self.style.paint(RUN_TAG, Color::Cyan),
            case.full_name()
        )
    }

    /// `[       OK ] Suite.name` or `[ FAILED  ] Suite.name`
    pub fn case_finished(
        &self,
        out: &mut dyn Write,
        case: &TestCase,
        failed: bool,
    ) -> io::Result<()> {
        let tag = if failed {
            self.style.paint(CASE_FAILED_TAG, Color::Red)
        } else {
            self.style.paint(OK_TAG, Color::Green)
        };
        writeln!(out, "{} {}", tag, case.full_name())
    }

    /// `[==========] R tests ran.  F failed.`
    pub fn summary(&self, out: &mut dyn Write, summary: &RunSummary) -> io::Result<()> {
        let ran = format!("{} {} tests ran.  ", BANNER, summary.run);
        let failed = format!("{} failed.", summary.failed);
        let failed = if summary.failed > 0 {
            self.style.paint(&failed, Color::Red)
        } else {
            self.style.paint(&failed, Color::Green)
        };
        writeln!(out, "{}{}", self.style.bold(&ran), failed)
    }

    /// One full name per line, for `--list`
    pub fn listing(&self, out: &mut dyn Write, case: &TestCase) -> io::Result<()> {
        writeln!(out, "{}", case.full_name())
    }
}

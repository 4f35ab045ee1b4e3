// system-tests/src/report/console.rs
// ============================================================================
// Module: Console Reporter
// Description: Styled console output for harness runs.
// Purpose: Emit per-case lines, section headers, and the final summary block.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Output styling is a palette of ANSI codes selected once from the test
//! mode: `local` runs get color, `ci` runs get plain text. Line rendering is
//! pure so it can be asserted on directly; only the thin write helpers touch
//! stdout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;

use crate::config::TestMode;

use super::summary::RunSummary;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Horizontal rule used for the banner and summary block.
const RULE: &str = "============================================================";

// ============================================================================
// SECTION: Palette
// ============================================================================

/// ANSI styling selected by the configured test mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Code opening pass-colored text.
    green: &'static str,
    /// Code opening fail-colored text.
    red: &'static str,
    /// Code opening warning-colored text.
    yellow: &'static str,
    /// Code opening heading-colored text.
    blue: &'static str,
    /// Code restoring the default style.
    reset: &'static str,
}

impl Palette {
    /// Returns the colored palette for interactive runs.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            green: "\u{1b}[92m",
            red: "\u{1b}[91m",
            yellow: "\u{1b}[93m",
            blue: "\u{1b}[94m",
            reset: "\u{1b}[0m",
        }
    }

    /// Returns the plain palette for CI logs.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            green: "",
            red: "",
            yellow: "",
            blue: "",
            reset: "",
        }
    }

    /// Selects the palette for a test mode.
    #[must_use]
    pub const fn for_mode(mode: TestMode) -> Self {
        match mode {
            TestMode::Local => Self::colored(),
            TestMode::Ci => Self::plain(),
        }
    }
}

// ============================================================================
// SECTION: Line Rendering
// ============================================================================

/// Renders a passing case line.
pub(crate) fn pass_line(palette: &Palette, name: &str) -> String {
    format!("{}\u{2713} PASS{}: {name}", palette.green, palette.reset)
}

/// Renders the failing case lines (status line plus reason line).
pub(crate) fn fail_lines(palette: &Palette, name: &str, reason: &str) -> [String; 2] {
    [
        format!("{}\u{2717} FAIL{}: {name}", palette.red, palette.reset),
        format!("  {}Reason:{} {reason}", palette.yellow, palette.reset),
    ]
}

/// Renders a skipped case line.
pub(crate) fn skip_line(palette: &Palette, name: &str, reason: &str) -> String {
    format!("{}\u{2298} SKIP{}: {name} ({reason})", palette.yellow, palette.reset)
}

/// Renders a phase section header.
pub(crate) fn section_line(palette: &Palette, title: &str) -> String {
    format!("\n{}--- {title} ---{}", palette.blue, palette.reset)
}

/// Renders the final summary block.
pub(crate) fn summary_lines(palette: &Palette, summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        format!("\n{RULE}"),
        format!("Test Summary: {}/{} passed", summary.passed(), summary.total()),
    ];
    if summary.failed() > 0 {
        lines.push(format!("{}Failed tests:{}", palette.red, palette.reset));
        for failure in summary.failures() {
            lines.push(format!("  - {}: {}", failure.name, failure.reason));
        }
    }
    lines.push(RULE.to_string());
    lines
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Console reporter injected into the runner.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    /// Styling applied to every rendered line.
    palette: Palette,
}

impl ConsoleReporter {
    /// Creates a reporter for the configured test mode.
    #[must_use]
    pub const fn new(mode: TestMode) -> Self {
        Self {
            palette: Palette::for_mode(mode),
        }
    }

    /// Writes the opening banner.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to stdout fails.
    pub fn banner(&self, server: &str, username: &str) -> io::Result<()> {
        write_stdout_line(&format!("\n{}{RULE}", self.palette.blue))?;
        write_stdout_line("Task Graph Integration Tests")?;
        write_stdout_line(&format!("Server: {server}"))?;
        write_stdout_line(&format!("Test User: {username}"))?;
        write_stdout_line(&format!("{RULE}{}", self.palette.reset))
    }

    /// Writes a phase section header.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to stdout fails.
    pub fn section(&self, title: &str) -> io::Result<()> {
        write_stdout_line(&section_line(&self.palette, title))
    }

    /// Writes a passing case line.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to stdout fails.
    pub fn pass(&self, name: &str) -> io::Result<()> {
        write_stdout_line(&pass_line(&self.palette, name))
    }

    /// Writes the failing case lines.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to stdout fails.
    pub fn fail(&self, name: &str, reason: &str) -> io::Result<()> {
        for line in fail_lines(&self.palette, name, reason) {
            write_stdout_line(&line)?;
        }
        Ok(())
    }

    /// Writes a skipped case line.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to stdout fails.
    pub fn skip(&self, name: &str, reason: &str) -> io::Result<()> {
        write_stdout_line(&skip_line(&self.palette, name, reason))
    }

    /// Writes the readiness waiting line.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to stdout fails.
    pub fn waiting(&self, server: &str) -> io::Result<()> {
        write_stdout_line(&format!(
            "{}Waiting for server at {server}...{}",
            self.palette.blue, self.palette.reset
        ))
    }

    /// Writes the readiness success line.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to stdout fails.
    pub fn ready(&self) -> io::Result<()> {
        write_stdout_line(&format!(
            "{}Server is ready!{}",
            self.palette.green, self.palette.reset
        ))
    }

    /// Writes the readiness exhaustion line.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to stdout fails.
    pub fn not_ready(&self, attempts: u32) -> io::Result<()> {
        write_stdout_line(&format!(
            "{}Server did not start within {attempts} attempts{}",
            self.palette.red, self.palette.reset
        ))
    }

    /// Writes the final summary block.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to stdout fails.
    pub fn summary(&self, summary: &RunSummary) -> io::Result<()> {
        for line in summary_lines(&self.palette, summary) {
            write_stdout_line(&line)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Write Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(&mut stdout, "{message}")
}

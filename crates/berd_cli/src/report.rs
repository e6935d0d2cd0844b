//! Terminal output: colored diagnostics and source-annotated fatal errors.

use berd_core::text::{LineMap, TextSpan};
use berd_diagnostics::{Diagnostic, DiagnosticCategory};
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report, Severity};

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Whether stderr is a terminal.
pub fn stderr_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// `file(line,col)` for a diagnostic attributed to a file.
pub fn location(diag: &Diagnostic, line_map: &LineMap<'_>) -> Option<String> {
    let file = diag.file.as_ref()?;
    Some(match diag.span {
        Some(span) => format!("{}({})", file, line_map.location(span.start)),
        None => file.clone(),
    })
}

pub fn print_diagnostic(diag: &Diagnostic, line_map: &LineMap<'_>, use_color: bool) {
    let location = location(diag, line_map);
    if !use_color {
        match location {
            Some(location) => eprintln!(
                "{}: {} BD{}: {}",
                location, diag.category, diag.code, diag.message_text
            ),
            None => eprintln!("{}", diag),
        }
        return;
    }

    let color = match diag.category {
        DiagnosticCategory::Error => RED,
        DiagnosticCategory::Warning => YELLOW,
        DiagnosticCategory::Suggestion | DiagnosticCategory::Message => GRAY,
    };
    if let Some(location) = location {
        eprint!("{}{}{}: ", CYAN, location, RESET);
    }
    eprintln!(
        "{}{}{}{} {}BD{}{}: {}",
        BOLD, color, diag.category, RESET, CYAN, diag.code, RESET, diag.message_text
    );
}

pub fn print_error(msg: &str, use_color: bool) {
    if use_color {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Build a report for a fatal error, labeling `span` in `source` when known.
pub fn fatal_report(
    name: &str,
    source: &str,
    message: &str,
    code: Option<u32>,
    span: Option<TextSpan>,
) -> Report {
    let mut diagnostic = MietteDiagnostic::new(message).with_severity(Severity::Error);
    if let Some(code) = code {
        diagnostic = diagnostic.with_code(format!("BD{}", code));
    }
    if let Some(span) = span {
        diagnostic = diagnostic.with_label(LabeledSpan::at(span.clamped_range(source.len()), "here"));
    }
    Report::new(diagnostic).with_source_code(NamedSource::new(name, source.to_string()))
}

/// Print a fatal error with the offending source line.
pub fn print_fatal(report: &Report) {
    eprintln!("{:?}", report);
}

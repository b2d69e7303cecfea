//! Pure formatting functions for UI output.
//!
//! The resolved version is the only thing written to stdout, so scripts can
//! capture it directly. Everything else goes to stderr.

use console::style;

use crate::degraded::Degradation;

/// Format a degradation with a warning or notice marker.
pub fn format_degradation(degradation: &Degradation) -> String {
    if degradation.is_notice() {
        format!("{} {}", style("ℹ NOTICE:").cyan(), degradation)
    } else {
        format!("{} {}", style("⚠ WARNING:").yellow(), degradation)
    }
}

/// Format a status line describing a completed operation.
pub fn format_status(operation: &str, store: &str, version: &str) -> String {
    format!(
        "{} {} ({}) -> {}",
        style("→").yellow(),
        operation,
        store,
        style(version).green().bold()
    )
}

/// Print the resolved version to stdout.
pub fn display_version(version: &str) {
    println!("{}", version);
}

/// Format an error message with a red marker.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Display a degradation to the user.
pub fn display_degradation(degradation: &Degradation) {
    eprintln!("{}", format_degradation(degradation));
}

/// Display every degradation in order.
pub fn display_degradations(degradations: &[Degradation]) {
    for degradation in degradations {
        display_degradation(degradation);
    }
}

/// Display a status line on stderr.
pub fn display_status(operation: &str, store: &str, version: &str) {
    eprintln!("{}", format_status(operation, store, version));
}

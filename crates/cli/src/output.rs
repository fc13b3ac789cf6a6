//! Terminal output helpers

use colored::Colorize;
use std::path::Path;

/// Print a section heading
pub fn heading(text: &str) {
    println!("{}", text.bold().underline());
}

/// Print a success line
pub fn success(text: &str) {
    println!("{} {}", "✓".green().bold(), text);
}

/// Print a line for a written file
pub fn written(path: &Path) {
    println!("  {} {}", "wrote".green(), path.display());
}

/// Print a review hint to stderr
pub fn warning(text: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), text);
}

/// Print an aligned `label: value` row
pub fn row(label: &str, value: impl std::fmt::Display) {
    let label = format!("{:<18}", format!("{}:", label));
    println!("  {} {}", label.dimmed(), value);
}

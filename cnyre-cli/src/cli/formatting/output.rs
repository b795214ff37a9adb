/// Status lines shared by every command
use colored::*;

pub fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn info(message: &str) {
    println!("{} {}", "●".blue(), message);
}

/// Warnings go to stderr so piped table output stays clean
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

pub fn empty(message: &str) {
    println!("{} {}", "◌".dimmed(), message);
}

/// Label/value line, e.g. in `info`
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<16} {}", format!("{}:", label).dimmed(), value);
}

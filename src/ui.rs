//! Text output for `--output text`
//!
//! JSON output never goes through here.

use colored::Colorize;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a message for something that needed no change
pub fn unchanged(msg: &str) {
    println!("{} {}", "○".dimmed(), msg);
}

/// Print a change that check mode did not make
pub fn pending(msg: &str) {
    println!("{} {}", "~".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted block, one indented line per input line
pub fn dim(text: &str) {
    for line in text.trim_end().lines() {
        println!("  {}", line.dimmed());
    }
}

/// Print a header/title
pub fn header(title: &str) {
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

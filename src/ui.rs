// UI module for consistent terminal output styling

#![allow(clippy::print_stdout, clippy::print_stderr)]

use console::style;

/// Print a success message with checkmark
pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print an info/action message with arrow
pub fn action(message: &str) {
    println!("{} {}", style("→").cyan(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Print a header/section message
pub fn header(message: &str) {
    println!("{}", style(message).bold());
}

/// Print a dimmed/secondary message
pub fn dim(message: &str) {
    println!("{}", style(message).dim());
}

/// Print plain data to stdout, for output meant to be piped
pub fn data(line: &str) {
    println!("{}", line);
}

/// Print a check line: ok, warning, or error marker followed by the message
pub fn check_line(marker: CheckMarker, name: &str, message: &str) {
    let marker = match marker {
        CheckMarker::Ok => style("✓").green(),
        CheckMarker::Warning => style("⚠").yellow(),
        CheckMarker::Error => style("✗").red(),
    };
    println!("  {} {}: {}", marker, name, message);
}

#[derive(Debug, Clone, Copy)]
pub enum CheckMarker {
    Ok,
    Warning,
    Error,
}

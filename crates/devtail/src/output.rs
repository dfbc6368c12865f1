//! Terminal output helpers

use colored::{ColoredString, Colorize};

fn prefix() -> ColoredString {
    "[devtail]".cyan()
}

pub fn print_info(message: &str) {
    println!("{} {}", prefix(), message);
}

pub fn print_warn(message: &str) {
    eprintln!("{} {} {}", prefix(), "Warning:".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {} {}", prefix(), "Error:".red(), message);
}

//! Progress indicators for CLI mode

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a simple spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(spinner_style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Print a success line for a written chain file
pub fn print_written(path: &str) {
    println!("{} {}", style("✓").green().bold(), path);
}

/// Print a dimmed informational line
pub fn print_note(message: &str) {
    println!("{} {}", style("•").dim(), style(message).dim());
}

//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Render a list of items in the selected format
pub fn render_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table if items.is_empty() => "No results found.".to_string(),
        OutputFormat::Table => Table::new(items).to_string(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    println!("{}", render_list(items, format));
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

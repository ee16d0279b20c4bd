//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No profiles configured.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format labelled values as an aligned two-column block
pub fn format_details(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    pairs
        .iter()
        .map(|(label, value)| {
            let label = format!("{}:", label);
            format!("  {:<width$}  {}", label, value, width = width + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

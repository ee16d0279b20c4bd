//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// Render a list of rows in the requested format.
///
/// `Pretty` and `Table` both render a table; `Json` wraps the rows with
/// metadata.
pub fn render_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(json::format_json(rows)?),
        OutputFormat::Pretty | OutputFormat::Table => Ok(table::format_table(rows)),
    }
}

/// Mask a secret, keeping a short prefix and suffix when it is long enough
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}

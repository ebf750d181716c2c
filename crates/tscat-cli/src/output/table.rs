//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use tscat::Coverage;

/// Format coverage results as a table, one row per language.
pub fn format_coverage_table(coverage: &[Coverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Coverage", "Unfinished", "Missing"]);

    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            format!("{}/{}", lang.translated, lang.total),
            lang.unfinished.to_string(),
            lang.missing.len().to_string(),
        ]);
    }

    table
}

//! Table output for entity reads using comfy-table.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use serde_json::Value;

use crate::services::entity_router::EntitySet;

/// Longest cell text before truncation
const MAX_CELL_WIDTH: usize = 48;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self { max_width: None }
    }

    pub fn with_max_width(max_width: u16) -> Self {
        Self {
            max_width: Some(max_width),
        }
    }

    /// Format the records of an entity set, one row each.
    ///
    /// Columns are the union of record fields in first-seen order; a field
    /// missing from a record renders as `-`.
    pub fn format_entity_set(&self, set: &EntitySet) -> String {
        let columns = columns(&set.records);
        let mut table = self.create_base_table();

        table.set_header(
            columns
                .iter()
                .map(|c| Cell::new(c).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );

        for record in &set.records {
            table.add_row(
                columns
                    .iter()
                    .map(|c| Cell::new(cell_text(record.get(c.as_str()))))
                    .collect::<Vec<_>>(),
            );
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn columns(records: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for key in records.iter().filter_map(Value::as_object).flat_map(|o| o.keys()) {
        if !columns.iter().any(|c| c == key) {
            columns.push(key.clone());
        }
    }
    columns
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => super::truncate(s, MAX_CELL_WIDTH),
        Some(other) => super::truncate(&other.to_string(), MAX_CELL_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn custom_products() -> EntitySet {
        EntitySet {
            entity: "CustomProducts".to_string(),
            records: vec![
                json!({"id": 1, "name": "name1", "title": "Wuthering Heights"}),
                json!({"id": 2, "name": "name2"}),
            ],
            single: false,
        }
    }

    #[test]
    fn test_columns_union_of_fields() {
        assert_eq!(columns(&custom_products().records), vec!["id", "name", "title"]);
    }

    #[test]
    fn test_format_entity_set() {
        let rendered = TableFormatter::with_max_width(120).format_entity_set(&custom_products());

        assert!(rendered.contains("title"));
        assert!(rendered.contains("Wuthering Heights"));
        assert!(rendered.contains("name2"));
        assert!(rendered.contains('-'));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "-");
        assert_eq!(cell_text(Some(&Value::Null)), "-");
        assert_eq!(cell_text(Some(&json!("plain"))), "plain");
        assert_eq!(cell_text(Some(&json!(333))), "333");
    }
}

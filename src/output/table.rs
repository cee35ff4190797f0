//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a rounded table with a centered header
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::models::ResolutionDisplay;
    use crate::resolver::NameRecord;

    #[test]
    fn test_format_table_empty() {
        let rows: Vec<ResolutionDisplay> = vec![];
        assert_eq!(format_table(&rows), "No results found.");
    }

    #[test]
    fn test_format_table_resolution_rows() {
        let rows = vec![
            ResolutionDisplay::from_result("7", &Ok(NameRecord::tenant("7", "Acme"))),
            ResolutionDisplay::from_result("404", &Err(ResolveError::NotFound("404".into()))),
        ];

        let result = format_table(&rows);

        assert!(result.contains("TENANT NAME"));
        assert!(result.contains("Acme"));
        assert!(result.contains("not_found"));
        // Rounded style corners
        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }
}

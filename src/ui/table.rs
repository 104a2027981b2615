//! Box-drawn tables for `list`, `info` and prerequisite reports.

use console::measure_text_width;
use std::fmt;

/// A simple table for formatted output.
///
/// Widths are measured in terminal columns, so cells may carry ANSI
/// styling or multi-byte symbols without breaking alignment.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row to the table. Extra cells beyond the header count are dropped.
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let row: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|s| s.as_ref().to_string())
            .collect();

        for (width, cell) in self.column_widths.iter_mut().zip(&row) {
            *width = (*width).max(measure_text_width(cell));
        }

        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(self.render_border('┌', '┬', '┐'));
        lines.push(self.render_row(&self.headers));
        lines.push(self.render_border('├', '┼', '┤'));
        for row in &self.rows {
            lines.push(self.render_row(row));
        }
        lines.push(self.render_border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .column_widths
            .iter()
            .map(|w| "─".repeat(w + 2))
            .collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut s = String::from("│");
        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(measure_text_width(cell));
            s.push(' ');
            s.push_str(cell);
            s.push_str(&" ".repeat(pad));
            s.push_str(" │");
        }
        s
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_renders_headers() {
        let table = Table::new(&["ID", "Name"]);
        assert!(table.is_empty());
        let output = table.render();
        assert!(output.contains("ID"));
        assert!(output.contains("Name"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn rows_are_rendered() {
        let mut table = Table::new(&["ID", "Category"]);
        table.add_row(&["react-vite", "frontend"]);
        table.add_row(&["django", "framework"]);

        assert_eq!(table.row_count(), 2);
        let output = table.render();
        assert!(output.contains("react-vite"));
        assert!(output.contains("framework"));
        assert_eq!(output.lines().count(), 6);
    }

    #[test]
    fn all_lines_have_equal_width() {
        let mut table = Table::new(&["Tool", "Status"]);
        table.add_row(&["node", "✓ 20.11.0"]);
        table.add_row(&["python3", "✗ missing"]);

        let output = table.render();
        let widths: Vec<usize> = output.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{:?}", widths);
    }

    #[test]
    fn missing_cells_are_blank() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.add_row(&["only", "two"]);
        let output = table.render();
        assert!(output.contains("only"));
        assert!(output.contains("two"));
    }

    #[test]
    fn uses_box_drawing_separators() {
        let mut table = Table::new(&["Col1", "Col2"]);
        table.add_row(&["a", "b"]);
        let output = table.to_string();
        for c in ['┌', '┬', '┐', '├', '┼', '┤', '└', '┴', '┘', '│'] {
            assert!(output.contains(c), "missing {}", c);
        }
    }
}

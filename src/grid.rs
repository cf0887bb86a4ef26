use serde::{Deserialize, Serialize};

/// Column order every data row follows. Row 0 of a grid holds these names.
pub const HEADER: [&str; 5] = ["name", "email", "phone", "message", "date"];

/// The persistent row/column store backing leads.
///
/// Row 0 is the header; each subsequent row is one lead, positionally
/// aligned to the header. Append-only: "newest" means "last appended".
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// A fresh grid holding only the header row.
    pub fn with_header() -> Self {
        Grid {
            rows: vec![HEADER.iter().map(|h| h.to_string()).collect()],
        }
    }

    /// Number of columns, as defined by the header row.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |header| header.len())
    }

    /// Appends one data row, padded or truncated to the header width so
    /// every row keeps the same column count.
    pub fn append_row(&mut self, mut cells: Vec<String>) {
        let width = self.width();
        cells.resize(width, String::new());
        self.rows.push(cells);
    }

    /// Rows after the header. Empty for a header-only grid.
    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.rows.len() > 1 { &self.rows[1..] } else { &[] }
    }
}

use getset::Getters;
use log::{debug, warn};

/// A grid of string cells. Row 0 holds the column names, the rest is data.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Table {
    #[getset(get = "pub")]
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Splits raw text into rows on `\n` and into cells on `,`.
    ///
    /// Surrounding whitespace is trimmed first. There is no quoting or
    /// escaping: a comma inside a cell always starts a new cell. Empty input
    /// yields a single row holding one empty cell, which fails [`Table::validate`].
    pub fn parse(raw: &str) -> Self {
        let rows: Vec<Vec<String>> = raw
            .trim()
            .split('\n')
            .map(|line| line.split(',').map(String::from).collect())
            .collect();
        debug!("parsed {} rows", rows.len());

        Table { rows }
    }

    /// Checks that there is a header plus at least one data row and that every
    /// data row has `column_count` cells, or as many cells as the header when
    /// no count is given.
    ///
    /// The header itself is only used as the reference, never checked against
    /// `column_count`.
    pub fn validate(&self, column_count: Option<usize>) -> bool {
        if self.rows.len() < 2 {
            warn!("table has {} rows, at least 2 are required", self.rows.len());
            return false;
        }

        let expected = column_count.unwrap_or(self.rows[0].len());
        match self.rows[1..].iter().position(|row| row.len() != expected) {
            Some(idx) => {
                warn!(
                    "row {} has {} cells, expected {expected}",
                    idx + 1,
                    self.rows[idx + 1].len()
                );
                false
            }
            None => true,
        }
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Joins the cells back into comma separated text.
    pub fn to_csv_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<Vec<String>>> for Table {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Table { rows }
    }
}

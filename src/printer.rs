use crate::table::Table;

pub const SEPARATOR_WIDTH: usize = 50;

const RULE: char = '-';

/// Repeats the rule character `count` times and ends with `new_lines` newlines.
pub fn rule(count: usize, new_lines: usize) -> String {
    let mut line = RULE.to_string().repeat(count);
    line.push_str(&"\n".repeat(new_lines));
    line
}

pub fn separator() -> String {
    rule(SEPARATOR_WIDTH, 2)
}

/// Width of every column: the longest cell in that column plus one.
pub fn column_widths(table: &Table) -> Vec<usize> {
    let columns = table.rows().iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col_idx| {
            table
                .rows()
                .iter()
                .filter_map(|row| row.get(col_idx))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                + 1
        })
        .collect()
}

/// Renders the table as a fixed width grid.
///
/// A rule is drawn above the header and again above the first data row, and
/// the grid is closed by a rule followed by a blank line.
pub fn render_table(table: &Table) -> String {
    let widths = column_widths(table);
    let rule_width = widths.iter().sum::<usize>() + widths.len() + 1;

    let mut out = String::new();
    for (row_idx, row) in table.rows().iter().enumerate() {
        if row_idx < 2 {
            out.push_str(&rule(rule_width, 1));
        }
        out.push('|');
        for (cell, width) in row.iter().zip(&widths) {
            out.push_str(&format!("{cell:<width$}|"));
        }
        out.push('\n');
    }
    out.push_str(&rule(rule_width, 2));
    out
}

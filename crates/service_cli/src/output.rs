//! Rendering command results as tables or JSON.

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A box-drawn text table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given column headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; missing cells render blank, extra cells are dropped.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
        self
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Renders the table to a string.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!(" {:<width$} ", c, width = w))
                .collect();
            format!("│{}│\n", padded.join("│"))
        };

        let mut out = rule("┌", "┬", "┐");
        out.push_str(&line(&self.headers));
        out.push_str(&rule("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row));
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

/// Prints `value` as pretty JSON, or the table built by `table`.
pub fn emit<T, F>(format: OutputFormat, value: &T, table: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> Table,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => print!("{}", table(value).render()),
    }
    Ok(())
}

/// Fixed-precision number cell.
pub fn num(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new(["Name", "Value"]);
        table.row(["price", "10.4506"]).row(["delta", "0.64"]);

        let expected = "\
┌───────┬─────────┐
│ Name  │ Value   │
├───────┼─────────┤
│ price │ 10.4506 │
│ delta │ 0.64    │
└───────┴─────────┘
";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_short_rows_padded() {
        let mut table = Table::new(["a", "b", "c"]);
        table.row(["1"]);
        assert!(table.render().contains("│ 1 │   │   │"));
    }

    #[test]
    fn test_num() {
        assert_eq!(num(10.450583, 4), "10.4506");
        assert_eq!(num(-0.5, 2), "-0.50");
    }
}

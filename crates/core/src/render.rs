use std::io::{self, Write};

use thiserror::Error;

use crate::console::Console;
use crate::driver::{ColumnDescriptor, ColumnMetadata, RowIter};
use crate::error::StatementError;

pub const MIN_WIDTH: usize = 5;
pub const MAX_WIDTH: usize = 40;
pub const NULL_TEXT: &str = "(null)";
const ELLIPSIS: char = '…';

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Statement(#[from] StatementError),
    #[error(transparent)]
    Output(#[from] io::Error),
}

pub fn column_width(label: &str, display_size: usize) -> usize {
    label
        .chars()
        .count()
        .max(display_size)
        .clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Cut `cell` down to `width` characters, marking the cut with an ellipsis.
pub fn fit(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let mut fitted: String = cell.chars().take(width.saturating_sub(1)).collect();
    fitted.push(ELLIPSIS);
    fitted
}

/// Box-drawing for one result: fixed column widths decided up front from the
/// column descriptors, rows formatted one at a time.
#[derive(Debug)]
pub struct TableRenderer {
    labels: Vec<String>,
    widths: Vec<usize>,
}

impl TableRenderer {
    pub fn new(columns: &[ColumnDescriptor]) -> Self {
        let labels: Vec<String> = columns.iter().map(|c| c.label.to_uppercase()).collect();
        let widths = labels
            .iter()
            .zip(columns)
            .map(|(label, column)| column_width(label, column.display_size))
            .collect();

        TableRenderer { labels, widths }
    }

    pub fn separator(&self) -> String {
        let mut line = String::from("+");
        for width in &self.widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    }

    pub fn row<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let mut line = String::from("|");
        for (cell, &width) in cells.iter().zip(&self.widths) {
            let cell = fit(cell.as_ref(), width);
            line.push_str(&format!(" {cell:<width$} |"));
        }
        line
    }

    fn header<W: Write>(&self, console: &Console<W>) -> String {
        let mut line = String::from("|");
        for (label, &width) in self.labels.iter().zip(&self.widths) {
            let cell = format!(" {:<width$} ", fit(label, width));
            line.push_str(&console.bold(&cell));
            line.push('|');
        }
        line
    }

    fn open<W: Write>(&self, console: &mut Console<W>) -> io::Result<()> {
        let separator = self.separator();
        let header = self.header(console);
        console.blank()?;
        console.line(&separator)?;
        console.line(&header)?;
        console.line(&separator)
    }
}

fn cell_text(cell: Option<String>) -> String {
    cell.unwrap_or_else(|| NULL_TEXT.to_string())
}

/// Stream `rows` into a table, returning how many rows were printed.
///
/// A failing row stops the table there; the error comes back to the caller
/// and the closing separator is not drawn.
pub fn render_rows<W: Write>(
    console: &mut Console<W>,
    columns: &[ColumnDescriptor],
    rows: RowIter<'_>,
) -> Result<usize, RenderError> {
    let table = TableRenderer::new(columns);
    table.open(console)?;

    let mut count = 0;
    for row in rows {
        let cells: Vec<String> = row?.into_iter().map(cell_text).collect();
        console.line(&table.row(&cells))?;
        count += 1;
    }

    console.line(&table.separator())?;
    Ok(count)
}

/// The fixed four-column layout used by `DESC`.
pub fn describe_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("COLUMN_NAME", 30),
        ColumnDescriptor::new("DATA_TYPE", 20),
        ColumnDescriptor::new("SIZE", 10),
        ColumnDescriptor::new("NULLABLE", 10),
    ]
}

pub fn render_description<W: Write>(
    console: &mut Console<W>,
    metadata: &[ColumnMetadata],
) -> io::Result<usize> {
    let table = TableRenderer::new(&describe_columns());
    table.open(console)?;

    for column in metadata {
        let size = column.size.map(|s| s.to_string());
        let cells = [
            column.name.clone(),
            column.type_name.clone(),
            cell_text(size),
            if column.nullable { "YES" } else { "NO" }.to_string(),
        ];
        console.line(&table.row(&cells))?;
    }

    console.line(&table.separator())?;
    Ok(metadata.len())
}

//! Column-Aligned Table Rendering
//!
//! Renders a rectangular grid of displayable values as aligned text:
//!
//! ```text
//! +-------+-----------+
//! | Label | avg       |
//! +-------+-----------+
//! | fast  | 12.345 µs |
//! +-------+-----------+
//! ```
//!
//! - Column widths are the widest cell of each column (in characters)
//! - Ragged rows are padded with empty cells up to the widest row
//! - [`Row::Separator`] renders as a full-width divider instead of data
//! - A single cell may be highlighted with inverse video (used by the selector)

use std::fmt::Display;
use std::io::{self, Write};

/// ANSI sequence starting inverse video
pub const INVERSE_VIDEO: &str = "\x1b[7m";

/// ANSI sequence resetting all attributes
pub const RESET: &str = "\x1b[0m";

/// ANSI sequence moving the cursor home and clearing the screen
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[J";

/// Characters used to draw the table frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    /// Between cells and at both row ends
    pub vertical: &'static str,
    /// Repeated to draw divider rows
    pub horizontal: &'static str,
    /// Where dividers cross column boundaries
    pub intersection: &'static str,
}

impl Separator {
    /// Create a separator set from its three parts
    pub const fn new(
        vertical: &'static str,
        horizontal: &'static str,
        intersection: &'static str,
    ) -> Self {
        Self {
            vertical,
            horizontal,
            intersection,
        }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::new("|", "-", "+")
    }
}

/// One row of a table grid
#[derive(Debug, Clone, PartialEq)]
pub enum Row<T> {
    /// Data cells, rendered left-aligned
    Cells(Vec<T>),
    /// Divider sentinel
    Separator,
}

impl<T> Row<T> {
    /// Number of cells (0 for a separator)
    pub fn len(&self) -> usize {
        match self {
            Row::Cells(cells) => cells.len(),
            Row::Separator => 0,
        }
    }

    /// True for separators and rows without cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this row is the divider sentinel
    pub fn is_separator(&self) -> bool {
        matches!(self, Row::Separator)
    }
}

impl<T> From<Vec<T>> for Row<T> {
    fn from(cells: Vec<T>) -> Self {
        Row::Cells(cells)
    }
}

/// Cell coordinates, counted over all grid rows including separators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlight {
    /// Row index in the grid
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl Highlight {
    /// Highlight the cell at `(row, col)`
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Display width of a cell's text
///
/// Counts characters so that prefixed units such as `µs` stay aligned.
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Number of rows and the cell count of the widest row
pub fn max_bounds<T>(grid: &[Row<T>]) -> (usize, usize) {
    let cols = grid.iter().map(Row::len).max().unwrap_or(0);
    (grid.len(), cols)
}

/// Fetch the cell at `(row, col)`, or `None` outside the grid or on a separator
pub fn fetch_entry<T>(grid: &[Row<T>], row: usize, col: usize) -> Option<&T> {
    match grid.get(row)? {
        Row::Cells(cells) => cells.get(col),
        Row::Separator => None,
    }
}

/// Per-column display widths over all data rows
pub fn column_widths<T: Display>(grid: &[Row<T>]) -> Vec<usize> {
    let (_, cols) = max_bounds(grid);
    let mut widths = vec![0; cols];
    for row in grid {
        if let Row::Cells(cells) = row {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(display_width(&cell.to_string()));
            }
        }
    }
    widths
}

/// Build a divider line: one run of `width + 2` horizontals per column
pub fn separator_line(widths: &[usize], sep: &Separator) -> String {
    let runs: Vec<String> = widths
        .iter()
        .map(|width| sep.horizontal.repeat(width + 2))
        .collect();
    format!(
        "{}{}{}",
        sep.intersection,
        runs.join(sep.intersection),
        sep.intersection
    )
}

/// Render a single data row
///
/// Cells past the end of `row` are rendered empty. If `highlight` points at
/// `row_idx`, that cell is wrapped in inverse video.
pub fn construct_row<T: Display>(
    row: &[T],
    row_idx: usize,
    widths: &[usize],
    sep: &Separator,
    highlight: Option<Highlight>,
) -> String {
    let elements: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(col_idx, &width)| {
            let text = row
                .get(col_idx)
                .map(ToString::to_string)
                .unwrap_or_default();
            let padding = " ".repeat(width.saturating_sub(display_width(&text)));
            let highlighted = highlight.is_some_and(|h| h.row == row_idx && h.col == col_idx);
            if highlighted {
                format!("{INVERSE_VIDEO} {text}{padding} {RESET}")
            } else {
                format!(" {text}{padding} ")
            }
        })
        .collect();

    format!(
        "{}{}{}",
        sep.vertical,
        elements.join(sep.vertical),
        sep.vertical
    )
}

/// Render a full table, framed by a divider at the top and bottom
///
/// With `separate_lines`, a divider is also placed after every data row
/// except the last. An empty grid renders as no lines.
pub fn construct_table<T: Display>(
    grid: &[Row<T>],
    sep: &Separator,
    separate_lines: bool,
    highlight: Option<Highlight>,
) -> Vec<String> {
    if grid.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(grid);
    let divider = separator_line(&widths, sep);

    let mut output = Vec::with_capacity(grid.len() + 2);
    output.push(divider.clone());
    for (row_idx, row) in grid.iter().enumerate() {
        match row {
            Row::Separator => output.push(divider.clone()),
            Row::Cells(cells) => {
                output.push(construct_row(cells, row_idx, &widths, sep, highlight));
                if separate_lines && row_idx + 1 != grid.len() {
                    output.push(divider.clone());
                }
            }
        }
    }
    output.push(divider);
    output
}

/// Write a rendered table as newline-terminated lines
pub fn write_table<T: Display, W: Write>(
    writer: &mut W,
    grid: &[Row<T>],
    sep: &Separator,
) -> io::Result<()> {
    for line in construct_table(grid, sep, false, None) {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

/// Print a table to stdout
pub fn print_table<T: Display>(grid: &[Row<T>], sep: &Separator) -> io::Result<()> {
    let stdout = io::stdout();
    write_table(&mut stdout.lock(), grid, sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&'static str]]) -> Vec<Row<&'static str>> {
        rows.iter().map(|r| Row::Cells(r.to_vec())).collect()
    }

    #[test]
    fn test_column_widths() {
        let data = grid(&[&["a", "bb"], &["ccc", "d"]]);
        assert_eq!(column_widths(&data), vec![3, 2]);
    }

    #[test]
    fn test_rendered_lines_have_equal_length() {
        let data = grid(&[&["a", "bb"], &["ccc", "d"]]);
        let lines = construct_table(&data, &Separator::default(), false, None);

        assert_eq!(
            lines,
            vec![
                "+-----+----+",
                "| a   | bb |",
                "| ccc | d  |",
                "+-----+----+",
            ]
        );
        let len = lines[0].len();
        assert!(lines.iter().all(|l| l.len() == len));
    }

    #[test]
    fn test_separator_sentinel() {
        let data = vec![
            Row::Cells(vec!["Coin", "Amount"]),
            Row::Separator,
            Row::Cells(vec!["BTC", "0.18"]),
        ];
        let lines = construct_table(&data, &Separator::default(), false, None);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], lines[0]);
        assert_eq!(lines[2], "+------+--------+");
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let data = grid(&[&["Label", "avg", "std"], &["x"]]);
        let lines = construct_table(&data, &Separator::default(), false, None);

        assert_eq!(lines[2], "| x     |     |     |");
        assert_eq!(lines[1].len(), lines[2].len());
    }

    #[test]
    fn test_separate_lines() {
        let data = grid(&[&["a"], &["b"], &["c"]]);
        let lines = construct_table(&data, &Separator::default(), true, None);

        // top, a, div, b, div, c, bottom
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2], "+---+");
        assert_eq!(lines[5], "| c |");
    }

    #[test]
    fn test_highlight() {
        let data = grid(&[&["a", "b"], &["c", "d"]]);
        let highlight = Some(Highlight::new(1, 1));
        let lines = construct_table(&data, &Separator::default(), false, highlight);

        assert_eq!(lines[1], "| a | b |");
        assert_eq!(lines[2], format!("| c |{INVERSE_VIDEO} d {RESET}|"));
    }

    #[test]
    fn test_unit_prefix_alignment() {
        let data = grid(&[&["12.000 µs"], &["12.000 ms"]]);
        let lines = construct_table(&data, &Separator::default(), false, None);

        assert_eq!(lines[1].chars().count(), lines[2].chars().count());
    }

    #[test]
    fn test_custom_separator() {
        let sep = Separator::new("#", "=", "*");
        let data = grid(&[&["ab"]]);
        let lines = construct_table(&data, &sep, false, None);

        assert_eq!(lines, vec!["*====*", "# ab #", "*====*"]);
    }

    #[test]
    fn test_empty_grid() {
        let data: Vec<Row<String>> = Vec::new();
        let lines = construct_table(&data, &Separator::default(), false, None);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_fetch_entry() {
        let data = vec![Row::Cells(vec![1, 2]), Row::Separator, Row::Cells(vec![3])];

        assert_eq!(fetch_entry(&data, 0, 1), Some(&2));
        assert_eq!(fetch_entry(&data, 1, 0), None);
        assert_eq!(fetch_entry(&data, 2, 1), None);
        assert_eq!(fetch_entry(&data, 9, 0), None);
        assert_eq!(max_bounds(&data), (3, 2));
    }

    #[test]
    fn test_write_table() {
        let data = grid(&[&["a"]]);
        let mut out = Vec::new();
        write_table(&mut out, &data, &Separator::default()).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "+---+\n| a |\n+---+\n");
    }
}

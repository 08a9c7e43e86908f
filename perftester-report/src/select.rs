//! Interactive Cell Selection
//!
//! Lets a user walk a highlighted cursor over a rendered table and pick a
//! cell. Navigation wraps around at the edges. The [`Selector`] holds the
//! cursor state; [`select_element_in_table`] drives it from line-oriented
//! input, redrawing the table after every command.

use crate::table::{
    CLEAR_SCREEN, Highlight, Row, Separator, construct_table, fetch_entry, max_bounds,
};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// A navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Previous row
    Up,
    /// Next row
    Down,
    /// Previous column
    Left,
    /// Next column
    Right,
    /// Accept the current cell
    Select,
    /// Abort without a selection
    Quit,
}

impl Command {
    /// Parse one line of user input
    ///
    /// Accepts `w/a/s/d`, arrow names, `q`/`esc` and an empty line (Enter).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "w" | "up" => Some(Command::Up),
            "s" | "down" => Some(Command::Down),
            "a" | "left" => Some(Command::Left),
            "d" | "right" => Some(Command::Right),
            "" | "enter" => Some(Command::Select),
            "q" | "esc" | "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Cursor moved (or stayed); keep going
    Moved,
    /// User accepted the cell under the cursor
    Selected(Highlight),
    /// User quit
    Cancelled,
}

/// Cursor over a `rows x cols` grid
#[derive(Debug, Clone)]
pub struct Selector {
    rows: usize,
    cols: usize,
    cursor: Highlight,
}

impl Selector {
    /// Create a selector with the cursor at the top-left cell
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cursor: Highlight::default(),
        }
    }

    /// Create a selector sized to a grid
    pub fn for_grid<T>(grid: &[Row<T>]) -> Self {
        let (rows, cols) = max_bounds(grid);
        Self::new(rows, cols)
    }

    /// Current cursor position
    pub fn cursor(&self) -> Highlight {
        self.cursor
    }

    /// Apply a command, wrapping around at the grid edges
    pub fn apply(&mut self, command: Command) -> Step {
        match command {
            Command::Up => self.cursor.row = wrap_back(self.cursor.row, self.rows),
            Command::Down => self.cursor.row = wrap_forward(self.cursor.row, self.rows),
            Command::Left => self.cursor.col = wrap_back(self.cursor.col, self.cols),
            Command::Right => self.cursor.col = wrap_forward(self.cursor.col, self.cols),
            Command::Select => return Step::Selected(self.cursor),
            Command::Quit => return Step::Cancelled,
        }
        Step::Moved
    }
}

fn wrap_back(pos: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (pos + len - 1) % len }
}

fn wrap_forward(pos: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (pos + 1) % len }
}

/// Arrange a flat list of items into a grid of rows
///
/// With neither dimension given the grid is roughly square: `ceil(sqrt(n))`
/// columns. A row count alone derives the column count. Items fill rows left
/// to right; the last row may be shorter. Empty input yields one empty row.
pub fn organize_data<T>(items: Vec<T>, cols: Option<usize>, rows: Option<usize>) -> Vec<Row<T>> {
    let n = items.len();
    if n == 0 {
        return vec![Row::Cells(Vec::new())];
    }

    let cols = match (cols, rows) {
        (Some(cols), _) => cols.max(1),
        (None, Some(rows)) => n.div_ceil(rows.max(1)),
        (None, None) => (n as f64).sqrt().ceil() as usize,
    };

    let mut items = items.into_iter();
    let mut grid = Vec::with_capacity(n.div_ceil(cols));
    loop {
        let row: Vec<T> = items.by_ref().take(cols).collect();
        if row.is_empty() {
            break;
        }
        grid.push(Row::Cells(row));
    }
    grid
}

/// A cell picked by the user
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a, T> {
    /// Row index in the grid
    pub row: usize,
    /// Column index
    pub col: usize,
    /// Cell value; `None` for separators and padded cells
    pub value: Option<&'a T>,
}

/// Run an interactive selection loop over `grid`
///
/// Each round clears `output`, prints `header`, the table with the cursor
/// highlighted and a short usage hint, then reads one line from `input`.
/// Unknown input is ignored. Returns `None` when the user quits or input ends.
pub fn select_element_in_table<'a, T, R, W>(
    grid: &'a [Row<T>],
    header: &str,
    sep: &Separator,
    mut input: R,
    mut output: W,
) -> io::Result<Option<Selection<'a, T>>>
where
    T: Display,
    R: BufRead,
    W: Write,
{
    let mut selector = Selector::for_grid(grid);
    let mut line = String::new();

    loop {
        let cursor = selector.cursor();
        write!(output, "{CLEAR_SCREEN}")?;
        writeln!(output, "{header}")?;
        for rendered in construct_table(grid, sep, false, Some(cursor)) {
            writeln!(output, "{rendered}")?;
        }
        writeln!(
            output,
            "Use W/S to move up/down, A/D to move left/right.\n\
             Press Enter to select, or 'q' to quit.\n\
             Currently selected: (row={}, col={})",
            cursor.row, cursor.col
        )?;
        write!(output, ">> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match selector.apply(command) {
            Step::Moved => {}
            Step::Selected(at) => {
                return Ok(Some(Selection {
                    row: at.row,
                    col: at.col,
                    value: fetch_entry(grid, at.row, at.col),
                }));
            }
            Step::Cancelled => return Ok(None),
        }
    }
}

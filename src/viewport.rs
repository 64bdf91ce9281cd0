// src/viewport.rs

//! Scrolling: which part of the buffer is on screen.

/// Cursor position in buffer coordinates (row index, byte column).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorState {
    pub col: usize,
    pub row: usize,
}

impl CursorState {
    pub fn new(row: usize, col: usize) -> Self {
        CursorState { col, row }
    }
}

/// The visible window onto the buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub row_offset: usize,
    pub col_offset: usize,
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl ViewportState {
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        ViewportState {
            screen_rows,
            screen_cols,
            ..Self::default()
        }
    }

    /// Whether `cursor` falls inside the window.
    pub fn contains(&self, cursor: CursorState) -> bool {
        (self.row_offset..self.row_offset + self.screen_rows).contains(&cursor.row)
            && (self.col_offset..self.col_offset + self.screen_cols).contains(&cursor.col)
    }
}

/// Scrolls the previous window just far enough to show `cursor`.
///
/// Offsets only move when the cursor has left the window, so the view stays
/// put while the cursor moves around inside it. Does not clamp against the end
/// of the buffer.
pub fn compute_viewport(
    cursor: CursorState,
    previous: &ViewportState,
    screen_rows: usize,
    screen_cols: usize,
) -> ViewportState {
    ViewportState {
        row_offset: scroll_axis(cursor.row, previous.row_offset, screen_rows),
        col_offset: scroll_axis(cursor.col, previous.col_offset, screen_cols),
        screen_rows,
        screen_cols,
    }
}

fn scroll_axis(position: usize, offset: usize, extent: usize) -> usize {
    let extent = extent.max(1);
    if position < offset {
        position
    } else if position >= offset + extent {
        position - extent + 1
    } else {
        offset
    }
}

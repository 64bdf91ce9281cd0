// src/buffer/mod.rs

//! The text being viewed: an ordered list of rows.
//!
//! Rows are stored as raw bytes. Everything that measures or clips a row
//! (cursor columns, viewport offsets, rendering) counts bytes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::error::{EditorError, Result};

#[cfg(test)]
mod tests;

/// One line of text without its line terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
}

impl Row {
    pub fn new(chars: impl Into<Vec<u8>>) -> Self {
        Row {
            chars: chars.into(),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    /// The part of the row visible when the view starts at `col_offset` and is
    /// `width` bytes wide. Empty when the row ends before `col_offset`.
    pub fn visible_slice(&self, col_offset: usize, width: usize) -> &[u8] {
        if col_offset >= self.chars.len() {
            return &[];
        }
        let end = self.chars.len().min(col_offset.saturating_add(width));
        &self.chars[col_offset..end]
    }
}

/// Ordered rows of a file (or nothing, for a new session).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    rows: Vec<Row>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, one row per line.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| EditorError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let buffer = Self::from_reader(BufReader::new(file))?;
        info!("Loaded {} rows from {}.", buffer.num_rows(), path.display());
        Ok(buffer)
    }

    /// Reads rows from any line-oriented source. Trailing `\r` and `\n` bytes
    /// are stripped from every line.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut buffer = TextBuffer::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            while matches!(line.last(), Some(b'\n' | b'\r')) {
                line.pop();
            }
            buffer.append_row(line.as_slice());
        }
        debug!("TextBuffer: read {} rows.", buffer.num_rows());
        Ok(buffer)
    }

    /// Appends a row at the end of the buffer.
    pub fn append_row(&mut self, content: impl Into<Vec<u8>>) {
        self.rows.push(Row::new(content));
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Length of row `index`, or 0 past the end of the buffer.
    pub fn row_len(&self, index: usize) -> usize {
        self.row(index).map_or(0, Row::len)
    }
}

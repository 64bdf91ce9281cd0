// src/editor/mod.rs

//! The editor session: buffer, cursor and viewport in one state object.
//!
//! The caller drives it in a loop:
//!
//! ```text
//! loop {
//!     editor.refresh_screen(&mut io)?;
//!     if editor.process_input(&mut io)? == EditorStatus::Quit { break; }
//! }
//! ```

use std::path::Path;

use log::{debug, info, trace};

use crate::buffer::TextBuffer;
use crate::config::Config;
use crate::error::Result;
use crate::input::InputDecoder;
use crate::keys::Key;
use crate::os::TerminalIo;
use crate::renderer::{self, RenderStyle};
use crate::viewport::{compute_viewport, CursorState, ViewportState};


/// Whether the session should keep going after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Running,
    Quit,
}

/// All mutable editor state.
#[derive(Debug)]
pub struct Editor {
    buffer: TextBuffer,
    cursor: CursorState,
    viewport: ViewportState,
    decoder: InputDecoder,
    style: RenderStyle,
    quit_byte: u8,
}

impl Editor {
    /// An empty session for a screen of `screen_rows` x `screen_cols`.
    pub fn new(config: &Config, screen_rows: usize, screen_cols: usize) -> Self {
        Editor {
            buffer: TextBuffer::new(),
            cursor: CursorState::default(),
            viewport: ViewportState::new(screen_rows, screen_cols),
            decoder: InputDecoder::new(),
            style: RenderStyle::from(&config.display),
            quit_byte: config.input.quit_byte(),
        }
    }

    /// Replaces the buffer with the contents of `path` and resets the cursor.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.buffer = TextBuffer::load(path)?;
        self.cursor = CursorState::default();
        self.viewport = ViewportState::new(self.viewport.screen_rows, self.viewport.screen_cols);
        info!("Opened {} ({} rows).", path.display(), self.buffer.num_rows());
        Ok(())
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Adopts a new terminal size; takes effect on the next refresh.
    pub fn resize(&mut self, screen_rows: usize, screen_cols: usize) {
        if (screen_rows, screen_cols) != (self.viewport.screen_rows, self.viewport.screen_cols) {
            info!(
                "Screen resized from {}x{} to {}x{}.",
                self.viewport.screen_rows, self.viewport.screen_cols, screen_rows, screen_cols
            );
            self.viewport.screen_rows = screen_rows;
            self.viewport.screen_cols = screen_cols;
        }
    }

    /// Scrolls to keep the cursor visible and redraws the screen.
    pub fn refresh_screen<T: TerminalIo + ?Sized>(&mut self, io: &mut T) -> Result<()> {
        self.viewport = compute_viewport(
            self.cursor,
            &self.viewport,
            self.viewport.screen_rows,
            self.viewport.screen_cols,
        );
        let frame = renderer::render_frame(&self.buffer, &self.viewport, self.cursor, &self.style);
        renderer::flush(io, &frame)
    }

    /// Waits for one key and applies it. A read timeout leaves the state
    /// unchanged and reports `Running`, so the caller can redraw while idle.
    pub fn process_input<T: TerminalIo + ?Sized>(&mut self, io: &mut T) -> Result<EditorStatus> {
        match self.decoder.poll_key(io)? {
            Some(key) => Ok(self.process_key(key)),
            None => Ok(EditorStatus::Running),
        }
    }

    /// Applies a decoded key.
    pub fn process_key(&mut self, key: Key) -> EditorStatus {
        trace!("Key {:?} at {:?}", key, self.cursor);
        match key {
            Key::Control(byte) if byte == self.quit_byte => {
                info!(
                    "Quit requested ({} undecodable escape sequences).",
                    self.decoder.collapsed_sequences()
                );
                return EditorStatus::Quit;
            }
            Key::Home => self.cursor.col = 0,
            Key::End => self.cursor.col = self.buffer.row_len(self.cursor.row),
            Key::PageUp | Key::PageDown => {
                let step = if key == Key::PageUp {
                    Key::ArrowUp
                } else {
                    Key::ArrowDown
                };
                for _ in 0..self.viewport.screen_rows {
                    self.move_cursor(step);
                }
            }
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                self.move_cursor(key)
            }
            other => debug!("Ignoring key {:?}.", other),
        }
        EditorStatus::Running
    }

    fn move_cursor(&mut self, key: Key) {
        let num_rows = self.buffer.num_rows();
        let cursor = &mut self.cursor;
        match key {
            Key::ArrowLeft if cursor.col > 0 => cursor.col -= 1,
            Key::ArrowLeft if cursor.row > 0 => {
                cursor.row -= 1;
                cursor.col = self.buffer.row_len(cursor.row);
            }
            Key::ArrowRight if cursor.row < num_rows => {
                if cursor.col < self.buffer.row_len(cursor.row) {
                    cursor.col += 1;
                } else {
                    cursor.row += 1;
                    cursor.col = 0;
                }
            }
            Key::ArrowUp if cursor.row > 0 => cursor.row -= 1,
            Key::ArrowDown if cursor.row < num_rows => cursor.row += 1,
            _ => {}
        }
        // Snap to the end of a shorter row.
        cursor.col = cursor.col.min(self.buffer.row_len(cursor.row));
    }
}

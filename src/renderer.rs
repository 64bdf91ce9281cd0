// src/renderer.rs

//! Builds a complete screen update as one byte sequence.
//!
//! A frame is assembled in an `AppendBuffer` and handed to the terminal with a
//! single write, so the terminal never shows a half-drawn screen. Output only
//! depends on the buffer, the viewport and the cursor: the same inputs always
//! produce the same bytes.

use log::trace;

use crate::buffer::TextBuffer;
use crate::config::DisplayConfig;
use crate::error::Result;
use crate::os::TerminalIo;
use crate::viewport::{CursorState, ViewportState};

#[cfg(test)]
mod tests;

const CURSOR_HIDE: &[u8] = b"\x1b[?25l";
const CURSOR_SHOW: &[u8] = b"\x1b[?25h";
const CURSOR_HOME: &[u8] = b"\x1b[H";
const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
const CLEAR_TO_EOL: &[u8] = b"\x1b[K";
const LINE_BREAK: &[u8] = b"\r\n";

/// Append-only byte accumulator for one frame.
#[derive(Debug, Default)]
pub struct AppendBuffer {
    bytes: Vec<u8>,
}

impl AppendBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        AppendBuffer {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// What to draw where the buffer has no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    pub placeholder: Vec<u8>,
    pub welcome_message: Vec<u8>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for RenderStyle {
    fn from(display: &DisplayConfig) -> Self {
        RenderStyle {
            placeholder: display.placeholder.clone().into_bytes(),
            welcome_message: display.welcome_message.clone().into_bytes(),
        }
    }
}

/// Renders the visible part of `buffer` and positions the cursor.
pub fn render_frame(
    buffer: &TextBuffer,
    viewport: &ViewportState,
    cursor: CursorState,
    style: &RenderStyle,
) -> Vec<u8> {
    let capacity = (viewport.screen_cols + 8) * viewport.screen_rows + 32;
    let mut out = AppendBuffer::with_capacity(capacity);

    out.append(CURSOR_HIDE);
    out.append(CURSOR_HOME);
    draw_rows(&mut out, buffer, viewport, style);
    out.append(
        cursor_position(
            cursor.row.saturating_sub(viewport.row_offset) + 1,
            cursor.col.saturating_sub(viewport.col_offset) + 1,
        )
        .as_bytes(),
    );
    out.append(CURSOR_SHOW);

    trace!(
        "Rendered frame of {} bytes at offset ({}, {}).",
        out.len(),
        viewport.row_offset,
        viewport.col_offset
    );
    out.into_bytes()
}

fn draw_rows(
    out: &mut AppendBuffer,
    buffer: &TextBuffer,
    viewport: &ViewportState,
    style: &RenderStyle,
) {
    let width = viewport.screen_cols;
    for y in 0..viewport.screen_rows {
        match buffer.row(y + viewport.row_offset) {
            Some(row) if row.is_empty() => {}
            Some(row) => out.append(row.visible_slice(viewport.col_offset, width)),
            None if buffer.is_empty() && y == viewport.screen_rows / 3 => {
                draw_welcome(out, &style.welcome_message, &style.placeholder, width)
            }
            None => out.append(clip(&style.placeholder, width)),
        }

        out.append(CLEAR_TO_EOL);
        if y + 1 < viewport.screen_rows {
            out.append(LINE_BREAK);
        }
    }
}

fn draw_welcome(out: &mut AppendBuffer, message: &[u8], placeholder: &[u8], width: usize) {
    let message = clip(message, width);
    let mut padding = (width - message.len()) / 2;
    if padding > 0 {
        let glyph = clip(placeholder, padding);
        out.append(glyph);
        padding -= glyph.len();
    }
    out.append(&b" ".repeat(padding));
    out.append(message);
}

fn clip(bytes: &[u8], width: usize) -> &[u8] {
    &bytes[..bytes.len().min(width)]
}

/// `ESC [ row ; col H` with 1-based coordinates.
pub fn cursor_position(row: usize, col: usize) -> String {
    format!("\x1b[{};{}H", row, col)
}

/// Writes a finished frame with one write call.
pub fn flush<T: TerminalIo + ?Sized>(io: &mut T, frame: &[u8]) -> Result<()> {
    io.write_frame(frame)
}

/// Clears the screen and homes the cursor. Used on every exit path.
pub fn clear_screen<T: TerminalIo + ?Sized>(io: &mut T) -> Result<()> {
    let mut out = AppendBuffer::with_capacity(CLEAR_SCREEN.len() + CURSOR_HOME.len());
    out.append(CLEAR_SCREEN);
    out.append(CURSOR_HOME);
    io.write_frame(&out.into_bytes())
}

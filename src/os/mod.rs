// src/os/mod.rs
//
// Terminal device access: raw mode, window size and the byte-level I/O seam
// the decoder and renderer are written against.

#[cfg(test)]
pub mod mock;
pub mod tty;


pub use tty::{parse_cursor_report, query_window_size, RawMode, StdioTerminal};

use crate::error::Result;

/// Byte-level access to a terminal device.
///
/// Reads are bounded by the device timeout: `read_byte` returns `Ok(None)` when
/// no byte arrived in time, which is not an error.
pub trait TerminalIo {
    /// Reads a single byte, or `None` on timeout.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Writes `bytes` with exactly one write call. A short write is reported
    /// as `EditorError::Io`.
    fn write_frame(&mut self, bytes: &[u8]) -> Result<()>;

    /// Asks the device for its size directly, as `(rows, cols)`.
    /// Returns `None` when the device cannot answer.
    fn window_size(&self) -> Option<(u16, u16)>;
}

impl<T: TerminalIo + ?Sized> TerminalIo for &mut T {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_frame(bytes)
    }

    fn window_size(&self) -> Option<(u16, u16)> {
        (**self).window_size()
    }
}

// src/os/mock.rs

use std::collections::VecDeque;
use std::io;

use super::TerminalIo;
use crate::error::{EditorError, Result};

/// One scripted outcome of `read_byte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockRead {
    Byte(u8),
    Timeout,
    Fail(io::ErrorKind),
}

/// A scripted terminal for tests.
///
/// Reads are served from a queue of `MockRead`s; once the queue is empty every
/// read times out. Each `write_frame` call is recorded as one frame.
#[derive(Debug, Default)]
pub struct MockTerminal {
    reads: VecDeque<MockRead>,
    frames: Vec<Vec<u8>>,
    size: Option<(u16, u16)>,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal that answers the direct size query with `(rows, cols)`.
    pub fn with_size(rows: u16, cols: u16) -> Self {
        MockTerminal {
            size: Some((rows, cols)),
            ..Self::default()
        }
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.reads.extend(bytes.iter().copied().map(MockRead::Byte));
    }

    pub fn push_timeout(&mut self) {
        self.reads.push_back(MockRead::Timeout);
    }

    pub fn push_failure(&mut self, kind: io::ErrorKind) {
        self.reads.push_back(MockRead::Fail(kind));
    }

    /// Number of scripted reads not yet consumed.
    pub fn pending_reads(&self) -> usize {
        self.reads.len()
    }

    /// Every frame written so far, one entry per `write_frame` call.
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[u8]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl TerminalIo for MockTerminal {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        match self.reads.pop_front() {
            Some(MockRead::Byte(byte)) => Ok(Some(byte)),
            Some(MockRead::Timeout) | None => Ok(None),
            Some(MockRead::Fail(kind)) => Err(EditorError::Io(io::Error::new(
                kind,
                "scripted read failure",
            ))),
        }
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        self.frames.push(bytes.to_vec());
        Ok(())
    }

    fn window_size(&self) -> Option<(u16, u16)> {
        self.size
    }
}

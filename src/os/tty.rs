// src/os/tty.rs

//! Raw-mode control and byte I/O for the controlling terminal.

use std::io;
use std::mem;
use std::os::unix::io::RawFd;
use std::time::Duration;

use libc::{STDIN_FILENO, STDOUT_FILENO};
use log::{debug, error, trace, warn};
use termios::{
    tcsetattr, Termios, BRKINT, CS8, ECHO, ICANON, ICRNL, IEXTEN, INPCK, ISIG, ISTRIP, IXON,
    OPOST, TCSAFLUSH, VMIN, VTIME,
};

use super::TerminalIo;
use crate::error::{EditorError, Result};

/// Moves the cursor as far right and down as the terminal allows.
const CURSOR_TO_BOTTOM_RIGHT: &[u8] = b"\x1b[999C\x1b[999B";
/// Device status report: asks for the cursor position.
const REQUEST_CURSOR_POSITION: &[u8] = b"\x1b[6n";

nix::ioctl_read_bad!(tiocgwinsz, libc::TIOCGWINSZ, libc::winsize);

/// Scoped raw mode for a terminal file descriptor.
///
/// Holds the attributes that were active before `enable` and puts them back
/// when dropped, so every exit path out of the owning scope (including an
/// unwinding panic) leaves the terminal as it was found.
pub struct RawMode {
    fd: RawFd,
    original: Termios,
    restored: bool,
}

impl RawMode {
    /// Switches `fd` into raw mode. Reads on the device return after at most
    /// `read_timeout` even when no byte arrived.
    pub fn enable(fd: RawFd, read_timeout: Duration) -> Result<Self> {
        let original = Termios::from_fd(fd)
            .map_err(|e| EditorError::terminal("tcgetattr failed (is stdin a terminal?)", e))?;

        let raw = raw_attributes(&original, read_timeout);
        tcsetattr(fd, TCSAFLUSH, &raw)
            .map_err(|e| EditorError::terminal("tcsetattr failed to enter raw mode", e))?;
        debug!(
            "RawMode: fd {} in raw mode, VTIME={} deciseconds.",
            fd, raw.c_cc[VTIME]
        );

        Ok(RawMode {
            fd,
            original,
            restored: false,
        })
    }

    /// Raw mode on standard input.
    pub fn enable_stdin(read_timeout: Duration) -> Result<Self> {
        Self::enable(STDIN_FILENO, read_timeout)
    }

    /// Reapplies the captured attributes. Safe to call more than once; errors
    /// are logged because this runs during shutdown.
    pub fn restore(&mut self) {
        match tcsetattr(self.fd, TCSAFLUSH, &self.original) {
            Ok(()) => debug!("RawMode: restored original attributes on fd {}.", self.fd),
            Err(e) => error!("RawMode: failed to restore terminal attributes: {}", e),
        }
        self.restored = true;
    }

    /// The attributes captured before raw mode was entered.
    pub fn original(&self) -> &Termios {
        &self.original
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if !self.restored {
            self.restore();
        }
    }
}

/// Derives raw attributes from `original`.
pub(crate) fn raw_attributes(original: &Termios, read_timeout: Duration) -> Termios {
    let mut raw = *original;
    raw.c_iflag &= !(BRKINT | ICRNL | INPCK | ISTRIP | IXON);
    raw.c_oflag &= !OPOST;
    raw.c_cflag |= CS8;
    raw.c_lflag &= !(ECHO | ICANON | ISIG | IEXTEN);
    raw.c_cc[VMIN] = 0;
    raw.c_cc[VTIME] = timeout_deciseconds(read_timeout);
    raw
}

/// `VTIME` counts tenths of a second in a single byte; zero would make reads
/// non-blocking, so the value is kept within `1..=255`.
pub(crate) fn timeout_deciseconds(timeout: Duration) -> u8 {
    let tenths = (timeout.as_millis() + 99) / 100;
    tenths.clamp(1, u8::MAX as u128) as u8
}

/// The process's standard input and output as a terminal device.
#[derive(Debug, Clone, Copy)]
pub struct StdioTerminal {
    input_fd: RawFd,
    output_fd: RawFd,
}

impl StdioTerminal {
    pub fn new() -> Self {
        Self::from_fds(STDIN_FILENO, STDOUT_FILENO)
    }

    /// A device reading from `input_fd` and writing to `output_fd`.
    pub fn from_fds(input_fd: RawFd, output_fd: RawFd) -> Self {
        StdioTerminal {
            input_fd,
            output_fd,
        }
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalIo for StdioTerminal {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = 0u8;
        let n = unsafe { libc::read(self.input_fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => {
                        trace!("StdioTerminal: read interrupted ({}), treating as timeout.", err);
                        Ok(None)
                    }
                    _ => Err(EditorError::Io(err)),
                }
            }
        }
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        loop {
            let n = unsafe { libc::write(self.output_fd, bytes.as_ptr().cast(), bytes.len()) };
            if n < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(EditorError::Io(err));
            }
            let written = n as usize;
            if written != bytes.len() {
                return Err(EditorError::Io(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("short write: {} of {} bytes", written, bytes.len()),
                )));
            }
            trace!("StdioTerminal: wrote {} bytes.", written);
            return Ok(());
        }
    }

    fn window_size(&self) -> Option<(u16, u16)> {
        let mut winsz: libc::winsize = unsafe { mem::zeroed() };
        match unsafe { tiocgwinsz(self.output_fd, &mut winsz) } {
            Ok(_) => Some((winsz.ws_row, winsz.ws_col)),
            Err(e) => {
                debug!("StdioTerminal: ioctl(TIOCGWINSZ) failed: {}", e);
                None
            }
        }
    }
}

/// Determines the screen size as `(rows, cols)`.
///
/// Uses the device's direct answer when it reports a non-zero width, and
/// otherwise probes by parking the cursor in the bottom-right corner and asking
/// where it ended up. At most `probe_budget` reply bytes are read.
pub fn query_window_size<T: TerminalIo + ?Sized>(
    io: &mut T,
    probe_budget: usize,
) -> Result<(usize, usize)> {
    match io.window_size() {
        Some((rows, cols)) if cols != 0 => return Ok((rows as usize, cols as usize)),
        Some(_) => debug!("Direct size query reported zero columns, probing."),
        None => debug!("Direct size query unavailable, probing."),
    }

    io.write_frame(CURSOR_TO_BOTTOM_RIGHT)?;
    let size = cursor_position(io, probe_budget)?;
    debug!("Window size probe answered {:?}.", size);
    Ok(size)
}

fn cursor_position<T: TerminalIo + ?Sized>(io: &mut T, budget: usize) -> Result<(usize, usize)> {
    io.write_frame(REQUEST_CURSOR_POSITION)?;

    let mut reply = Vec::with_capacity(budget);
    while reply.len() < budget {
        match io.read_byte()? {
            Some(b'R') => break,
            Some(byte) => reply.push(byte),
            None => break,
        }
    }

    parse_cursor_report(&reply).ok_or_else(|| {
        warn!("Unusable cursor position report: {:?}", reply);
        EditorError::SizeUnavailable
    })
}

/// Parses a cursor position report `ESC [ rows ; cols` (the final `R` is
/// optional). Zero dimensions are rejected.
pub fn parse_cursor_report(reply: &[u8]) -> Option<(usize, usize)> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    let rows: usize = rows.parse().ok()?;
    let cols: usize = cols.parse().ok()?;
    (rows > 0 && cols > 0).then_some((rows, cols))
}

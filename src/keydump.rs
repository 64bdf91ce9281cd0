// src/keydump.rs

//! Diagnostic mode: prints every decoded key until `q` is pressed.
//!
//! Useful to see what a terminal actually sends for a given key. Output
//! post-processing is off in raw mode, so each line ends in `\r\n`.

use log::info;

use crate::error::Result;
use crate::input::InputDecoder;
use crate::keys::Key;
use crate::os::TerminalIo;

const STOP_KEY: Key = Key::Char(b'q');

/// Echoes keys read from `io` back to it, one per line, until `q`.
/// Returns the number of keys read, including the final `q`.
pub fn run<T: TerminalIo + ?Sized>(io: &mut T) -> Result<usize> {
    let mut decoder = InputDecoder::new();
    let mut count = 0;
    loop {
        let key = decoder.read_key(io)?;
        count += 1;
        io.write_frame(format!("{}\r\n", key).as_bytes())?;
        if key == STOP_KEY {
            info!("Key dump finished after {} keys.", count);
            return Ok(count);
        }
    }
}

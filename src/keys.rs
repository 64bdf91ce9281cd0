// src/keys.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical key produced by the input decoder.
///
/// Plain bytes are passed through as `Char` or `Control`; recognized escape
/// sequences become one of the named keys. An escape sequence that could not
/// be decoded is reported as `Escape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Any byte that is not a control byte, including bytes >= 0x80.
    Char(u8),
    /// C0 control bytes (0x00..=0x1f) and DEL (0x7f).
    Control(u8),

    // Navigation keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,

    /// A bare Escape press, or an escape sequence that did not decode.
    Escape,
}

impl Key {
    /// Classifies a single non-escape byte.
    pub fn from_byte(byte: u8) -> Self {
        if byte.is_ascii_control() {
            Key::Control(byte)
        } else {
            Key::Char(byte)
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(b) if b.is_ascii_graphic() || *b == b' ' => {
                write!(f, "{} ('{}')", b, *b as char)
            }
            Key::Char(b) | Key::Control(b) => write!(f, "{}", b),
            named => write!(f, "{:?}", named),
        }
    }
}

// src/input/mod.rs

//! Turns the raw byte stream from the terminal into `Key`s.
//!
//! Escape sequences are recognized by a small state machine driven one byte
//! at a time. Any byte the tables below do not expect, and any read timeout
//! in the middle of a sequence, collapses the sequence into `Key::Escape`.
//! Bytes consumed up to that point are dropped, so an undecodable sequence can
//! never stall or corrupt later reads.

use log::{debug, trace};

use crate::error::Result;
use crate::keys::Key;
use crate::os::TerminalIo;


const ESC: u8 = 0x1b;

/// `ESC [ <letter>`
const CSI_LETTER_KEYS: &[(u8, Key)] = &[
    (b'A', Key::ArrowUp),
    (b'B', Key::ArrowDown),
    (b'C', Key::ArrowRight),
    (b'D', Key::ArrowLeft),
    (b'H', Key::Home),
    (b'F', Key::End),
];

/// `ESC [ <digit> ~`
const CSI_TILDE_KEYS: &[(u8, Key)] = &[
    (b'1', Key::Home),
    (b'3', Key::Delete),
    (b'4', Key::End),
    (b'5', Key::PageUp),
    (b'6', Key::PageDown),
    (b'7', Key::Home),
    (b'8', Key::End),
];

/// `ESC O <letter>`
const SS3_KEYS: &[(u8, Key)] = &[(b'H', Key::Home), (b'F', Key::End)];

fn lookup(table: &[(u8, Key)], byte: u8) -> Option<Key> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == byte)
        .map(|(_, key)| *key)
}

/// Decoder states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeState {
    /// Waiting for the first byte of a key.
    #[default]
    Idle,
    /// Read ESC.
    SawEscape,
    /// Read `ESC [`.
    SawBracket,
    /// Read `ESC O`.
    SawO,
    /// Read `ESC [ <digit>`, expecting `~`. Digits without a key still consume
    /// the `~` before collapsing.
    AwaitingTilde(u8),
}

/// Result of feeding one byte to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep reading in the given state.
    Advance(DecodeState),
    /// A complete key.
    Emit(Key),
    /// The sequence cannot be decoded; report a bare Escape.
    Collapse,
}

impl DecodeState {
    /// The transition table.
    pub fn next(self, byte: u8) -> Transition {
        use DecodeState::*;
        use Transition::*;

        match self {
            Idle if byte == ESC => Advance(SawEscape),
            Idle => Emit(Key::from_byte(byte)),
            SawEscape => match byte {
                b'[' => Advance(SawBracket),
                b'O' => Advance(SawO),
                _ => Collapse,
            },
            SawBracket if byte.is_ascii_digit() => Advance(AwaitingTilde(byte)),
            SawBracket => lookup(CSI_LETTER_KEYS, byte).map_or(Collapse, Emit),
            AwaitingTilde(digit) if byte == b'~' => {
                lookup(CSI_TILDE_KEYS, digit).map_or(Collapse, Emit)
            }
            AwaitingTilde(_) => Collapse,
            SawO => lookup(SS3_KEYS, byte).map_or(Collapse, Emit),
        }
    }
}

/// Reads keys from a terminal device.
#[derive(Debug, Default)]
pub struct InputDecoder {
    collapsed: u64,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until a key is available, one read timeout at a time.
    pub fn read_key<T: TerminalIo + ?Sized>(&mut self, io: &mut T) -> Result<Key> {
        loop {
            if let Some(key) = self.poll_key(io)? {
                return Ok(key);
            }
        }
    }

    /// Reads at most one key. Returns `None` if the first read timed out.
    pub fn poll_key<T: TerminalIo + ?Sized>(&mut self, io: &mut T) -> Result<Option<Key>> {
        let Some(first) = io.read_byte()? else {
            return Ok(None);
        };

        let mut state = match DecodeState::Idle.next(first) {
            Transition::Advance(state) => state,
            _ => return Ok(Some(Key::from_byte(first))),
        };

        let mut consumed = vec![first];
        loop {
            let Some(byte) = io.read_byte()? else {
                trace!("Escape sequence {:02x?} timed out.", consumed);
                return Ok(Some(self.collapse(&consumed)));
            };
            consumed.push(byte);
            match state.next(byte) {
                Transition::Advance(next) => state = next,
                Transition::Emit(key) => {
                    trace!("Decoded {:02x?} as {:?}.", consumed, key);
                    return Ok(Some(key));
                }
                Transition::Collapse => return Ok(Some(self.collapse(&consumed))),
            }
        }
    }

    /// Number of sequences that were reported as a bare Escape.
    pub fn collapsed_sequences(&self) -> u64 {
        self.collapsed
    }

    fn collapse(&mut self, consumed: &[u8]) -> Key {
        if consumed.len() > 1 {
            self.collapsed += 1;
            debug!("Undecodable escape sequence {:02x?}, reporting Escape.", consumed);
        }
        Key::Escape
    }
}

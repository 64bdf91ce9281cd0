// src/lib.rs

//! `rawedit`: a screen-oriented text viewer driven directly over raw terminal
//! escape sequences.
//!
//! Bytes from the terminal go through [`input::InputDecoder`] to become
//! [`keys::Key`]s, the [`editor::Editor`] moves its cursor and viewport, and
//! [`renderer::render_frame`] turns the visible part of the buffer into a
//! single write.

pub mod buffer;
pub mod config;
pub mod editor;
pub mod error;
pub mod input;
pub mod keydump;
pub mod keys;
pub mod os;
pub mod renderer;
pub mod viewport;

pub use error::{EditorError, Result};

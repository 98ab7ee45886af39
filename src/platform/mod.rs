//! Platform abstraction layer
//!
//! Hosts translate their native key events into [`Key`] presses on a
//! [`KeyboardState`]; the simulation only ever sees the [`InputSource`] view.

pub mod input;

pub use input::{InputSource, Key, KeyboardState};

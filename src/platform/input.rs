//! Double-buffered key state
//!
//! `current` is written by the host's key events, `previous` is a copy of
//! `current` taken once per frame. A key was "just pressed" when it is down
//! now but was up at the last latch, so a held key fires exactly once.

use serde::{Deserialize, Serialize};

/// The fixed set of keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// X
    ShootX,
    /// Space bar
    ShootSpace,
    /// Up arrow
    ShootUp,
    /// Enter
    Confirm,
}

impl Key {
    pub const COUNT: usize = 6;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Left,
        Key::Right,
        Key::ShootX,
        Key::ShootSpace,
        Key::ShootUp,
        Key::Confirm,
    ];

    /// Any of these fires a player shot
    pub const SHOOT: [Key; 3] = [Key::ShootX, Key::ShootSpace, Key::ShootUp];

    /// Map a DOM `keyCode` to a game key
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Key::Left),
            39 => Some(Key::Right),
            88 => Some(Key::ShootX),
            32 => Some(Key::ShootSpace),
            38 => Some(Key::ShootUp),
            13 => Some(Key::Confirm),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Read-only view of the keyboard for one tick
pub trait InputSource {
    fn is_down(&self, key: Key) -> bool;
    fn was_just_pressed(&self, key: Key) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardState {
    current: [bool; Key::COUNT],
    previous: [bool; Key::COUNT],
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.current[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.current[key.index()] = false;
    }

    /// Forward a raw key event; unknown codes are ignored
    pub fn handle_code(&mut self, code: u32, down: bool) {
        if let Some(key) = Key::from_code(code) {
            if down {
                self.press(key);
            } else {
                self.release(key);
            }
        }
    }

    /// Snapshot `current` into `previous`
    ///
    /// The driver calls this once per frame, after the game consumed the
    /// snapshot and before new events arrive for the next frame.
    pub fn latch(&mut self) {
        self.previous = self.current;
    }
}

impl InputSource for KeyboardState {
    fn is_down(&self, key: Key) -> bool {
        self.current[key.index()]
    }

    fn was_just_pressed(&self, key: Key) -> bool {
        self.current[key.index()] && !self.previous[key.index()]
    }
}

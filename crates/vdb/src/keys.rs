//! Keyboard state polled once per tick.

use vdb_core::Key;

/// Down/pressed/released state of every logical key.
///
/// `pressed` and `released` are edges: they are set when the platform reports
/// a change and cleared by [`KeyTable::clear_edges`] once per tick.
#[derive(Debug, Clone)]
pub struct KeyTable {
    down: [bool; Key::COUNT],
    pressed: [bool; Key::COUNT],
    released: [bool; Key::COUNT],
}

impl Default for KeyTable {
    fn default() -> Self {
        Self {
            down: [false; Key::COUNT],
            pressed: [false; Key::COUNT],
            released: [false; Key::COUNT],
        }
    }
}

impl KeyTable {
    /// Creates a table with every key up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current state of `key`, setting the matching edge if it changed.
    pub fn set_down(&mut self, key: Key, down: bool) {
        let i = key.index();
        if down && !self.down[i] {
            self.pressed[i] = true;
        } else if !down && self.down[i] {
            self.released[i] = true;
        }
        self.down[i] = down;
    }

    /// Forgets all pressed/released edges.
    pub fn clear_edges(&mut self) {
        self.pressed = [false; Key::COUNT];
        self.released = [false; Key::COUNT];
    }

    /// Releases every key without recording edges.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    /// Whether `key` went down since the edges were last cleared.
    #[must_use]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Whether `key` went up since the edges were last cleared.
    #[must_use]
    pub fn was_released(&self, key: Key) -> bool {
        self.released[key.index()]
    }

    /// Whether any key is held.
    #[must_use]
    pub fn any_down(&self) -> bool {
        self.down.iter().any(|&d| d)
    }
}

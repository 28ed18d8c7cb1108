//! Logical key codes.
//!
//! The platform layer translates its native key events into these codes; the
//! debugger only ever reasons about logical keys.

use serde::{Deserialize, Serialize};

macro_rules! keys {
    ($($name:ident),* $(,)?) => {
        /// A logical key on the keyboard.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Key {
            $($name,)*
        }

        impl Key {
            /// Every key, in index order.
            pub const ALL: &'static [Key] = &[$(Key::$name,)*];
        }
    };
}

keys! {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Escape, Enter, Space, Tab, Backspace, Delete,
    Left, Right, Up, Down,
    LeftShift, RightShift, LeftCtrl, RightCtrl, LeftAlt, RightAlt,
}

impl Key {
    /// Number of logical keys.
    pub const COUNT: usize = Key::ALL.len();

    /// Dense index of this key, suitable for indexing key state tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks a key up by its dense index.
    pub fn from_index(index: usize) -> Option<Self> {
        Key::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(Key::from_index(i), Some(*key));
        }
        assert_eq!(Key::from_index(Key::COUNT), None);
    }
}

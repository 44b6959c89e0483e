//! Logical keys and the gamepad state bitmask

/// One logical gamepad key.
///
/// The discriminant is the key's bit position in [`GamepadState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Key {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    Menu = 4,
    Volume = 5,
    Select = 6,
    Start = 7,
    A = 8,
    B = 9,
}

impl Key {
    /// Number of logical keys.
    pub const COUNT: usize = 10;

    /// All keys, in bit order.
    pub const ALL: [Key; Self::COUNT] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Menu,
        Key::Volume,
        Key::Select,
        Key::Start,
        Key::A,
        Key::B,
    ];

    /// Keys wired to discrete active-low lines (everything except the
    /// analog stick directions).
    pub const DISCRETE: [Key; 6] = [
        Key::Menu,
        Key::Volume,
        Key::Select,
        Key::Start,
        Key::A,
        Key::B,
    ];

    /// Bit mask of this key in a [`GamepadState`].
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }

    const fn name(self) -> &'static str {
        match self {
            Key::Up => "Up",
            Key::Down => "Down",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Menu => "Menu",
            Key::Volume => "Volume",
            Key::Select => "Select",
            Key::Start => "Start",
            Key::A => "A",
            Key::B => "B",
        }
    }
}

/// A set of pressed keys, one bit per [`Key`].
///
/// Raw sampler output and the published debounced state share this shape.
/// The whole state fits in one `u32` so it can be published with a single
/// atomic store.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadState(u32);

impl GamepadState {
    /// State with no keys pressed.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Reconstruct a state from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether no key is pressed.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `key` is pressed in this state.
    pub const fn contains(self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    /// Mark `key` pressed.
    pub fn set(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    /// Mark `key` released.
    pub fn clear(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    /// Union of two states.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl core::fmt::Debug for GamepadState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("GamepadState(")?;
        let mut first = true;
        for key in Key::ALL {
            if self.contains(key) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(key.name())?;
                first = false;
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bits_are_unique() {
        let mut all = 0u32;
        for key in Key::ALL {
            assert_eq!(all & key.bit(), 0, "{:?} overlaps another key", key);
            all |= key.bit();
        }
        assert_eq!(all.count_ones() as usize, Key::COUNT);
    }

    #[test]
    fn set_clear_contains() {
        let mut state = GamepadState::empty();
        assert!(state.is_empty());

        state.set(Key::A);
        state.set(Key::Start);
        assert!(state.contains(Key::A));
        assert!(state.contains(Key::Start));
        assert!(!state.contains(Key::B));

        state.clear(Key::A);
        assert!(!state.contains(Key::A));
        assert!(state.contains(Key::Start));
    }

    #[test]
    fn union_combines_sources() {
        let mut console = GamepadState::empty();
        console.set(Key::Up);
        let mut external = GamepadState::empty();
        external.set(Key::B);

        let combined = console.union(external);
        assert!(combined.contains(Key::Up));
        assert!(combined.contains(Key::B));
    }

    #[test]
    fn debug_lists_pressed_keys() {
        let mut state = GamepadState::empty();
        state.set(Key::Up);
        state.set(Key::A);
        assert_eq!(format!("{:?}", state), "GamepadState(Up|A)");
        assert_eq!(format!("{:?}", GamepadState::empty()), "GamepadState()");
    }
}

//! Per-key confirmation-run debounce filter

use crate::key::{GamepadState, Key};

/// Two most recent raw samples per key.
const HISTORY_MASK: u8 = 0b11;

/// Debounce state machine for all keys.
///
/// Each key carries a 2-bit shift register of its most recent raw samples.
/// A key changes logical state only after two consecutive identical raw
/// samples: `0b11` confirms pressed, `0b00` confirms released, and a mixed
/// history (`0b01` / `0b10`, mid-transition) holds the previous logical
/// state. The hold-last behavior on ambiguous history is deliberate; a
/// majority filter would react faster but pass single-tick glitches on a
/// bouncing edge.
///
/// Histories start at zero, so a key held at power-on still needs two
/// ticks of pressed samples before it is reported.
pub struct DebounceEngine {
    history: [u8; Key::COUNT],
    state: GamepadState,
}

impl DebounceEngine {
    pub fn new() -> Self {
        Self {
            history: [0; Key::COUNT],
            state: GamepadState::empty(),
        }
    }

    /// Feed one tick's raw sample and return the debounced state.
    ///
    /// Pure and infallible; processes every key independently and returns
    /// the full bitmask so the caller can publish it in one store.
    pub fn update(&mut self, raw: GamepadState) -> GamepadState {
        for key in Key::ALL {
            let slot = &mut self.history[key as usize];
            *slot = ((*slot << 1) | raw.contains(key) as u8) & HISTORY_MASK;

            if *slot == HISTORY_MASK {
                self.state.set(key);
            } else if *slot == 0 {
                self.state.clear(key);
            }
            // Mixed history: keep the previous logical state.
        }
        self.state
    }

    /// Last debounced state, without feeding a new sample.
    pub fn state(&self) -> GamepadState {
        self.state
    }
}

impl Default for DebounceEngine {
    fn default() -> Self {
        Self::new()
    }
}

//! The strum layer: per-string stylus edge detection.
//!
//! Runs every cycle, independent of chord recomputation, over the same snapshot. A make or break edge
//! fires immediately against whatever note is currently assigned to that string, writing through the play
//! tracker so the reconciliation diff stays truthful. Bridged snapshots are not filtered here; the
//! cross-talk debounce protects only the chord path.

use crate::configuration::Options;
use crate::midi::MidiTransport;
use crate::scan::{COLUMN_COUNT, InputSnapshot};
use crate::tracker::ChannelTracker;
use crate::voicing::NoteSet;
use wmidi::U7;

/// Which strings the stylus touched last cycle. Persists across cycles; edges are detected against it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StringTouchState(u16);

impl StringTouchState {
    /// No strings touched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the string was touched as of the last processed cycle.
    pub fn contains(&self, slot: usize) -> bool {
        self.0 & (1 << slot) != 0
    }

    /// The touched strings as a bitmask (string 0 is bit 0).
    pub fn bits(&self) -> u16 {
        self.0
    }

    fn insert(&mut self, slot: usize) {
        self.0 |= 1 << slot;
    }

    fn remove(&mut self, slot: usize) {
        self.0 &= !(1 << slot);
    }
}

/// Process one cycle of stylus edges against the current play assignment.
///
/// Damp runs before strike on the same edge, so a patch with both stop and play on the same edge
/// retriggers the string.
pub fn strum_pass(
    touch: &mut StringTouchState,
    snapshot: &InputSnapshot,
    assignment: &NoteSet,
    play: &mut ChannelTracker,
    options: &Options,
    velocity: U7,
    midi: &mut impl MidiTransport,
) {
    for slot in 0..COLUMN_COUNT {
        let touching = snapshot.columns[slot].stylus;
        let touched = touch.contains(slot);
        if touching == touched {
            continue;
        }

        let (stop, start) = if touching {
            touch.insert(slot);
            (options.stop_on_make, options.play_on_make)
        } else {
            touch.remove(slot);
            (options.stop_on_break, options.play_on_break)
        };

        let Some(note) = assignment.get(slot) else {
            continue;
        };
        if stop {
            play.damp(slot, note, midi);
        }
        if start {
            play.strike(slot, note, velocity, midi);
        }
    }
}

/// The configuration-mode variant: stylus edges calibrate the session velocity instead of playing notes.
///
/// Returns the velocity selected by the highest-numbered rising edge this cycle, if any. Falling edges
/// still update the touch state so leaving the sub-mode produces no phantom strums.
pub fn velocity_program_pass(touch: &mut StringTouchState, snapshot: &InputSnapshot) -> Option<u8> {
    let mut programmed = None;
    for slot in 0..COLUMN_COUNT {
        let touching = snapshot.columns[slot].stylus;
        let touched = touch.contains(slot);
        if touching && !touched {
            touch.insert(slot);
            programmed = Some(0x0f | ((slot as u8) << 4));
        } else if !touching && touched {
            touch.remove(slot);
        }
    }
    programmed
}

//! Turning a [`ChordSelection`] into concrete MIDI notes.
//!
//! Three mutually-exclusive algorithms, in priority order: [`guitar`] finger shapes (when the guitar option
//! is on and a shape exists), [`scale`] mapping (when a scale mode is selected), and stacked [`triads`] as
//! the default. Post-processing (spread, octave/unison pairs) runs on the played set after any of them.

pub mod guitar;
pub mod scale;
pub mod triads;

use crate::chord::{ChordSelection, ChordType};
use crate::configuration::{Options, ScaleMode};
use wmidi::{Note, U7};

/// Number of note slots in a played set; slot index is string index.
pub const STRING_COUNT: usize = 16;

/// An ordered set of up to sixteen note slots.
///
/// Slots are positional: slot `n` is what string `n` plays when strummed. An empty slot is a damped string
/// and never produces a MIDI event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoteSet {
    slots: [Option<Note>; STRING_COUNT],
}

#[cfg(feature = "defmt")]
impl defmt::Format for NoteSet {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "NoteSet [");
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                defmt::write!(fmt, ", ");
            }
            match slot {
                Some(note) => defmt::write!(fmt, "{}", note.to_str()),
                None => defmt::write!(fmt, "-"),
            }
        }
        defmt::write!(fmt, "]");
    }
}

impl NoteSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The note in a slot, if the slot is populated and in range.
    pub fn get(&self, slot: usize) -> Option<Note> {
        self.slots.get(slot).copied().flatten()
    }

    /// Populate or clear a slot. Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, note: Option<Note>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = note;
        }
    }

    /// Whether any slot holds this note value.
    pub fn contains(&self, note: Note) -> bool {
        self.slots.iter().any(|&slot| slot == Some(note))
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Iterate over populated slots as `(slot, note)` pairs, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Note)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|note| (i, note)))
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Compute the played set (16 slots) for a selection under the active options.
pub fn voice_play(selection: &ChordSelection, options: &Options) -> NoteSet {
    let base = match (selection.chord_type, selection.root) {
        (ChordType::None, _) | (_, None) => NoteSet::new(),
        (chord_type, Some(root)) => {
            if options.guitar {
                guitar::voice(root, chord_type, selection.extension, options).unwrap_or_else(|| {
                    // no finger shape for this family; stack triads over six strings instead
                    triads::fill(root, chord_type, selection.extension, guitar::SHAPE_STRINGS)
                })
            } else if options.scale_mode != ScaleMode::Off {
                scale::voice(root, chord_type.is_minor_family(), options.scale_mode)
            } else {
                triads::fill(root, chord_type, selection.extension, STRING_COUNT)
            }
        }
    };
    post_process(&base, options)
}

/// Compute the drone set: `reps` passes of the stacked-triad interval list, clamped to the sixteen
/// slots, regardless of the play algorithm.
pub fn voice_drone(selection: &ChordSelection, reps: usize) -> NoteSet {
    match (selection.chord_type, selection.root) {
        (ChordType::None, _) | (_, None) => NoteSet::new(),
        (chord_type, Some(root)) => {
            let pass = triads::interval_list(chord_type, selection.extension).len();
            let limit = pass.saturating_mul(reps).min(STRING_COUNT);
            triads::fill(root, chord_type, selection.extension, limit)
        }
    }
}

/// Apply spread and pair options. Insertions count against the 16-slot budget; anything past slot 15 is
/// dropped.
fn post_process(source: &NoteSet, options: &Options) -> NoteSet {
    if !(options.spread || options.octave_pair || options.unison_pair) {
        return *source;
    }

    let mut out = NoteSet::new();
    let mut at = 0;
    for slot in 0..STRING_COUNT {
        if at >= STRING_COUNT {
            break;
        }
        let Some(note) = source.get(slot) else {
            at += 1;
            continue;
        };
        out.set(at, Some(note));
        at += 1;
        if options.octave_pair && at < STRING_COUNT {
            out.set(at, Some(octave_up(note)));
            at += 1;
        }
        if options.unison_pair && at < STRING_COUNT {
            out.set(at, Some(note));
            at += 1;
        }
        if options.spread {
            at += 1;
        }
    }
    out
}

fn octave_up(note: Note) -> Note {
    Note::from(U7::from_u8_lossy((u8::from(note)).saturating_add(12).min(127)))
}

//! Scale-mapped voicing: ascending semitones from root+48, masked by a 12-bit scale template.

use super::{NoteSet, STRING_COUNT};
use crate::configuration::ScaleMode;
use wmidi::{Note, U7};

/// MIDI note of the scale's starting root.
const BASE_NOTE: u8 = 48;

/// Scale templates: bit `n` set means "n semitones above the root is in the scale."
const CHROMATIC: u16 = 0b1111_1111_1111;
const DIATONIC_MAJOR: u16 = 0b1010_1011_0101;
const DIATONIC_MINOR: u16 = 0b0101_1010_1101;
const PENTATONIC: u16 = 0b0010_1001_0101;

fn template(mode: ScaleMode, minor: bool) -> u16 {
    match mode {
        ScaleMode::Off | ScaleMode::Chromatic => CHROMATIC,
        ScaleMode::Diatonic if minor => DIATONIC_MINOR,
        ScaleMode::Diatonic => DIATONIC_MAJOR,
        ScaleMode::Pentatonic => PENTATONIC,
    }
}

/// Fill all sixteen slots with the scale's degrees, ascending from root+48.
///
/// Only the diatonic template cares whether the held chord is minor-family.
pub fn voice(root: u8, minor: bool, mode: ScaleMode) -> NoteSet {
    let template = template(mode, minor);
    let mut set = NoteSet::new();
    let mut slot = 0;
    let mut offset: u8 = 0;
    while slot < STRING_COUNT {
        if template & (1 << (offset % 12)) != 0 {
            let value = (BASE_NOTE + root).saturating_add(offset).min(127);
            set.set(slot, Some(Note::from(U7::from_u8_lossy(value))));
            slot += 1;
        }
        offset += 1;
    }
    set
}

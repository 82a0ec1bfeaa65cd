//! Stacked-triad voicing: the default algorithm and the drone's only one.
//!
//! The chord's interval list is laid out from root+36 and repeated in full-octave steps until the requested
//! number of slots is filled.

use super::NoteSet;
use crate::chord::{ChordType, Extension};
use tinyvec::{ArrayVec, array_vec};
use wmidi::{Note, U7};

/// MIDI note of the lowest root: two octaves below middle C's octave.
const BASE_NOTE: u8 = 36;

/// The interval list for one pass of a chord, root-relative in semitones.
pub fn interval_list(chord_type: ChordType, extension: Extension) -> ArrayVec<[u8; 6]> {
    let mut list = array_vec!([u8; 6] => 0);
    if extension == Extension::Add9 {
        list.push(2);
    }
    list.push(match (extension, chord_type.is_minor_family()) {
        (Extension::Sus4, _) => 5,
        (_, true) => 3,
        (_, false) => 4,
    });
    list.push(match chord_type {
        ChordType::Aug => 8,
        ChordType::Dim => 6,
        _ => 7,
    });
    if extension == Extension::Add6 {
        list.push(9);
    }
    match chord_type {
        ChordType::Dom7 | ChordType::Min7 => list.push(10),
        ChordType::Maj7 => list.push(11),
        _ => {}
    }
    list
}

/// Fill `limit` slots by repeating the interval list upward from root+36.
pub fn fill(root: u8, chord_type: ChordType, extension: Extension, limit: usize) -> NoteSet {
    let list = interval_list(chord_type, extension);
    let mut set = NoteSet::new();
    for slot in 0..limit {
        let octave = (slot / list.len()) as u8;
        let value = BASE_NOTE + root + list[slot % list.len()] + 12 * octave;
        set.set(slot, Some(Note::from(U7::from_u8_lossy(value.min(127)))));
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(set: &NoteSet) -> impl Iterator<Item = u8> + '_ {
        set.iter().map(|(_, note)| u8::from(note))
    }

    #[test]
    fn major_triad_intervals() {
        assert_eq!(
            &[0, 4, 7],
            interval_list(ChordType::Maj, Extension::None).as_slice()
        );
    }

    #[test]
    fn minor_family_takes_a_flat_third() {
        assert_eq!(
            &[0, 3, 7],
            interval_list(ChordType::Min, Extension::None).as_slice()
        );
        assert_eq!(
            &[0, 3, 8],
            interval_list(ChordType::Aug, Extension::None).as_slice()
        );
        assert_eq!(
            &[0, 3, 6],
            interval_list(ChordType::Dim, Extension::None).as_slice()
        );
    }

    #[test]
    fn sevenths() {
        assert_eq!(
            &[0, 4, 7, 10],
            interval_list(ChordType::Dom7, Extension::None).as_slice()
        );
        assert_eq!(
            &[0, 4, 7, 11],
            interval_list(ChordType::Maj7, Extension::None).as_slice()
        );
        assert_eq!(
            &[0, 3, 7, 10],
            interval_list(ChordType::Min7, Extension::None).as_slice()
        );
    }

    #[test]
    fn min7_add6_interval_list() {
        assert_eq!(
            &[0, 3, 7, 9, 10],
            interval_list(ChordType::Min7, Extension::Add6).as_slice()
        );
    }

    #[test]
    fn sus4_replaces_the_third() {
        assert_eq!(
            &[0, 5, 7],
            interval_list(ChordType::Maj, Extension::Sus4).as_slice()
        );
        assert_eq!(
            &[0, 5, 7],
            interval_list(ChordType::Min, Extension::Sus4).as_slice()
        );
    }

    #[test]
    fn add9_slots_in_below_the_third() {
        assert_eq!(
            &[0, 2, 4, 7],
            interval_list(ChordType::Maj, Extension::Add9).as_slice()
        );
    }

    #[test]
    fn fill_wraps_in_octaves_from_the_base() {
        let set = fill(0, ChordType::Maj, Extension::None, 16);
        let expected = [36, 40, 43, 48, 52, 55, 60, 64, 67, 72, 76, 79, 84, 88, 91, 96];
        assert!(
            values(&set).eq(expected.iter().copied()),
            "Expected C major stacked from 36"
        );
    }

    #[test]
    fn fill_stops_at_the_limit() {
        let set = fill(2, ChordType::Dom7, Extension::None, 4);
        assert!(values(&set).eq([38, 42, 45, 48].iter().copied()));
        assert_eq!(None, set.get(4));
    }
}

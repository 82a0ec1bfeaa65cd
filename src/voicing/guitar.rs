//! Guitar finger-shape voicing.
//!
//! Shapes are data, not formulas: a fixed six-note table keyed by (triad family, root pitch class), with a
//! parallel per-string delta table for each extension. Only the Maj, Min, and Dom7 families have shapes;
//! anything else falls back to stacked triads over the same six strings (handled by the caller).

use super::NoteSet;
use crate::chord::{ChordType, Extension};
use crate::configuration::Options;
use wmidi::{Note, U7};

/// Strings a finger shape occupies.
pub const SHAPE_STRINGS: usize = 6;

/// First slot a shape lands on; slot 0 is the damped bass string.
const SHAPE_SLOT: usize = 1;

/// First slot of the octave-up double.
const DOUBLE_SLOT: usize = 10;

/// Major shapes, row indexed by root pitch class, strings low to high.
const MAJ_SHAPES: [[u8; SHAPE_STRINGS]; 12] = [
    [43, 48, 52, 55, 60, 64],
    [44, 49, 53, 56, 61, 65],
    [45, 50, 54, 57, 62, 66],
    [46, 51, 55, 58, 63, 67],
    [47, 52, 56, 59, 64, 68],
    [48, 53, 57, 60, 65, 69],
    [49, 54, 58, 61, 66, 70],
    [50, 55, 59, 62, 67, 71],
    [51, 56, 60, 63, 68, 72],
    [52, 57, 61, 64, 69, 73],
    [53, 58, 62, 65, 70, 74],
    [54, 59, 63, 66, 71, 75],
];

/// Minor shapes.
const MIN_SHAPES: [[u8; SHAPE_STRINGS]; 12] = [
    [43, 48, 51, 55, 60, 63],
    [44, 49, 52, 56, 61, 64],
    [45, 50, 53, 57, 62, 65],
    [46, 51, 54, 58, 63, 66],
    [47, 52, 55, 59, 64, 67],
    [48, 53, 56, 60, 65, 68],
    [49, 54, 57, 61, 66, 69],
    [50, 55, 58, 62, 67, 70],
    [51, 56, 59, 63, 68, 71],
    [52, 57, 60, 64, 69, 72],
    [53, 58, 61, 65, 70, 73],
    [54, 59, 62, 66, 71, 74],
];

/// Dominant-seventh shapes.
const DOM7_SHAPES: [[u8; SHAPE_STRINGS]; 12] = [
    [43, 48, 52, 58, 60, 64],
    [44, 49, 53, 59, 61, 65],
    [45, 50, 54, 60, 62, 66],
    [46, 51, 55, 61, 63, 67],
    [47, 52, 56, 62, 64, 68],
    [48, 53, 57, 63, 65, 69],
    [49, 54, 58, 64, 66, 70],
    [50, 55, 59, 65, 67, 71],
    [51, 56, 60, 66, 68, 72],
    [52, 57, 61, 67, 69, 73],
    [53, 58, 62, 68, 70, 74],
    [54, 59, 63, 69, 71, 75],
];

/// Per-string semitone deltas for each extension, applied in parallel to the shape.
const NO_DELTAS: [i8; SHAPE_STRINGS] = [0, 0, 0, 0, 0, 0];
const SUS4_DELTAS: [i8; SHAPE_STRINGS] = [0, 0, 1, 0, 0, 1];
const ADD6_DELTAS: [i8; SHAPE_STRINGS] = [0, 0, 0, 2, 0, 0];
const ADD9_DELTAS: [i8; SHAPE_STRINGS] = [0, 0, 0, 0, 2, 0];

fn shape(chord_type: ChordType, root: u8) -> Option<&'static [u8; SHAPE_STRINGS]> {
    let table = match chord_type {
        ChordType::Maj => &MAJ_SHAPES,
        ChordType::Min => &MIN_SHAPES,
        ChordType::Dom7 => &DOM7_SHAPES,
        _ => return None,
    };
    table.get(usize::from(root % 12))
}

fn deltas(extension: Extension) -> &'static [i8; SHAPE_STRINGS] {
    match extension {
        Extension::None => &NO_DELTAS,
        Extension::Sus4 => &SUS4_DELTAS,
        Extension::Add6 => &ADD6_DELTAS,
        Extension::Add9 => &ADD9_DELTAS,
    }
}

/// Voice a chord as a finger shape, or `None` when the family has no shape.
///
/// The shape lands on strings 1..=6. The double option copies the (extension-adjusted) shape one octave up
/// onto strings 10..=15; the bass option populates string 0 an octave below the shape's lowest note.
pub fn voice(
    root: u8,
    chord_type: ChordType,
    extension: Extension,
    options: &Options,
) -> Option<NoteSet> {
    let shape = shape(chord_type, root)?;
    let deltas = deltas(extension);

    let mut set = NoteSet::new();
    for (i, (&note, &delta)) in shape.iter().zip(deltas).enumerate() {
        let adjusted = (i16::from(note) + i16::from(delta)) as u8;
        set.set(SHAPE_SLOT + i, Some(Note::from(U7::from_u8_lossy(adjusted))));
        if options.guitar_double {
            set.set(DOUBLE_SLOT + i, Some(Note::from(U7::from_u8_lossy(adjusted + 12))));
        }
    }
    if options.guitar_bass {
        set.set(0, Some(Note::from(U7::from_u8_lossy(shape[0] - 12))));
    }
    Some(set)
}

//! Chord resolution: from a matrix snapshot to a [`ChordSelection`].
//!
//! Each column of the matrix carries three chord-selector rows. The first active column (in scan order) names
//! the root; the OR of its row bits names the chord type. Row combinations map directly onto [`ChordType`]
//! discriminants, so the decode is a primitive cast rather than a match ladder.

use crate::configuration::Options;
use crate::scan::{COLUMN_COUNT, InputSnapshot};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};

/// The triad family selected by a column's row buttons.
///
/// Discriminants are exactly the OR of the row contributions: row 0 → `Maj` (0b001), row 1 → `Min` (0b010),
/// row 2 → `Dom7` (0b100). Pressing rows together lands on the combined variant, e.g. rows 0+2 → `Maj7`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChordType {
    /// No chord held.
    #[default]
    None = 0b000,
    /// Major triad.
    Maj = 0b001,
    /// Minor triad.
    Min = 0b010,
    /// Diminished triad.
    Dim = 0b011,
    /// Dominant seventh.
    Dom7 = 0b100,
    /// Major seventh.
    Maj7 = 0b101,
    /// Minor seventh.
    Min7 = 0b110,
    /// Augmented triad.
    Aug = 0b111,
}

impl ChordType {
    /// Decode the OR of row contributions back into a chord type.
    pub fn from_bits(bits: u8) -> Self {
        Self::from_u8(bits & 0b111).unwrap_or(ChordType::None)
    }

    /// The row-contribution bits of this chord type.
    pub fn bits(self) -> u8 {
        self.to_u8().unwrap_or(0)
    }

    /// Whether this family takes a minor third.
    pub fn is_minor_family(self) -> bool {
        matches!(
            self,
            ChordType::Min | ChordType::Min7 | ChordType::Aug | ChordType::Dim
        )
    }
}

/// An optional chord extension picked by a lone row press to the right of the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Extension {
    /// No extension.
    #[default]
    None,
    /// Suspended fourth.
    Sus4,
    /// Added sixth.
    Add6,
    /// Added ninth.
    Add9,
}

impl Extension {
    /// The extension selected by a lone press of the given row.
    pub fn from_row(row: usize) -> Self {
        match row {
            0 => Extension::Sus4,
            1 => Extension::Add6,
            _ => Extension::Add9,
        }
    }
}

/// The resolved chord: triad family, root pitch class (0..=11), optional extension.
///
/// A value type, recomputed every cycle and compared against the last applied selection to decide whether
/// the voicing needs recomputing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChordSelection {
    /// The triad family.
    pub chord_type: ChordType,
    /// Root pitch class, 0..=11, or `None` when no chord is held.
    pub root: Option<u8>,
    /// The extension, if any.
    pub extension: Extension,
}

/// The outcome of a chord-resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution {
    /// The resolved chord.
    pub selection: ChordSelection,
    /// The column that won the root, needed for the sticky-root rule next cycle.
    pub root_column: Option<u8>,
}

/// Column indices in scan order: left-to-right, or right-to-left under reverse strum.
pub(crate) fn scan_order(reverse: bool) -> impl Iterator<Item = usize> {
    (0..COLUMN_COUNT).map(move |i| if reverse { COLUMN_COUNT - 1 - i } else { i })
}

/// The first column with any active row, in scan order.
pub(crate) fn first_active_column(snapshot: &InputSnapshot, reverse: bool) -> Option<u8> {
    scan_order(reverse)
        .find(|&col| snapshot.columns[col].any_row())
        .map(|col| col as u8)
}

/// Resolve the chord held in `snapshot`.
///
/// Sticky root: when the winning column is the same as last cycle's, the new row bits are ORed into the
/// previous chord type instead of replacing it, so a finger lifting a fraction of a cycle early does not
/// collapse a seventh into its triad on the way out.
///
/// Extensions (when the option is on) come from the first column after the root, in scan order, with exactly
/// one active row; the first match wins.
pub fn resolve(
    snapshot: &InputSnapshot,
    last_root_column: Option<u8>,
    last_selection: ChordSelection,
    options: &Options,
    reverse: bool,
) -> Resolution {
    let Some(root_column) = first_active_column(snapshot, reverse) else {
        return Resolution::default();
    };

    let mut bits = snapshot.columns[root_column as usize].row_bits();
    if Some(root_column) == last_root_column {
        bits |= last_selection.chord_type.bits();
    }

    let mut extension = Extension::None;
    if options.extensions {
        let later = scan_order(reverse).skip_while(|&col| col as u8 != root_column).skip(1);
        for col in later {
            let sample = &snapshot.columns[col];
            if sample.active_rows() == 1 {
                // first_row is Some by the count check
                if let Some(row) = sample.first_row() {
                    extension = Extension::from_row(row);
                }
                break;
            }
        }
    }

    Resolution {
        selection: ChordSelection {
            chord_type: ChordType::from_bits(bits),
            root: Some(root_column % 12),
            extension,
        },
        root_column: Some(root_column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_with_extensions() -> Options {
        let mut options = Options::default();
        options.extensions = true;
        options
    }

    #[test]
    fn row_combinations_decode_to_chord_types() {
        assert_eq!(ChordType::Maj, ChordType::from_bits(0b001));
        assert_eq!(ChordType::Min, ChordType::from_bits(0b010));
        assert_eq!(ChordType::Dom7, ChordType::from_bits(0b100));
        assert_eq!(ChordType::Maj7, ChordType::from_bits(0b101));
        assert_eq!(ChordType::Min7, ChordType::from_bits(0b110));
        assert_eq!(ChordType::Aug, ChordType::from_bits(0b111));
        assert_eq!(ChordType::Dim, ChordType::from_bits(0b011));
        assert_eq!(ChordType::None, ChordType::from_bits(0b000));
    }

    #[test]
    fn leftmost_column_wins_the_root() {
        let snapshot = InputSnapshot::new().press(3, &[0]).press(9, &[1]);
        let resolution = resolve(&snapshot, None, ChordSelection::default(), &Options::default(), false);
        assert_eq!(Some(3), resolution.root_column);
        assert_eq!(Some(3), resolution.selection.root);
        assert_eq!(ChordType::Maj, resolution.selection.chord_type);
    }

    #[test]
    fn reverse_strum_scans_right_to_left() {
        let snapshot = InputSnapshot::new().press(3, &[0]).press(9, &[1]);
        let resolution = resolve(&snapshot, None, ChordSelection::default(), &Options::default(), true);
        assert_eq!(Some(9), resolution.root_column);
        assert_eq!(ChordType::Min, resolution.selection.chord_type);
    }

    #[test]
    fn root_pitch_class_wraps_at_twelve() {
        let snapshot = InputSnapshot::new().press(14, &[0]);
        let resolution = resolve(&snapshot, None, ChordSelection::default(), &Options::default(), false);
        assert_eq!(Some(2), resolution.selection.root);
    }

    #[test]
    fn sticky_root_keeps_released_rows() {
        // Maj7 held (rows 0 and 2), then row 2 releases a cycle early; the chord must not collapse to Maj.
        let held = InputSnapshot::new().press(5, &[0, 2]);
        let first = resolve(&held, None, ChordSelection::default(), &Options::default(), false);
        assert_eq!(ChordType::Maj7, first.selection.chord_type);

        let partly_released = InputSnapshot::new().press(5, &[0]);
        let second = resolve(
            &partly_released,
            first.root_column,
            first.selection,
            &Options::default(),
            false,
        );
        assert_eq!(
            ChordType::Maj7,
            second.selection.chord_type,
            "Expected sticky root to retain the previous chord bits"
        );
    }

    #[test]
    fn moved_root_overwrites_instead_of_accumulating() {
        let held = InputSnapshot::new().press(5, &[0, 2]);
        let first = resolve(&held, None, ChordSelection::default(), &Options::default(), false);

        let moved = InputSnapshot::new().press(7, &[1]);
        let second = resolve(&moved, first.root_column, first.selection, &Options::default(), false);
        assert_eq!(ChordType::Min, second.selection.chord_type);
        assert_eq!(Some(7), second.selection.root);
    }

    #[test]
    fn lone_later_row_selects_extension() {
        let snapshot = InputSnapshot::new().press(2, &[0]).press(6, &[1]);
        let resolution = resolve(&snapshot, None, ChordSelection::default(), &options_with_extensions(), false);
        assert_eq!(Extension::Add6, resolution.selection.extension);
        assert_eq!(ChordType::Maj, resolution.selection.chord_type);
    }

    #[test]
    fn first_extension_match_wins() {
        let snapshot = InputSnapshot::new().press(2, &[0]).press(4, &[0]).press(6, &[2]);
        let resolution = resolve(&snapshot, None, ChordSelection::default(), &options_with_extensions(), false);
        assert_eq!(Extension::Sus4, resolution.selection.extension);
    }

    #[test]
    fn chorded_later_column_is_not_an_extension() {
        let snapshot = InputSnapshot::new().press(2, &[0]).press(6, &[1, 2]);
        let resolution = resolve(&snapshot, None, ChordSelection::default(), &options_with_extensions(), false);
        assert_eq!(Extension::None, resolution.selection.extension);
    }

    #[test]
    fn extensions_ignored_when_option_off() {
        let snapshot = InputSnapshot::new().press(2, &[0]).press(6, &[1]);
        let resolution = resolve(&snapshot, None, ChordSelection::default(), &Options::default(), false);
        assert_eq!(Extension::None, resolution.selection.extension);
    }

    #[test]
    fn empty_matrix_resolves_to_no_chord() {
        let resolution = resolve(
            &InputSnapshot::new(),
            Some(4),
            ChordSelection::default(),
            &Options::default(),
            false,
        );
        assert_eq!(Resolution::default(), resolution);
        assert_eq!(None, resolution.selection.root);
    }
}

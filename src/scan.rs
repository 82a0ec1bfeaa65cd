//! Per-cycle input snapshots.
//!
//! The hardware scanner walks the button/string matrix column by column, sampling each line after the settle
//! delay its shift-register protocol requires, and hands the completed picture over as one [`InputSnapshot`].
//! Everything downstream (chord resolution, the strum layer, the configuration mode) reads the same immutable
//! snapshot, so a column's root/extension decision and its stylus edge can never observe different cycles.

/// Number of columns in the matrix, which is also the number of strings.
pub const COLUMN_COUNT: usize = 16;

/// Number of chord-selector rows per column.
pub const ROW_COUNT: usize = 3;

/// One column's worth of sampled lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColumnSample {
    /// The three chord-selector row lines for this column.
    pub rows: [bool; ROW_COUNT],
    /// Whether the stylus is in contact with this column's string.
    pub stylus: bool,
}

impl ColumnSample {
    /// Whether any chord-selector row is active in this column.
    pub fn any_row(&self) -> bool {
        self.rows.iter().any(|&r| r)
    }

    /// How many chord-selector rows are active in this column.
    pub fn active_rows(&self) -> usize {
        self.rows.iter().filter(|&&r| r).count()
    }

    /// The index of the first active row, if any.
    pub fn first_row(&self) -> Option<usize> {
        self.rows.iter().position(|&r| r)
    }

    /// The rows packed into the low three bits (row 0 is bit 0).
    pub fn row_bits(&self) -> u8 {
        self.rows
            .iter()
            .enumerate()
            .fold(0, |bits, (i, &r)| if r { bits | (1 << i) } else { bits })
    }
}

/// A complete scan of the matrix: sixteen column samples plus the global mode-select line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    /// Column samples, index 0 being the leftmost column/string.
    pub columns: [ColumnSample; COLUMN_COUNT],
    /// The mode-select line; active switches the controller into configuration mode.
    pub mode_select: bool,
}

impl InputSnapshot {
    /// An empty snapshot: no buttons, no stylus contact, mode line inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stylus contacts packed into a bitmask (column 0 is bit 0).
    pub fn stylus_mask(&self) -> u16 {
        self.columns
            .iter()
            .enumerate()
            .fold(0, |mask, (i, col)| {
                if col.stylus { mask | (1 << i) } else { mask }
            })
    }

    /// Whether the stylus bridges two or more strings at once.
    ///
    /// Bridged cycles are treated as matrix cross-talk by the chord path.
    pub fn is_bridged(&self) -> bool {
        self.stylus_mask().count_ones() >= 2
    }

    /// Activate the given rows of a column. Builder-style, used by scanners and tests alike.
    pub fn press(mut self, column: usize, rows: &[usize]) -> Self {
        for &row in rows {
            self.columns[column].rows[row] = true;
        }
        self
    }

    /// Put the stylus in contact with a column's string. Builder-style.
    pub fn touch(mut self, column: usize) -> Self {
        self.columns[column].stylus = true;
        self
    }

    /// Activate the mode-select line. Builder-style.
    pub fn mode(mut self) -> Self {
        self.mode_select = true;
        self
    }
}

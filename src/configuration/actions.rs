//! The configuration-mode action table.
//!
//! While the mode-select line is active, the chord matrix stops selecting chords and instead indexes this
//! table by (row, column). The engine fires the looked-up action once per physical press, on the edge where
//! the winning column changes.

use super::OptionToggle;

/// One action reachable from configuration mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigAction {
    /// Install a built-in patch wholesale, by index into [`PATCHES`](super::PATCHES).
    SelectPatch(usize),
    /// Flip one option toggle.
    Toggle(OptionToggle),
    /// Flip the reverse-strum flag.
    ReverseStrum,
    /// Force note-off for every note 0..=127 on both channels.
    Panic,
    /// Reload options from non-volatile storage.
    LoadConfig,
    /// Save the current options to non-volatile storage.
    SaveConfig,
}

/// Row 0 (the Maj row) carries the option toggles; the two scale toggles that fit spill onto it after the
/// fourteen booleans.
const ROW0: [Option<ConfigAction>; 16] = [
    Some(ConfigAction::Toggle(OptionToggle::PlayOnMake)),
    Some(ConfigAction::Toggle(OptionToggle::StopOnMake)),
    Some(ConfigAction::Toggle(OptionToggle::PlayOnBreak)),
    Some(ConfigAction::Toggle(OptionToggle::StopOnBreak)),
    Some(ConfigAction::Toggle(OptionToggle::SustainPlay)),
    Some(ConfigAction::Toggle(OptionToggle::SustainDrone)),
    Some(ConfigAction::Toggle(OptionToggle::SustainCommon)),
    Some(ConfigAction::Toggle(OptionToggle::Extensions)),
    Some(ConfigAction::Toggle(OptionToggle::Guitar)),
    Some(ConfigAction::Toggle(OptionToggle::GuitarDouble)),
    Some(ConfigAction::Toggle(OptionToggle::GuitarBass)),
    Some(ConfigAction::Toggle(OptionToggle::Spread)),
    Some(ConfigAction::Toggle(OptionToggle::OctavePair)),
    Some(ConfigAction::Toggle(OptionToggle::UnisonPair)),
    Some(ConfigAction::Toggle(OptionToggle::Chromatic)),
    Some(ConfigAction::Toggle(OptionToggle::Diatonic)),
];

/// Row 1 (the Min row): the remaining scale toggle and the global actions.
const ROW1: [Option<ConfigAction>; 16] = [
    Some(ConfigAction::Toggle(OptionToggle::Pentatonic)),
    Some(ConfigAction::ReverseStrum),
    Some(ConfigAction::Panic),
    Some(ConfigAction::LoadConfig),
    Some(ConfigAction::SaveConfig),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
];

/// Row 2 (the Dom7 row): patch selection.
const ROW2: [Option<ConfigAction>; 16] = [
    Some(ConfigAction::SelectPatch(0)),
    Some(ConfigAction::SelectPatch(1)),
    Some(ConfigAction::SelectPatch(2)),
    Some(ConfigAction::SelectPatch(3)),
    Some(ConfigAction::SelectPatch(4)),
    Some(ConfigAction::SelectPatch(5)),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
];

const ACTION_TABLE: [[Option<ConfigAction>; 16]; 3] = [ROW0, ROW1, ROW2];

/// Look up the action bound to a (row, column) press, if any.
pub fn action_for(row: usize, column: usize) -> Option<ConfigAction> {
    *ACTION_TABLE.get(row)?.get(column)?
}

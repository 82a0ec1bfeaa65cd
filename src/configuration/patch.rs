//! Named patches: preset bundles of options selectable as a unit from configuration mode.

use super::{Options, ScaleMode};

/// A named preset bundle of [`Options`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Patch {
    /// Display name, for host tooling.
    pub name: &'static str,
    /// The options this patch installs wholesale.
    pub options: Options,
}

/// The built-in patches, in the order the configuration-mode action table exposes them.
///
/// `PATCHES[0]` is also the fallback installed when the persisted record is missing or corrupt.
pub const PATCHES: [Patch; 6] = [
    // The classic damped-string behavior: a string sounds when the stylus leaves it.
    Patch {
        name: "Strum",
        options: Options {
            play_on_break: true,
            stop_on_make: true,
            ..Options::OFF
        },
    },
    Patch {
        name: "Organ",
        options: Options {
            play_on_make: true,
            stop_on_break: true,
            sustain_common: true,
            ..Options::OFF
        },
    },
    Patch {
        name: "Guitar",
        options: Options {
            play_on_break: true,
            stop_on_make: true,
            guitar: true,
            guitar_double: true,
            guitar_bass: true,
            extensions: true,
            ..Options::OFF
        },
    },
    Patch {
        name: "Harp",
        options: Options {
            play_on_make: true,
            sustain_play: true,
            sustain_common: true,
            spread: true,
            ..Options::OFF
        },
    },
    Patch {
        name: "Drone",
        options: Options {
            play_on_make: true,
            stop_on_break: true,
            sustain_drone: true,
            sustain_common: true,
            ..Options::OFF
        },
    },
    Patch {
        name: "Zither",
        options: Options {
            play_on_make: true,
            stop_on_break: true,
            extensions: true,
            scale_mode: ScaleMode::Diatonic,
            ..Options::OFF
        },
    },
];

/// The patch installed at boot when no valid persisted record exists.
pub const DEFAULT_PATCH: Patch = PATCHES[0];

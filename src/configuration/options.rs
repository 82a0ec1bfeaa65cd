//! The options bitset: fourteen independent behavior toggles plus the exclusive scale-mode group.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};

/// The scale used by the scale-mapping voicing algorithm.
///
/// The three scales are mutually exclusive, so they live in one enum rather than three booleans; selecting
/// one necessarily deselects the others. `Off` routes voicing to the guitar or stacked-triad algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScaleMode {
    /// Scale mapping disabled.
    #[default]
    Off = 0,
    /// Every semitone.
    Chromatic = 1,
    /// Major scale, or natural minor for minor-family chords.
    Diatonic = 2,
    /// Major pentatonic.
    Pentatonic = 3,
}

/// The full set of behavior toggles.
///
/// Persisted as one 16-bit word: booleans in declaration order from bit 0, [`ScaleMode`] in bits 14..=15.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Options {
    /// Strum: a stylus make starts the string's note.
    pub play_on_make: bool,
    /// Strum: a stylus make stops the string's note (classic damped-string behavior).
    pub stop_on_make: bool,
    /// Strum: a stylus break starts the string's note.
    pub play_on_break: bool,
    /// Strum: a stylus break stops the string's note.
    pub stop_on_break: bool,
    /// Keep play-channel notes sounding after all chord buttons release.
    pub sustain_play: bool,
    /// Keep drone-channel notes sounding after all chord buttons release.
    pub sustain_drone: bool,
    /// Across a chord change, keep notes common to the old and new voicings sounding.
    pub sustain_common: bool,
    /// Allow a lone button right of the root to add Sus4/Add6/Add9.
    pub extensions: bool,
    /// Use guitar finger-shape voicings where a shape exists.
    pub guitar: bool,
    /// Duplicate the guitar shape one octave up on strings 10..=15.
    pub guitar_double: bool,
    /// Populate the otherwise-damped lowest string with a bass note.
    pub guitar_bass: bool,
    /// Insert an empty slot after every populated slot.
    pub spread: bool,
    /// Insert an octave-up duplicate after every populated slot.
    pub octave_pair: bool,
    /// Insert a same-pitch duplicate after every populated slot.
    pub unison_pair: bool,
    /// The exclusive scale-mode group.
    pub scale_mode: ScaleMode,
}

impl Options {
    /// Every toggle off. Patch definitions build on this.
    pub const OFF: Self = Self {
        play_on_make: false,
        stop_on_make: false,
        play_on_break: false,
        stop_on_break: false,
        sustain_play: false,
        sustain_drone: false,
        sustain_common: false,
        extensions: false,
        guitar: false,
        guitar_double: false,
        guitar_bass: false,
        spread: false,
        octave_pair: false,
        unison_pair: false,
        scale_mode: ScaleMode::Off,
    };

    /// Pack into the persisted 16-bit word.
    pub fn to_bits(&self) -> u16 {
        let flags = [
            self.play_on_make,
            self.stop_on_make,
            self.play_on_break,
            self.stop_on_break,
            self.sustain_play,
            self.sustain_drone,
            self.sustain_common,
            self.extensions,
            self.guitar,
            self.guitar_double,
            self.guitar_bass,
            self.spread,
            self.octave_pair,
            self.unison_pair,
        ];
        let mut bits = flags
            .iter()
            .enumerate()
            .fold(0u16, |bits, (i, &f)| if f { bits | (1 << i) } else { bits });
        bits |= u16::from(self.scale_mode.to_u8().unwrap_or(0)) << 14;
        bits
    }

    /// Unpack from the persisted 16-bit word.
    pub fn from_bits(bits: u16) -> Self {
        let flag = |i: u16| bits & (1 << i) != 0;
        Self {
            play_on_make: flag(0),
            stop_on_make: flag(1),
            play_on_break: flag(2),
            stop_on_break: flag(3),
            sustain_play: flag(4),
            sustain_drone: flag(5),
            sustain_common: flag(6),
            extensions: flag(7),
            guitar: flag(8),
            guitar_double: flag(9),
            guitar_bass: flag(10),
            spread: flag(11),
            octave_pair: flag(12),
            unison_pair: flag(13),
            scale_mode: ScaleMode::from_u8((bits >> 14) as u8).unwrap_or(ScaleMode::Off),
        }
    }

    /// Flip one toggle.
    ///
    /// Scale-mode toggles go through the enum: toggling the active scale turns the group off, toggling any
    /// other scale selects it (and thereby clears the previous one).
    pub fn toggle(&mut self, toggle: OptionToggle) {
        match toggle {
            OptionToggle::PlayOnMake => self.play_on_make = !self.play_on_make,
            OptionToggle::StopOnMake => self.stop_on_make = !self.stop_on_make,
            OptionToggle::PlayOnBreak => self.play_on_break = !self.play_on_break,
            OptionToggle::StopOnBreak => self.stop_on_break = !self.stop_on_break,
            OptionToggle::SustainPlay => self.sustain_play = !self.sustain_play,
            OptionToggle::SustainDrone => self.sustain_drone = !self.sustain_drone,
            OptionToggle::SustainCommon => self.sustain_common = !self.sustain_common,
            OptionToggle::Extensions => self.extensions = !self.extensions,
            OptionToggle::Guitar => self.guitar = !self.guitar,
            OptionToggle::GuitarDouble => self.guitar_double = !self.guitar_double,
            OptionToggle::GuitarBass => self.guitar_bass = !self.guitar_bass,
            OptionToggle::Spread => self.spread = !self.spread,
            OptionToggle::OctavePair => self.octave_pair = !self.octave_pair,
            OptionToggle::UnisonPair => self.unison_pair = !self.unison_pair,
            OptionToggle::Chromatic => self.toggle_scale(ScaleMode::Chromatic),
            OptionToggle::Diatonic => self.toggle_scale(ScaleMode::Diatonic),
            OptionToggle::Pentatonic => self.toggle_scale(ScaleMode::Pentatonic),
        }
    }

    fn toggle_scale(&mut self, mode: ScaleMode) {
        self.scale_mode = if self.scale_mode == mode {
            ScaleMode::Off
        } else {
            mode
        };
    }
}

/// One togglable option, as addressed by the configuration-mode action table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OptionToggle {
    /// Toggle [`Options::play_on_make`].
    PlayOnMake,
    /// Toggle [`Options::stop_on_make`].
    StopOnMake,
    /// Toggle [`Options::play_on_break`].
    PlayOnBreak,
    /// Toggle [`Options::stop_on_break`].
    StopOnBreak,
    /// Toggle [`Options::sustain_play`].
    SustainPlay,
    /// Toggle [`Options::sustain_drone`].
    SustainDrone,
    /// Toggle [`Options::sustain_common`].
    SustainCommon,
    /// Toggle [`Options::extensions`].
    Extensions,
    /// Toggle [`Options::guitar`].
    Guitar,
    /// Toggle [`Options::guitar_double`].
    GuitarDouble,
    /// Toggle [`Options::guitar_bass`].
    GuitarBass,
    /// Toggle [`Options::spread`].
    Spread,
    /// Toggle [`Options::octave_pair`].
    OctavePair,
    /// Toggle [`Options::unison_pair`].
    UnisonPair,
    /// Select or deselect the chromatic scale.
    Chromatic,
    /// Select or deselect the diatonic scale.
    Diatonic,
    /// Select or deselect the pentatonic scale.
    Pentatonic,
}

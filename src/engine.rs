//! The poll-cycle orchestrator.
//!
//! [`Engine`] owns every piece of mutable controller state and is driven by one cooperative loop: scan the
//! matrix, hand the snapshot to [`Engine::run_cycle`], repeat. Nothing in here is shared or reentrant; the
//! engine is the single execution context the design calls for.

use crate::chord::{self, ChordSelection, ChordType};
use crate::configuration::{
    ConfigAction, ConfigStorage, Options, PATCHES, PersistedConfig, action_for,
};
use crate::midi::MidiTransport;
use crate::scan::InputSnapshot;
use crate::strum::{self, StringTouchState};
use crate::tracker::ChannelTracker;
use crate::voicing::{self, NoteSet};
use wmidi::{Channel, Note, U7};

/// Session velocity before any velocity-program calibration.
const DEFAULT_VELOCITY: u8 = 127;

/// The whole controller state and its per-cycle logic.
pub struct Engine {
    options: Options,
    reverse_strum: bool,
    play: ChannelTracker,
    drone: ChannelTracker,
    /// What note each string strums; the single source of truth shared with the strum layer.
    play_assignment: NoteSet,
    touch: StringTouchState,
    last_selection: ChordSelection,
    last_root_column: Option<u8>,
    config_root_column: Option<u8>,
    velocity: u8,
    drone_reps: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine on the default channels: play on channel 1, drone on channel 2.
    pub fn new() -> Self {
        Self::with_channels(Channel::Ch1, Channel::Ch2)
    }

    /// An engine with explicit output channels.
    pub fn with_channels(play: Channel, drone: Channel) -> Self {
        Self {
            options: crate::configuration::DEFAULT_PATCH.options,
            reverse_strum: false,
            play: ChannelTracker::new(play),
            drone: ChannelTracker::new(drone),
            play_assignment: NoteSet::new(),
            touch: StringTouchState::new(),
            last_selection: ChordSelection::default(),
            last_root_column: None,
            config_root_column: None,
            velocity: DEFAULT_VELOCITY,
            drone_reps: 1,
        }
    }

    /// Boot: construct and load the persisted record, falling back to the default patch when the record is
    /// missing or corrupt.
    pub fn boot(storage: &mut impl ConfigStorage) -> Self {
        let mut engine = Self::new();
        engine.load_config(storage);
        engine
    }

    /// The active options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Mutable access to the active options, for host tooling.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Whether column scan order is reversed.
    pub fn reverse_strum(&self) -> bool {
        self.reverse_strum
    }

    /// The chord applied as of the last cycle.
    pub fn last_selection(&self) -> &ChordSelection {
        &self.last_selection
    }

    /// The session velocity scalar (raw; masked to 7 bits at emission).
    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    /// How many passes of the interval list the drone stacks.
    pub fn drone_reps(&self) -> usize {
        self.drone_reps
    }

    /// Set the drone's interval-list repetitions, for host tooling. Clamped to at least one pass; the
    /// sixteen-slot budget caps it at voicing time.
    pub fn set_drone_reps(&mut self, reps: usize) {
        self.drone_reps = reps.max(1);
    }

    /// Run one poll cycle over a fully captured snapshot.
    ///
    /// The strum pass always runs first, against the previous cycle's note assignment: a stylus edge and
    /// a chord change landing on the same cycle strum the outgoing chord, and the new voicing takes over
    /// on the next edge.
    pub fn run_cycle(
        &mut self,
        snapshot: &InputSnapshot,
        midi: &mut impl MidiTransport,
        storage: &mut impl ConfigStorage,
    ) {
        if snapshot.mode_select {
            if let Some(velocity) = strum::velocity_program_pass(&mut self.touch, snapshot) {
                self.velocity = velocity;
            }
            self.config_pass(snapshot, midi, storage);
            return;
        }
        self.config_root_column = None;

        let velocity = self.velocity_u7();
        strum::strum_pass(
            &mut self.touch,
            snapshot,
            &self.play_assignment,
            &mut self.play,
            &self.options,
            velocity,
            midi,
        );

        // Bridged stylus contact is matrix cross-talk: keep the stale chord, skip the recompute.
        if snapshot.is_bridged() {
            return;
        }

        let resolution = chord::resolve(
            snapshot,
            self.last_root_column,
            self.last_selection,
            &self.options,
            self.reverse_strum,
        );
        self.last_root_column = resolution.root_column;
        if resolution.selection == self.last_selection {
            return;
        }
        self.last_selection = resolution.selection;

        if resolution.selection.chord_type == ChordType::None {
            self.play.release(self.options.sustain_play, midi);
            self.drone.release(self.options.sustain_drone, midi);
            self.play_assignment = NoteSet::new();
            return;
        }

        let play_set = voicing::voice_play(&resolution.selection, &self.options);
        let drone_set = voicing::voice_drone(&resolution.selection, self.drone_reps);
        self.play
            .apply(&play_set, velocity, self.options.sustain_common, midi);
        self.drone
            .apply(&drone_set, velocity, self.options.sustain_common, midi);
        self.play_assignment = play_set;
    }

    /// Force note-off for every note 0..=127 on both channels and forget all sounding state.
    pub fn panic(&mut self, midi: &mut impl MidiTransport) {
        for channel in [self.play.channel(), self.drone.channel()] {
            for value in 0..=127 {
                midi.note_off(channel, Note::from(U7::from_u8_lossy(value)));
            }
        }
        self.play = ChannelTracker::new(self.play.channel());
        self.drone = ChannelTracker::new(self.drone.channel());
    }

    fn velocity_u7(&self) -> U7 {
        U7::from_u8_lossy(self.velocity)
    }

    fn load_config(&mut self, storage: &mut impl ConfigStorage) {
        let config = PersistedConfig::from_bytes(storage.load()).unwrap_or_default();
        self.options = config.options;
        self.reverse_strum = config.reverse_strum;
    }

    /// Configuration mode: the matrix indexes the action table instead of selecting chords.
    ///
    /// An action fires once per physical press, on the edge where the winning column changes from the
    /// previous cycle's.
    fn config_pass(
        &mut self,
        snapshot: &InputSnapshot,
        midi: &mut impl MidiTransport,
        storage: &mut impl ConfigStorage,
    ) {
        let root = chord::first_active_column(snapshot, self.reverse_strum);
        let edge = root != self.config_root_column;
        self.config_root_column = root;
        if !edge {
            return;
        }
        let Some(column) = root else {
            return;
        };
        let Some(row) = snapshot.columns[usize::from(column)].first_row() else {
            return;
        };
        match action_for(row, usize::from(column)) {
            Some(ConfigAction::SelectPatch(index)) => {
                if let Some(patch) = PATCHES.get(index) {
                    self.options = patch.options;
                }
            }
            Some(ConfigAction::Toggle(toggle)) => self.options.toggle(toggle),
            Some(ConfigAction::ReverseStrum) => self.reverse_strum = !self.reverse_strum,
            Some(ConfigAction::Panic) => self.panic(midi),
            Some(ConfigAction::LoadConfig) => self.load_config(storage),
            Some(ConfigAction::SaveConfig) => {
                let config = PersistedConfig {
                    options: self.options,
                    reverse_strum: self.reverse_strum,
                };
                storage.store(config.to_bytes());
            }
            None => {}
        }
    }
}

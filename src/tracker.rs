//! Per-channel note-state reconciliation.
//!
//! A [`ChannelTracker`] remembers what it last told the wire was sounding and, given a new [`NoteSet`],
//! emits the minimal note-off/note-on stream to get there. Comparisons are by note value: the same pitch
//! assigned to a different string is still the same sounding note.

use crate::midi::MidiTransport;
use crate::voicing::NoteSet;
use wmidi::{Channel, Note, U7};

/// The reconciliation state for one output channel.
#[derive(Clone, Copy, Debug)]
pub struct ChannelTracker {
    channel: Channel,
    sounding: NoteSet,
}

impl ChannelTracker {
    /// A tracker for the given channel, with nothing sounding.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            sounding: NoteSet::new(),
        }
    }

    /// The output channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// What the channel currently sounds, as last emitted.
    pub fn sounding(&self) -> &NoteSet {
        &self.sounding
    }

    /// Reconcile against a new set.
    ///
    /// With sustain-common on, a previously-sounding value that appears anywhere in the new set keeps
    /// sounding untouched; with it off every previous note is released and every new note re-attacked.
    /// Duplicate values (unison pairs) produce one event, not two.
    pub fn apply(
        &mut self,
        new: &NoteSet,
        velocity: U7,
        sustain_common: bool,
        midi: &mut impl MidiTransport,
    ) {
        let previous = self.sounding;

        let mut released = NoteSet::new();
        for (slot, note) in previous.iter() {
            let retained = sustain_common && new.contains(note);
            if !retained && !released.contains(note) {
                midi.note_off(self.channel, note);
                released.set(slot, Some(note));
            }
        }

        let mut attacked = NoteSet::new();
        for (slot, note) in new.iter() {
            let already_sounding = sustain_common && previous.contains(note);
            if !already_sounding && !attacked.contains(note) {
                midi.note_on(self.channel, note, velocity);
                attacked.set(slot, Some(note));
            }
        }

        self.sounding = *new;
    }

    /// Chord release: with the channel's sustain on, nothing happens and the notes ring; otherwise every
    /// sounding note is released.
    pub fn release(&mut self, sustain: bool, midi: &mut impl MidiTransport) {
        if sustain {
            return;
        }
        self.silence(midi);
    }

    /// Release every sounding note unconditionally.
    pub fn silence(&mut self, midi: &mut impl MidiTransport) {
        let mut released = NoteSet::new();
        for (slot, note) in self.sounding.iter() {
            if !released.contains(note) {
                midi.note_off(self.channel, note);
                released.set(slot, Some(note));
            }
        }
        self.sounding = NoteSet::new();
    }

    /// Strum attack: sound `note` on `slot` immediately, bypassing the diff.
    pub(crate) fn strike(
        &mut self,
        slot: usize,
        note: Note,
        velocity: U7,
        midi: &mut impl MidiTransport,
    ) {
        midi.note_on(self.channel, note, velocity);
        self.sounding.set(slot, Some(note));
    }

    /// Strum damp: stop `note` on `slot` immediately, bypassing the diff.
    pub(crate) fn damp(&mut self, slot: usize, note: Note, midi: &mut impl MidiTransport) {
        midi.note_off(self.channel, note);
        self.sounding.set(slot, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyvec::ArrayVec;

    struct Recorder {
        bytes: ArrayVec<[u8; 256]>,
    }

    impl Recorder {
        fn new() -> Self {
            Self { bytes: ArrayVec::new() }
        }

        /// The recorded stream as (status, note, velocity) triples.
        fn events(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
            self.bytes.chunks(3).map(|c| (c[0], c[1], c[2]))
        }

        fn count(&self) -> usize {
            self.bytes.len() / 3
        }
    }

    impl MidiTransport for Recorder {
        fn write(&mut self, byte: u8) {
            self.bytes.push(byte);
        }
    }

    fn set(values: &[u8]) -> NoteSet {
        let mut set = NoteSet::new();
        for (slot, &value) in values.iter().enumerate() {
            set.set(slot, Some(Note::from(U7::from_u8_lossy(value))));
        }
        set
    }

    const VELOCITY: U7 = U7::from_u8_lossy(100);

    #[test]
    fn first_chord_attacks_everything() {
        let mut tracker = ChannelTracker::new(Channel::Ch1);
        let mut midi = Recorder::new();
        tracker.apply(&set(&[60, 64, 67]), VELOCITY, true, &mut midi);
        assert!(midi.events().eq([
            (0x90, 60, 100),
            (0x90, 64, 100),
            (0x90, 67, 100)
        ]));
    }

    #[test]
    fn sustain_common_keeps_shared_values_sounding() {
        let mut tracker = ChannelTracker::new(Channel::Ch1);
        let mut midi = Recorder::new();
        tracker.apply(&set(&[60, 64, 67]), VELOCITY, true, &mut midi);

        let mut midi = Recorder::new();
        // C maj -> A min: 60 and 64 carry over, 67 leaves, 57 arrives
        tracker.apply(&set(&[57, 60, 64]), VELOCITY, true, &mut midi);
        assert!(
            midi.events().eq([(0x90, 67, 0), (0x90, 57, 100)]),
            "Expected one release and one attack, shared values untouched"
        );
    }

    #[test]
    fn without_sustain_common_every_note_retriggers() {
        let mut tracker = ChannelTracker::new(Channel::Ch1);
        let mut midi = Recorder::new();
        tracker.apply(&set(&[60, 64]), VELOCITY, false, &mut midi);

        let mut midi = Recorder::new();
        tracker.apply(&set(&[60, 65]), VELOCITY, false, &mut midi);
        assert!(midi.events().eq([
            (0x90, 60, 0),
            (0x90, 64, 0),
            (0x90, 60, 100),
            (0x90, 65, 100)
        ]));
    }

    #[test]
    fn unison_duplicates_emit_one_event_per_value() {
        let mut tracker = ChannelTracker::new(Channel::Ch1);
        let mut midi = Recorder::new();
        tracker.apply(&set(&[60, 60, 64, 64]), VELOCITY, true, &mut midi);
        assert_eq!(2, midi.count(), "One attack per distinct value");

        let mut midi = Recorder::new();
        tracker.silence(&mut midi);
        assert_eq!(2, midi.count(), "One release per distinct value");
    }

    #[test]
    fn release_with_sustain_emits_nothing_and_keeps_state() {
        let mut tracker = ChannelTracker::new(Channel::Ch1);
        let mut midi = Recorder::new();
        tracker.apply(&set(&[60, 64, 67]), VELOCITY, true, &mut midi);

        let mut midi = Recorder::new();
        tracker.release(true, &mut midi);
        assert_eq!(0, midi.count());
        assert_eq!(&set(&[60, 64, 67]), tracker.sounding());
    }

    #[test]
    fn release_without_sustain_silences_each_note_once() {
        let mut tracker = ChannelTracker::new(Channel::Ch1);
        let mut midi = Recorder::new();
        tracker.apply(&set(&[60, 64, 67]), VELOCITY, true, &mut midi);

        let mut midi = Recorder::new();
        tracker.release(false, &mut midi);
        assert!(midi.events().eq([(0x90, 60, 0), (0x90, 64, 0), (0x90, 67, 0)]));
        assert!(tracker.sounding().is_empty());
    }

    #[test]
    fn strike_and_damp_write_through_the_sounding_state() {
        let mut tracker = ChannelTracker::new(Channel::Ch1);
        let mut midi = Recorder::new();
        tracker.strike(3, Note::C4, VELOCITY, &mut midi);
        assert!(tracker.sounding().contains(Note::C4));

        tracker.damp(3, Note::C4, &mut midi);
        assert!(!tracker.sounding().contains(Note::C4));
        assert!(midi.events().eq([(0x90, 60, 100), (0x90, 60, 0)]));
    }
}

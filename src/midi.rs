//! The MIDI output seam.
//!
//! The hardware side is an ordered, reliable byte sink (a UART at 31250 baud on the real device). Note
//! events are the only traffic: a note-off is sent as a note-on with velocity zero, matching what string
//! synth modules of this controller's era expect.

use wmidi::{Channel, Note, U7};

/// Status-byte high nibble for a note-on message.
const NOTE_ON_STATUS: u8 = 0x90;

/// An ordered, reliable sink for MIDI bytes.
pub trait MidiTransport {
    /// Push one byte onto the wire.
    fn write(&mut self, byte: u8);

    /// Emit a note-on.
    fn note_on(&mut self, channel: Channel, note: Note, velocity: U7) {
        self.write(NOTE_ON_STATUS | channel.index());
        self.write(u8::from(note) & 0x7f);
        self.write(u8::from(velocity));
    }

    /// Emit a note-off, realized as a velocity-zero note-on.
    fn note_off(&mut self, channel: Channel, note: Note) {
        self.note_on(channel, note, U7::MIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyvec::ArrayVec;

    struct Recorder {
        bytes: ArrayVec<[u8; 16]>,
    }

    impl MidiTransport for Recorder {
        fn write(&mut self, byte: u8) {
            self.bytes.push(byte);
        }
    }

    #[test]
    fn note_on_wire_format() {
        let mut recorder = Recorder { bytes: ArrayVec::new() };
        recorder.note_on(Channel::Ch2, Note::C4, U7::from_u8_lossy(100));
        assert_eq!(&[0x91, 60, 100], recorder.bytes.as_slice());
    }

    #[test]
    fn note_off_is_a_silent_note_on() {
        let mut recorder = Recorder { bytes: ArrayVec::new() };
        recorder.note_off(Channel::Ch1, Note::A4);
        assert_eq!(&[0x90, 69, 0], recorder.bytes.as_slice());
    }
}

//! This crate contains architecture-agnostic control logic for the Strumboard, a stylus-strummed MIDI chord
//! controller. A matrix of chord-selector buttons and sixteen touch-sensitive "strings" is scanned by the host
//! hardware once per poll cycle; this crate resolves the held chord, computes a concrete note voicing under the
//! active options, and emits a minimal stream of MIDI note events on a played channel and a sustained drone
//! channel.
//!
//! Hardware concerns stay outside: the matrix scanner delivers an [`scan::InputSnapshot`] per cycle, MIDI bytes
//! leave through the [`midi::MidiTransport`] trait, and the persisted options record goes through
//! [`configuration::ConfigStorage`]. A firmware crate owns the pins, timing, and UART; everything in here is
//! plain state and arithmetic, testable on the host.

#![deny(missing_docs)]
#![no_std]

pub mod chord;
pub mod configuration;
pub mod engine;
pub mod midi;
pub mod scan;
pub mod strum;
pub mod tracker;
pub mod voicing;

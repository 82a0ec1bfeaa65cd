//! The 4-byte persisted record and the non-volatile storage seam.

use super::{DEFAULT_PATCH, Options};

/// Boot-time sentinel marking the record as initialized by this firmware.
pub const CONFIG_MAGIC: u8 = 123;

/// Byte length of the persisted record.
pub const CONFIG_LEN: usize = 4;

/// The options state that survives power cycles.
///
/// Wire layout: magic cookie, options high byte, options low byte, reverse-strum flag. Read once at boot,
/// written only by the explicit save action; in between, the live [`Options`] and the stored record drift
/// freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedConfig {
    /// The options word.
    pub options: Options,
    /// Whether column scan order is reversed.
    pub reverse_strum: bool,
}

impl PersistedConfig {
    /// Encode for storage.
    pub fn to_bytes(&self) -> [u8; CONFIG_LEN] {
        let bits = self.options.to_bits();
        [
            CONFIG_MAGIC,
            (bits >> 8) as u8,
            bits as u8,
            self.reverse_strum as u8,
        ]
    }

    /// Decode a stored record. A missing or mismatched magic cookie yields `None`; callers fall back to
    /// [`DEFAULT_PATCH`] via [`PersistedConfig::default`].
    pub fn from_bytes(bytes: [u8; CONFIG_LEN]) -> Option<Self> {
        if bytes[0] != CONFIG_MAGIC {
            return None;
        }
        Some(Self {
            options: Options::from_bits(u16::from(bytes[1]) << 8 | u16::from(bytes[2])),
            reverse_strum: bytes[3] != 0,
        })
    }
}

impl Default for PersistedConfig {
    fn default() -> Self {
        Self {
            options: DEFAULT_PATCH.options,
            reverse_strum: false,
        }
    }
}

/// The non-volatile storage collaborator.
///
/// Firmware backs this with EEPROM or flash; the engine only needs a fixed-size read and write. Storage
/// failures are the collaborator's problem; a garbage read is caught by the magic cookie.
pub trait ConfigStorage {
    /// Read the persisted record's bytes.
    fn load(&mut self) -> [u8; CONFIG_LEN];

    /// Overwrite the persisted record's bytes.
    fn store(&mut self, bytes: [u8; CONFIG_LEN]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let config = PersistedConfig {
            options: Options::from_bits(0x1234),
            reverse_strum: true,
        };
        let bytes = config.to_bytes();
        assert_eq!(
            Some(config),
            PersistedConfig::from_bytes(bytes),
            "Expected a saved record to reload identically"
        );
    }

    #[test]
    fn wire_layout() {
        let config = PersistedConfig {
            options: Options::from_bits(0x1234),
            reverse_strum: true,
        };
        assert_eq!([CONFIG_MAGIC, 0x12, 0x34, 1], config.to_bytes());
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bytes = PersistedConfig::default().to_bytes();
        bytes[0] ^= 0xff;
        assert_eq!(None, PersistedConfig::from_bytes(bytes));
    }

    #[test]
    fn default_matches_the_default_patch() {
        assert_eq!(DEFAULT_PATCH.options, PersistedConfig::default().options);
        assert!(!PersistedConfig::default().reverse_strum);
    }
}

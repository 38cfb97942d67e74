//! Gateway protocol revision handling.
//!
//! A firmware update rolled out in late 2015 grew the node record of the
//! scan answer from 42 to 50 bytes and moved the wire code for plugs. The
//! gateway does not announce its revision anywhere, but every scan answer
//! reveals it: the declared telegram length together with the node count
//! fixes the record size. Detection therefore runs once per non-empty scan
//! and the result drives both the record reads and the lamp-type mapping
//! of that scan.

use lightify_core::{LampType, LightifyError, LightifyResult};
use log::warn;

/// Node record size of gateways before the 2015 firmware.
pub const NODE_RECORD_LENGTH_LEGACY: usize = 42;

/// Node record size from the 2015 firmware on: the legacy layout plus 8
/// trailing bytes of vendor extensions.
pub const NODE_RECORD_LENGTH_2015: usize = 50;

/// Portion of a scan answer's length field not occupied by node records:
/// flags, opcode, token, reserved byte and the u16 node count. A scan that
/// reports zero nodes declares exactly this length.
pub const SCAN_LENGTH_OVERHEAD: u16 = 9;

/// Wire layout revision of the gateway firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVersion {
    /// Firmware before the 2015 update.
    Legacy,
    /// Firmware from the 2015 update on.
    V2015,
}

impl ProtocolVersion {
    /// Node record size of this revision.
    pub fn node_record_length(&self) -> usize {
        match self {
            ProtocolVersion::Legacy => NODE_RECORD_LENGTH_LEGACY,
            ProtocolVersion::V2015 => NODE_RECORD_LENGTH_2015,
        }
    }

    /// Derives the revision from a scan answer's declared length field and
    /// node count.
    ///
    /// # Arguments
    ///
    /// * `node_count` - node count announced by the answer, must be nonzero
    /// * `declared_length` - the answer header's length field
    ///
    /// # Returns
    ///
    /// The detected revision, or a protocol error if the length does not
    /// come out at a whole number of records of a known size.
    pub fn detect(node_count: u16, declared_length: u16) -> LightifyResult<Self> {
        if node_count == 0 {
            return Err(LightifyError::Protocol(
                "Cannot derive record size from an empty scan".into(),
            ));
        }

        let record_bytes = declared_length.checked_sub(SCAN_LENGTH_OVERHEAD).ok_or_else(|| {
            LightifyError::Protocol(format!(
                "Scan answer length {declared_length} below minimum"
            ))
        })?;

        if record_bytes % node_count != 0 {
            return Err(LightifyError::Protocol(format!(
                "Scan answer length {declared_length} does not fit {node_count} nodes"
            )));
        }

        match (record_bytes / node_count) as usize {
            NODE_RECORD_LENGTH_LEGACY => Ok(ProtocolVersion::Legacy),
            NODE_RECORD_LENGTH_2015 => Ok(ProtocolVersion::V2015),
            other => Err(LightifyError::Protocol(format!(
                "Unknown node record size {other}"
            ))),
        }
    }

    /// Maps a raw lamp-type code under this revision.
    ///
    /// The 2015 firmware moved plugs from 0x00 to 0x10; the light codes
    /// kept their values. Unrecognized codes are preserved and logged.
    pub fn lamp_type(&self, code: u8) -> LampType {
        let plug_code = match self {
            ProtocolVersion::Legacy => 0x00,
            ProtocolVersion::V2015 => 0x10,
        };

        if code == plug_code {
            return LampType::Plug;
        }

        match code {
            0x02 => LampType::Cct,
            0x04 => LampType::Dimmable,
            0x08 => LampType::Rgb,
            0x0a => LampType::ExtendedColor,
            other => {
                warn!("Unknown lamp type code 0x{other:02x}");
                LampType::Unknown(other)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_legacy() {
        let declared = (2 * NODE_RECORD_LENGTH_LEGACY + 9) as u16;
        assert_eq!(
            ProtocolVersion::detect(2, declared).unwrap(),
            ProtocolVersion::Legacy
        );
    }

    #[test]
    fn test_detect_2015() {
        let declared = (2 * NODE_RECORD_LENGTH_2015 + 9) as u16;
        assert_eq!(
            ProtocolVersion::detect(2, declared).unwrap(),
            ProtocolVersion::V2015
        );
    }

    #[test]
    fn test_detect_rejects_other_sizes() {
        assert!(ProtocolVersion::detect(2, 2 * 44 + 9).is_err());
        assert!(ProtocolVersion::detect(2, 2 * 42 + 10).is_err());
        assert!(ProtocolVersion::detect(3, 2 * 42 + 9).is_err());
        assert!(ProtocolVersion::detect(2, 3).is_err());
        assert!(ProtocolVersion::detect(0, 9).is_err());
    }

    #[test]
    fn test_lamp_type_legacy_table() {
        let v = ProtocolVersion::Legacy;
        assert_eq!(v.lamp_type(0x00), LampType::Plug);
        assert_eq!(v.lamp_type(0x02), LampType::Cct);
        assert_eq!(v.lamp_type(0x04), LampType::Dimmable);
        assert_eq!(v.lamp_type(0x08), LampType::Rgb);
        assert_eq!(v.lamp_type(0x0a), LampType::ExtendedColor);
        assert_eq!(v.lamp_type(0x77), LampType::Unknown(0x77));
    }

    #[test]
    fn test_lamp_type_2015_moves_plug() {
        let v = ProtocolVersion::V2015;
        assert_eq!(v.lamp_type(0x10), LampType::Plug);
        assert_eq!(v.lamp_type(0x00), LampType::Unknown(0x00));
        assert_eq!(v.lamp_type(0x0a), LampType::ExtendedColor);
    }
}

//! Shared value types of the Lightify device model.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Kind of device behind a node address.
///
/// The wire codes for these differ between gateway firmware generations;
/// mapping raw codes to this enum is the protocol layer's job. Codes that
/// no known firmware documents are preserved in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LampType {
    /// On/off mains socket, no dimming.
    Plug,
    /// Dimmable white lamp without color temperature control.
    Dimmable,
    /// Tunable-white lamp (color temperature only).
    Cct,
    /// Fixed white plus RGB channels.
    Rgb,
    /// Full extended color: RGBW plus tunable white.
    ExtendedColor,
    /// Unrecognized wire code, kept verbatim.
    Unknown(u8),
}

impl fmt::Display for LampType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LampType::Plug => write!(f, "plug"),
            LampType::Dimmable => write!(f, "dimmable"),
            LampType::Cct => write!(f, "CCT"),
            LampType::Rgb => write!(f, "RGB"),
            LampType::ExtendedColor => write!(f, "extended color"),
            LampType::Unknown(code) => write!(f, "unknown(0x{code:02x})"),
        }
    }
}

/// Reachability of a node as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnlineState {
    Offline,
    Online,
    /// Wire value that is neither the documented offline (0) nor online (2)
    /// code.
    Unknown,
}

impl OnlineState {
    /// Maps the raw wire byte: 0 is offline, 2 is online.
    pub fn from_wire(raw: u8) -> Self {
        match raw {
            0 => OnlineState::Offline,
            2 => OnlineState::Online,
            _ => OnlineState::Unknown,
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, OnlineState::Online)
    }
}

impl fmt::Display for OnlineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnlineState::Offline => write!(f, "offline"),
            OnlineState::Online => write!(f, "online"),
            OnlineState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Firmware version of a node, four components packed into one `u32`.
///
/// Major, minor, maintenance and build occupy one byte each, most
/// significant first, so version 1.2.4.14 is `0x0102040E`. A value of zero
/// means the version has not been reported yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FirmwareVersion(u32);

impl FirmwareVersion {
    pub const fn new(raw: u32) -> Self {
        FirmwareVersion(raw)
    }

    /// Packs the four version components.
    pub const fn from_parts(major: u8, minor: u8, maintenance: u8, build: u8) -> Self {
        FirmwareVersion(
            ((major as u32) << 24) | ((minor as u32) << 16) | ((maintenance as u32) << 8) | build as u32,
        )
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub const fn major(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn minor(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn maintenance(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn build(&self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major(),
            self.minor(),
            self.maintenance(),
            self.build()
        )
    }
}

/// Name of a node or group as stored on the gateway.
///
/// The gateway reserves 16 bytes with no documented encoding and no
/// guarantee of NUL termination, so the raw bytes are kept as-is and only
/// converted on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeName([u8; NodeName::LENGTH]);

impl NodeName {
    /// Fixed on-wire size of a name field.
    pub const LENGTH: usize = 16;

    pub const fn new(raw: [u8; NodeName::LENGTH]) -> Self {
        NodeName(raw)
    }

    /// Builds a name from up to 16 bytes; longer input is truncated,
    /// shorter input is NUL padded.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut raw = [0u8; NodeName::LENGTH];
        let n = bytes.len().min(NodeName::LENGTH);
        raw[..n].copy_from_slice(&bytes[..n]);
        NodeName(raw)
    }

    pub const fn as_bytes(&self) -> &[u8; NodeName::LENGTH] {
        &self.0
    }

    /// Readable form: the bytes up to the first NUL, decoded as UTF-8 with
    /// replacement characters for invalid sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(NodeName::LENGTH);
        String::from_utf8_lossy(&self.0[..end])
    }
}

impl Default for NodeName {
    fn default() -> Self {
        NodeName([0u8; NodeName::LENGTH])
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_online_state_from_wire() {
        assert_eq!(OnlineState::from_wire(0), OnlineState::Offline);
        assert_eq!(OnlineState::from_wire(2), OnlineState::Online);
        assert_eq!(OnlineState::from_wire(1), OnlineState::Unknown);
        assert!(OnlineState::from_wire(2).is_online());
        assert!(!OnlineState::from_wire(0).is_online());
    }

    #[test]
    fn test_firmware_version_parts() {
        let fw = FirmwareVersion::from_parts(1, 2, 4, 14);
        assert_eq!(fw.raw(), 0x0102_040E);
        assert_eq!(fw.major(), 1);
        assert_eq!(fw.minor(), 2);
        assert_eq!(fw.maintenance(), 4);
        assert_eq!(fw.build(), 14);
        assert_eq!(fw.to_string(), "1.2.4.14");
    }

    #[test]
    fn test_name_stops_at_nul() {
        let mut raw = [0u8; 16];
        raw[..8].copy_from_slice(b"Licht 01");
        let name = NodeName::new(raw);
        assert_eq!(name.to_string_lossy(), "Licht 01");
    }

    #[test]
    fn test_name_without_nul_uses_all_bytes() {
        let name = NodeName::new(*b"0123456789abcdef");
        assert_eq!(name.to_string_lossy(), "0123456789abcdef");
    }

    #[test]
    fn test_name_from_bytes_truncates() {
        let name = NodeName::from_bytes(b"a very long name indeed");
        assert_eq!(name.as_bytes(), b"a very long name");
    }

    #[test]
    fn test_lamp_type_display() {
        assert_eq!(LampType::ExtendedColor.to_string(), "extended color");
        assert_eq!(LampType::Unknown(0x42).to_string(), "unknown(0x42)");
    }
}

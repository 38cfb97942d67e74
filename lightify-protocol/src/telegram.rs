//! Telegram framing for the gateway's binary protocol.
//!
//! Every request and every answer starts with the same 8-byte header:
//!
//! ```text
//! +--------+--------+--------+--------+--------+--------+--------+--------+
//! | length (u16 LE) | flags  | opcode |          token (u32 LE)           |
//! +--------+--------+--------+--------+--------+--------+--------+--------+
//! ```
//!
//! The length field counts the whole telegram minus its own two bytes, so
//! a telegram of total size N carries N - 2 here. All multi-byte integers
//! in this protocol are little-endian.

use crate::opcode::Opcode;
use bytes::{Buf, BufMut};
use lightify_core::{LightifyError, LightifyResult};

/// Telegram header length
pub const TELEGRAM_HEADER_LENGTH: usize = 8;

/// Number of leading bytes the length field does not count (itself).
pub const LENGTH_FIELD_EXCESS: u16 = 2;

/// Flags value for a telegram addressed to a single node or broadcast.
pub const FLAG_UNICAST: u8 = 0x00;

/// Flags bit marking a telegram addressed to a group id.
pub const FLAG_GROUP: u8 = 0x02;

/// Telegram header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelegramHeader {
    length: u16,
    flags: u8,
    opcode: u8,
    token: u32,
}

impl TelegramHeader {
    /// Create a header from raw field values
    pub fn new(length: u16, flags: u8, opcode: u8, token: u32) -> Self {
        Self {
            length,
            flags,
            opcode,
            token,
        }
    }

    /// Create the header of a request with the given body size; the length
    /// field is derived from it.
    pub fn for_request(opcode: Opcode, flags: u8, token: u32, body_length: usize) -> Self {
        let total = TELEGRAM_HEADER_LENGTH + body_length;
        Self {
            length: total as u16 - LENGTH_FIELD_EXCESS,
            flags,
            opcode: opcode.code(),
            token,
        }
    }

    /// Encode header to bytes (little-endian)
    pub fn encode(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(TELEGRAM_HEADER_LENGTH);
        result.put_u16_le(self.length);
        result.put_u8(self.flags);
        result.put_u8(self.opcode);
        result.put_u32_le(self.token);
        result
    }

    /// Decode header from bytes
    pub fn decode(data: &[u8]) -> LightifyResult<Self> {
        if data.len() < TELEGRAM_HEADER_LENGTH {
            return Err(LightifyError::Protocol(format!(
                "Telegram header too short: expected {}, got {}",
                TELEGRAM_HEADER_LENGTH,
                data.len()
            )));
        }

        let mut cursor = data;
        let length = cursor.get_u16_le();
        let flags = cursor.get_u8();
        let opcode = cursor.get_u8();
        let token = cursor.get_u32_le();

        // The length field must at least cover the header bytes after it.
        if length < TELEGRAM_HEADER_LENGTH as u16 - LENGTH_FIELD_EXCESS {
            return Err(LightifyError::Protocol(format!(
                "Telegram length field {} below header size",
                length
            )));
        }

        Ok(Self {
            length,
            flags,
            opcode,
            token,
        })
    }

    /// Raw length field value (total telegram size minus 2)
    pub fn length(&self) -> u16 {
        self.length
    }

    /// Total telegram size in bytes, header included
    pub fn total_length(&self) -> usize {
        self.length as usize + LENGTH_FIELD_EXCESS as usize
    }

    /// Size of the body following the header
    pub fn body_length(&self) -> usize {
        self.total_length() - TELEGRAM_HEADER_LENGTH
    }

    /// Get flags byte. Answers carry 0x01 here; request flags are
    /// [`FLAG_UNICAST`] or [`FLAG_GROUP`].
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Get raw opcode byte
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Get request/answer correlation token
    pub fn token(&self) -> u32 {
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_header_encode_decode() {
        let header = TelegramHeader::for_request(Opcode::SetOnOff, FLAG_UNICAST, 7, 9);
        let encoded = header.encode();
        assert_eq!(encoded.len(), TELEGRAM_HEADER_LENGTH);

        let decoded = TelegramHeader::decode(&encoded).unwrap();
        assert_eq!(decoded.length(), 15);
        assert_eq!(decoded.total_length(), 17);
        assert_eq!(decoded.body_length(), 9);
        assert_eq!(decoded.opcode(), 0x32);
        assert_eq!(decoded.token(), 7);
    }

    #[test]
    fn test_header_wire_layout() {
        let header = TelegramHeader::for_request(Opcode::SetBrightness, FLAG_UNICAST, 1, 11);
        assert_eq!(header.encode(), vec![0x11, 0x00, 0x00, 0x31, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_decode_rejects_short_input() {
        assert!(TelegramHeader::decode(&[0x11, 0x00, 0x00]).is_err());
    }

    #[test]
    fn test_decode_rejects_undersized_length_field() {
        // Length 5 would make the telegram smaller than its own header.
        let data = [0x05, 0x00, 0x00, 0x13, 0x01, 0x00, 0x00, 0x00];
        assert!(TelegramHeader::decode(&data).is_err());
    }

    #[test]
    fn test_group_flag_round_trip() {
        let header = TelegramHeader::for_request(Opcode::SetOnOff, FLAG_GROUP, 3, 9);
        let decoded = TelegramHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded.flags(), FLAG_GROUP);
    }
}

//! Request telegram builders.
//!
//! Each builder returns the complete wire form of one request, header
//! included. Addresses travel as 8 raw bytes, least significant first; a
//! group target is encoded as the group id widened to 64 bits with the
//! group flag set in the header.

use crate::opcode::Opcode;
use crate::telegram::{FLAG_GROUP, FLAG_UNICAST, TELEGRAM_HEADER_LENGTH, TelegramHeader};
use bytes::BufMut;
use lightify_core::NodeAddress;

/// Addressee of a command telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Every node on the gateway. Only the on/off command supports this.
    Broadcast,
    /// A single node by hardware address.
    Node(NodeAddress),
    /// A group by id; member resolution happens on the gateway.
    Group(u8),
}

impl Target {
    /// Header flags for this addressee.
    pub fn flags(&self) -> u8 {
        match self {
            Target::Broadcast | Target::Node(_) => FLAG_UNICAST,
            Target::Group(_) => FLAG_GROUP,
        }
    }

    /// 64-bit value written into (and echoed back in) the address field.
    pub fn address_value(&self) -> u64 {
        match self {
            Target::Broadcast => NodeAddress::BROADCAST.raw(),
            Target::Node(addr) => addr.raw(),
            Target::Group(id) => *id as u64,
        }
    }
}

impl From<NodeAddress> for Target {
    fn from(addr: NodeAddress) -> Self {
        Target::Node(addr)
    }
}

fn build(opcode: Opcode, flags: u8, token: u32, body_length: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(TELEGRAM_HEADER_LENGTH + body_length);
    buf.extend_from_slice(&TelegramHeader::for_request(opcode, flags, token, body_length).encode());
    buf
}

/// Query the full node list. Body is a single 0x01 byte.
pub fn scan_nodes(token: u32) -> Vec<u8> {
    let mut buf = build(Opcode::ScanNodes, FLAG_UNICAST, token, 1);
    buf.put_u8(0x01);
    buf
}

/// Query the full group list. Body is empty.
pub fn scan_groups(token: u32) -> Vec<u8> {
    build(Opcode::ScanGroups, FLAG_UNICAST, token, 0)
}

/// Switch a node, a group or everything on or off.
pub fn set_on_off(token: u32, target: Target, on: bool) -> Vec<u8> {
    let mut buf = build(Opcode::SetOnOff, target.flags(), token, 9);
    buf.put_u64_le(target.address_value());
    buf.put_u8(on as u8);
    buf
}

/// Set the brightness level (0..=100) with a fade time in tenths of a
/// second.
pub fn set_brightness(token: u32, target: Target, level: u8, fade_time: u16) -> Vec<u8> {
    let mut buf = build(Opcode::SetBrightness, target.flags(), token, 11);
    buf.put_u64_le(target.address_value());
    buf.put_u8(level);
    buf.put_u16_le(fade_time);
    buf
}

/// Set the color temperature in Kelvin with a fade time in tenths of a
/// second.
pub fn set_cct(token: u32, target: Target, cct: u16, fade_time: u16) -> Vec<u8> {
    let mut buf = build(Opcode::SetCct, target.flags(), token, 12);
    buf.put_u64_le(target.address_value());
    buf.put_u16_le(cct);
    buf.put_u16_le(fade_time);
    buf
}

/// Set the four color channels with a fade time in tenths of a second.
pub fn set_rgbw(
    token: u32,
    target: Target,
    red: u8,
    green: u8,
    blue: u8,
    white: u8,
    fade_time: u16,
) -> Vec<u8> {
    let mut buf = build(Opcode::SetRgbw, target.flags(), token, 14);
    buf.put_u64_le(target.address_value());
    buf.put_u8(red);
    buf.put_u8(green);
    buf.put_u8(blue);
    buf.put_u8(white);
    buf.put_u16_le(fade_time);
    buf
}

/// Query the live state of one node.
pub fn update_node(token: u32, address: NodeAddress) -> Vec<u8> {
    let mut buf = build(Opcode::UpdateNode, FLAG_UNICAST, token, 8);
    buf.put_u64_le(address.raw());
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: NodeAddress = NodeAddress::new(0xdead_beef_1234_5678);

    #[test]
    fn test_scan_nodes_wire_form() {
        assert_eq!(
            scan_nodes(1),
            vec![0x07, 0x00, 0x00, 0x13, 0x01, 0x00, 0x00, 0x00, 0x01]
        );
    }

    #[test]
    fn test_scan_groups_wire_form() {
        assert_eq!(
            scan_groups(1),
            vec![0x06, 0x00, 0x00, 0x1e, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_set_brightness_wire_form() {
        assert_eq!(
            set_brightness(1, Target::Node(ADDR), 0x12, 10),
            vec![
                0x11, 0x00, 0x00, 0x31, 0x01, 0x00, 0x00, 0x00, 0x78, 0x56, 0x34, 0x12, 0xef,
                0xbe, 0xad, 0xde, 0x12, 0x0a, 0x00
            ]
        );
    }

    #[test]
    fn test_set_on_off_broadcast_wire_form() {
        assert_eq!(
            set_on_off(1, Target::Broadcast, true),
            vec![
                0x0f, 0x00, 0x00, 0x32, 0x01, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff, 0x01
            ]
        );
    }

    #[test]
    fn test_set_on_off_node_wire_form() {
        assert_eq!(
            set_on_off(1, Target::Node(ADDR), false),
            vec![
                0x0f, 0x00, 0x00, 0x32, 0x01, 0x00, 0x00, 0x00, 0x78, 0x56, 0x34, 0x12, 0xef,
                0xbe, 0xad, 0xde, 0x00
            ]
        );
    }

    #[test]
    fn test_set_on_off_group_wire_form() {
        // Group id 2, group flag set, id widened to the address field.
        assert_eq!(
            set_on_off(5, Target::Group(2), true),
            vec![
                0x0f, 0x00, 0x02, 0x32, 0x05, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x01
            ]
        );
    }

    #[test]
    fn test_set_cct_wire_form() {
        assert_eq!(
            set_cct(1, Target::Node(ADDR), 2700, 10),
            vec![
                0x12, 0x00, 0x00, 0x33, 0x01, 0x00, 0x00, 0x00, 0x78, 0x56, 0x34, 0x12, 0xef,
                0xbe, 0xad, 0xde, 0x8c, 0x0a, 0x0a, 0x00
            ]
        );
    }

    #[test]
    fn test_set_rgbw_wire_form() {
        assert_eq!(
            set_rgbw(1, Target::Node(ADDR), 1, 2, 3, 4, 10),
            vec![
                0x14, 0x00, 0x00, 0x36, 0x01, 0x00, 0x00, 0x00, 0x78, 0x56, 0x34, 0x12, 0xef,
                0xbe, 0xad, 0xde, 0x01, 0x02, 0x03, 0x04, 0x0a, 0x00
            ]
        );
    }

    #[test]
    fn test_update_node_wire_form() {
        assert_eq!(
            update_node(1, ADDR),
            vec![
                0x0e, 0x00, 0x00, 0x68, 0x01, 0x00, 0x00, 0x00, 0x78, 0x56, 0x34, 0x12, 0xef,
                0xbe, 0xad, 0xde
            ]
        );
    }
}

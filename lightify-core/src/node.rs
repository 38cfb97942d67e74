//! Cached view of a single lamp or plug.

use crate::address::NodeAddress;
use crate::types::{FirmwareVersion, LampType, NodeName, OnlineState};
use serde::{Deserialize, Serialize};

/// One node (lamp or plug) as last reported by the gateway.
///
/// A `Node` is a cache entry, nothing more: reading it never talks to the
/// gateway, and the mutators below only change the cached view. The
/// connection layer updates entries as answers arrive and marks an entry
/// [stale](Node::is_stale) when a command addressed to it failed at the
/// device level.
///
/// Fields the gateway has not reported yet are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    address: NodeAddress,
    zone: u16,
    groups: u16,
    lamp_type: LampType,
    name: NodeName,
    red: Option<u8>,
    green: Option<u8>,
    blue: Option<u8>,
    white: Option<u8>,
    cct: Option<u16>,
    brightness: Option<u8>,
    power: Option<bool>,
    online: OnlineState,
    firmware: FirmwareVersion,
    stale: bool,
}

impl Node {
    /// Creates an empty entry for the given address. All reported values
    /// start out unknown.
    pub fn new(address: NodeAddress) -> Self {
        Node {
            address,
            zone: 0,
            groups: 0,
            lamp_type: LampType::Unknown(0),
            name: NodeName::default(),
            red: None,
            green: None,
            blue: None,
            white: None,
            cct: None,
            brightness: None,
            power: None,
            online: OnlineState::Unknown,
            firmware: FirmwareVersion::default(),
            stale: false,
        }
    }

    pub fn address(&self) -> NodeAddress {
        self.address
    }

    /// 16-bit zone / short id assigned by the gateway.
    pub fn zone(&self) -> u16 {
        self.zone
    }

    /// Group-membership bitmask; bit `k` set means membership in group `k`.
    pub fn groups(&self) -> u16 {
        self.groups
    }

    /// Tests membership in the group with the given id.
    ///
    /// Ids outside the 16-bit mask range (>= 16) are never members.
    pub fn in_group(&self, group_id: u8) -> bool {
        match 1u16.checked_shl(group_id as u32) {
            Some(bit) => self.groups & bit != 0,
            None => false,
        }
    }

    pub fn lamp_type(&self) -> LampType {
        self.lamp_type
    }

    pub fn name(&self) -> &NodeName {
        &self.name
    }

    pub fn red(&self) -> Option<u8> {
        self.red
    }

    pub fn green(&self) -> Option<u8> {
        self.green
    }

    pub fn blue(&self) -> Option<u8> {
        self.blue
    }

    pub fn white(&self) -> Option<u8> {
        self.white
    }

    /// Color temperature in Kelvin.
    pub fn cct(&self) -> Option<u16> {
        self.cct
    }

    /// Brightness level, 0..=100 in practice.
    pub fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    /// On/off state; `None` while unreported.
    pub fn power(&self) -> Option<bool> {
        self.power
    }

    pub fn online(&self) -> OnlineState {
        self.online
    }

    pub fn firmware(&self) -> FirmwareVersion {
        self.firmware
    }

    /// True when the last command addressed to this node failed at the
    /// device level, so cached values may no longer match reality. A
    /// successful live update clears the flag.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    // Mutators. These modify the cached view only; none of them sends
    // anything to the gateway.

    pub fn set_zone(&mut self, zone: u16) {
        self.zone = zone;
    }

    pub fn set_groups(&mut self, mask: u16) {
        self.groups = mask;
    }

    pub fn set_lamp_type(&mut self, lamp_type: LampType) {
        self.lamp_type = lamp_type;
    }

    pub fn set_name(&mut self, name: NodeName) {
        self.name = name;
    }

    pub fn set_rgbw(&mut self, red: u8, green: u8, blue: u8, white: u8) {
        self.red = Some(red);
        self.green = Some(green);
        self.blue = Some(blue);
        self.white = Some(white);
    }

    pub fn set_cct(&mut self, cct: u16) {
        self.cct = Some(cct);
    }

    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = Some(level);
    }

    pub fn set_power(&mut self, on: bool) {
        self.power = Some(on);
    }

    pub fn set_online(&mut self, online: OnlineState) {
        self.online = online;
    }

    pub fn set_firmware(&mut self, firmware: FirmwareVersion) {
        self.firmware = firmware;
    }

    pub fn set_stale(&mut self, stale: bool) {
        self.stale = stale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_unreported() {
        let node = Node::new(NodeAddress::new(0x1122));
        assert_eq!(node.address().raw(), 0x1122);
        assert_eq!(node.power(), None);
        assert_eq!(node.brightness(), None);
        assert_eq!(node.online(), OnlineState::Unknown);
        assert!(!node.is_stale());
    }

    #[test]
    fn test_group_membership_mask() {
        let mut node = Node::new(NodeAddress::new(1));
        node.set_groups(0xabcd);
        // 0xabcd = 1010 1011 1100 1101
        assert!(node.in_group(0));
        assert!(!node.in_group(1));
        assert!(node.in_group(2));
        assert!(node.in_group(3));
        assert!(node.in_group(15));
        assert!(!node.in_group(16));
        assert!(!node.in_group(200));
    }

    #[test]
    fn test_rgbw_setter_fills_all_channels() {
        let mut node = Node::new(NodeAddress::new(1));
        node.set_rgbw(0xf0, 0xf1, 0xf2, 0xf3);
        assert_eq!(node.red(), Some(0xf0));
        assert_eq!(node.green(), Some(0xf1));
        assert_eq!(node.blue(), Some(0xf2));
        assert_eq!(node.white(), Some(0xf3));
    }
}

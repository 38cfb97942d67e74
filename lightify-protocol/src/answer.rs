//! Answer body decoders.
//!
//! Body layouts, offsets relative to the body start (after the 8-byte
//! telegram header):
//!
//! ```text
//! set answer (12 bytes):
//!   status u8 | 2 reserved | echoed address u64 LE | 1 trailing byte
//!
//! node scan prefix (3 bytes):
//!   reserved u8 | node count u16 LE
//!
//! group scan prefix (3 bytes):
//!   status u8 | group count u16 LE
//!
//! node record (42 bytes legacy, +8 ignored trailing bytes since 2015):
//!   zone u16 | address u64 | type u8 | firmware 4 x u8 | online u8 |
//!   group mask u16 | on/off u8 | brightness u8 | cct u16 | r g b w |
//!   name 16 bytes
//!
//! group record (18 bytes):
//!   group id u8 | reserved u8 | name 16 bytes
//!
//! node update body (20 bytes, only after a zero status byte):
//!   reserved u16 | echoed address u64 | unknown u8 | online u8 |
//!   on/off u8 | brightness u8 | cct u16 | r g b w
//! ```

use crate::version::ProtocolVersion;
use bytes::Buf;
use lightify_core::{
    FirmwareVersion, Group, LightifyError, LightifyResult, Node, NodeAddress, NodeName,
    OnlineState,
};

/// Body size of the answer to any of the four set commands.
pub const SET_ANSWER_LENGTH: usize = 12;

/// Prefix size of a node scan answer body.
pub const NODE_SCAN_PREFIX_LENGTH: usize = 3;

/// Prefix size of a group scan answer body.
pub const GROUP_SCAN_PREFIX_LENGTH: usize = 3;

/// Size of one group record.
pub const GROUP_RECORD_LENGTH: usize = 18;

/// Size of the node update body following a zero status byte.
pub const UPDATE_BODY_LENGTH: usize = 20;

fn check_length(what: &str, expected: usize, got: usize) -> LightifyResult<()> {
    if got < expected {
        return Err(LightifyError::Protocol(format!(
            "{what} too short: expected {expected}, got {got}"
        )));
    }
    Ok(())
}

/// Answer to one of the set commands (on/off, brightness, CCT, RGBW).
#[derive(Debug, Clone, Copy)]
pub struct SetAnswer {
    status: u8,
    address: u64,
}

impl SetAnswer {
    /// Decode from the 12-byte answer body
    pub fn decode(data: &[u8]) -> LightifyResult<Self> {
        check_length("Set answer", SET_ANSWER_LENGTH, data.len())?;
        let mut cursor = data;
        let status = cursor.get_u8();
        cursor.advance(2);
        let address = cursor.get_u64_le();
        Ok(Self { status, address })
    }

    pub fn status(&self) -> u8 {
        self.status
    }

    /// Address (or widened group id) echoed by the gateway.
    pub fn address(&self) -> u64 {
        self.address
    }

    /// Verifies the echoed address against the one the request addressed.
    pub fn verify_address(&self, expected: u64) -> LightifyResult<()> {
        if self.address != expected {
            return Err(LightifyError::Protocol(format!(
                "Echoed address {:016x} does not match requested {:016x}",
                self.address, expected
            )));
        }
        Ok(())
    }
}

/// Prefix of a node scan answer body.
#[derive(Debug, Clone, Copy)]
pub struct NodeScanPrefix {
    reserved: u8,
    count: u16,
}

impl NodeScanPrefix {
    pub fn decode(data: &[u8]) -> LightifyResult<Self> {
        check_length("Node scan prefix", NODE_SCAN_PREFIX_LENGTH, data.len())?;
        let mut cursor = data;
        let reserved = cursor.get_u8();
        let count = cursor.get_u16_le();
        Ok(Self { reserved, count })
    }

    /// Undocumented leading byte; real gateways send 0.
    pub fn reserved(&self) -> u8 {
        self.reserved
    }

    pub fn count(&self) -> u16 {
        self.count
    }
}

/// Prefix of a group scan answer body.
#[derive(Debug, Clone, Copy)]
pub struct GroupScanPrefix {
    status: u8,
    count: u16,
}

impl GroupScanPrefix {
    pub fn decode(data: &[u8]) -> LightifyResult<Self> {
        check_length("Group scan prefix", GROUP_SCAN_PREFIX_LENGTH, data.len())?;
        let mut cursor = data;
        let status = cursor.get_u8();
        let count = cursor.get_u16_le();
        Ok(Self { status, count })
    }

    pub fn status(&self) -> u8 {
        self.status
    }

    pub fn count(&self) -> u16 {
        self.count
    }
}

/// Decodes one node record of a scan answer into a cache entry.
///
/// The record size and the lamp-type table depend on the firmware
/// revision; the 2015 layout's trailing extension bytes are ignored.
pub fn decode_node_record(version: ProtocolVersion, data: &[u8]) -> LightifyResult<Node> {
    check_length("Node record", version.node_record_length(), data.len())?;

    let mut cursor = data;
    let zone = cursor.get_u16_le();
    let address = NodeAddress::new(cursor.get_u64_le());
    let type_code = cursor.get_u8();
    let fw_major = cursor.get_u8();
    let fw_minor = cursor.get_u8();
    let fw_maintenance = cursor.get_u8();
    let fw_build = cursor.get_u8();
    let online = cursor.get_u8();
    let groups = cursor.get_u16_le();
    let on = cursor.get_u8();
    let brightness = cursor.get_u8();
    let cct = cursor.get_u16_le();
    let red = cursor.get_u8();
    let green = cursor.get_u8();
    let blue = cursor.get_u8();
    let white = cursor.get_u8();
    let mut name = [0u8; NodeName::LENGTH];
    cursor.copy_to_slice(&mut name);

    let mut node = Node::new(address);
    node.set_zone(zone);
    node.set_lamp_type(version.lamp_type(type_code));
    node.set_firmware(FirmwareVersion::from_parts(
        fw_major,
        fw_minor,
        fw_maintenance,
        fw_build,
    ));
    node.set_online(OnlineState::from_wire(online));
    node.set_groups(groups);
    node.set_power(on != 0);
    node.set_brightness(brightness);
    node.set_cct(cct);
    node.set_rgbw(red, green, blue, white);
    node.set_name(NodeName::new(name));
    Ok(node)
}

/// Decodes one 18-byte group record.
pub fn decode_group_record(data: &[u8]) -> LightifyResult<Group> {
    check_length("Group record", GROUP_RECORD_LENGTH, data.len())?;

    let mut cursor = data;
    let id = cursor.get_u8();
    cursor.advance(1);
    let mut name = [0u8; NodeName::LENGTH];
    cursor.copy_to_slice(&mut name);
    Ok(Group::new(id, NodeName::new(name)))
}

/// Body of a node update answer, sent only when the status byte was zero.
#[derive(Debug, Clone, Copy)]
pub struct UpdateBody {
    address: u64,
    online: OnlineState,
    on: bool,
    brightness: u8,
    cct: u16,
    red: u8,
    green: u8,
    blue: u8,
    white: u8,
}

impl UpdateBody {
    /// Decode from the 20-byte body
    pub fn decode(data: &[u8]) -> LightifyResult<Self> {
        check_length("Update body", UPDATE_BODY_LENGTH, data.len())?;

        let mut cursor = data;
        cursor.advance(2);
        let address = cursor.get_u64_le();
        cursor.advance(1);
        let online = OnlineState::from_wire(cursor.get_u8());
        let on = cursor.get_u8() != 0;
        let brightness = cursor.get_u8();
        let cct = cursor.get_u16_le();
        let red = cursor.get_u8();
        let green = cursor.get_u8();
        let blue = cursor.get_u8();
        let white = cursor.get_u8();

        Ok(Self {
            address,
            online,
            on,
            brightness,
            cct,
            red,
            green,
            blue,
            white,
        })
    }

    /// Address echoed by the gateway.
    pub fn address(&self) -> u64 {
        self.address
    }

    pub fn verify_address(&self, expected: NodeAddress) -> LightifyResult<()> {
        if self.address != expected.raw() {
            return Err(LightifyError::Protocol(format!(
                "Echoed address {:016x} does not match requested {expected}",
                self.address
            )));
        }
        Ok(())
    }

    /// Writes the reported live state into a cache entry and clears its
    /// stale flag.
    pub fn apply_to(&self, node: &mut Node) {
        node.set_online(self.online);
        node.set_power(self.on);
        node.set_brightness(self.brightness);
        node.set_cct(self.cct);
        node.set_rgbw(self.red, self.green, self.blue, self.white);
        node.set_stale(false);
    }

    pub fn online(&self) -> OnlineState {
        self.online
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn cct(&self) -> u16 {
        self.cct
    }

    pub fn rgbw(&self) -> (u8, u8, u8, u8) {
        (self.red, self.green, self.blue, self.white)
    }
}

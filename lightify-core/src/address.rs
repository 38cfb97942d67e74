use serde::{Deserialize, Serialize};
use std::fmt;

/// 64-bit hardware address of a node on the ZigBee side of the gateway.
///
/// The address is the immutable identity of a lamp or plug; it survives
/// renames and group reassignments. On the wire it travels as 8 raw bytes,
/// least significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeAddress(u64);

impl NodeAddress {
    /// The all-ones broadcast address understood by the gateway.
    pub const BROADCAST: NodeAddress = NodeAddress(u64::MAX);

    pub const fn new(raw: u64) -> Self {
        NodeAddress(raw)
    }

    /// Raw 64-bit value.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_broadcast(&self) -> bool {
        self.0 == u64::MAX
    }
}

impl From<u64> for NodeAddress {
    fn from(raw: u64) -> Self {
        NodeAddress(raw)
    }
}

impl From<NodeAddress> for u64 {
    fn from(addr: NodeAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        let addr = NodeAddress::new(0xdead_beef_1234_5678);
        assert_eq!(addr.to_string(), "deadbeef12345678");
    }

    #[test]
    fn test_broadcast() {
        assert!(NodeAddress::BROADCAST.is_broadcast());
        assert!(!NodeAddress::new(1).is_broadcast());
        assert_eq!(NodeAddress::BROADCAST.raw(), 0xffff_ffff_ffff_ffff);
    }
}

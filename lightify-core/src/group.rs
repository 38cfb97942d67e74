use crate::types::NodeName;
use serde::{Deserialize, Serialize};

/// One group as reported by the gateway's group scan.
///
/// Groups are identified by a small numeric id; a node's membership is a
/// bit in its 16-bit group mask, so practical ids stay below 16.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: u8,
    name: NodeName,
}

impl Group {
    pub fn new(id: u8, name: NodeName) -> Self {
        Group { id, name }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn name(&self) -> &NodeName {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_accessors() {
        let group = Group::new(3, NodeName::from_bytes(b"Wohnzimmer"));
        assert_eq!(group.id(), 3);
        assert_eq!(group.name().to_string_lossy(), "Wohnzimmer");
    }
}

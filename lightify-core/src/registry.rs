//! Client-side caches of the gateway's node and group lists.
//!
//! Both registries are plain growable collections that preserve scan order.
//! They hold whatever the last scan reported; a scan replaces the whole
//! content at once, so readers never observe a mix of two scans.

use crate::address::NodeAddress;
use crate::group::Group;
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// All nodes known from the last node scan.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        NodeRegistry { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every entry. Called at the start of a scan, so a failed scan
    /// leaves the cache empty rather than stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Installs a freshly scanned list, dropping whatever was cached.
    pub fn replace_all(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    /// Iterates entries in scan order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.nodes.iter_mut()
    }

    /// Looks up a node by hardware address.
    pub fn by_address(&self, address: NodeAddress) -> Option<&Node> {
        self.nodes.iter().find(|n| n.address() == address)
    }

    pub fn by_address_mut(&mut self, address: NodeAddress) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.address() == address)
    }

    /// Looks up the first node whose name matches exactly.
    pub fn by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name().to_string_lossy() == name)
    }

    /// Lazily yields the members of the group with the given id.
    ///
    /// An id outside the mask range yields nothing.
    pub fn in_group(&self, group_id: u8) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.in_group(group_id))
    }

    pub fn in_group_mut(&mut self, group_id: u8) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut().filter(move |n| n.in_group(group_id))
    }
}

impl<'a> IntoIterator for &'a NodeRegistry {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// All groups known from the last group scan.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GroupRegistry {
    groups: Vec<Group>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        GroupRegistry { groups: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn replace_all(&mut self, groups: Vec<Group>) {
        self.groups = groups;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Looks up a group by id; if the gateway ever reported duplicate ids,
    /// the first one wins.
    pub fn by_id(&self, id: u8) -> Option<&Group> {
        self.groups.iter().find(|g| g.id() == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name().to_string_lossy() == name)
    }
}

impl<'a> IntoIterator for &'a GroupRegistry {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeName;

    fn node(addr: u64, name: &str, mask: u16) -> Node {
        let mut n = Node::new(NodeAddress::new(addr));
        n.set_name(NodeName::from_bytes(name.as_bytes()));
        n.set_groups(mask);
        n
    }

    #[test]
    fn test_replace_all_swaps_content() {
        let mut reg = NodeRegistry::new();
        reg.replace_all(vec![node(1, "a", 0), node(2, "b", 0)]);
        assert_eq!(reg.len(), 2);
        reg.replace_all(vec![node(3, "c", 0)]);
        assert_eq!(reg.len(), 1);
        assert!(reg.by_address(NodeAddress::new(1)).is_none());
        assert!(reg.by_address(NodeAddress::new(3)).is_some());

        // Replacing with nothing is idempotent.
        reg.replace_all(Vec::new());
        reg.replace_all(Vec::new());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_lookup_by_address_and_name() {
        let mut reg = NodeRegistry::new();
        reg.replace_all(vec![node(0x10, "Flur", 0), node(0x20, "Kueche", 0)]);
        assert_eq!(
            reg.by_address(NodeAddress::new(0x20)).unwrap().name().to_string_lossy(),
            "Kueche"
        );
        assert_eq!(reg.by_name("Flur").unwrap().address().raw(), 0x10);
        assert!(reg.by_name("Bad").is_none());
    }

    #[test]
    fn test_group_membership_iteration() {
        let mut reg = NodeRegistry::new();
        reg.replace_all(vec![
            node(1, "a", 0b0000_0010),
            node(2, "b", 0b0000_0110),
            node(3, "c", 0b0000_0100),
        ]);
        let members: Vec<u64> = reg.in_group(1).map(|n| n.address().raw()).collect();
        assert_eq!(members, vec![1, 2]);
        assert_eq!(reg.in_group(7).count(), 0);
        // Out-of-range ids are empty, not a panic.
        assert_eq!(reg.in_group(200).count(), 0);
    }

    #[test]
    fn test_group_registry_lookup() {
        let mut reg = GroupRegistry::new();
        reg.replace_all(vec![
            Group::new(1, NodeName::from_bytes(b"Gruppe1")),
            Group::new(2, NodeName::from_bytes(b"Gruppe2")),
        ]);
        assert_eq!(reg.by_id(2).unwrap().name().to_string_lossy(), "Gruppe2");
        assert_eq!(reg.by_name("Gruppe1").unwrap().id(), 1);
        assert!(reg.by_id(9).is_none());
        reg.clear();
        assert!(reg.is_empty());
    }
}

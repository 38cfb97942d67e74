//! Core types and device model for the Lightify gateway protocol
//!
//! This crate provides the error type, the node/group device model and the
//! client-side registries used throughout the gateway driver.

pub mod address;
pub mod error;
pub mod group;
pub mod node;
pub mod registry;
pub mod types;

pub use address::NodeAddress;
pub use error::{LightifyError, LightifyResult};
pub use group::Group;
pub use node::Node;
pub use registry::{GroupRegistry, NodeRegistry};
pub use types::{FirmwareVersion, LampType, NodeName, OnlineState};

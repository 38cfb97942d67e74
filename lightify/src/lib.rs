//! Client library for OSRAM Lightify gateways.
//!
//! Talks the gateway's binary TCP protocol to scan, query and control the
//! lamps and plugs paired to it.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `lightify-core`: Device model, registries and error handling
//! - `lightify-protocol`: Wire codec (telegrams, requests, answers) and
//!   protocol revision detection
//! - `lightify-transport`: Transport layer (TCP)
//! - `lightify-client`: Gateway client and connection builder
//!
//! # Usage
//!
//! ```no_run
//! use lightify::client::{GatewayBuilder, Target};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut gateway = GatewayBuilder::new().tcp("192.168.1.50").build()?;
//! gateway.open().await?;
//! gateway.scan_nodes().await?;
//! if let Some(address) = gateway.nodes().iter().next().map(|n| n.address()) {
//!     gateway.set_brightness(Target::Node(address), 50, 10).await?;
//! }
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use lightify_core::{
    FirmwareVersion, Group, GroupRegistry, LampType, LightifyError, LightifyResult, Node,
    NodeAddress, NodeName, NodeRegistry, OnlineState,
};

// Re-export client API
pub mod client {
    pub use lightify_client::*;
}

// Re-export protocol layer
pub mod protocol {
    pub use lightify_protocol::*;
}

// Re-export transport layer
pub mod transport {
    pub use lightify_transport::*;
}

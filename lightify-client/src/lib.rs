//! High-level Lightify gateway client.
//!
//! This crate ties the wire codec and the transport together into
//! [`GatewayClient`]: one connection to one gateway, with a cached view of
//! its nodes and groups and one request/answer exchange per call.
//!
//! # Example
//!
//! ```no_run
//! use lightify_client::{GatewayBuilder, Target};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut gateway = GatewayBuilder::new().tcp("192.168.1.50").build()?;
//! gateway.open().await?;
//!
//! gateway.scan_nodes().await?;
//! for node in gateway.nodes() {
//!     println!("{} {} ({})", node.address(), node.name(), node.lamp_type());
//! }
//!
//! gateway.set_on_off(Target::Broadcast, true).await?;
//! gateway.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;

pub use connection::{GatewayBuilder, GatewayClient};
pub use lightify_protocol::Target;

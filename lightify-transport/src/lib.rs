//! Transport layer for the Lightify gateway driver
//!
//! Provides the async byte-stream abstraction the protocol engine runs on
//! and its TCP implementation. The gateway speaks its protocol over a
//! plain TCP connection, conventionally on port 4000.

pub mod stream;
pub mod tcp;

pub use stream::{GatewayStream, Transport};
pub use tcp::{DEFAULT_GATEWAY_PORT, DEFAULT_IO_TIMEOUT, TcpSettings, TcpTransport};

//! Gateway connection handling

mod builder;
mod gateway;

pub use builder::GatewayBuilder;
pub use gateway::GatewayClient;

//! Builder for gateway connections

use crate::connection::GatewayClient;
use lightify_core::{LightifyError, LightifyResult};
use lightify_transport::{DEFAULT_GATEWAY_PORT, TcpSettings, TcpTransport};
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

/// Builder assembling a [`GatewayClient`] over TCP.
///
/// # Example
///
/// ```no_run
/// use lightify_client::GatewayBuilder;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let mut gateway = GatewayBuilder::new()
///     .tcp("192.168.1.50")
///     .timeout(std::time::Duration::from_secs(2))
///     .build()?;
/// gateway.open().await?;
/// gateway.scan_nodes().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GatewayBuilder {
    address: Option<String>,
    timeout: Option<Duration>,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gateway host. A bare host gets the default port 4000
    /// appended; `host:port` is taken as given.
    pub fn tcp(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Sets the per-operation I/O timeout. Without this the transport
    /// default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client. The connection is not opened yet; call
    /// [`GatewayClient::open`] on the result.
    pub fn build(self) -> LightifyResult<GatewayClient<TcpTransport>> {
        let address = self.address.ok_or_else(|| {
            LightifyError::InvalidInput("No gateway address configured".into())
        })?;
        let socket_addr = resolve(&address)?;

        let settings = match self.timeout {
            Some(timeout) => TcpSettings::with_timeout(socket_addr, timeout),
            None => TcpSettings::new(socket_addr),
        };
        Ok(GatewayClient::new(TcpTransport::new(settings)))
    }
}

/// Resolves `host` or `host:port` to a socket address, defaulting the
/// gateway port.
fn resolve(address: &str) -> LightifyResult<SocketAddr> {
    let with_port = if address.contains(':') {
        address.to_string()
    } else {
        format!("{address}:{DEFAULT_GATEWAY_PORT}")
    };
    with_port
        .to_socket_addrs()
        .map_err(|e| LightifyError::InvalidInput(format!("Invalid gateway address: {e}")))?
        .next()
        .ok_or_else(|| {
            LightifyError::InvalidInput(format!("Address resolved to nothing: {address}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_bare_host() {
        let client = GatewayBuilder::new().tcp("127.0.0.1").build().unwrap();
        assert!(client.is_closed());
    }

    #[test]
    fn test_build_with_explicit_port() {
        GatewayBuilder::new().tcp("127.0.0.1:4002").build().unwrap();
    }

    #[test]
    fn test_build_without_address_fails() {
        let err = GatewayBuilder::new().build().unwrap_err();
        assert!(matches!(err, LightifyError::InvalidInput(_)));
    }

    #[test]
    fn test_build_with_garbage_address_fails() {
        let err = GatewayBuilder::new().tcp("not an address").build().unwrap_err();
        assert!(matches!(err, LightifyError::InvalidInput(_)));
    }
}

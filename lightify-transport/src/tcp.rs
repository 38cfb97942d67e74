//! TCP transport implementation

use crate::stream::{GatewayStream, Transport};
use async_trait::async_trait;
use lightify_core::{LightifyError, LightifyResult};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// TCP port the gateway listens on.
pub const DEFAULT_GATEWAY_PORT: u16 = 4000;

/// Default per-operation I/O timeout. The gateway sits on the local
/// network and normally answers well below this.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(1);

/// Wrapper for TcpStream that implements Debug
struct DebugTcpStream(TcpStream);

impl fmt::Debug for DebugTcpStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TcpStream").finish()
    }
}

impl Deref for DebugTcpStream {
    type Target = TcpStream;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DebugTcpStream {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// TCP transport settings
#[derive(Debug, Clone)]
pub struct TcpSettings {
    pub address: SocketAddr,
    pub timeout: Option<Duration>,
}

impl TcpSettings {
    /// Create new TCP settings with the default timeout
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            timeout: Some(DEFAULT_IO_TIMEOUT),
        }
    }

    /// Create TCP settings with an explicit timeout
    pub fn with_timeout(address: SocketAddr, timeout: Duration) -> Self {
        Self {
            address,
            timeout: Some(timeout),
        }
    }

    /// Settings for a gateway on its conventional port
    pub fn for_gateway(host: IpAddr) -> Self {
        Self::new(SocketAddr::new(host, DEFAULT_GATEWAY_PORT))
    }
}

/// TCP transport to a gateway
#[derive(Debug)]
pub struct TcpTransport {
    stream: Option<DebugTcpStream>,
    settings: TcpSettings,
    closed: bool,
}

impl TcpTransport {
    /// Create a new TCP transport
    pub fn new(settings: TcpSettings) -> Self {
        Self {
            stream: None,
            settings,
            closed: true,
        }
    }

    /// Create a TCP transport from an address string like "192.168.1.5:4000"
    pub fn from_address(address: &str) -> LightifyResult<Self> {
        let addr: SocketAddr = address
            .parse()
            .map_err(|e| LightifyError::InvalidInput(format!("Invalid TCP address: {}", e)))?;
        Ok(Self::new(TcpSettings::new(addr)))
    }

    /// Create a TCP transport from an already-connected stream, e.g. when
    /// the caller resolves hostnames itself
    ///
    /// # Arguments
    /// * `stream` - The already-connected TCP stream
    /// * `timeout` - Optional read/write timeout
    pub fn from_connected_stream(stream: TcpStream, timeout: Option<Duration>) -> Self {
        Self {
            stream: Some(DebugTcpStream(stream)),
            settings: TcpSettings {
                address: SocketAddr::new(IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 0),
                timeout,
            },
            closed: false,
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn open(&mut self) -> LightifyResult<()> {
        if !self.closed {
            return Err(LightifyError::Connection(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Connection has already been opened",
            )));
        }

        // Apply timeout to connection establishment if specified
        let stream = if let Some(timeout) = self.settings.timeout {
            tokio::time::timeout(timeout, TcpStream::connect(self.settings.address))
                .await
                .map_err(|_| LightifyError::Timeout)?
                .map_err(|e| LightifyError::Connection(e))?
        } else {
            TcpStream::connect(self.settings.address)
                .await
                .map_err(|e| LightifyError::Connection(e))?
        };

        self.stream = Some(DebugTcpStream(stream));
        self.closed = false;
        Ok(())
    }
}

#[async_trait]
impl GatewayStream for TcpTransport {
    async fn set_timeout(&mut self, timeout: Option<Duration>) -> LightifyResult<()> {
        self.settings.timeout = timeout;
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> LightifyResult<usize> {
        let stream = self.stream.as_mut().ok_or_else(|| {
            LightifyError::Connection(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "TCP stream not connected",
            ))
        })?;

        let result = if let Some(timeout) = self.settings.timeout {
            tokio::time::timeout(timeout, stream.read(buf))
                .await
                .map_err(|_| LightifyError::Timeout)?
                .map_err(|e| LightifyError::Connection(e))
        } else {
            stream.read(buf).await.map_err(|e| LightifyError::Connection(e))
        };

        match result {
            Ok(0) => {
                self.closed = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e) => {
                self.closed = true;
                Err(e)
            }
        }
    }

    async fn write(&mut self, buf: &[u8]) -> LightifyResult<usize> {
        let stream = self.stream.as_mut().ok_or_else(|| {
            LightifyError::Connection(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "TCP stream not connected",
            ))
        })?;

        if let Some(timeout) = self.settings.timeout {
            tokio::time::timeout(timeout, stream.write(buf))
                .await
                .map_err(|_| LightifyError::Timeout)?
                .map_err(|e| LightifyError::Connection(e))
        } else {
            stream.write(buf).await.map_err(|e| LightifyError::Connection(e))
        }
    }

    async fn flush(&mut self) -> LightifyResult<()> {
        let stream = self.stream.as_mut().ok_or_else(|| {
            LightifyError::Connection(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "TCP stream not connected",
            ))
        })?;

        stream.flush().await.map_err(|e| LightifyError::Connection(e))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    async fn close(&mut self) -> LightifyResult<()> {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.shutdown().await;
        }
        self.closed = true;
        Ok(())
    }
}

//! Stream access traits for the gateway transport

use async_trait::async_trait;
use lightify_core::{LightifyError, LightifyResult};
use std::time::Duration;

/// Byte-stream interface to a gateway.
///
/// The protocol engine only ever uses the full-length operations
/// ([`read_exact`](GatewayStream::read_exact) and
/// [`write_all`](GatewayStream::write_all)); a stream that cannot deliver
/// the requested amount fails the exchange instead of truncating it.
#[async_trait]
pub trait GatewayStream: Send + Sync {
    /// Set the I/O timeout
    ///
    /// # Arguments
    ///
    /// * `timeout` - The timeout duration. None means infinite timeout.
    async fn set_timeout(&mut self, timeout: Option<Duration>) -> LightifyResult<()>;

    /// Read data from the stream
    ///
    /// # Arguments
    ///
    /// * `buf` - Buffer to read into
    ///
    /// # Returns
    ///
    /// Number of bytes read, or 0 if EOF
    async fn read(&mut self, buf: &mut [u8]) -> LightifyResult<usize>;

    /// Read exact number of bytes from the stream
    ///
    /// # Arguments
    ///
    /// * `buf` - Buffer to read into, will be filled completely
    ///
    /// # Returns
    ///
    /// Returns error if unable to read the exact number of bytes
    async fn read_exact(&mut self, mut buf: &mut [u8]) -> LightifyResult<()> {
        while !buf.is_empty() {
            let n = self.read(buf).await?;
            if n == 0 {
                return Err(LightifyError::Connection(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "Failed to read exact number of bytes",
                )));
            }
            buf = &mut buf[n..];
        }
        Ok(())
    }

    /// Write data to the stream
    ///
    /// # Arguments
    ///
    /// * `buf` - Data to write
    ///
    /// # Returns
    ///
    /// Number of bytes written
    async fn write(&mut self, buf: &[u8]) -> LightifyResult<usize>;

    /// Write all data to the stream
    async fn write_all(&mut self, buf: &[u8]) -> LightifyResult<()> {
        let mut written = 0;
        while written < buf.len() {
            let n = self.write(&buf[written..]).await?;
            if n == 0 {
                return Err(LightifyError::Connection(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "Failed to write all data",
                )));
            }
            written += n;
        }
        Ok(())
    }

    /// Flush any buffered data
    async fn flush(&mut self) -> LightifyResult<()>;

    /// Check if the stream is closed
    fn is_closed(&self) -> bool;

    /// Close the stream
    async fn close(&mut self) -> LightifyResult<()>;
}

/// Transport trait that extends GatewayStream with connection establishment
#[async_trait]
pub trait Transport: GatewayStream {
    /// Open the connection to the gateway
    async fn open(&mut self) -> LightifyResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stream that hands out its canned bytes one at a time and accepts
    /// writes in two-byte chunks.
    struct TrickleStream {
        data: Vec<u8>,
        pos: usize,
        written: Vec<u8>,
    }

    #[async_trait]
    impl GatewayStream for TrickleStream {
        async fn set_timeout(&mut self, _timeout: Option<Duration>) -> LightifyResult<()> {
            Ok(())
        }

        async fn read(&mut self, buf: &mut [u8]) -> LightifyResult<usize> {
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }

        async fn write(&mut self, buf: &[u8]) -> LightifyResult<usize> {
            let n = buf.len().min(2);
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        async fn flush(&mut self) -> LightifyResult<()> {
            Ok(())
        }

        fn is_closed(&self) -> bool {
            false
        }

        async fn close(&mut self) -> LightifyResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_read_exact_assembles_fragments() {
        let mut stream = TrickleStream {
            data: vec![1, 2, 3, 4],
            pos: 0,
            written: Vec::new(),
        };
        let mut buf = [0u8; 4];
        stream.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_read_exact_fails_on_eof() {
        let mut stream = TrickleStream {
            data: vec![1, 2],
            pos: 0,
            written: Vec::new(),
        };
        let mut buf = [0u8; 4];
        let err = stream.read_exact(&mut buf).await.unwrap_err();
        assert!(matches!(err, LightifyError::Connection(_)));
    }

    #[tokio::test]
    async fn test_write_all_loops_over_partial_writes() {
        let mut stream = TrickleStream {
            data: Vec::new(),
            pos: 0,
            written: Vec::new(),
        };
        stream.write_all(&[9, 8, 7, 6, 5]).await.unwrap();
        assert_eq!(stream.written, vec![9, 8, 7, 6, 5]);
    }
}

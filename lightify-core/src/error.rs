use thiserror::Error;

/// Main error type for Lightify gateway operations
#[derive(Error, Debug)]
pub enum LightifyError {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Timeout")]
    Timeout,

    #[error("Device not present")]
    DeviceNotPresent,

    #[error("Device error: status 0x{0:02x}")]
    Device(u8),

    #[error("No data from node")]
    NoData,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LightifyError {
    /// Returns true for device-level failures reported by the gateway,
    /// as opposed to transport or protocol failures of the exchange itself.
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            LightifyError::DeviceNotPresent | LightifyError::Device(_) | LightifyError::NoData
        )
    }
}

/// Result type alias for Lightify gateway operations
pub type LightifyResult<T> = Result<T, LightifyError>;

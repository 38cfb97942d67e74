use lightify_core::{LightifyError, LightifyResult};

/// Status byte of a successful answer.
pub const STATUS_OK: u8 = 0x00;

/// Status byte the gateway sends for a node it does not know (anymore).
pub const STATUS_NOT_PRESENT: u8 = 0x15;

/// Maps an answer's status byte to a result.
///
/// 0x00 is success, 0x15 means the addressed device is not present on the
/// gateway, every other value is an unspecified device failure carried
/// verbatim.
pub fn decode_status(status: u8) -> LightifyResult<()> {
    match status {
        STATUS_OK => Ok(()),
        STATUS_NOT_PRESENT => Err(LightifyError::DeviceNotPresent),
        other => Err(LightifyError::Device(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ok() {
        assert!(decode_status(0x00).is_ok());
    }

    #[test]
    fn test_status_not_present() {
        assert!(matches!(
            decode_status(0x15),
            Err(LightifyError::DeviceNotPresent)
        ));
    }

    #[test]
    fn test_status_other_keeps_raw_value() {
        assert!(matches!(decode_status(0x42), Err(LightifyError::Device(0x42))));
    }
}

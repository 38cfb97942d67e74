use lightify_core::LightifyError;

/// Command opcodes understood by the gateway.
///
/// Answers echo the opcode of the request they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Query the full node list.
    ScanNodes = 0x13,
    /// Query the full group list.
    ScanGroups = 0x1e,
    /// Set brightness with fade time.
    SetBrightness = 0x31,
    /// Switch on or off.
    SetOnOff = 0x32,
    /// Set color temperature with fade time.
    SetCct = 0x33,
    /// Set RGBW channels with fade time.
    SetRgbw = 0x36,
    /// Query live state of a single node.
    UpdateNode = 0x68,
}

impl Opcode {
    /// Raw wire value.
    pub const fn code(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = LightifyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x13 => Ok(Opcode::ScanNodes),
            0x1e => Ok(Opcode::ScanGroups),
            0x31 => Ok(Opcode::SetBrightness),
            0x32 => Ok(Opcode::SetOnOff),
            0x33 => Ok(Opcode::SetCct),
            0x36 => Ok(Opcode::SetRgbw),
            0x68 => Ok(Opcode::UpdateNode),
            other => Err(LightifyError::Protocol(format!(
                "Unknown opcode 0x{other:02x}"
            ))),
        }
    }
}

//! HEX command and register data type identifiers
//!
//! Request and response commands share the same 4-bit code space, so the
//! meaning of a code depends on the direction of travel. Frames received
//! from the device are classified with [`Command::from_response_code`].

/// HEX frame commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    // Host -> device
    /// Liveness probe, answered by `PingResp`
    Ping,
    /// Request the application version, answered by `Done`
    AppVersion,
    /// Request the product id, answered by `Done`
    ProductId,
    /// Restart the device (no answer)
    Restart,
    /// Read a register
    Get,
    /// Write a register
    Set,

    // Device -> host
    /// Command completed
    Done,
    /// Unknown command
    Unknown,
    /// Command failed (frame error or unsupported)
    Error,
    /// Answer to `Ping`, carries the firmware version
    PingResp,
    /// Unsolicited register update
    Async,
}

impl Command {
    /// 4-bit wire code
    pub const fn code(self) -> u8 {
        match self {
            Command::Ping | Command::Done => 0x1,
            Command::AppVersion | Command::Unknown => 0x3,
            Command::ProductId | Command::Error => 0x4,
            Command::PingResp => 0x5,
            Command::Restart => 0x6,
            Command::Get => 0x7,
            Command::Set => 0x8,
            Command::Async => 0xA,
        }
    }

    /// Classify a code sent by the host
    pub fn from_request_code(code: u8) -> Option<Self> {
        match code {
            0x1 => Some(Command::Ping),
            0x3 => Some(Command::AppVersion),
            0x4 => Some(Command::ProductId),
            0x6 => Some(Command::Restart),
            0x7 => Some(Command::Get),
            0x8 => Some(Command::Set),
            _ => None,
        }
    }

    /// Classify a code sent by the device
    pub fn from_response_code(code: u8) -> Option<Self> {
        match code {
            0x1 => Some(Command::Done),
            0x3 => Some(Command::Unknown),
            0x4 => Some(Command::Error),
            0x5 => Some(Command::PingResp),
            0x7 => Some(Command::Get),
            0x8 => Some(Command::Set),
            0xA => Some(Command::Async),
            _ => None,
        }
    }

    /// Commands the host may send
    pub fn is_request(self) -> bool {
        Self::from_request_code(self.code()) == Some(self)
    }

    /// Get, Set and Async frames carry a register id and flags
    pub fn has_register(self) -> bool {
        matches!(self, Command::Get | Command::Set | Command::Async)
    }
}

/// Register payload encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataType {
    /// Strings or untyped payloads; width follows the frame
    #[default]
    Variadic = 0,
    Un8 = 1,
    Un16 = 2,
    Un32 = 3,
    Sn8 = 4,
    Sn16 = 5,
    Sn32 = 6,
}

impl DataType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DataType::Variadic),
            1 => Some(DataType::Un8),
            2 => Some(DataType::Un16),
            3 => Some(DataType::Un32),
            4 => Some(DataType::Sn8),
            5 => Some(DataType::Sn16),
            6 => Some(DataType::Sn32),
            _ => None,
        }
    }

    /// Width in bytes, 0 for `Variadic`
    pub const fn size(self) -> usize {
        match self {
            DataType::Variadic => 0,
            DataType::Un8 | DataType::Sn8 => 1,
            DataType::Un16 | DataType::Sn16 => 2,
            DataType::Un32 | DataType::Sn32 => 4,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, DataType::Sn8 | DataType::Sn16 | DataType::Sn32)
    }

    /// Unsigned type of the given width, used when a register does not
    /// declare one
    pub fn infer(size: usize) -> Option<Self> {
        match size {
            1 => Some(DataType::Un8),
            2 => Some(DataType::Un16),
            4 => Some(DataType::Un32),
            _ => None,
        }
    }

    /// Read a little-endian integer of this type from the start of `data`
    ///
    /// Returns `None` for `Variadic` or when `data` is too short.
    pub fn read(self, data: &[u8]) -> Option<i64> {
        let value = match self {
            DataType::Variadic => return None,
            DataType::Un8 => *data.first()? as i64,
            DataType::Sn8 => *data.first()? as i8 as i64,
            DataType::Un16 => u16::from_le_bytes(data.get(..2)?.try_into().ok()?) as i64,
            DataType::Sn16 => i16::from_le_bytes(data.get(..2)?.try_into().ok()?) as i64,
            DataType::Un32 => u32::from_le_bytes(data.get(..4)?.try_into().ok()?) as i64,
            DataType::Sn32 => i32::from_le_bytes(data.get(..4)?.try_into().ok()?) as i64,
        };
        Some(value)
    }

    /// "Data not available" marker the device sends for this type
    pub const fn unknown_sentinel(self) -> Option<i64> {
        match self {
            DataType::Variadic => None,
            DataType::Un8 => Some(0xFF),
            DataType::Un16 => Some(0xFFFF),
            DataType::Un32 => Some(0xFFFF_FFFF),
            DataType::Sn8 => Some(0x7F),
            DataType::Sn16 => Some(0x7FFF),
            DataType::Sn32 => Some(0x7FFF_FFFF),
        }
    }

    pub fn is_unknown(self, raw: i64) -> bool {
        self.unknown_sentinel() == Some(raw)
    }

    /// Little-endian encoding of `value` truncated to this width
    pub fn write(self, value: i64, buffer: &mut [u8]) -> Option<usize> {
        let size = self.size();
        if size == 0 || buffer.len() < size {
            return None;
        }
        buffer[..size].copy_from_slice(&value.to_le_bytes()[..size]);
        Some(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_response_codes_overlap() {
        assert_eq!(Command::Ping.code(), Command::Done.code());
        assert_eq!(Command::from_request_code(0x1), Some(Command::Ping));
        assert_eq!(Command::from_response_code(0x1), Some(Command::Done));
        assert_eq!(Command::from_response_code(0x4), Some(Command::Error));
        assert_eq!(Command::from_request_code(0xA), None);
        assert_eq!(Command::from_response_code(0x2), None);
    }

    #[test]
    fn test_request_commands() {
        assert!(Command::Ping.is_request());
        assert!(Command::Restart.is_request());
        assert!(Command::Set.is_request());
        assert!(!Command::Done.is_request());
        assert!(!Command::Unknown.is_request());
        assert!(!Command::Async.is_request());
        assert!(!Command::PingResp.is_request());
    }

    #[test]
    fn test_data_type_read_signed() {
        assert_eq!(DataType::Sn16.read(&[0xFE, 0xFF]), Some(-2));
        assert_eq!(DataType::Un16.read(&[0xFE, 0xFF]), Some(0xFFFE));
        assert_eq!(DataType::Sn8.read(&[0x80]), Some(-128));
        assert_eq!(DataType::Un32.read(&[1, 0, 0]), None);
        assert_eq!(DataType::Variadic.read(&[1]), None);
    }

    #[test]
    fn test_unknown_sentinels() {
        assert!(DataType::Un16.is_unknown(0xFFFF));
        assert!(DataType::Sn16.is_unknown(0x7FFF));
        assert!(!DataType::Sn16.is_unknown(-1));
        assert!(!DataType::Variadic.is_unknown(0));
    }

    #[test]
    fn test_write_truncates_to_width() {
        let mut buf = [0u8; 4];
        assert_eq!(DataType::Un16.write(0x1234, &mut buf), Some(2));
        assert_eq!(&buf[..2], &[0x34, 0x12]);
        assert_eq!(DataType::Sn8.write(-1, &mut buf), Some(1));
        assert_eq!(buf[0], 0xFF);
        assert_eq!(DataType::Variadic.write(1, &mut buf), None);
    }
}

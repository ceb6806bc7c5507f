//! HEX frame encoding and decoding
//!
//! Frame format (ASCII, uppercase hex):
//! - START: `:`
//! - COMMAND: a single hex digit
//! - REGISTER: 2 bytes little-endian (Get/Set/Async only)
//! - FLAGS: 1 byte (Get/Set/Async only)
//! - DATA: register value, little-endian
//! - CHECKSUM: `0x55 - sum(all previous bytes)`
//! - END: `\n`

use core::fmt;

use heapless::Vec;

use crate::events::{FrameError, FrameKind};
use crate::messages::{Command, DataType};

/// Frame start marker
pub const HEX_FRAME_START: u8 = b':';

/// Frame terminator
pub const HEX_FRAME_END: u8 = b'\n';

/// Bytes of a valid frame, checksum included, sum to this value
pub const CHECKSUM_SEED: u8 = 0x55;

/// Maximum raw frame size in bytes (command through checksum)
pub const MAX_HEX_FRAME_SIZE: usize = 66;

/// Maximum register data size (frame minus command, register, flags, checksum)
pub const MAX_HEX_DATA_SIZE: usize = MAX_HEX_FRAME_SIZE - 5;

/// Maximum encoded size (START + command digit + hex pairs + END)
pub const MAX_ENCODED_SIZE: usize = 1 + 1 + (MAX_HEX_FRAME_SIZE - 1) * 2 + 1;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Compute the checksum byte for a frame body
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(CHECKSUM_SEED, |acc, &byte| acc.wrapping_sub(byte))
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// A parsed or constructed HEX frame
///
/// Holds the raw bytes from the command through the end of the data; the
/// checksum is computed on encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexFrame {
    bytes: Vec<u8, MAX_HEX_FRAME_SIZE>,
}

impl HexFrame {
    /// Create a frame with no payload
    pub fn command(command: Command) -> Self {
        let mut bytes = Vec::new();
        // Capacity is never zero
        let _ = bytes.push(command.code());
        Self { bytes }
    }

    /// Create a register read request
    pub fn get(register_id: u16) -> Self {
        let [lo, hi] = register_id.to_le_bytes();
        let mut bytes = Vec::new();
        let _ = bytes.extend_from_slice(&[Command::Get.code(), lo, hi, 0]);
        Self { bytes }
    }

    /// Create a register write request
    pub fn set(register_id: u16, data: &[u8]) -> Result<Self, FrameError> {
        Self::register(Command::Set, register_id, 0, data)
    }

    /// Create a register carrying frame (Get/Set/Async shape)
    pub fn register(
        command: Command,
        register_id: u16,
        flags: u8,
        data: &[u8],
    ) -> Result<Self, FrameError> {
        if data.len() > MAX_HEX_DATA_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }
        let [lo, hi] = register_id.to_le_bytes();
        let mut bytes = Vec::new();
        bytes
            .extend_from_slice(&[command.code(), lo, hi, flags])
            .map_err(|_| FrameError::PayloadTooLarge)?;
        bytes
            .extend_from_slice(data)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { bytes })
    }

    /// Create a frame from a raw command code and payload
    pub fn from_raw(command_code: u8, payload: &[u8]) -> Result<Self, FrameError> {
        if command_code > 0x0F {
            return Err(FrameError::Coding);
        }
        if payload.len() >= MAX_HEX_FRAME_SIZE - 1 {
            return Err(FrameError::PayloadTooLarge);
        }
        let mut bytes = Vec::new();
        let _ = bytes.push(command_code);
        bytes
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { bytes })
    }

    /// Build a frame from its textual form
    ///
    /// The leading `:` and trailing newline are optional. With
    /// `add_checksum` the string must not carry a checksum and one is
    /// appended; otherwise the trailing checksum is validated and removed.
    pub fn from_hex_str(hex: &str, add_checksum: bool) -> Result<Self, FrameError> {
        let hex = hex.trim_end_matches(['\r', '\n']);
        let hex = hex.strip_prefix(':').unwrap_or(hex);

        let mut decoder = HexDecoder::new();
        for &digit in hex.as_bytes() {
            decoder.feed(digit)?;
        }
        if add_checksum {
            decoder.finish_unchecked()
        } else {
            decoder.feed(HEX_FRAME_END)?.ok_or(FrameError::Coding)
        }
    }

    /// Raw command code
    pub fn command_code(&self) -> u8 {
        self.bytes[0]
    }

    /// Command as sent by a device
    pub fn response_command(&self) -> Option<Command> {
        Command::from_response_code(self.command_code())
    }

    /// Command as sent by the host
    pub fn request_command(&self) -> Option<Command> {
        Command::from_request_code(self.command_code())
    }

    /// Bytes following the command
    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Register id, if the frame is long enough to carry one
    pub fn register_id(&self) -> Option<u16> {
        match self.bytes.get(1..3) {
            Some(&[lo, hi]) => Some(u16::from_le_bytes([lo, hi])),
            _ => None,
        }
    }

    pub fn flags(&self) -> Option<u8> {
        self.bytes.get(3).copied()
    }

    /// Register data following the flags byte
    pub fn data(&self) -> &[u8] {
        self.bytes.get(4..).unwrap_or(&[])
    }

    /// Register data as an unsigned integer of 1 to 4 bytes
    pub fn data_u32(&self) -> Option<u32> {
        let data = self.data();
        match data.len() {
            1 => Some(data[0] as u32),
            2 => Some(u16::from_le_bytes([data[0], data[1]]) as u32),
            3 => Some(u32::from_le_bytes([data[0], data[1], data[2], 0])),
            4 => Some(u32::from_le_bytes([data[0], data[1], data[2], data[3]])),
            _ => None,
        }
    }

    /// Register data read as the given type
    pub fn data_as(&self, data_type: DataType) -> Option<i64> {
        data_type.read(self.data())
    }

    /// Register data up to the first NUL as UTF-8
    pub fn data_str(&self) -> Option<&str> {
        let data = self.data();
        let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        core::str::from_utf8(&data[..end]).ok()
    }

    /// Raw bytes, command through data (no checksum)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn checksum(&self) -> u8 {
        checksum(&self.bytes)
    }

    /// Size of the encoded form including START and END
    pub fn encoded_len(&self) -> usize {
        1 + 1 + (self.bytes.len() - 1) * 2 + 2 + 1
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = HEX_FRAME_START;
        buffer[1] = HEX_DIGITS[(self.bytes[0] & 0x0F) as usize];
        let checksum = self.checksum();
        let mut pos = 2;
        for &byte in self.bytes[1..].iter().chain(core::iter::once(&checksum)) {
            buffer[pos] = HEX_DIGITS[(byte >> 4) as usize];
            buffer[pos + 1] = HEX_DIGITS[(byte & 0x0F) as usize];
            pos += 2;
        }
        buffer[pos] = HEX_FRAME_END;

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_ENCODED_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_ENCODED_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Encoded form without the trailing newline, e.g. `:154`
impl fmt::Display for HexFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = [0u8; MAX_ENCODED_SIZE];
        let len = self.encode(&mut buffer).map_err(|_| fmt::Error)?;
        let text = core::str::from_utf8(&buffer[..len - 1]).map_err(|_| fmt::Error)?;
        f.write_str(text)
    }
}

/// Incremental HEX frame decoder
///
/// Fed with the characters following the `:` start marker. The first digit
/// is the command nibble, every following pair forms one byte.
#[derive(Debug, Clone)]
pub struct HexDecoder {
    bytes: Vec<u8, MAX_HEX_FRAME_SIZE>,
    checksum: u8,
    /// Next digit starts a new byte
    high_nibble: bool,
    pending: u8,
}

impl Default for HexDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl HexDecoder {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            checksum: CHECKSUM_SEED,
            high_nibble: false,
            pending: 0,
        }
    }

    /// Prepare for a new frame
    pub fn reset(&mut self) {
        self.bytes.clear();
        self.checksum = CHECKSUM_SEED;
        self.high_nibble = false;
        self.pending = 0;
    }

    /// Feed a single character
    ///
    /// Returns `Ok(Some(frame))` on the terminating newline of a valid
    /// frame, `Ok(None)` when more characters are needed. Any `Err` ends
    /// the frame.
    pub fn feed(&mut self, digit: u8) -> Result<Option<HexFrame>, FrameError> {
        if digit == HEX_FRAME_END {
            // A complete frame has an aligned byte count: command + pairs
            if !self.high_nibble || self.bytes.len() < 2 {
                return Err(FrameError::Coding);
            }
            if self.checksum != 0 {
                return Err(FrameError::Checksum(FrameKind::Hex));
            }
            let mut bytes = core::mem::take(&mut self.bytes);
            bytes.pop();
            self.reset();
            return Ok(Some(HexFrame { bytes }));
        }

        let value = hex_value(digit).ok_or(FrameError::Coding)?;
        if self.high_nibble {
            if self.bytes.is_full() {
                return Err(FrameError::Overflow);
            }
            self.pending = value << 4;
            self.high_nibble = false;
        } else {
            let byte = self.pending | value;
            self.bytes.push(byte).map_err(|_| FrameError::Overflow)?;
            self.checksum = self.checksum.wrapping_sub(byte);
            self.pending = 0;
            self.high_nibble = true;
        }
        Ok(None)
    }

    /// Take the decoded bytes as a frame without checksum validation
    fn finish_unchecked(&mut self) -> Result<HexFrame, FrameError> {
        if !self.high_nibble || self.bytes.is_empty() {
            return Err(FrameError::Coding);
        }
        // Room must remain for the checksum
        if self.bytes.is_full() {
            return Err(FrameError::Overflow);
        }
        let bytes = core::mem::take(&mut self.bytes);
        self.reset();
        Ok(HexFrame { bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &[u8]) -> Result<Option<HexFrame>, FrameError> {
        let mut decoder = HexDecoder::new();
        let mut result = Ok(None);
        for &c in text {
            result = decoder.feed(c);
            if !matches!(result, Ok(None)) {
                break;
            }
        }
        result
    }

    #[test]
    fn test_encode_ping() {
        let frame = HexFrame::command(Command::Ping);
        let encoded = frame.encode_to_vec().unwrap();
        assert_eq!(&encoded[..], b":154\n");
        assert_eq!(frame.checksum(), 0x54);
    }

    #[test]
    fn test_encode_get() {
        // Get battery SOC
        let frame = HexFrame::get(0x0FFF);
        let encoded = frame.encode_to_vec().unwrap();
        assert_eq!(&encoded[..], b":7FF0F0040\n");
        assert_eq!(frame.register_id(), Some(0x0FFF));
        assert_eq!(frame.flags(), Some(0));
        assert!(frame.data().is_empty());
    }

    #[test]
    fn test_encode_set() {
        let frame = HexFrame::set(0x034E, &[0x01]).unwrap();
        assert_eq!(frame.to_string(), ":84E030001FB");
    }

    #[test]
    fn test_decode_async() {
        // Async YIELD_TODAY = 250 (0x00FA)
        let frame = HexFrame::register(Command::Async, 0xEDD3, 0, &[0xFA, 0x00]).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let decoded = decode(&encoded[1..]).unwrap().unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(decoded.response_command(), Some(Command::Async));
        assert_eq!(decoded.register_id(), Some(0xEDD3));
        assert_eq!(decoded.data_u32(), Some(250));
    }

    #[test]
    fn test_decode_invalid_checksum() {
        assert_eq!(decode(b"155\n"), Err(FrameError::Checksum(FrameKind::Hex)));
    }

    #[test]
    fn test_decode_lowercase_is_coding_error() {
        assert_eq!(decode(b"7ff0f0040\n"), Err(FrameError::Coding));
    }

    #[test]
    fn test_decode_misaligned_terminator() {
        assert_eq!(decode(b"15\n"), Err(FrameError::Coding));
    }

    #[test]
    fn test_decode_overflow() {
        let mut text = std::vec::Vec::from(&b"A"[..]);
        text.extend(core::iter::repeat(b'0').take(MAX_HEX_FRAME_SIZE * 2));
        assert_eq!(decode(&text), Err(FrameError::Overflow));
    }

    #[test]
    fn test_from_hex_str_adds_checksum() {
        let frame = HexFrame::from_hex_str(":7FF0F00", true).unwrap();
        assert_eq!(frame, HexFrame::get(0x0FFF));

        let frame = HexFrame::from_hex_str("7FF0F0040\n", false).unwrap();
        assert_eq!(frame, HexFrame::get(0x0FFF));

        assert_eq!(
            HexFrame::from_hex_str(":7FF0F0041", false),
            Err(FrameError::Checksum(FrameKind::Hex))
        );
        assert_eq!(HexFrame::from_hex_str(":7FF0F0", true), Err(FrameError::Coding));
    }

    #[test]
    fn test_data_u32_masks_three_bytes() {
        let frame = HexFrame::register(Command::Get, 0x0102, 0, &[0x08, 0x02, 0x41]).unwrap();
        assert_eq!(frame.data_u32(), Some(0x0041_0208));
    }

    #[test]
    fn test_data_str_stops_at_nul() {
        let frame = HexFrame::register(Command::Get, 0x010A, 0, b"HQ2132ABCDE\0\0").unwrap();
        assert_eq!(frame.data_str(), Some("HQ2132ABCDE"));
    }

    #[test]
    fn test_payload_too_large() {
        let large = [0u8; MAX_HEX_DATA_SIZE + 1];
        assert_eq!(HexFrame::set(0x0100, &large), Err(FrameError::PayloadTooLarge));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_frame() -> impl Strategy<Value = HexFrame> {
        (
            0u8..=0x0F,
            proptest::collection::vec(any::<u8>(), 1..MAX_HEX_FRAME_SIZE - 1),
        )
            .prop_map(|(code, payload)| HexFrame::from_raw(code, &payload).unwrap())
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(frame in arb_frame()) {
            let encoded = frame.encode_to_vec().unwrap();
            let mut decoder = HexDecoder::new();
            let mut decoded = None;
            for &c in &encoded[1..] {
                if let Some(f) = decoder.feed(c).unwrap() {
                    decoded = Some(f);
                }
            }
            prop_assert_eq!(decoded, Some(frame));
        }

        #[test]
        fn byte_sum_is_seed(frame in arb_frame()) {
            let sum = frame
                .as_bytes()
                .iter()
                .fold(frame.checksum(), |acc, &b| acc.wrapping_add(b));
            prop_assert_eq!(sum, CHECKSUM_SEED);
        }

        #[test]
        fn single_byte_corruption_is_detected(
            frame in arb_frame(),
            index in any::<prop::sample::Index>(),
            delta in 1u8..=255,
        ) {
            let mut raw: std::vec::Vec<u8> = frame.as_bytes().to_vec();
            raw.push(frame.checksum());
            // The command is a single nibble on the wire
            let i = index.index(raw.len());
            raw[i] = if i == 0 {
                (raw[0] + (delta & 0x0F).max(1)) & 0x0F
            } else {
                raw[i].wrapping_add(delta)
            };

            let mut text = std::string::String::new();
            text.push(HEX_DIGITS[raw[0] as usize] as char);
            for b in &raw[1..] {
                text.push(HEX_DIGITS[(b >> 4) as usize] as char);
                text.push(HEX_DIGITS[(b & 0x0F) as usize] as char);
            }
            prop_assert_eq!(
                HexFrame::from_hex_str(&text, false),
                Err(FrameError::Checksum(FrameKind::Hex))
            );
        }
    }
}

//! Parser output: completed frames and framing errors

use core::fmt;

use crate::frame::HexFrame;
use crate::text::TextBlock;

/// Frame family an error or event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    Hex,
    Text,
}

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Checksum mismatch; the frame was discarded
    Checksum(FrameKind),
    /// Non hex character or odd number of hex digits in a HEX frame
    Coding,
    /// HEX frame longer than the receive buffer
    Overflow,
    /// TEXT record label longer than [`crate::MAX_NAME_LEN`]
    NameOverflow,
    /// TEXT record value longer than [`crate::MAX_VALUE_LEN`]
    ValueOverflow,
    /// More than [`crate::MAX_RECORDS`] records in a TEXT block
    RecordOverflow,
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl FrameError {
    /// Frame family affected by this error
    pub fn kind(&self) -> FrameKind {
        match self {
            FrameError::Checksum(kind) => *kind,
            FrameError::NameOverflow | FrameError::ValueOverflow | FrameError::RecordOverflow => {
                FrameKind::Text
            }
            _ => FrameKind::Hex,
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Checksum(FrameKind::Hex) => f.write_str("HEX checksum"),
            FrameError::Checksum(FrameKind::Text) => f.write_str("TEXT checksum"),
            FrameError::Coding => f.write_str("coding"),
            FrameError::Overflow => f.write_str("overflow"),
            FrameError::NameOverflow => f.write_str("NAME overflow"),
            FrameError::ValueOverflow => f.write_str("VALUE overflow"),
            FrameError::RecordOverflow => f.write_str("RECORD overflow"),
            FrameError::PayloadTooLarge => f.write_str("payload too large"),
            FrameError::BufferTooSmall => f.write_str("buffer too small"),
        }
    }
}

/// A completed, checksum-validated frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Hex(HexFrame),
    /// Delivered only once the whole block validated
    Text(TextBlock),
}

impl Frame {
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Hex(_) => FrameKind::Hex,
            Frame::Text(_) => FrameKind::Text,
        }
    }
}

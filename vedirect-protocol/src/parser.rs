//! Byte-fed parser for the mixed HEX/TEXT serial stream
//!
//! HEX frames may appear anywhere, including in the middle of a TEXT block.
//! The parser suspends the block, decodes the HEX frame and then resumes the
//! block where it left off. HEX bytes do not count towards the TEXT
//! checksum.

use crate::events::{Frame, FrameError, FrameKind};
use crate::frame::{HexDecoder, HEX_FRAME_START};
use crate::text::{TextBlock, TextRecord, CHECKSUM_LABEL};

/// State machine for parsing incoming frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    /// State to return to once an embedded HEX frame ends
    resume: ParseState,
    hex: HexDecoder,
    block: TextBlock,
    record: TextRecord,
    text_checksum: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Between frames
    Idle,
    /// Inside a HEX frame, after the `:`
    Hex,
    /// Reading a TEXT record label
    Name,
    /// Reading a TEXT record value
    Value,
    /// Label `Checksum` read, next byte closes the block
    Checksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Idle,
            resume: ParseState::Idle,
            hex: HexDecoder::new(),
            block: TextBlock::new(),
            record: TextRecord::default(),
            text_checksum: 0,
        }
    }

    /// Reset the parser state, dropping any partial frame
    pub fn reset(&mut self) {
        self.state = ParseState::Idle;
        self.resume = ParseState::Idle;
        self.hex.reset();
        self.block.clear();
        self.record = TextRecord::default();
        self.text_checksum = 0;
    }

    /// True while no frame is partially received
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::Idle
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` when a frame was
    /// discarded. Parsing continues after an error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Idle => {
                match byte {
                    HEX_FRAME_START => self.start_hex(),
                    b'\n' => {
                        self.text_checksum = self.text_checksum.wrapping_add(byte);
                        self.block.clear();
                        self.record = TextRecord::default();
                        self.state = ParseState::Name;
                    }
                    // A block always starts with "\r\n"
                    b'\r' => self.text_checksum = byte,
                    // Silently ignore anything else while waiting
                    _ => {}
                }
                Ok(None)
            }
            ParseState::Name => match byte {
                b'\t' => {
                    self.text_checksum = self.text_checksum.wrapping_add(byte);
                    self.state = if self.record.name == CHECKSUM_LABEL {
                        ParseState::Checksum
                    } else {
                        ParseState::Value
                    };
                    Ok(None)
                }
                HEX_FRAME_START => {
                    self.start_hex();
                    Ok(None)
                }
                _ => {
                    self.text_checksum = self.text_checksum.wrapping_add(byte);
                    if self.record.name.push(byte as char).is_err() {
                        self.state = ParseState::Idle;
                        return Err(FrameError::NameOverflow);
                    }
                    Ok(None)
                }
            },
            ParseState::Value => match byte {
                b'\n' => {
                    self.text_checksum = self.text_checksum.wrapping_add(byte);
                    let record = core::mem::take(&mut self.record);
                    if self.block.push(record).is_err() {
                        self.state = ParseState::Idle;
                        return Err(FrameError::RecordOverflow);
                    }
                    self.state = ParseState::Name;
                    Ok(None)
                }
                b'\r' => {
                    self.text_checksum = self.text_checksum.wrapping_add(byte);
                    Ok(None)
                }
                HEX_FRAME_START => {
                    self.start_hex();
                    Ok(None)
                }
                _ => {
                    self.text_checksum = self.text_checksum.wrapping_add(byte);
                    if self.record.value.push(byte as char).is_err() {
                        self.state = ParseState::Idle;
                        return Err(FrameError::ValueOverflow);
                    }
                    Ok(None)
                }
            },
            ParseState::Checksum => {
                self.state = ParseState::Idle;
                if self.text_checksum.wrapping_add(byte) != 0 {
                    self.block.clear();
                    return Err(FrameError::Checksum(FrameKind::Text));
                }
                Ok(Some(Frame::Text(core::mem::take(&mut self.block))))
            }
            ParseState::Hex => match self.hex.feed(byte) {
                Ok(None) => Ok(None),
                Ok(Some(frame)) => {
                    self.state = self.resume;
                    Ok(Some(Frame::Hex(frame)))
                }
                Err(error @ FrameError::Checksum(_)) => {
                    self.state = self.resume;
                    Err(error)
                }
                Err(error) => {
                    self.state = ParseState::Idle;
                    Err(error)
                }
            },
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// The returned iterator yields every frame and error found in
    /// `bytes`. Bytes not consumed when it is dropped are lost.
    pub fn feed_bytes<'a>(&'a mut self, bytes: &'a [u8]) -> Frames<'a> {
        Frames {
            parser: self,
            bytes: bytes.iter(),
        }
    }

    fn start_hex(&mut self) {
        self.resume = self.state;
        self.hex.reset();
        self.state = ParseState::Hex;
    }
}

/// Iterator over the frames parsed from a byte slice
pub struct Frames<'a> {
    parser: &'a mut FrameParser,
    bytes: core::slice::Iter<'a, u8>,
}

impl Iterator for Frames<'_> {
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        for &byte in self.bytes.by_ref() {
            match self.parser.feed(byte) {
                Ok(None) => continue,
                Ok(Some(frame)) => return Some(Ok(frame)),
                Err(error) => return Some(Err(error)),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::HexFrame;
    use crate::messages::Command;
    use std::vec::Vec;

    fn text_block(records: &[(&str, &str)]) -> Vec<u8> {
        let mut block = TextBlock::new();
        for (name, value) in records {
            block.push(TextRecord::new(name, value).unwrap()).unwrap();
        }
        let mut buffer = [0u8; 1024];
        let len = block.encode(&mut buffer).unwrap();
        buffer[..len].to_vec()
    }

    fn collect(parser: &mut FrameParser, bytes: &[u8]) -> Vec<Result<Frame, FrameError>> {
        parser.feed_bytes(bytes).collect()
    }

    #[test]
    fn test_text_block_delivered_atomically() {
        let bytes = text_block(&[("PID", "0xA053"), ("V", "12800"), ("SOC", "876")]);
        let mut parser = FrameParser::new();

        // Nothing is exposed until the checksum byte
        let (head, tail) = bytes.split_at(bytes.len() - 1);
        assert!(collect(&mut parser, head).is_empty());

        let frames = collect(&mut parser, tail);
        assert_eq!(frames.len(), 1);
        match &frames[0] {
            Ok(Frame::Text(block)) => {
                assert_eq!(block.len(), 3);
                assert_eq!(block.get("V"), Some("12800"));
                assert_eq!(block.get("SOC"), Some("876"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parser.is_idle());
    }

    #[test]
    fn test_text_checksum_error() {
        let mut bytes = text_block(&[("V", "12800")]);
        let last = bytes.len() - 1;
        bytes[last] = bytes[last].wrapping_add(1);

        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, &bytes);
        assert_eq!(frames, [Err(FrameError::Checksum(FrameKind::Text))]);
    }

    #[test]
    fn test_hex_frame() {
        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, b":154\n");
        assert_eq!(frames, [Ok(Frame::Hex(HexFrame::command(Command::Done)))]);
    }

    #[test]
    fn test_hex_inside_text_resumes_block() {
        let bytes = text_block(&[("V", "12800"), ("I", "-150")]);
        let async_frame =
            HexFrame::register(Command::Async, 0xEDBB, 0, &[0xE8, 0x03]).unwrap();
        let encoded = async_frame.encode_to_vec().unwrap();

        // Splice the HEX frame into the middle of the "12800" value
        let split = 5;
        let mut stream = bytes[..split].to_vec();
        stream.extend_from_slice(&encoded);
        stream.extend_from_slice(&bytes[split..]);

        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, &stream);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], Ok(Frame::Hex(async_frame)));
        match &frames[1] {
            Ok(Frame::Text(block)) => {
                assert_eq!(block.get("V"), Some("12800"));
                assert_eq!(block.get("I"), Some("-150"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_hex_checksum_error_resumes_text() {
        let bytes = text_block(&[("V", "12800")]);
        let mut stream = bytes[..4].to_vec();
        stream.extend_from_slice(b":155\n");
        stream.extend_from_slice(&bytes[4..]);

        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, &stream);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], Err(FrameError::Checksum(FrameKind::Hex)));
        assert!(matches!(frames[1], Ok(Frame::Text(_))));
    }

    #[test]
    fn test_hex_coding_error_drops_text() {
        let bytes = text_block(&[("V", "12800")]);
        let mut stream = bytes[..4].to_vec();
        stream.extend_from_slice(b":1x\n");
        stream.extend_from_slice(&bytes[4..]);

        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, &stream);
        assert_eq!(frames, [Err(FrameError::Coding)]);
        assert!(parser.is_idle());
    }

    #[test]
    fn test_name_overflow() {
        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, b"\r\nVERYLONGNAME\t1\r\n");
        assert_eq!(frames, [Err(FrameError::NameOverflow)]);
    }

    #[test]
    fn test_value_overflow_resyncs() {
        let mut stream = Vec::from(&b"\r\nV\t"[..]);
        stream.extend(core::iter::repeat(b'1').take(crate::text::MAX_VALUE_LEN + 1));

        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, &stream);
        assert_eq!(frames, [Err(FrameError::ValueOverflow)]);
        assert!(parser.is_idle());

        let frames = collect(&mut parser, &text_block(&[("V", "12800")]));
        match &frames[..] {
            [Ok(Frame::Text(block))] => assert_eq!(block.get("V"), Some("12800")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_record_overflow() {
        let mut stream = Vec::new();
        stream.extend_from_slice(b"\r\n");
        for _ in 0..=crate::text::MAX_RECORDS {
            stream.extend_from_slice(b"V\t1\r\n");
        }
        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, &stream);
        assert_eq!(frames, [Err(FrameError::RecordOverflow)]);
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let mut stream = Vec::from(&[0x00u8, 0xFF, 0x12, b'x'][..]);
        stream.extend_from_slice(&text_block(&[("V", "1")]));
        stream.extend_from_slice(b":154\n");

        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, &stream);
        assert_eq!(frames.len(), 2);
        assert!(matches!(frames[0], Ok(Frame::Text(_))));
        assert!(matches!(frames[1], Ok(Frame::Hex(_))));
    }

    #[test]
    fn test_consecutive_blocks() {
        let mut stream = text_block(&[("V", "1")]);
        stream.extend_from_slice(&text_block(&[("V", "2")]));

        let mut parser = FrameParser::new();
        let frames = collect(&mut parser, &stream);
        assert_eq!(frames.len(), 2);
        match &frames[1] {
            Ok(Frame::Text(block)) => assert_eq!(block.get("V"), Some("2")),
            other => panic!("unexpected {:?}", other),
        }
    }
}

//! TEXT frame blocks
//!
//! A block is a run of `\r\nlabel\tvalue` records closed by a
//! `\r\nChecksum\t<byte>` record. The checksum byte makes the sum of all
//! block bytes zero modulo 256.

use heapless::{String, Vec};

use crate::events::FrameError;

/// Maximum label length
pub const MAX_NAME_LEN: usize = 8;

/// Maximum value length
pub const MAX_VALUE_LEN: usize = 32;

/// Maximum records per block
pub const MAX_RECORDS: usize = 22;

/// Label of the record closing a block
pub const CHECKSUM_LABEL: &str = "Checksum";

/// A single `label<TAB>value` record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRecord {
    pub name: String<MAX_NAME_LEN>,
    pub value: String<MAX_VALUE_LEN>,
}

impl TextRecord {
    pub fn new(name: &str, value: &str) -> Result<Self, FrameError> {
        let mut record = Self::default();
        record
            .name
            .push_str(name)
            .map_err(|_| FrameError::NameOverflow)?;
        record
            .value
            .push_str(value)
            .map_err(|_| FrameError::ValueOverflow)?;
        Ok(record)
    }
}

/// A complete TEXT block, in wire order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBlock {
    records: Vec<TextRecord, MAX_RECORDS>,
}

impl TextBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TextRecord) -> Result<(), FrameError> {
        self.records
            .push(record)
            .map_err(|_| FrameError::RecordOverflow)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, TextRecord> {
        self.records.iter()
    }

    /// Value of the first record with the given label
    pub fn get(&self, name: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.value.as_str())
    }

    /// Encode the block as a device would send it, checksum record included
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        fn put(buffer: &mut [u8], pos: &mut usize, bytes: &[u8]) -> Result<(), FrameError> {
            let end = *pos + bytes.len();
            buffer
                .get_mut(*pos..end)
                .ok_or(FrameError::BufferTooSmall)?
                .copy_from_slice(bytes);
            *pos = end;
            Ok(())
        }

        let mut pos = 0;
        for record in &self.records {
            put(buffer, &mut pos, b"\r\n")?;
            put(buffer, &mut pos, record.name.as_bytes())?;
            put(buffer, &mut pos, b"\t")?;
            put(buffer, &mut pos, record.value.as_bytes())?;
        }
        put(buffer, &mut pos, b"\r\n")?;
        put(buffer, &mut pos, CHECKSUM_LABEL.as_bytes())?;
        put(buffer, &mut pos, b"\t")?;

        let sum = buffer[..pos].iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        put(buffer, &mut pos, &[0u8.wrapping_sub(sum)])?;
        Ok(pos)
    }
}

impl<'a> IntoIterator for &'a TextBlock {
    type Item = &'a TextRecord;
    type IntoIter = core::slice::Iter<'a, TextRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_overflow() {
        assert_eq!(
            TextRecord::new("TOOLONGNAME", "1").unwrap_err(),
            FrameError::NameOverflow
        );
        let long = "x".repeat(MAX_VALUE_LEN + 1);
        assert_eq!(
            TextRecord::new("V", &long).unwrap_err(),
            FrameError::ValueOverflow
        );
    }

    #[test]
    fn test_block_capacity() {
        let mut block = TextBlock::new();
        for _ in 0..MAX_RECORDS {
            block.push(TextRecord::new("V", "1").unwrap()).unwrap();
        }
        assert_eq!(
            block.push(TextRecord::new("V", "1").unwrap()),
            Err(FrameError::RecordOverflow)
        );
    }

    #[test]
    fn test_encode_sums_to_zero() {
        let mut block = TextBlock::new();
        block.push(TextRecord::new("V", "12800").unwrap()).unwrap();
        block.push(TextRecord::new("I", "15000").unwrap()).unwrap();

        let mut buffer = [0u8; 128];
        let len = block.encode(&mut buffer).unwrap();
        assert!(buffer[..len].starts_with(b"\r\nV\t12800\r\nI\t15000\r\nChecksum\t"));
        let sum = buffer[..len].iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        assert_eq!(sum, 0);
    }

    #[test]
    fn test_get_by_label() {
        let mut block = TextBlock::new();
        block.push(TextRecord::new("SOC", "876").unwrap()).unwrap();
        assert_eq!(block.get("SOC"), Some("876"));
        assert_eq!(block.get("V"), None);
    }
}

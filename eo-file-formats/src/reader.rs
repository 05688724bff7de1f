use std::io::{Cursor, Read, Seek, SeekFrom};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("unexpected end of file at offset {offset}")]
    UnexpectedEof { offset: u64 },
    #[error("invalid seek to offset {offset}")]
    InvalidSeek { offset: u64 },
}

pub type ReaderResult<T> = Result<T, ReaderError>;

/// A small seekable cursor over an in-memory byte slice, grounded on the
/// fixed-width/length-prefixed reader style used throughout this codebase's
/// binary format parsers.
pub struct EoFileReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> EoFileReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    pub fn set_position(&mut self, position: u64) -> ReaderResult<()> {
        self.cursor
            .seek(SeekFrom::Start(position))
            .map_err(|_| ReaderError::InvalidSeek { offset: position })?;
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> ReaderResult<()> {
        let offset = self.cursor.position();
        self.cursor
            .read_exact(buf)
            .map_err(|_| ReaderError::UnexpectedEof { offset })
    }

    pub fn read_u8(&mut self) -> ReaderResult<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> ReaderResult<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> ReaderResult<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_i8(&mut self) -> ReaderResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i16(&mut self) -> ReaderResult<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_i32(&mut self) -> ReaderResult<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_bytes(&mut self, count: usize) -> ReaderResult<&'a [u8]> {
        let offset = self.cursor.position() as usize;
        let bytes = self.cursor.get_ref();
        let end = offset
            .checked_add(count)
            .filter(|&end| end <= bytes.len())
            .ok_or(ReaderError::UnexpectedEof {
                offset: offset as u64,
            })?;
        self.set_position(end as u64)?;
        Ok(&bytes[offset..end])
    }

    /// Reads a 1-to-4 byte packed number (§ shared `eo_game_common::number`
    /// decoder), consuming either a sentinel-terminated run or 4 bytes,
    /// whichever comes first.
    pub fn read_packed_number(&mut self) -> ReaderResult<u32> {
        let mut bytes = [eo_game_common::number::SENTINEL; 4];
        for slot in bytes.iter_mut() {
            let byte = self.read_u8()?;
            *slot = byte;
            if byte == eo_game_common::number::SENTINEL {
                break;
            }
        }
        Ok(eo_game_common::number::decode(&bytes))
    }

    /// A `u8`-length-prefixed ASCII string.
    pub fn read_u8_length_string(&mut self) -> ReaderResult<String> {
        let length = self.read_u8()? as usize;
        let bytes = self.read_bytes(length)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fixed_width_integers_little_endian() {
        let bytes = [0x01, 0x02, 0x03, 0x04];
        let mut reader = EoFileReader::new(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 0x0403_0201);
    }

    #[test]
    fn set_position_then_read_resumes_there() {
        let bytes = [0xAA, 0xBB, 0xCC];
        let mut reader = EoFileReader::new(&bytes);
        reader.set_position(2).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 0xCC);
    }

    #[test]
    fn read_past_end_is_an_error() {
        let bytes = [0x00u8];
        let mut reader = EoFileReader::new(&bytes);
        assert!(reader.read_u32().is_err());
    }

    #[test]
    fn packed_number_round_trips_through_shared_decoder() {
        let encoded = eo_game_common::number::encode(64009);
        let mut reader = EoFileReader::new(&encoded);
        assert_eq!(reader.read_packed_number().unwrap(), 64009);
    }
}

//! Bounds-checked reader for the binary asset blobs
//!
//! Every multi-byte field in the blob formats is little-endian. All
//! decoders fail closed: a read past the end of the blob yields
//! `DecodeError::Truncated` instead of garbage.

use std::fmt;

/// Error type for blob decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Blob ended before the declared payload did
    Truncated,
    BadMagic { expected: u32, found: u32 },
    BadVersion { expected: u16, found: u16 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated => write!(f, "blob truncated"),
            DecodeError::BadMagic { expected, found } => {
                write!(f, "bad magic: expected {:#010x}, found {:#010x}", expected, found)
            }
            DecodeError::BadVersion { expected, found } => {
                write!(f, "bad version: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Sequential little-endian cursor over a blob
pub struct BlobReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BlobReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::Truncated);
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read the 4-byte magic and 2-byte version header every blob starts with
    pub fn expect_header(&mut self, magic: u32, version: u16) -> Result<(), DecodeError> {
        let found = self.read_u32()?;
        if found != magic {
            return Err(DecodeError::BadMagic { expected: magic, found });
        }
        let found = self.read_u16()?;
        if found != version {
            return Err(DecodeError::BadVersion { expected: version, found });
        }
        Ok(())
    }
}

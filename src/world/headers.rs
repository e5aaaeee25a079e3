//! World header table: static per-cell metadata loaded once at init

use super::blob::{BlobReader, DecodeError};

pub const HEADERS_MAGIC: u32 = 0x20484247; // "GBH "
pub const HEADERS_VERSION: u16 = 1;

/// Metadata for one map cell: which blobs to load and how high to
/// place the cell when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldHeader {
    pub header_id: u16,
    pub vertical_offset: i16,
    pub geometry_id: u16,
    pub collision_id: u16,
    pub regional_tileset_id: u16,
    pub local_tileset_id: u16,
    pub interior_tileset_id: u16,
}

/// Flat header table, immutable after load
#[derive(Debug, Clone, Default)]
pub struct WorldHeaders {
    pub headers: Vec<WorldHeader>,
}

impl WorldHeaders {
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BlobReader::new(data);
        r.expect_header(HEADERS_MAGIC, HEADERS_VERSION)?;
        let count = r.read_u16()?;

        let mut headers = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let h = WorldHeader {
                header_id: r.read_u16()?,
                vertical_offset: r.read_i16()?,
                geometry_id: r.read_u16()?,
                collision_id: r.read_u16()?,
                regional_tileset_id: r.read_u16()?,
                local_tileset_id: r.read_u16()?,
                interior_tileset_id: r.read_u16()?,
            };
            r.read_u16()?; // reserved
            headers.push(h);
        }

        Ok(Self { headers })
    }

    /// Linear scan by header id; absent ids mean an empty cell
    pub fn get(&self, header_id: u16) -> Option<&WorldHeader> {
        self.headers.iter().find(|h| h.header_id == header_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::sample;

    fn two_headers() -> Vec<WorldHeader> {
        vec![
            WorldHeader {
                header_id: 1,
                vertical_offset: -4,
                geometry_id: 0,
                collision_id: 0,
                regional_tileset_id: 0,
                local_tileset_id: 1,
                interior_tileset_id: 2,
            },
            WorldHeader { header_id: 7, ..Default::default() },
        ]
    }

    #[test]
    fn test_decode_and_lookup() {
        let blob = sample::headers_blob(&two_headers());
        let table = WorldHeaders::decode(&blob).unwrap();

        assert_eq!(table.headers.len(), 2);
        let h = table.get(1).unwrap();
        assert_eq!(h.vertical_offset, -4);
        assert_eq!(h.interior_tileset_id, 2);
        assert!(table.get(7).is_some());
        assert!(table.get(99).is_none());
    }

    #[test]
    fn test_decode_bad_magic() {
        let mut blob = sample::headers_blob(&two_headers());
        blob[1] ^= 0xFF;
        assert!(matches!(
            WorldHeaders::decode(&blob),
            Err(DecodeError::BadMagic { .. })
        ));
    }

    #[test]
    fn test_decode_truncated_table() {
        let blob = sample::headers_blob(&two_headers());
        assert!(matches!(
            WorldHeaders::decode(&blob[..blob.len() - 3]),
            Err(DecodeError::Truncated)
        ));
    }
}

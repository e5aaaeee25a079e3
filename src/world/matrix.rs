//! World matrix: the 2D grid of header ids keyed by map coordinates

use super::blob::{BlobReader, DecodeError};

pub const MATRIX_MAGIC: u32 = 0x4D574247; // "GBWM"
pub const MATRIX_VERSION: u16 = 1;

/// Read-only header-id grid loaded once at world init
#[derive(Debug, Clone, Default)]
pub struct WorldMatrix {
    pub width: u16,
    pub height: u16,
    cells: Vec<u16>,
}

impl WorldMatrix {
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BlobReader::new(data);
        r.expect_header(MATRIX_MAGIC, MATRIX_VERSION)?;

        let width = r.read_u16()?;
        let height = r.read_u16()?;

        let count = width as usize * height as usize;
        let mut cells = Vec::with_capacity(count);
        for _ in 0..count {
            cells.push(r.read_u16()?);
        }

        Ok(Self { width, height, cells })
    }

    /// Header id at map coordinates; anything outside the grid reads
    /// as 0 (the empty sentinel), never an error
    pub fn get(&self, x: i32, y: i32) -> u16 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::sample;

    #[test]
    fn test_decode_and_get() {
        let blob = sample::matrix_blob(3, 2, &[1, 2, 3, 4, 5, 6]);
        let m = WorldMatrix::decode(&blob).unwrap();

        assert_eq!((m.width, m.height), (3, 2));
        assert_eq!(m.get(0, 0), 1);
        assert_eq!(m.get(2, 0), 3);
        assert_eq!(m.get(0, 1), 4);
        assert_eq!(m.get(2, 1), 6);
    }

    #[test]
    fn test_out_of_bounds_reads_zero() {
        let blob = sample::matrix_blob(2, 2, &[9, 9, 9, 9]);
        let m = WorldMatrix::decode(&blob).unwrap();

        assert_eq!(m.get(2, 0), 0);
        assert_eq!(m.get(0, 2), 0);
        assert_eq!(m.get(-1, 0), 0);
        assert_eq!(m.get(0, -1), 0);
        assert_eq!(m.get(1000, 1000), 0);
    }

    #[test]
    fn test_decode_truncated_cells() {
        let blob = sample::matrix_blob(2, 2, &[1, 2, 3, 4]);
        assert!(matches!(
            WorldMatrix::decode(&blob[..blob.len() - 2]),
            Err(DecodeError::Truncated)
        ));
    }
}

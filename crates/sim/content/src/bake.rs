//! Baked tilemap blob codec.
//!
//! Wire layout:
//!
//! ```text
//! [size_x: u16 LE] [size_y: u16 LE] [precision: u8]   5-byte header
//! [compressed packed tile buffer]                     payload
//! [magic 0xFFFE: u16 LE]                              2-byte trailer
//! ```
//!
//! `size_x`/`size_y` are sub-tile dimensions; the decompressed payload is
//! the nibble-packed grid, `ceil(size_x * size_y / 2)` bytes. The compression
//! scheme is not ours to pick: callers inject the matching decompressor.

use thiserror::Error;

use sim_core::TileMap;

const HEADER_LEN: usize = 5;
const TRAILER_LEN: usize = 2;
const MAGIC: u16 = 0xFFFE;

#[derive(Debug, Error)]
pub enum BakeError {
    #[error("tilemap blob is {0} bytes, too short for header and trailer")]
    TooShort(usize),
    #[error("invalid tilemap magic {found:#06x}, expected {MAGIC:#06x}")]
    BadMagic { found: u16 },
    #[error("tilemap payload failed to decompress")]
    Decompress(#[source] anyhow::Error),
    #[error("decompressed tilemap is {actual} bytes, {expected} expected for {sub_w}x{sub_h}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        sub_w: u32,
        sub_h: u32,
    },
}

/// A decoded tilemap bake, ready for `Level::set_sub_tiles`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBake {
    /// Grid width in sub-tiles.
    pub sub_width: u32,
    /// Grid height in sub-tiles.
    pub sub_height: u32,
    /// Sub-tiles per world unit.
    pub resolution: u8,
    /// Nibble-packed tile states.
    pub tiles: Vec<u8>,
}

impl TileBake {
    /// Decodes a bake blob, decompressing the payload with `decompress`.
    pub fn decode<F>(data: &[u8], decompress: F) -> Result<Self, BakeError>
    where
        F: FnOnce(&[u8]) -> anyhow::Result<Vec<u8>>,
    {
        if data.len() < HEADER_LEN + TRAILER_LEN {
            return Err(BakeError::TooShort(data.len()));
        }

        let trailer = &data[data.len() - TRAILER_LEN..];
        let magic = u16::from_le_bytes([trailer[0], trailer[1]]);
        if magic != MAGIC {
            return Err(BakeError::BadMagic { found: magic });
        }

        let sub_width = u16::from_le_bytes([data[0], data[1]]) as u32;
        let sub_height = u16::from_le_bytes([data[2], data[3]]) as u32;
        let resolution = data[4];

        let payload = &data[HEADER_LEN..data.len() - TRAILER_LEN];
        let tiles = decompress(payload).map_err(BakeError::Decompress)?;

        let expected = TileMap::packed_len(sub_width, sub_height);
        if tiles.len() != expected {
            return Err(BakeError::LengthMismatch {
                expected,
                actual: tiles.len(),
                sub_w: sub_width,
                sub_h: sub_height,
            });
        }

        Ok(Self {
            sub_width,
            sub_height,
            resolution,
            tiles,
        })
    }

    /// Encodes a bake blob, compressing the packed buffer with `compress`.
    /// Used by the map pipeline and by tests.
    pub fn encode<F>(&self, compress: F) -> anyhow::Result<Vec<u8>>
    where
        F: FnOnce(&[u8]) -> anyhow::Result<Vec<u8>>,
    {
        let payload = compress(&self.tiles)?;
        let mut out = Vec::with_capacity(HEADER_LEN + payload.len() + TRAILER_LEN);
        out.extend_from_slice(&(self.sub_width as u16).to_le_bytes());
        out.extend_from_slice(&(self.sub_height as u16).to_le_bytes());
        out.push(self.resolution);
        out.extend_from_slice(&payload);
        out.extend_from_slice(&MAGIC.to_le_bytes());
        Ok(out)
    }
}

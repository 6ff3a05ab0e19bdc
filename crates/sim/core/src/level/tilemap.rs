//! Bit-packed passability grid.
//!
//! The map is sampled at `resolution` sub-tiles per world unit. Each sub-tile
//! carries a 4-bit [`TileState`] nibble, packed two per byte, so a baked
//! 256x256 map at resolution 4 costs half a megabyte instead of one.
//!
//! Terrain is baked once by the map pipeline and loaded through
//! [`TileMap::set_sub_tiles`]; nothing in the simulation mutates tiles at
//! runtime, which is why the pathfinder can snapshot the grid freely.

use bitflags::bitflags;
use glam::Vec2;
use thiserror::Error;

bitflags! {
    /// Per-sub-tile terrain flags. Combinable: flooded ground is
    /// `TERRAIN | WATER`, a rock on grass is `TERRAIN | OBJECT`; either
    /// addition makes the tile impassable.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TileState: u8 {
        const TERRAIN = 1 << 0;
        const WATER = 1 << 1;
        const OBJECT = 1 << 2;
    }
}

impl TileState {
    /// Walkability invariant: bare terrain only. A water or object flag
    /// blocks the tile even when terrain is present underneath.
    pub fn is_passable(self) -> bool {
        self.contains(TileState::TERRAIN)
            && !self.contains(TileState::WATER)
            && !self.contains(TileState::OBJECT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TileMapError {
    /// Writing outside the grid is a caller bug. Reads are intentionally
    /// forgiving (they report impassable) so movement code stays branch-free
    /// at map edges, but a stray write means broken authoring data.
    #[error("sub-tile ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("tile buffer is {actual} sub-tiles, map expects {expected}")]
    SizeMismatch { expected: u32, actual: u32 },
    #[error("tile buffer resolution {actual} does not match map resolution {expected}")]
    ResolutionMismatch { expected: u8, actual: u8 },
    #[error("tile buffer is {actual} bytes, {expected} required for packing")]
    BufferLength { expected: usize, actual: usize },
}

/// 2D grid of tile-state nibbles with world-space accessors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    /// World size in units.
    size: (u32, u32),
    /// Sub-tiles per world unit.
    resolution: u8,
    /// Grid size in sub-tiles.
    sub_size: (u32, u32),
    /// Two nibbles per byte, low nibble first, column-major.
    states: Vec<u8>,
}

impl TileMap {
    pub fn new(width: u32, height: u32, resolution: u8) -> Self {
        let sub_w = width * resolution as u32;
        let sub_h = height * resolution as u32;
        Self {
            size: (width, height),
            resolution,
            sub_size: (sub_w, sub_h),
            states: vec![0; Self::packed_len(sub_w, sub_h)],
        }
    }

    /// Bytes needed to pack a grid of the given sub-tile dimensions.
    pub fn packed_len(sub_w: u32, sub_h: u32) -> usize {
        ((sub_w * sub_h) as usize).div_ceil(2)
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn sub_size(&self) -> (u32, u32) {
        self.sub_size
    }

    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    fn sub_index(&self, position: Vec2) -> (i32, i32) {
        let x = (position.x * self.resolution as f32).floor() as i32;
        let y = (position.y * self.resolution as f32).floor() as i32;
        (x, y)
    }

    /// Tile state at a world position. Out-of-bounds reads report `OBJECT`.
    pub fn get(&self, position: Vec2) -> TileState {
        let (x, y) = self.sub_index(position);
        self.sub_tile(x, y)
    }

    /// Sets the tile state at a world position.
    pub fn set(&mut self, position: Vec2, state: TileState) -> Result<(), TileMapError> {
        let (x, y) = self.sub_index(position);
        self.set_sub_tile(x, y, state)
    }

    /// Tile state at sub-tile coordinates. Anything outside the grid is
    /// reported as `OBJECT` (impassable).
    pub fn sub_tile(&self, x: i32, y: i32) -> TileState {
        if x < 0 || x as u32 >= self.sub_size.0 || y < 0 || y as u32 >= self.sub_size.1 {
            return TileState::OBJECT;
        }
        let n = x as usize * self.sub_size.1 as usize + y as usize;
        let byte = self.states[n / 2];
        let nibble = if n % 2 == 0 { byte & 0x0F } else { byte >> 4 };
        TileState::from_bits_truncate(nibble)
    }

    pub fn set_sub_tile(&mut self, x: i32, y: i32, state: TileState) -> Result<(), TileMapError> {
        if x < 0 || x as u32 >= self.sub_size.0 || y < 0 || y as u32 >= self.sub_size.1 {
            return Err(TileMapError::OutOfBounds {
                x,
                y,
                width: self.sub_size.0,
                height: self.sub_size.1,
            });
        }
        let n = x as usize * self.sub_size.1 as usize + y as usize;
        let byte = &mut self.states[n / 2];
        if n % 2 == 0 {
            *byte = (*byte & 0xF0) | state.bits();
        } else {
            *byte = (*byte & 0x0F) | (state.bits() << 4);
        }
        Ok(())
    }

    /// Passability at a world position, per the tile-state invariant.
    pub fn is_passable(&self, position: Vec2) -> bool {
        self.get(position).is_passable()
    }

    /// Bulk-replaces the grid with a baked, packed tile buffer.
    ///
    /// The dimensions and precision come from the bake header and must match
    /// this map exactly. The caller must rebuild the pathfinder grid after a
    /// successful load.
    pub fn set_sub_tiles(
        &mut self,
        buffer: Vec<u8>,
        sub_w: u32,
        sub_h: u32,
        resolution: u8,
    ) -> Result<(), TileMapError> {
        if (sub_w, sub_h) != self.sub_size {
            return Err(TileMapError::SizeMismatch {
                expected: self.sub_size.0 * self.sub_size.1,
                actual: sub_w * sub_h,
            });
        }
        if resolution != self.resolution {
            return Err(TileMapError::ResolutionMismatch {
                expected: self.resolution,
                actual: resolution,
            });
        }
        let expected = Self::packed_len(sub_w, sub_h);
        if buffer.len() != expected {
            return Err(TileMapError::BufferLength {
                expected,
                actual: buffer.len(),
            });
        }
        self.states = buffer;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_map() -> TileMap {
        let mut map = TileMap::new(8, 8, 1);
        for x in 0..8 {
            for y in 0..8 {
                map.set_sub_tile(x, y, TileState::TERRAIN).unwrap();
            }
        }
        map
    }

    #[test]
    fn passability_invariant_over_all_states() {
        for bits in 0..16u8 {
            let state = TileState::from_bits_truncate(bits);
            let terrain = state.contains(TileState::TERRAIN);
            let water = state.contains(TileState::WATER);
            let object = state.contains(TileState::OBJECT);
            assert_eq!(state.is_passable(), (terrain && !water) && !object);
        }
    }

    #[test]
    fn water_blocks_even_over_terrain() {
        assert!(!TileState::WATER.is_passable());
        assert!(!(TileState::TERRAIN | TileState::WATER).is_passable());
        assert!(TileState::TERRAIN.is_passable());
        assert!(!(TileState::TERRAIN | TileState::OBJECT).is_passable());
    }

    #[test]
    fn out_of_bounds_reads_are_impassable() {
        let map = open_map();
        assert_eq!(map.sub_tile(-1, 0), TileState::OBJECT);
        assert_eq!(map.sub_tile(0, -1), TileState::OBJECT);
        assert_eq!(map.sub_tile(8, 0), TileState::OBJECT);
        assert_eq!(map.sub_tile(0, 8), TileState::OBJECT);
        assert!(!map.is_passable(Vec2::new(-0.5, 4.0)));
        assert!(!map.is_passable(Vec2::new(4.0, 9.0)));
    }

    #[test]
    fn out_of_bounds_write_is_an_error() {
        let mut map = TileMap::new(4, 4, 2);
        assert!(matches!(
            map.set_sub_tile(8, 0, TileState::TERRAIN),
            Err(TileMapError::OutOfBounds { .. })
        ));
        assert!(matches!(
            map.set_sub_tile(0, -1, TileState::TERRAIN),
            Err(TileMapError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn nibble_packing_round_trips_without_bleeding() {
        let mut map = TileMap::new(4, 4, 1);
        for bits in 0..8u8 {
            let state = TileState::from_bits_truncate(bits);
            map.set_sub_tile(1, 1, state).unwrap();
            assert_eq!(map.sub_tile(1, 1), state);
            // Packed neighbors share bytes with (1, 1); they must be intact.
            assert_eq!(map.sub_tile(1, 0), TileState::empty());
            assert_eq!(map.sub_tile(1, 2), TileState::empty());
        }
    }

    #[test]
    fn world_accessors_floor_to_sub_tile() {
        let mut map = TileMap::new(8, 8, 2);
        map.set(Vec2::new(3.3, 2.6), TileState::TERRAIN).unwrap();
        // resolution 2: (3.3, 2.6) lands on sub-tile (6, 5)
        assert_eq!(map.sub_tile(6, 5), TileState::TERRAIN);
        assert_eq!(map.get(Vec2::new(3.4, 2.9)), TileState::TERRAIN);
        assert_eq!(map.get(Vec2::new(3.6, 2.6)), TileState::empty());
    }

    #[test]
    fn bulk_load_validates_dimensions() {
        let mut map = TileMap::new(4, 4, 1);
        let good = vec![0u8; TileMap::packed_len(4, 4)];
        assert!(map.set_sub_tiles(good.clone(), 4, 4, 1).is_ok());
        assert!(matches!(
            map.set_sub_tiles(good.clone(), 8, 8, 1),
            Err(TileMapError::SizeMismatch { .. })
        ));
        assert!(matches!(
            map.set_sub_tiles(good, 4, 4, 2),
            Err(TileMapError::ResolutionMismatch { .. })
        ));
        assert!(matches!(
            map.set_sub_tiles(vec![0u8; 3], 4, 4, 1),
            Err(TileMapError::BufferLength { .. })
        ));
    }
}

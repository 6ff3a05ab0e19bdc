//! Grid pathfinding over the tilemap's passability snapshot.
//!
//! The search runs on a private copy of the grid (0 = passable, 1 = blocked)
//! so the hot path never touches nibble unpacking. The snapshot must be
//! rebuilt with [`PathFinder::update_grid`] whenever tile passability
//! changes; there is no incremental update, terrain only changes at load
//! time anyway.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use glam::Vec2;
use tracing::debug;

use super::tilemap::TileMap;

/// Straight and diagonal step costs (10 / 14 ~ 1 / sqrt 2).
const COST_STRAIGHT: u32 = 10;
const COST_DIAGONAL: u32 = 14;

/// Node budget per query. Queries that exhaust it report "no path", which
/// callers already treat as "stay put".
const MAX_EXPANDED_NODES: usize = 1000;

const NEIGHBORS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// A* pathfinder producing world-space waypoint sequences.
#[derive(Clone, Debug)]
pub struct PathFinder {
    /// Blocked flags, row-major `y * width + x`.
    grid: Vec<u8>,
    width: u32,
    height: u32,
    resolution: u8,
    /// Integer factor between tilemap sub-tiles and search cells. 1 keeps
    /// the native sub-tile resolution.
    downscale: u32,
}

impl PathFinder {
    pub fn new(tile_map: &TileMap) -> Self {
        let mut finder = Self {
            grid: Vec::new(),
            width: 0,
            height: 0,
            resolution: tile_map.resolution(),
            downscale: 1,
        };
        finder.update_grid(tile_map);
        finder
    }

    /// Rebuilds the passability snapshot from the tilemap.
    pub fn update_grid(&mut self, tile_map: &TileMap) {
        let (sub_w, sub_h) = tile_map.sub_size();
        self.resolution = tile_map.resolution();
        self.width = sub_w / self.downscale;
        self.height = sub_h / self.downscale;
        self.grid = vec![0; (self.width * self.height) as usize];
        for y in 0..self.height {
            for x in 0..self.width {
                let tile =
                    tile_map.sub_tile((x * self.downscale) as i32, (y * self.downscale) as i32);
                self.grid[(y * self.width + x) as usize] = u8::from(!tile.is_passable());
            }
        }
    }

    fn blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || x as u32 >= self.width || y < 0 || y as u32 >= self.height {
            return true;
        }
        self.grid[(y as u32 * self.width + x as u32) as usize] != 0
    }

    fn cell_of(&self, position: Vec2) -> (i32, i32) {
        let scale = self.resolution as f32 / self.downscale as f32;
        (
            (position.x * scale).floor() as i32,
            (position.y * scale).floor() as i32,
        )
    }

    fn cell_to_world(&self, x: i32, y: i32) -> Vec2 {
        let scale = self.downscale as f32 / self.resolution as f32;
        Vec2::new(x as f32 * scale, y as f32 * scale)
    }

    /// Finds a waypoint path from `start` to `end` in world coordinates.
    ///
    /// Returns an empty sequence when no route exists (walled off, blocked
    /// goal, or search budget exhausted). Callers treat empty as "stay put".
    /// The result is deterministic for an unchanged grid.
    pub fn find_path(&self, start: Vec2, end: Vec2) -> Vec<Vec2> {
        let (sx, sy) = self.cell_of(start);
        let (ex, ey) = self.cell_of(end);

        if self.blocked(ex, ey) {
            debug!(?start, ?end, "path target is blocked");
            return Vec::new();
        }
        if sx < 0 || sx as u32 >= self.width || sy < 0 || sy as u32 >= self.height {
            return Vec::new();
        }

        let cells = self.search((sx, sy), (ex, ey));
        if cells.is_empty() {
            return Vec::new();
        }
        self.build_path(&cells)
    }

    /// A* over 8-connected cells: straight cost 10, diagonal 14, octile
    /// heuristic. Ties break on lowest estimated total, then on discovery
    /// order, which keeps the result stable across calls.
    fn search(&self, start: (i32, i32), end: (i32, i32)) -> Vec<(i32, i32)> {
        let len = (self.width * self.height) as usize;
        let index = |x: i32, y: i32| (y as u32 * self.width + x as u32) as usize;

        let mut g_score = vec![u32::MAX; len];
        let mut parent = vec![usize::MAX; len];
        let mut closed = vec![false; len];

        // (estimated total, discovery sequence, cell index)
        let mut open: BinaryHeap<Reverse<(u32, u32, usize)>> = BinaryHeap::new();
        let mut sequence = 0u32;

        let start_idx = index(start.0, start.1);
        let end_idx = index(end.0, end.1);
        g_score[start_idx] = 0;
        open.push(Reverse((heuristic(start, end), sequence, start_idx)));

        let mut expanded = 0usize;
        while let Some(Reverse((_, _, current))) = open.pop() {
            if closed[current] {
                continue;
            }
            closed[current] = true;

            if current == end_idx {
                return reconstruct(&parent, current, self.width);
            }

            expanded += 1;
            if expanded > MAX_EXPANDED_NODES {
                debug!("path search budget exhausted");
                return Vec::new();
            }

            let cx = (current as u32 % self.width) as i32;
            let cy = (current as u32 / self.width) as i32;
            for (dx, dy) in NEIGHBORS {
                let (nx, ny) = (cx + dx, cy + dy);
                if self.blocked(nx, ny) {
                    continue;
                }
                let neighbor = index(nx, ny);
                if closed[neighbor] {
                    continue;
                }
                let step = if dx != 0 && dy != 0 {
                    COST_DIAGONAL
                } else {
                    COST_STRAIGHT
                };
                let tentative = g_score[current].saturating_add(step);
                if tentative < g_score[neighbor] {
                    g_score[neighbor] = tentative;
                    parent[neighbor] = current;
                    sequence += 1;
                    open.push(Reverse((
                        tentative + heuristic((nx, ny), end),
                        sequence,
                        neighbor,
                    )));
                }
            }
        }

        Vec::new()
    }

    /// Converts a cell path to world waypoints, collapsing runs whose
    /// per-segment delta signs repeat into a single endpoint so downstream
    /// movement gets the fewest waypoints possible.
    fn build_path(&self, cells: &[(i32, i32)]) -> Vec<Vec2> {
        let mut out: Vec<Vec2> = Vec::new();
        let mut last: Option<(i32, i32)> = None;
        let mut last_last: Option<(i32, i32)> = None;

        for &(x, y) in cells {
            if let (Some((lx, ly)), Some((llx, lly))) = (last, last_last) {
                let prev_delta = ((lx - llx).signum(), (ly - lly).signum());
                let delta = ((x - lx).signum(), (y - ly).signum());
                if prev_delta == delta {
                    last = Some((x, y));
                    if let Some(tail) = out.last_mut() {
                        *tail = self.cell_to_world(x, y);
                    }
                    continue;
                }
            }

            out.push(self.cell_to_world(x, y));
            last_last = last;
            last = Some((x, y));
        }

        out
    }
}

fn heuristic(from: (i32, i32), to: (i32, i32)) -> u32 {
    let dx = (from.0 - to.0).unsigned_abs();
    let dy = (from.1 - to.1).unsigned_abs();
    let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };
    COST_DIAGONAL * min + COST_STRAIGHT * (max - min)
}

fn reconstruct(parent: &[usize], end: usize, width: u32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    let mut current = end;
    loop {
        cells.push(((current as u32 % width) as i32, (current as u32 / width) as i32));
        if parent[current] == usize::MAX {
            break;
        }
        current = parent[current];
    }
    cells.reverse();
    cells
}

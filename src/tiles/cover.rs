use crate::core::geo::TileCoord;
use crate::prelude::HashSet;
use serde::{Deserialize, Serialize};

/// Number of tiles to keep active on each side of the center tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileExtent {
    pub west: u32,
    pub north: u32,
    pub east: u32,
    pub south: u32,
}

impl TileExtent {
    pub fn new(west: u32, north: u32, east: u32, south: u32) -> Self {
        Self {
            west,
            north,
            east,
            south,
        }
    }

    /// Same buffer on every side
    pub fn uniform(buffer: u32) -> Self {
        Self::new(buffer, buffer, buffer, buffer)
    }

    /// Upper bound on the number of tiles the extent covers
    pub fn tile_count(&self) -> u64 {
        let columns = self.west as u64 + self.east as u64 + 1;
        let rows = self.north as u64 + self.south as u64 + 1;
        columns.saturating_mul(rows)
    }

    /// Tiles covered by this extent around `center`, north-west first.
    ///
    /// Columns wrap around the antimeridian; rows past the poles are
    /// skipped. Each tile appears once even when the extent is wider than
    /// the world.
    pub fn tiles_around(&self, center: &TileCoord) -> Vec<TileCoord> {
        let n = TileCoord::tiles_per_axis(center.z) as i64;
        // Anything past one world width only revisits the same tiles
        let reach = |buffer: u32| (buffer as i64).min(n - 1);
        let (west, north, east, south) = (
            reach(self.west),
            reach(self.north),
            reach(self.east),
            reach(self.south),
        );
        let mut seen = HashSet::default();
        let mut tiles = Vec::new();

        for dy in -north..=south {
            let y = center.y as i64 + dy;
            if y < 0 || y >= n {
                continue;
            }
            for dx in -west..=east {
                let x = (center.x as i64 + dx).rem_euclid(n);
                let tile = TileCoord::new(x as u32, y as u32, center.z);
                if seen.insert(tile) {
                    tiles.push(tile);
                }
            }
        }

        tiles
    }
}

impl Default for TileExtent {
    fn default() -> Self {
        Self::uniform(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_by_three() {
        let center = TileCoord::new(10, 10, 5);
        let tiles = TileExtent::default().tiles_around(&center);

        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[0], TileCoord::new(9, 9, 5));
        assert_eq!(tiles[4], center);
        assert_eq!(tiles[8], TileCoord::new(11, 11, 5));
    }

    #[test]
    fn test_wraps_antimeridian() {
        let center = TileCoord::new(0, 3, 3);
        let tiles = TileExtent::new(1, 0, 0, 0).tiles_around(&center);
        assert_eq!(tiles, vec![TileCoord::new(7, 3, 3), center]);
    }

    #[test]
    fn test_skips_rows_past_poles() {
        let center = TileCoord::new(2, 0, 2);
        let tiles = TileExtent::uniform(1).tiles_around(&center);

        assert_eq!(tiles.len(), 6);
        assert!(tiles.iter().all(|t| t.y <= 1 && t.is_valid()));
    }

    #[test]
    fn test_world_smaller_than_extent() {
        let tiles = TileExtent::uniform(2).tiles_around(&TileCoord::new(0, 0, 0));
        assert_eq!(tiles, vec![TileCoord::new(0, 0, 0)]);
    }

    #[test]
    fn test_huge_extent_stops_at_world_size() {
        let tiles = TileExtent::uniform(u32::MAX).tiles_around(&TileCoord::new(1, 1, 2));
        assert_eq!(tiles.len(), 16);
        assert_eq!(TileExtent::uniform(u32::MAX).tile_count(), u64::MAX);
        assert_eq!(TileExtent::new(2, 1, 2, 1).tile_count(), 15);
    }

    #[test]
    fn test_zero_extent_is_center_only() {
        let center = TileCoord::new(4, 4, 4);
        assert_eq!(TileExtent::uniform(0).tiles_around(&center), vec![center]);
    }
}

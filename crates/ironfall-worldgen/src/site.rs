//! Core site scoring.
//!
//! Each weighted ore gets a summed-area table, so the tile count inside any
//! square window costs four lookups no matter the radius.

use crate::config::SiteWeight;
use ironfall_core::spatial::GridPosition;
use ironfall_core::tile::{TileType, TileWorld};

/// Summed-area table of one tile type over a world.
#[derive(Debug, Clone)]
pub struct OreDensity {
    width: u32,
    height: u32,
    /// `(width + 1) * (height + 1)` prefix sums; row 0 and column 0 are zero.
    sums: Vec<u32>,
}

impl OreDensity {
    pub fn build(world: &TileWorld, tile: TileType) -> Self {
        let width = world.width();
        let height = world.height();
        let stride = width as usize + 1;
        let mut sums = vec![0u32; stride * (height as usize + 1)];

        for (y, row) in world.rows().enumerate() {
            let mut run = 0u32;
            for (x, &t) in row.iter().enumerate() {
                run += u32::from(t == tile);
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + run;
            }
        }
        Self {
            width,
            height,
            sums,
        }
    }

    fn at(&self, x: i64, y: i64) -> u32 {
        self.sums[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// Matching tiles with `|dx| <= radius` and `|dy| <= radius` of the
    /// center. Parts of the window outside the world count nothing.
    pub fn window(&self, cx: i32, cy: i32, radius: u32) -> u32 {
        let r = radius as i64;
        let x0 = (cx as i64 - r).clamp(0, self.width as i64);
        let x1 = (cx as i64 + r + 1).clamp(0, self.width as i64);
        let y0 = (cy as i64 - r).clamp(0, self.height as i64);
        let y1 = (cy as i64 + r + 1).clamp(0, self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }
        self.at(x1, y1) + self.at(x0, y0) - self.at(x0, y1) - self.at(x1, y0)
    }
}

/// The winning core site and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteChoice {
    pub center: GridPosition,
    /// `None` when no candidate was scored and the map center was used.
    pub score: Option<u64>,
}

/// Pick the core site: the best-scoring center in the middle half of the
/// map, scanning x outer and y inner and keeping the first of equal scores.
pub fn choose_site(world: &TileWorld, weights: &[SiteWeight]) -> SiteChoice {
    let w = world.width() as i32;
    let h = world.height() as i32;
    let tables: Vec<(OreDensity, &SiteWeight)> = weights
        .iter()
        .map(|sw| (OreDensity::build(world, sw.tile), sw))
        .collect();

    let mut best: Option<(GridPosition, u64)> = None;
    for x in w / 4..w * 3 / 4 {
        for y in h / 4..h * 3 / 4 {
            let score: u64 = tables
                .iter()
                .map(|(table, sw)| table.window(x, y, sw.radius) as u64 * sw.weight as u64)
                .sum();
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((GridPosition::new(x, y), score));
            }
        }
    }

    match best {
        Some((center, score)) => SiteChoice {
            center,
            score: Some(score),
        },
        None => SiteChoice {
            center: GridPosition::new(w / 2, h / 2),
            score: None,
        },
    }
}

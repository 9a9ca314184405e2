//! Tile-based parallel rendering.
//!
//! Divides the image into horizontal tiles (contiguous row ranges) that are
//! rendered independently on a fixed-size rayon pool, one worker per tile.
//! Results are reassembled by tile index, never by completion order.

use std::sync::atomic::{AtomicU32, Ordering};

use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

use crate::renderer::{pixel_count, render_row};
use crate::{Camera, Hittable, ImageBuffer, RenderConfig};

/// Errors that can occur while setting up a tiled render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to start render workers: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// A horizontal band of output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Position of this tile in the output
    pub index: usize,
    /// First output row (0 = top of the image)
    pub row_start: u32,
    /// One past the last output row
    pub row_end: u32,
}

impl Tile {
    /// Create a new tile.
    pub fn new(index: usize, row_start: u32, row_end: u32) -> Self {
        Self {
            index,
            row_start,
            row_end,
        }
    }

    /// Number of rows in this tile.
    pub fn rows(&self) -> u32 {
        self.row_end - self.row_start
    }
}

/// Result of rendering a tile.
#[derive(Debug, Clone)]
pub struct TileResult {
    /// The tile that was rendered
    pub tile: Tile,
    /// Pixels in raster order within the tile
    pub pixels: Vec<[u8; 3]>,
}

/// Split `height` rows into at most `count` contiguous, non-empty tiles.
///
/// Tile sizes differ by at most one row; the first `height % count` tiles
/// get the extra row.
pub fn generate_tiles(height: u32, count: usize) -> Vec<Tile> {
    let count = (count.max(1) as u32).min(height);
    if count == 0 {
        return Vec::new();
    }

    let base = height / count;
    let extra = height % count;

    let mut tiles = Vec::with_capacity(count as usize);
    let mut row = 0;
    for index in 0..count {
        let rows = base + u32::from(index < extra);
        tiles.push(Tile::new(index as usize, row, row + rows));
        row += rows;
    }

    tiles
}

/// Shared "rows remaining" counter for progress logging.
#[derive(Debug)]
pub struct Progress {
    remaining: AtomicU32,
}

impl Progress {
    pub fn new(rows: u32) -> Self {
        Self {
            remaining: AtomicU32::new(rows),
        }
    }

    /// Mark one row finished and log how many are left.
    pub fn row_done(&self) {
        let left = self.remaining.fetch_sub(1, Ordering::Relaxed).saturating_sub(1);
        log::debug!("Scanlines remaining: {}", left);
    }

    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::Relaxed)
    }
}

/// Render a single tile.
///
/// Returns pixels in raster order within the tile.
pub fn render_tile(
    tile: &Tile,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    progress: &Progress,
) -> TileResult {
    let mut pixels = Vec::with_capacity(pixel_count(config.image_width, tile.rows()));

    for row in tile.row_start..tile.row_end {
        pixels.extend(render_row(camera, world, row, config));
        progress.row_done();
    }

    TileResult {
        tile: *tile,
        pixels,
    }
}

/// Concatenate tile results in tile order.
pub fn assemble(mut results: Vec<TileResult>, width: u32, height: u32) -> ImageBuffer {
    results.sort_by_key(|result| result.tile.index);

    let mut pixels = Vec::with_capacity(pixel_count(width, height));
    for result in results {
        pixels.extend(result.pixels);
    }

    ImageBuffer {
        width,
        height,
        pixels,
    }
}

/// Render the scene with one worker thread per tile.
///
/// The output is identical to `render_single_threaded` for the same inputs.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> Result<ImageBuffer, RenderError> {
    let tiles = generate_tiles(config.image_height, config.tiles);
    if tiles.is_empty() {
        return Ok(ImageBuffer::new(config.image_width, 0));
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(tiles.len())
        .thread_name(|i| format!("glint-tile-{i}"))
        .build()?;

    log::info!(
        "Rendering {}x{} @ {} spp on {} tiles",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        tiles.len()
    );

    let progress = Progress::new(config.image_height);
    let results: Vec<TileResult> = pool.install(|| {
        tiles
            .par_iter()
            .with_max_len(1)
            .map(|tile| render_tile(tile, camera, world, config, &progress))
            .collect()
    });

    log::info!("Render complete");
    Ok(assemble(results, config.image_width, config.image_height))
}

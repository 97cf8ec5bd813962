//! Puzzle image loading and slicing into per-tile bitmaps.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage, GenericImageView, Rgb, RgbImage};
use tracing::debug;

use crate::error::PictureError;

/// A source image cut into `rows x cols` tiles, each scaled to fill one
/// terminal cell block of `cell_width x cell_height` half-block characters.
#[derive(Debug, Clone)]
pub struct Picture {
    tiles: Vec<RgbImage>,
}

impl Picture {
    pub fn open(
        path: &Path,
        rows: usize,
        cols: usize,
        cell_width: u16,
        cell_height: u16,
    ) -> Result<Self, PictureError> {
        let image = image::open(path)?;
        debug!(path = %path.display(), width = image.width(), height = image.height(), "decoded puzzle image");
        Self::from_image(&image, rows, cols, cell_width, cell_height)
    }

    /// Slices `image` row-major. Remainder pixels on the right and bottom
    /// edges are dropped.
    pub fn from_image(
        image: &DynamicImage,
        rows: usize,
        cols: usize,
        cell_width: u16,
        cell_height: u16,
    ) -> Result<Self, PictureError> {
        let (width, height) = image.dimensions();
        let tile_w = width / cols.max(1) as u32;
        let tile_h = height / rows.max(1) as u32;
        if tile_w == 0 || tile_h == 0 {
            return Err(PictureError::TooSmall {
                width,
                height,
                rows,
                cols,
            });
        }

        // Two pixel rows per character cell.
        let out_w = u32::from(cell_width.max(1));
        let out_h = u32::from(cell_height.max(1)) * 2;

        let mut tiles = Vec::with_capacity(rows * cols);
        for y in 0..rows as u32 {
            for x in 0..cols as u32 {
                let tile = image
                    .crop_imm(x * tile_w, y * tile_h, tile_w, tile_h)
                    .resize_exact(out_w, out_h, FilterType::Triangle)
                    .to_rgb8();
                tiles.push(tile);
            }
        }

        Ok(Self { tiles })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile(&self, id: usize) -> Option<&RgbImage> {
        self.tiles.get(id)
    }

    /// Upper and lower pixel colours for character cell `(x, y)` of tile `id`.
    pub fn half_block(&self, id: usize, x: u16, y: u16) -> Option<(Rgb<u8>, Rgb<u8>)> {
        let tile = self.tiles.get(id)?;
        let (x, y) = (u32::from(x), u32::from(y) * 2);
        if x >= tile.width() || y + 1 >= tile.height() {
            return None;
        }
        Some((*tile.get_pixel(x, y), *tile.get_pixel(x, y + 1)))
    }
}

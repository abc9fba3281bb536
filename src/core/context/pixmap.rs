use super::frame_block::FrameBlock;
use crate::core::error::*;

use std::sync::atomic::{AtomicU32, Ordering};

pub const PIXMAP_CHANNELS: usize = 3;

/// CPU-side RGB float frame buffer.
///
/// Render workers write disjoint blocks while the display thread reads
/// blocks it has already dequeued. Every channel lives in its own atomic
/// cell, so neither side needs a lock on the pixels; visibility of a block's
/// contents to the reader comes from the dirty-block queue hand-off.
pub struct Pixmap {
    width: usize,
    height: usize,
    pixels: Vec<AtomicU32>,
}

fn alloc_pixels(width: usize, height: usize) -> Vec<AtomicU32> {
    let n = width * height * PIXMAP_CHANNELS;
    let mut pixels = Vec::with_capacity(n);
    pixels.resize_with(n, || AtomicU32::new(0.0_f32.to_bits()));
    return pixels;
}

impl Pixmap {
    pub fn new(width: usize, height: usize) -> Self {
        Pixmap {
            width,
            height,
            pixels: alloc_pixels(width, height),
        }
    }

    pub fn width(&self) -> usize {
        return self.width;
    }

    pub fn height(&self) -> usize {
        return self.height;
    }

    /// Reallocates the buffer; previous contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = alloc_pixels(width, height);
    }

    #[inline]
    fn load(&self, index: usize) -> f32 {
        return f32::from_bits(self.pixels[index].load(Ordering::Relaxed));
    }

    #[inline]
    fn store(&self, index: usize, v: f32) {
        self.pixels[index].store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> [f32; 3] {
        let i = (y * self.width + x) * PIXMAP_CHANNELS;
        return [self.load(i), self.load(i + 1), self.load(i + 2)];
    }

    pub fn set_pixel(&self, x: usize, y: usize, rgb: &[f32; 3]) {
        let i = (y * self.width + x) * PIXMAP_CHANNELS;
        self.store(i, rgb[0]);
        self.store(i + 1, rgb[1]);
        self.store(i + 2, rgb[2]);
    }

    fn check_block(&self, blk: &FrameBlock) -> Result<(), CalaError> {
        if blk.scansize != self.width
            || blk.x + blk.width > self.width
            || blk.y + blk.height > self.height
        {
            let msg = format!(
                "block {}x{}+{}+{} (scansize {}) does not fit a {}x{} frame",
                blk.width, blk.height, blk.x, blk.y, blk.scansize, self.width, self.height
            );
            return Err(CalaError::render(&msg));
        }
        return Ok(());
    }

    /// Writes a tightly packed `width * height * 3` RGB buffer into the
    /// block's region.
    pub fn store_block(&self, blk: &FrameBlock, rgb: &[f32]) -> Result<(), CalaError> {
        self.check_block(blk)?;
        if rgb.len() != blk.pixel_count() * PIXMAP_CHANNELS {
            let msg = format!(
                "block buffer holds {} values, expected {}",
                rgb.len(),
                blk.pixel_count() * PIXMAP_CHANNELS
            );
            return Err(CalaError::render(&msg));
        }
        let origin = blk.origin_offset();
        for (j, row) in blk.row_ranges().enumerate() {
            let src = &rgb[j * blk.width * PIXMAP_CHANNELS..(j + 1) * blk.width * PIXMAP_CHANNELS];
            let dst0 = (origin + row.start) * PIXMAP_CHANNELS;
            for (k, v) in src.iter().enumerate() {
                self.store(dst0 + k, *v);
            }
        }
        return Ok(());
    }

    /// Visits the block scanline by scanline. Each row reads `width`
    /// pixels; consecutive rows are `scansize` pixels apart in the buffer.
    pub fn read_block<F>(&self, blk: &FrameBlock, mut f: F) -> Result<(), CalaError>
    where
        F: FnMut(usize, &[f32]) -> Result<(), CalaError>,
    {
        self.check_block(blk)?;
        let origin = blk.origin_offset();
        let mut row_buf: Vec<f32> = Vec::with_capacity(blk.width * PIXMAP_CHANNELS);
        for (j, row) in blk.row_ranges().enumerate() {
            row_buf.clear();
            let start = (origin + row.start) * PIXMAP_CHANNELS;
            let end = (origin + row.end) * PIXMAP_CHANNELS;
            for i in start..end {
                row_buf.push(self.load(i));
            }
            f(j, &row_buf)?;
        }
        return Ok(());
    }

    pub fn to_rgb_vec(&self) -> Vec<f32> {
        return self.pixels.iter().map(|p| f32::from_bits(p.load(Ordering::Relaxed))).collect();
    }
}

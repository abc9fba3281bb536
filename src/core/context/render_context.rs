use super::frame_block::*;
use super::pixmap::*;
use crate::core::error::*;
use crate::core::options::*;
use crate::core::scene::*;

use log::*;
use std::path::Path;

/// Root object of one render session: options, the scene, the frame buffer
/// and the block partition of that frame buffer.
///
/// The context is configured through `&mut self` and then shared read-only
/// (behind an `Arc`) with the renderer and the display loop, so the block
/// list cannot change while a render is running.
pub struct RenderContext {
    pub opt: RenderOptions,
    pub scn: Scene,
    pub framebuf: Pixmap,
    blocks: Vec<FrameBlock>,
    block_dims: (usize, usize),
}

impl RenderContext {
    pub fn new(opt: &RenderOptions, scn: Scene) -> Result<Self, CalaError> {
        opt.validate()?;
        let mut ctx = RenderContext {
            opt: *opt,
            scn,
            framebuf: Pixmap::new(opt.width, opt.height),
            blocks: Vec::new(),
            block_dims: (opt.block_size, opt.block_size),
        };
        ctx.set_block_size(opt.block_size, opt.block_size)?;
        return Ok(ctx);
    }

    /// Builds a context from a configuration file layered over the defaults.
    pub fn from_config(path: &Path, scn: Scene) -> Result<Self, CalaError> {
        let mut opt = RenderOptions::new();
        load_config(&mut opt, path)?;
        return Self::new(&opt, scn);
    }

    /// Re-partitions the frame into blocks of at most `xsz` x `ysz`.
    /// The previous block list is discarded; pixels are left untouched.
    /// `opt.block_size` only follows square sizes, `block_dims()` is the
    /// partition actually in use.
    pub fn set_block_size(&mut self, xsz: usize, ysz: usize) -> Result<(), CalaError> {
        if xsz == 0 || ysz == 0 {
            let msg = format!("block size must be positive, got {}x{}", xsz, ysz);
            return Err(CalaError::config(&msg));
        }
        let width = self.framebuf.width();
        let height = self.framebuf.height();
        self.blocks = partition_frame(width, height, xsz, ysz);
        self.block_dims = (xsz, ysz);
        if xsz == ysz {
            self.opt.block_size = xsz;
        }
        debug!(
            "partitioned {}x{} frame into {} blocks of {}x{}",
            width,
            height,
            self.blocks.len(),
            xsz,
            ysz
        );
        return Ok(());
    }

    /// Reallocates the frame buffer and re-partitions it with the current
    /// block size.
    pub fn resize_framebuffer(&mut self, width: usize, height: usize) -> Result<(), CalaError> {
        let resized = RenderOptions {
            width,
            height,
            ..self.opt
        };
        resized.validate()?;
        self.opt.width = width;
        self.opt.height = height;
        self.framebuf.resize(width, height);
        let (xsz, ysz) = self.block_dims;
        return self.set_block_size(xsz, ysz);
    }

    pub fn blocks(&self) -> &[FrameBlock] {
        return &self.blocks;
    }

    pub fn num_blocks(&self) -> usize {
        return self.blocks.len();
    }

    pub fn block_dims(&self) -> (usize, usize) {
        return self.block_dims;
    }

    /// Frame buffer size, `[width, height]`.
    pub fn resolution(&self) -> [usize; 2] {
        return [self.framebuf.width(), self.framebuf.height()];
    }
}

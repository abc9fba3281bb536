use crate::core::error::*;

use bitflags::bitflags;

bitflags! {
    /// Global overrides to disable renderer features.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u32 {
        const MOTION_BLUR = 1;
        const DEPTH_OF_FIELD = 2;
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        RenderFlags::MOTION_BLUR | RenderFlags::DEPTH_OF_FIELD
    }
}

/// Largest frame buffer accepted, in pixels (16384 x 8192).
pub const MAX_FRAME_PIXELS: usize = 1 << 27;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// output image dimensions
    pub width: usize,
    pub height: usize,
    /// samples per pixel
    pub samples: u32,
    /// shutter interval in milliseconds (animation range)
    pub time_start: i64,
    pub time_end: i64,
    pub flags: RenderFlags,
    pub block_size: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: 640,
            height: 480,
            samples: 1,
            time_start: 0,
            time_end: 0,
            flags: RenderFlags::default(),
            block_size: 32,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        RenderOptions::default()
    }

    pub fn enable(&mut self, bit: RenderFlags) {
        self.flags.insert(bit);
    }

    pub fn disable(&mut self, bit: RenderFlags) {
        self.flags.remove(bit);
    }

    pub fn is_enabled(&self, bit: RenderFlags) -> bool {
        return self.flags.contains(bit);
    }

    pub fn set_enabled(&mut self, bit: RenderFlags, on: bool) {
        self.flags.set(bit, on);
    }

    /// Rejects option sets no render can start from.
    pub fn validate(&self) -> Result<(), CalaError> {
        if self.width == 0 || self.height == 0 {
            let msg = format!(
                "output size must be positive, got {}x{}",
                self.width, self.height
            );
            return Err(CalaError::config(&msg));
        }
        let pixels = self.width.checked_mul(self.height);
        if pixels.map_or(true, |n| n > MAX_FRAME_PIXELS) {
            let msg = format!(
                "output size {}x{} exceeds the {} pixel limit",
                self.width, self.height, MAX_FRAME_PIXELS
            );
            return Err(CalaError::config(&msg));
        }
        if self.block_size == 0 {
            return Err(CalaError::config("block size must be positive"));
        }
        if self.samples == 0 {
            return Err(CalaError::config("samples per pixel must be positive"));
        }
        if self.time_end < self.time_start {
            let msg = format!(
                "time range ends before it starts ({} > {})",
                self.time_start, self.time_end
            );
            return Err(CalaError::config(&msg));
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opt = RenderOptions::new();
        assert!(opt.is_enabled(RenderFlags::MOTION_BLUR));
        assert!(opt.is_enabled(RenderFlags::DEPTH_OF_FIELD));
        assert!(opt.validate().is_ok());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut opt = RenderOptions::new();
        opt.disable(RenderFlags::MOTION_BLUR);
        assert!(!opt.is_enabled(RenderFlags::MOTION_BLUR));
        assert!(opt.is_enabled(RenderFlags::DEPTH_OF_FIELD));
        opt.enable(RenderFlags::MOTION_BLUR);
        opt.disable(RenderFlags::DEPTH_OF_FIELD);
        assert!(opt.is_enabled(RenderFlags::MOTION_BLUR));
        assert!(!opt.is_enabled(RenderFlags::DEPTH_OF_FIELD));
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut opt = RenderOptions::new();
        opt.width = 0;
        assert!(opt.validate().unwrap_err().is_config());

        let mut opt = RenderOptions::new();
        opt.block_size = 0;
        assert!(opt.validate().is_err());

        let mut opt = RenderOptions::new();
        opt.time_start = 10;
        opt.time_end = 5;
        assert!(opt.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_frames() {
        let mut opt = RenderOptions::new();
        opt.width = 1 << 40;
        opt.height = 1 << 30;
        assert!(opt.validate().unwrap_err().is_config());

        let mut opt = RenderOptions::new();
        opt.width = usize::MAX;
        opt.height = 2;
        assert!(opt.validate().unwrap_err().is_config());

        let mut opt = RenderOptions::new();
        opt.width = 16384;
        opt.height = 8193;
        assert!(opt.validate().is_err());
        opt.height = 8192;
        assert!(opt.validate().is_ok());
    }
}

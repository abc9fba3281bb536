use std::ops::Range;

/// A rectangular region of the frame plus its render priority.
///
/// Blocks travel between threads by value; a consumer never sees a block
/// the producer can still change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameBlock {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// full scanline size of the owning frame buffer, in pixels
    pub scansize: usize,
    /// scheduling hint, lower values are rendered first
    pub prio: i32,
}

impl FrameBlock {
    pub fn new(x: usize, y: usize, width: usize, height: usize, scansize: usize) -> Self {
        FrameBlock {
            x,
            y,
            width,
            height,
            scansize,
            prio: 0,
        }
    }

    pub fn with_prio(mut self, prio: i32) -> Self {
        self.prio = prio;
        return self;
    }

    pub fn pixel_count(&self) -> usize {
        return self.width * self.height;
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        return self.x <= x && x < self.x + self.width && self.y <= y && y < self.y + self.height;
    }

    /// Offset of the block origin in the owning frame buffer, in pixels.
    pub fn origin_offset(&self) -> usize {
        return self.y * self.scansize + self.x;
    }

    /// Pixel ranges of each scanline, relative to the block origin.
    /// Row `i` starts at `i * scansize` and is `width` pixels long.
    pub fn row_ranges(&self) -> impl Iterator<Item = Range<usize>> {
        let width = self.width;
        let scansize = self.scansize;
        (0..self.height).map(move |i| {
            let start = i * scansize;
            start..start + width
        })
    }
}

fn centre_distance(x: usize, y: usize, w: usize, h: usize, width: usize, height: usize) -> i32 {
    // doubled coordinates keep the centre on the integer grid
    let dx = (2 * x + w) as f64 - width as f64;
    let dy = (2 * y + h) as f64 - height as f64;
    return (0.5 * f64::sqrt(dx * dx + dy * dy)) as i32;
}

/// Tiles a `width` x `height` frame into row-major blocks of at most
/// `xsz` x `ysz` pixels. The last column and row are clipped to the frame.
/// Priorities grow with the distance from the frame centre.
pub fn partition_frame(width: usize, height: usize, xsz: usize, ysz: usize) -> Vec<FrameBlock> {
    assert!(xsz > 0 && ysz > 0);
    let nx = width.div_ceil(xsz);
    let ny = height.div_ceil(ysz);
    let mut blocks = Vec::with_capacity(nx * ny);
    for by in 0..ny {
        for bx in 0..nx {
            let x = bx * xsz;
            let y = by * ysz;
            let w = usize::min(xsz, width - x);
            let h = usize::min(ysz, height - y);
            let prio = centre_distance(x, y, w, h, width, height);
            blocks.push(FrameBlock::new(x, y, w, h, width).with_prio(prio));
        }
    }
    return blocks;
}

pub fn num_blocks(width: usize, height: usize, xsz: usize, ysz: usize) -> usize {
    return width.div_ceil(xsz) * height.div_ceil(ysz);
}

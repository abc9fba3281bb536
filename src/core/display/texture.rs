use crate::core::context::{Pixmap, PIXMAP_CHANNELS};
use crate::core::error::*;

use std::marker::PhantomData;

/// Display-resident RGB float image the composite pass samples from.
///
/// It belongs to the display thread. The raw-pointer marker makes it
/// `!Send`, so a render-completion callback can never capture it:
///
/// ```compile_fail
/// use calacirya::core::display::Texture;
/// let tex = Texture::new(4, 4);
/// std::thread::spawn(move || drop(tex));
/// ```
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<f32>,
    texels_written: u64,
    _display_thread: PhantomData<*const ()>,
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Texture {
            width,
            height,
            texels: vec![0.0; width * height * PIXMAP_CHANNELS],
            texels_written: 0,
            _display_thread: PhantomData,
        }
    }

    /// Initial upload of the whole frame buffer.
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let mut tex = Texture::new(pixmap.width(), pixmap.height());
        tex.texels = pixmap.to_rgb_vec();
        return tex;
    }

    pub fn width(&self) -> usize {
        return self.width;
    }

    pub fn height(&self) -> usize {
        return self.height;
    }

    /// Replaces a `w` x `h` region at `(x, y)` with tightly packed RGB data.
    pub fn sub_image(
        &mut self,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        data: &[f32],
    ) -> Result<(), CalaError> {
        if x + w > self.width || y + h > self.height {
            let msg = format!(
                "sub-image {}x{}+{}+{} outside {}x{} texture",
                w, h, x, y, self.width, self.height
            );
            return Err(CalaError::display(&msg));
        }
        if data.len() != w * h * PIXMAP_CHANNELS {
            let msg = format!(
                "sub-image data holds {} values, expected {}",
                data.len(),
                w * h * PIXMAP_CHANNELS
            );
            return Err(CalaError::display(&msg));
        }
        let row_len = w * PIXMAP_CHANNELS;
        for j in 0..h {
            let dst = ((y + j) * self.width + x) * PIXMAP_CHANNELS;
            self.texels[dst..dst + row_len].copy_from_slice(&data[j * row_len..(j + 1) * row_len]);
        }
        self.texels_written += (w * h) as u64;
        return Ok(());
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> [f32; 3] {
        let i = (y * self.width + x) * PIXMAP_CHANNELS;
        return [self.texels[i], self.texels[i + 1], self.texels[i + 2]];
    }

    /// Total texels replaced through `sub_image` since creation.
    pub fn texels_written(&self) -> u64 {
        return self.texels_written;
    }
}

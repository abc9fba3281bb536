use crate::core::error::*;

/// A composited, gamma-corrected image ready to be shown, one `0RGB` word
/// per pixel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Frame {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width * height, 0);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        return self.pixels[y * self.width + x];
    }

    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for p in self.pixels.iter() {
            bytes.push(((p >> 16) & 0xff) as u8);
            bytes.push(((p >> 8) & 0xff) as u8);
            bytes.push((p & 0xff) as u8);
        }
        return bytes;
    }
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    return ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
}

/// Host events, already translated to character codes and pixel positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key: u8, x: i32, y: i32 },
    KeyUp { key: u8, x: i32, y: i32 },
    Motion { x: i32, y: i32 },
    Resize { width: usize, height: usize },
    Close,
}

/// Windowing/presentation host driven by the display loop. Every method is
/// called on the display thread.
pub trait Display {
    fn start(&mut self, title: &str, resolution: &[usize; 2]) -> Result<(), CalaError>;
    fn present(&mut self, frame: &Frame) -> Result<(), CalaError>;
    fn end(&mut self) -> Result<(), CalaError>;

    /// Events received since the last call.
    fn poll_events(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }

    /// Called instead of `present` on ticks with nothing new to show.
    fn idle(&mut self) -> Result<(), CalaError> {
        Ok(())
    }

    fn is_open(&self) -> bool {
        true
    }

    /// Interactive displays keep running after the render completes.
    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_and_bytes() {
        let mut f = Frame::new(2, 1);
        f.pixels[0] = pack_rgb(1, 2, 3);
        f.pixels[1] = pack_rgb(255, 0, 128);
        assert_eq!(f.to_rgb_bytes(), vec![1, 2, 3, 255, 0, 128]);
        assert_eq!(f.get(1, 0), 0xff0080);
    }
}

use crate::core::display::*;
use crate::core::error::*;

use image::RgbImage;
use log::*;
use std::path::{Path, PathBuf};

/// Display without a window. Keeps the most recent frame and writes it to
/// `output` when the loop ends.
#[derive(Default)]
pub struct HeadlessDisplay {
    output: Option<PathBuf>,
    frame: Frame,
    presents: usize,
    started: bool,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        HeadlessDisplay::default()
    }

    pub fn with_output(path: &Path) -> Self {
        HeadlessDisplay {
            output: Some(path.to_path_buf()),
            ..HeadlessDisplay::default()
        }
    }

    pub fn frame(&self) -> &Frame {
        return &self.frame;
    }

    pub fn presents(&self) -> usize {
        return self.presents;
    }

    pub fn write_image(&self, path: &Path) -> Result<(), CalaError> {
        let bytes = self.frame.to_rgb_bytes();
        let img = match RgbImage::from_vec(self.frame.width as u32, self.frame.height as u32, bytes)
        {
            Some(img) => img,
            None => {
                return Err(CalaError::display("frame size does not match its pixels"));
            }
        };
        img.save(path)?;
        info!("wrote {}", path.display());
        return Ok(());
    }
}

impl Display for HeadlessDisplay {
    fn start(&mut self, title: &str, resolution: &[usize; 2]) -> Result<(), CalaError> {
        debug!("headless display \"{}\" {}x{}", title, resolution[0], resolution[1]);
        self.frame = Frame::new(resolution[0], resolution[1]);
        self.presents = 0;
        self.started = true;
        return Ok(());
    }

    fn present(&mut self, frame: &Frame) -> Result<(), CalaError> {
        if !self.started {
            return Err(CalaError::display("present before start"));
        }
        self.frame.clone_from(frame);
        self.presents += 1;
        return Ok(());
    }

    fn end(&mut self) -> Result<(), CalaError> {
        if let Some(path) = self.output.as_ref() {
            self.write_image(path)?;
        }
        self.started = false;
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_requires_start() {
        let mut d = HeadlessDisplay::new();
        assert!(d.present(&Frame::new(1, 1)).is_err());
        d.start("t", &[2, 2]).unwrap();
        let mut f = Frame::new(2, 2);
        f.pixels[3] = pack_rgb(9, 8, 7);
        d.present(&f).unwrap();
        assert_eq!(d.presents(), 1);
        assert_eq!(d.frame().get(1, 1), pack_rgb(9, 8, 7));
        d.end().unwrap();
    }

    #[test]
    fn test_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut d = HeadlessDisplay::with_output(&path);
        d.start("t", &[3, 2]).unwrap();
        let mut f = Frame::new(3, 2);
        f.pixels[0] = pack_rgb(255, 0, 0);
        d.present(&f).unwrap();
        d.end().unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(2, 1).0, [0, 0, 0]);
    }
}

use super::display::{Display, Frame, InputEvent};
use crate::core::error::*;

/// Fans one display loop out to several hosts, e.g. a live window plus an
/// image file written at the end.
pub struct MultipleDisplay {
    pub displays: Vec<Box<dyn Display>>,
}

impl MultipleDisplay {
    pub fn new() -> Self {
        MultipleDisplay {
            displays: Vec::new(),
        }
    }

    pub fn add_display(&mut self, display: Box<dyn Display>) {
        self.displays.push(display);
    }

    pub fn len(&self) -> usize {
        return self.displays.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.displays.is_empty();
    }
}

impl Default for MultipleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MultipleDisplay {
    fn start(&mut self, title: &str, resolution: &[usize; 2]) -> Result<(), CalaError> {
        for d in self.displays.iter_mut() {
            d.start(title, resolution)?;
        }
        return Ok(());
    }

    fn present(&mut self, frame: &Frame) -> Result<(), CalaError> {
        for d in self.displays.iter_mut() {
            d.present(frame)?;
        }
        return Ok(());
    }

    fn end(&mut self) -> Result<(), CalaError> {
        for d in self.displays.iter_mut() {
            d.end()?;
        }
        return Ok(());
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for d in self.displays.iter_mut() {
            events.append(&mut d.poll_events());
        }
        return events;
    }

    fn idle(&mut self) -> Result<(), CalaError> {
        for d in self.displays.iter_mut() {
            d.idle()?;
        }
        return Ok(());
    }

    fn is_open(&self) -> bool {
        return self.displays.iter().all(|d| d.is_open());
    }

    fn is_interactive(&self) -> bool {
        return self.displays.iter().any(|d| d.is_interactive());
    }
}

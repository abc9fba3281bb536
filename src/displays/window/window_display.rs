use crate::core::base::KEY_ESCAPE;
use crate::core::display::*;
use crate::core::error::*;

use log::*;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

/// Live window backed by `minifb`. Translates keyboard, pointer and resize
/// activity into `InputEvent`s for the display loop.
#[derive(Default)]
pub struct WindowDisplay {
    window: Option<Window>,
    size: (usize, usize),
    mouse: (i32, i32),
}

fn key_code(key: Key) -> Option<u8> {
    let code = match key {
        Key::A => b'a',
        Key::B => b'b',
        Key::C => b'c',
        Key::D => b'd',
        Key::E => b'e',
        Key::F => b'f',
        Key::G => b'g',
        Key::H => b'h',
        Key::I => b'i',
        Key::J => b'j',
        Key::K => b'k',
        Key::L => b'l',
        Key::M => b'm',
        Key::N => b'n',
        Key::O => b'o',
        Key::P => b'p',
        Key::Q => b'q',
        Key::R => b'r',
        Key::S => b's',
        Key::T => b't',
        Key::U => b'u',
        Key::V => b'v',
        Key::W => b'w',
        Key::X => b'x',
        Key::Y => b'y',
        Key::Z => b'z',
        Key::Key0 => b'0',
        Key::Key1 => b'1',
        Key::Key2 => b'2',
        Key::Key3 => b'3',
        Key::Key4 => b'4',
        Key::Key5 => b'5',
        Key::Key6 => b'6',
        Key::Key7 => b'7',
        Key::Key8 => b'8',
        Key::Key9 => b'9',
        Key::Space => b' ',
        Key::Enter => b'\r',
        Key::Escape => KEY_ESCAPE,
        _ => {
            return None;
        }
    };
    return Some(code);
}

impl WindowDisplay {
    pub fn new() -> Self {
        WindowDisplay::default()
    }
}

impl Display for WindowDisplay {
    fn start(&mut self, title: &str, resolution: &[usize; 2]) -> Result<(), CalaError> {
        let options = WindowOptions {
            resize: true,
            ..WindowOptions::default()
        };
        let window = Window::new(title, resolution[0], resolution[1], options)
            .map_err(|e| CalaError::display(&e.to_string()))?;
        self.size = window.get_size();
        self.window = Some(window);
        return Ok(());
    }

    fn present(&mut self, frame: &Frame) -> Result<(), CalaError> {
        if let Some(window) = self.window.as_mut() {
            return window
                .update_with_buffer(&frame.pixels, frame.width, frame.height)
                .map_err(|e| CalaError::display(&e.to_string()));
        }
        return Err(CalaError::display("window is not open"));
    }

    fn idle(&mut self) -> Result<(), CalaError> {
        if let Some(window) = self.window.as_mut() {
            window.update();
        }
        return Ok(());
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let window = match self.window.as_ref() {
            Some(w) => w,
            None => {
                return events;
            }
        };
        if let Some((mx, my)) = window.get_mouse_pos(MouseMode::Pass) {
            let (x, y) = (mx as i32, my as i32);
            if (x, y) != self.mouse {
                self.mouse = (x, y);
                events.push(InputEvent::Motion { x, y });
            }
        }
        let (x, y) = self.mouse;
        for key in window.get_keys_pressed(KeyRepeat::No) {
            if let Some(code) = key_code(key) {
                events.push(InputEvent::KeyDown { key: code, x, y });
            }
        }
        for key in window.get_keys_released() {
            if let Some(code) = key_code(key) {
                events.push(InputEvent::KeyUp { key: code, x, y });
            }
        }
        let size = window.get_size();
        if size != self.size && size.0 > 0 && size.1 > 0 {
            self.size = size;
            events.push(InputEvent::Resize {
                width: size.0,
                height: size.1,
            });
        }
        if !window.is_open() {
            events.push(InputEvent::Close);
        }
        return events;
    }

    fn is_open(&self) -> bool {
        return self.window.as_ref().map(|w| w.is_open()).unwrap_or(false);
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn end(&mut self) -> Result<(), CalaError> {
        debug!("closing window");
        self.window = None;
        return Ok(());
    }
}

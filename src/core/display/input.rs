use crate::core::base::*;

/// Pressed-key table plus the pointer column used for gamma dragging.
#[derive(Debug, Clone)]
pub struct InputState {
    keystate: [bool; KEY_TABLE_SIZE],
    prev_x: i32,
    tracking: bool,
}

impl Default for InputState {
    fn default() -> Self {
        InputState {
            keystate: [false; KEY_TABLE_SIZE],
            prev_x: 0,
            tracking: false,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        InputState::default()
    }

    pub fn key_down(&mut self, key: u8, x: i32, _y: i32) {
        if (key as usize) < KEY_TABLE_SIZE {
            self.keystate[key as usize] = true;
        }
        self.tracking = true;
        self.prev_x = x;
    }

    /// Any release stops pointer tracking until the next press.
    pub fn key_up(&mut self, key: u8) {
        if (key as usize) < KEY_TABLE_SIZE {
            self.keystate[key as usize] = false;
        }
        self.tracking = false;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        return (key as usize) < KEY_TABLE_SIZE && self.keystate[key as usize];
    }

    /// Horizontal displacement since the previous motion event, or `None`
    /// while no key is held.
    pub fn motion(&mut self, x: i32, _y: i32) -> Option<i32> {
        if !self.tracking {
            return None;
        }
        let dx = x - self.prev_x;
        self.prev_x = x;
        return Some(dx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table() {
        let mut input = InputState::new();
        input.key_down(b'g', 10, 10);
        assert!(input.is_pressed(b'g'));
        assert!(!input.is_pressed(b'G'));
        input.key_up(b'g');
        assert!(!input.is_pressed(b'g'));
        // out of range codes are ignored
        input.key_down(200, 0, 0);
        assert!(!input.is_pressed(200));
    }

    #[test]
    fn test_motion_tracking() {
        let mut input = InputState::new();
        assert_eq!(input.motion(5, 5), None);
        input.key_down(b'g', 10, 0);
        assert_eq!(input.motion(15, 0), Some(5));
        assert_eq!(input.motion(12, 3), Some(-3));
        input.key_up(b'g');
        assert_eq!(input.motion(20, 0), None);
    }
}
